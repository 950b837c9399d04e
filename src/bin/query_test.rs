use sheetcrud::query::{natural_cmp, paginate, search, sort_records};
use sheetcrud::record::Record;
use std::cmp::Ordering;

// Helper function to build a record from literal pairs
fn record(pairs: &[(&str, &str)]) -> Record {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn sample_records() -> Vec<Record> {
    vec![
        record(&[("Cmdb_id", "1"), ("name", "Web Server"), ("status", "active")]),
        record(&[("Cmdb_id", "2"), ("name", "Database"), ("status", "retired")]),
        record(&[("Cmdb_id", "3"), ("name", "Backup server"), ("status", "active")]),
    ]
}

fn test_search() {
    println!("\n====== Testing search ======");
    let records = sample_records();

    // Empty keyword is the identity
    let all = search(records.clone(), "");
    assert_eq!(all, records);
    println!("✓ Empty keyword returns all records unchanged");

    // Case-insensitive substring across any field
    let hits = search(records.clone(), "SERVER");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["name"], "Web Server");
    assert_eq!(hits[1]["name"], "Backup server");
    println!("✓ Keyword matches case-insensitively in any field");

    // Matches against non-name fields too
    let hits = search(records.clone(), "retired");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["Cmdb_id"], "2");
    println!("✓ Keyword matches the status field");

    let hits = search(records, "no-such-value");
    assert!(hits.is_empty());
    println!("✓ Unmatched keyword yields an empty list");
}

fn test_natural_cmp() {
    println!("\n====== Testing natural_cmp ======");

    assert_eq!(natural_cmp("9", "10"), Ordering::Less);
    println!("✓ \"9\" sorts before \"10\"");

    assert_eq!(natural_cmp("item2", "item10"), Ordering::Less);
    assert_eq!(natural_cmp("item10", "item2"), Ordering::Greater);
    println!("✓ Digit runs inside strings compare numerically");

    assert_eq!(natural_cmp("Apple", "apple"), Ordering::Equal);
    println!("✓ Comparison is case-insensitive");

    assert_eq!(natural_cmp("007", "7"), Ordering::Equal);
    println!("✓ Leading zeros do not affect numeric comparison");

    assert_eq!(natural_cmp("", "a"), Ordering::Less);
    assert_eq!(natural_cmp("ab", "abc"), Ordering::Less);
    println!("✓ Prefixes sort before longer strings");
}

fn test_sort_records() {
    println!("\n====== Testing sort_records ======");
    let records = vec![
        record(&[("id", "1"), ("name", "b")]),
        record(&[("id", "2"), ("name", "a")]),
    ];

    let asc = sort_records(records.clone(), "name", "asc");
    assert_eq!(asc[0]["name"], "a");
    assert_eq!(asc[1]["name"], "b");
    println!("✓ Ascending sort by name");

    let desc = sort_records(records.clone(), "name", "desc");
    assert_eq!(desc[0]["name"], "b");
    assert_eq!(desc[1]["name"], "a");
    println!("✓ Descending sort is the reverse");

    // Empty key or order leaves the sequence untouched
    let same = sort_records(records.clone(), "", "asc");
    assert_eq!(same, records);
    let same = sort_records(records.clone(), "name", "");
    assert_eq!(same, records);
    println!("✓ Empty key/order is the identity");

    // An unrecognized order keeps the original sequence
    let same = sort_records(records.clone(), "name", "sideways");
    assert_eq!(same, records);
    println!("✓ Unknown order value does not reorder");

    // Records missing the sort field sort as the empty string
    let with_gap = vec![
        record(&[("id", "1"), ("name", "b")]),
        record(&[("id", "2")]),
    ];
    let sorted = sort_records(with_gap, "name", "asc");
    assert_eq!(sorted[0]["id"], "2");
    println!("✓ Missing field sorts first ascending");

    // Numeric-aware ordering on the sorted output
    let numeric = vec![
        record(&[("n", "10")]),
        record(&[("n", "9")]),
        record(&[("n", "1")]),
    ];
    let sorted = sort_records(numeric, "n", "asc");
    let order: Vec<&str> = sorted.iter().map(|r| r["n"].as_str()).collect();
    assert_eq!(order, vec!["1", "9", "10"]);
    println!("✓ \"10\" sorts after \"9\", not lexically");
}

fn test_paginate() {
    println!("\n====== Testing paginate ======");
    let records: Vec<Record> = (1..=25)
        .map(|i| record(&[("Cmdb_id", &i.to_string())]))
        .collect();

    let page1 = paginate(records.clone(), 1, 10);
    assert_eq!(page1.items.len(), 10);
    assert_eq!(page1.total, 25);
    assert_eq!(page1.items[0]["Cmdb_id"], "1");
    println!("✓ Page 1 has 10 of 25 items");

    let page3 = paginate(records.clone(), 3, 10);
    assert_eq!(page3.items.len(), 5);
    assert_eq!(page3.total, 25);
    assert_eq!(page3.items[0]["Cmdb_id"], "21");
    println!("✓ Page 3 has the trailing 5 items");

    let page4 = paginate(records.clone(), 4, 10);
    assert!(page4.items.is_empty());
    assert_eq!(page4.total, 25);
    println!("✓ Page past the end is empty, total still 25");

    // Page 0 clamps to 1 instead of slicing out of range
    let clamped = paginate(records.clone(), 0, 10);
    assert_eq!(clamped.page, 1);
    assert_eq!(clamped.items.len(), 10);
    assert_eq!(clamped.items[0]["Cmdb_id"], "1");
    println!("✓ Page 0 clamps to page 1");

    let empty = paginate(Vec::new(), 1, 10);
    assert!(empty.items.is_empty());
    assert_eq!(empty.total, 0);
    println!("✓ Empty input paginates to an empty page");
}

fn main() {
    test_search();
    test_natural_cmp();
    test_sort_records();
    test_paginate();

    println!("\nAll query pipeline tests passed!");
}

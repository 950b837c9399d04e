use serde::Serialize;
use std::cmp::Ordering;

use crate::record::Record;

/// One page of a filtered record list. `total` is the size of the
/// filtered set, not the whole dataset.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub items: Vec<Record>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

/// Keep the records where any field value contains `keyword` as a
/// case-insensitive substring. An empty keyword keeps everything.
pub fn search(records: Vec<Record>, keyword: &str) -> Vec<Record> {
    if keyword.is_empty() {
        return records;
    }

    let needle = keyword.to_lowercase();
    records
        .into_iter()
        .filter(|record| {
            record
                .values()
                .any(|value| value.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Sort records by the named field, comparing values case-insensitively
/// with numeric-aware ordering ("10" sorts after "9"). A record without
/// the field sorts as the empty string.
///
/// An empty `key` or `order` leaves the sequence untouched; an order
/// other than `asc`/`desc` also keeps the original order.
pub fn sort_records(records: Vec<Record>, key: &str, order: &str) -> Vec<Record> {
    if key.is_empty() || order.is_empty() {
        return records;
    }

    let mut sorted = records;
    match order {
        "asc" => sorted.sort_by(|a, b| natural_cmp(field_value(a, key), field_value(b, key))),
        "desc" => sorted.sort_by(|a, b| natural_cmp(field_value(b, key), field_value(a, key))),
        _ => {}
    }
    sorted
}

/// Slice out page `page` (1-based) of `limit` records, clamped to the
/// available data. A page past the end yields no items; `total` is
/// always the input length. `page` is clamped to a minimum of 1.
pub fn paginate(records: Vec<Record>, page: usize, limit: usize) -> Page {
    let page = page.max(1);
    let total = records.len();
    let start = (page - 1).saturating_mul(limit).min(total);

    let items = records.into_iter().skip(start).take(limit).collect();

    Page {
        items,
        total,
        page,
        limit,
    }
}

fn field_value<'a>(record: &'a Record, key: &str) -> &'a str {
    record.get(key).map(String::as_str).unwrap_or("")
}

/// Case-insensitive natural ordering: runs of digits compare by numeric
/// value, everything else character by character.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let mut i = 0;
    let mut j = 0;
    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let end_a = digit_run_end(&a, i);
            let end_b = digit_run_end(&b, j);
            match cmp_digit_runs(&a[i..end_a], &b[j..end_b]) {
                Ordering::Equal => {
                    i = end_a;
                    j = end_b;
                }
                other => return other,
            }
        } else {
            match a[i].cmp(&b[j]) {
                Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
                other => return other,
            }
        }
    }

    (a.len() - i).cmp(&(b.len() - j))
}

fn digit_run_end(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    end
}

// Compare digit runs of arbitrary length without parsing: strip leading
// zeros, then longer run wins, then lexical order decides.
fn cmp_digit_runs(a: &[char], b: &[char]) -> Ordering {
    let a = strip_leading_zeros(a);
    let b = strip_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn strip_leading_zeros(digits: &[char]) -> &[char] {
    let first = digits.iter().position(|c| *c != '0').unwrap_or(digits.len());
    &digits[first..]
}

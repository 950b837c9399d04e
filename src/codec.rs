use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::io::Cursor;

use crate::error::StoreError;
use crate::record::Record;

/// Parse an xlsx document into its header row and records.
///
/// Only the first sheet is read. The first row supplies the column keys;
/// every later row is zipped positionally against them, with missing
/// cells defaulting to the empty string. A sheet with no rows at all is
/// a parse error.
///
/// # Arguments
/// * `bytes` - Raw xlsx file content
///
/// # Returns
/// * `Result<(Vec<String>, Vec<Record>), StoreError>` - Column keys in
///   sheet order plus one record per data row
pub fn decode(bytes: &[u8]) -> Result<(Vec<String>, Vec<Record>), StoreError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| StoreError::Parse("The sheet is empty or has invalid data.".to_string()))?;

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(cell_to_string).collect(),
        None => {
            return Err(StoreError::Parse(
                "The sheet is empty or has invalid data.".to_string(),
            ));
        }
    };

    let records: Vec<Record> = rows
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(i, key)| {
                    let value = row.get(i).map(cell_to_string).unwrap_or_default();
                    (key.clone(), value)
                })
                .collect()
        })
        .collect();

    Ok((headers, records))
}

/// Serialize records into a single-sheet xlsx document.
///
/// Column order is the carried `headers` list, extended with any record
/// keys not already present (in first-seen order). Values a record does
/// not carry are written as empty cells, so `decode(encode(h, rs))`
/// reproduces the record values.
///
/// # Arguments
/// * `headers` - Column keys carried from the original decode
/// * `records` - Records to write, one sheet row each
///
/// # Returns
/// * `Result<Vec<u8>, StoreError>` - xlsx file content as bytes
pub fn encode(headers: &[String], records: &[Record]) -> Result<Vec<u8>, StoreError> {
    let columns = column_set(headers, records);

    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name("Sheet1")?;

    for (c, key) in columns.iter().enumerate() {
        worksheet.write_string(0, c as u16, key.as_str())?;
    }

    for (r, record) in records.iter().enumerate() {
        for (c, key) in columns.iter().enumerate() {
            if let Some(value) = record.get(key) {
                worksheet.write_string((r + 1) as u32, c as u16, value.as_str())?;
            }
        }
    }

    workbook.push_worksheet(worksheet);

    let buffer = workbook.save_to_buffer()?;

    Ok(buffer)
}

/// The full column list for an encode: carried headers first, then any
/// extra record keys in first-seen order.
pub fn column_set(headers: &[String], records: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = headers.to_vec();
    for record in records {
        for key in record.keys() {
            if !columns.iter().any(|column| column == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

// Cell values are strings end-to-end; numeric cells written by other
// tools come back in their shortest display form (42, not 42.0).
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

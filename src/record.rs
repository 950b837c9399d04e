use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One row of a dataset: column name to cell value. The empty string is
/// the canonical "no value".
pub type Record = BTreeMap<String, String>;

/// The unique, immutable identifier column present in every dataset.
pub const ID_FIELD: &str = "Cmdb_id";

/// A column key paired with its human-readable display label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderField {
    pub key: String,
    pub label: String,
}

/// Derive the display label for a column key: underscores become spaces
/// and each word is capitalized.
///
/// # Examples
/// ```
/// use sheetcrud::record::label_for;
///
/// assert_eq!(label_for("Cmdb_id"), "Cmdb Id");
/// assert_eq!(label_for("serial_number"), "Serial Number");
/// ```
pub fn label_for(key: &str) -> String {
    key.split('_')
        .map(capitalize)
        .collect::<Vec<String>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Header projection for list responses: an ordered list of
/// `{key, label}` pairs.
pub fn header_fields(keys: &[String]) -> Vec<HeaderField> {
    keys.iter()
        .map(|key| HeaderField {
            key: key.clone(),
            label: label_for(key),
        })
        .collect()
}

/// Header projection for single-record responses: a `key -> label` map.
pub fn header_label_map(keys: &[String]) -> BTreeMap<String, String> {
    keys.iter()
        .map(|key| (key.clone(), label_for(key)))
        .collect()
}

/// Coerce a JSON value to its cell string form. Strings pass through,
/// numbers and booleans take their display form, null is the empty
/// string; anything structured falls back to its JSON text.
pub fn coerce_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Build a record from a JSON request body. Non-object bodies produce an
/// empty record.
pub fn record_from_json(body: &Value) -> Record {
    match body.as_object() {
        Some(fields) => fields
            .iter()
            .map(|(key, value)| (key.clone(), coerce_value(value)))
            .collect(),
        None => Record::new(),
    }
}

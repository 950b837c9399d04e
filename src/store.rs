use chrono::Utc;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::codec;
use crate::error::StoreError;
use crate::locator;
use crate::query::{self, Page};
use crate::record::{self, HeaderField, Record, ID_FIELD};

/// Read options for [`RecordStore::list`]. Empty strings mean "not
/// requested" for keyword and sort.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub keyword: String,
    pub sort_key: String,
    pub sort_order: String,
    pub page: usize,
    pub limit: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery {
            keyword: String::new(),
            sort_key: String::new(),
            sort_order: String::new(),
            page: 1,
            limit: 10,
        }
    }
}

/// A page of records plus the dataset's display headers.
#[derive(Debug)]
pub struct ListResult {
    pub headers: Vec<HeaderField>,
    pub page: Page,
}

/// A single record plus its display headers and the fields the UI must
/// not let the user edit.
#[derive(Debug)]
pub struct GetResult {
    pub record: Record,
    pub headers: BTreeMap<String, String>,
    pub non_editable: Vec<String>,
}

/// Capability surface of a dataset backend. The file-backed
/// implementation is [`FileStore`]; an embedded database could slot in
/// behind the same trait without touching the query pipeline.
pub trait RecordStore {
    fn list(&self, name: &str, query: &ListQuery) -> Result<ListResult, StoreError>;
    fn get(&self, name: &str, id: &str) -> Result<GetResult, StoreError>;
    fn create(&self, name: &str, body: &Value) -> Result<Record, StoreError>;
    fn update(&self, name: &str, id: &str, body: &Value) -> Result<Record, StoreError>;
    fn delete(&self, name: &str, id: &str) -> Result<Record, StoreError>;
}

/// Record store backed by one xlsx file per dataset in a single
/// directory.
///
/// Every operation re-reads the backing file, so the file is the sole
/// source of truth and there is no cache to invalidate. Writes rewrite
/// the whole file; two concurrent writers to the same dataset can race
/// and the second rewrite silently wins. That lost-update window is an
/// accepted limitation of the single-writer design.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    /// The directory this store resolves dataset names against.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Raw bytes of a dataset's backing file, for download/export.
    pub fn raw_bytes(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let path = locator::resolve(name, &self.dir);
        if !path.is_file() {
            return Err(StoreError::DatasetNotFound(name.to_string()));
        }
        Ok(fs::read(path)?)
    }

    // Shared head of every operation: resolve, verify, decode.
    fn load(&self, name: &str) -> Result<(PathBuf, Vec<String>, Vec<Record>), StoreError> {
        let path = locator::resolve(name, &self.dir);
        if !path.is_file() {
            return Err(StoreError::DatasetNotFound(name.to_string()));
        }
        let bytes = fs::read(&path)?;
        let (headers, records) = codec::decode(&bytes)?;
        Ok((path, headers, records))
    }

    fn persist(&self, path: &Path, headers: &[String], records: &[Record]) -> Result<(), StoreError> {
        let bytes = codec::encode(headers, records)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    // Current time in milliseconds, bumped past any id already taken so
    // back-to-back creates in the same millisecond stay distinct.
    fn fresh_id(records: &[Record]) -> String {
        let taken: HashSet<&str> = records
            .iter()
            .filter_map(|record| record.get(ID_FIELD))
            .map(String::as_str)
            .collect();

        let mut candidate = Utc::now().timestamp_millis();
        while taken.contains(candidate.to_string().as_str()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    fn position_of(records: &[Record], id: &str) -> Option<usize> {
        records
            .iter()
            .position(|record| record.get(ID_FIELD).map(String::as_str) == Some(id))
    }
}

impl RecordStore for FileStore {
    fn list(&self, name: &str, query: &ListQuery) -> Result<ListResult, StoreError> {
        let (_, headers, records) = self.load(name)?;

        let filtered = query::search(records, &query.keyword);
        let sorted = query::sort_records(filtered, &query.sort_key, &query.sort_order);
        let page = query::paginate(sorted, query.page, query.limit);

        Ok(ListResult {
            headers: record::header_fields(&headers),
            page,
        })
    }

    fn get(&self, name: &str, id: &str) -> Result<GetResult, StoreError> {
        let (_, headers, records) = self.load(name)?;

        let index = Self::position_of(&records, id)
            .ok_or_else(|| StoreError::RecordNotFound(id.to_string()))?;

        Ok(GetResult {
            record: records[index].clone(),
            headers: record::header_label_map(&headers),
            non_editable: vec![ID_FIELD.to_string()],
        })
    }

    fn create(&self, name: &str, body: &Value) -> Result<Record, StoreError> {
        let (path, headers, mut records) = self.load(name)?;

        let mut new_record = record::record_from_json(body);
        // The store owns id assignment; a caller-supplied id is
        // overwritten.
        new_record.insert(ID_FIELD.to_string(), Self::fresh_id(&records));

        records.push(new_record.clone());
        self.persist(&path, &headers, &records)?;

        Ok(new_record)
    }

    fn update(&self, name: &str, id: &str, body: &Value) -> Result<Record, StoreError> {
        let (path, headers, mut records) = self.load(name)?;

        let index = Self::position_of(&records, id)
            .ok_or_else(|| StoreError::RecordNotFound(id.to_string()))?;

        let original_id = records[index].get(ID_FIELD).cloned().unwrap_or_default();
        for (key, value) in record::record_from_json(body) {
            records[index].insert(key, value);
        }
        // The id is immutable even when the body tries to change it.
        records[index].insert(ID_FIELD.to_string(), original_id);

        self.persist(&path, &headers, &records)?;

        Ok(records[index].clone())
    }

    fn delete(&self, name: &str, id: &str) -> Result<Record, StoreError> {
        let (path, headers, mut records) = self.load(name)?;

        let index = Self::position_of(&records, id)
            .ok_or_else(|| StoreError::RecordNotFound(id.to_string()))?;

        let removed = records.remove(index);
        self.persist(&path, &headers, &records)?;

        Ok(removed)
    }
}

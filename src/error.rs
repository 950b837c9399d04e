use thiserror::Error;

/// Failure taxonomy for the record store.
///
/// Every operation on a dataset funnels its failures into one of these
/// variants; the HTTP layer maps them onto status codes and the
/// `{success: false, message}` envelope at the request boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required request parameter is missing or empty.
    #[error("{0}")]
    Validation(String),
    /// The dataset name resolved to a path with no backing file.
    #[error("Dataset {0} not found")]
    DatasetNotFound(String),
    /// No record in the dataset carries the requested id.
    #[error("Record with Cmdb_id {0} not found")]
    RecordNotFound(String),
    /// The backing file exists but is not a usable spreadsheet.
    #[error("{0}")]
    Parse(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Spreadsheet library failure on read or write.
    #[error("{0}")]
    Codec(String),
}

impl From<calamine::XlsxError> for StoreError {
    fn from(err: calamine::XlsxError) -> Self {
        StoreError::Codec(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for StoreError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        StoreError::Codec(err.to_string())
    }
}

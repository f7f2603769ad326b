use crate::error::InputFileError;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// Rows shown in the upload preview.
pub const PREVIEW_ROWS: usize = 5;

/// Filename of the multipart part sent to the backend.
pub const UPLOAD_FILENAME: &str = "batch.csv";

/// An uploaded batch file. The bytes are never modified; previewing borrows
/// them, so what is submitted is exactly what was uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvUpload {
    bytes: Vec<u8>,
}

/// The header and leading rows of an upload, for display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

impl CsvUpload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Parses the whole file and keeps the first `limit` rows. The column set
    /// is not checked; that is the backend's call.
    pub fn preview(&self, limit: usize) -> Result<Preview, InputFileError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(self.bytes.as_slice());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(InputFileError::Empty);
        }

        let mut rows = Vec::new();
        let mut total_rows = 0;
        for record in reader.records() {
            let record = record?;
            if rows.len() < limit {
                rows.push(record.iter().map(str::to_string).collect());
            }
            total_rows += 1;
        }

        Ok(Preview {
            headers,
            rows,
            total_rows,
        })
    }

    /// Encodes the bytes for a hidden form field, so the submit step can
    /// resend them without server-side state.
    pub fn to_staged(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.bytes)
    }

    pub fn from_staged(staged: &str) -> Result<Self, InputFileError> {
        Ok(Self::new(URL_SAFE_NO_PAD.decode(staged.trim())?))
    }
}

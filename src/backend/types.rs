use serde_json::{Map, Value};
use std::fmt;

pub const RECOMMENDED_CROP_KEY: &str = "recommended_crop";

/// Shown when a successful single response carries no crop.
pub const UNKNOWN_CROP: &str = "Unknown";

/// The backend's recommendation, kept exactly as returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crop(String);

impl Crop {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn unknown() -> Self {
        Self::new(UNKNOWN_CROP)
    }

    /// Reads `recommended_crop` from a `/predict` body, falling back to
    /// [`UNKNOWN_CROP`] when it is absent or not a string.
    pub fn from_response(body: &Value) -> Self {
        body.get(RECOMMENDED_CROP_KEY)
            .and_then(Value::as_str)
            .map(Self::new)
            .unwrap_or_else(Self::unknown)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-cased name for display only.
    pub fn display_name(&self) -> String {
        self.0.to_uppercase()
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub type Row = Map<String, Value>;

/// Result of a successful (HTTP 200) `/batch_predict` call.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// The expected JSON array, one mapping per input row.
    Rows(Vec<Row>),
    /// Any other JSON value, kept for display.
    Unexpected(Value),
}

impl BatchOutcome {
    pub fn from_response(body: Value) -> Self {
        match body {
            Value::Array(items) => Self::Rows(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(row) => row,
                        // a scalar element still counts as a row, with no known columns
                        _ => Row::new(),
                    })
                    .collect(),
            ),
            other => Self::Unexpected(other),
        }
    }
}

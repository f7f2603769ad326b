use crate::backend::Row;
use serde_json::Value;

/// Column order of the result table. Response columns outside this list are dropped.
pub const CANONICAL_COLUMNS: [&str; 8] = [
    "N",
    "P",
    "K",
    "temperature",
    "humidity",
    "ph",
    "rainfall",
    "recommended_crop",
];

pub const DOWNLOAD_FILENAME: &str = "crop_recommendations.csv";

/// Batch results projected onto [`CANONICAL_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ResultTable {
    /// Keeps the canonical columns that appear in at least one row, in
    /// canonical order. Row order and count follow the response.
    pub fn project(rows: &[Row]) -> Self {
        let headers: Vec<String> = CANONICAL_COLUMNS
            .iter()
            .filter(|col| rows.iter().any(|row| row.contains_key(**col)))
            .map(|col| col.to_string())
            .collect();

        let rows = rows
            .iter()
            .map(|row| headers.iter().map(|col| cell_text(row.get(col))).collect())
            .collect();

        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Comma-separated export with a header row and no index column.
    pub fn to_csv(&self) -> Result<Vec<u8>, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.into_inner().map_err(|e| e.into_error().into())
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

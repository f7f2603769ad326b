//! The seven soil and climate parameters sent for a single prediction, and
//! the input ranges the form enforces on them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    SoilNutrients,
    Climate,
    SoilAndWater,
}

impl FieldGroup {
    pub const ALL: [FieldGroup; 3] = [Self::SoilNutrients, Self::Climate, Self::SoilAndWater];

    pub fn title(self) -> &'static str {
        match self {
            Self::SoilNutrients => "Soil Nutrients",
            Self::Climate => "Climate Conditions",
            Self::SoilAndWater => "Soil & Water Properties",
        }
    }
}

/// One numeric input widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Wire name, also the form field name.
    pub key: &'static str,
    pub label: &'static str,
    pub group: FieldGroup,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

pub const FIELDS: [FieldSpec; 7] = [
    FieldSpec {
        key: "N",
        label: "Nitrogen (N)",
        group: FieldGroup::SoilNutrients,
        min: 0.0,
        max: 200.0,
        default: 90.0,
        step: 1.0,
    },
    FieldSpec {
        key: "P",
        label: "Phosphorus (P)",
        group: FieldGroup::SoilNutrients,
        min: 0.0,
        max: 200.0,
        default: 42.0,
        step: 1.0,
    },
    FieldSpec {
        key: "K",
        label: "Potassium (K)",
        group: FieldGroup::SoilNutrients,
        min: 0.0,
        max: 250.0,
        default: 43.0,
        step: 1.0,
    },
    FieldSpec {
        key: "temperature",
        label: "Temperature (°C)",
        group: FieldGroup::Climate,
        min: 0.0,
        max: 60.0,
        default: 24.0,
        step: 0.5,
    },
    FieldSpec {
        key: "humidity",
        label: "Humidity (%)",
        group: FieldGroup::Climate,
        min: 0.0,
        max: 100.0,
        default: 82.0,
        step: 0.5,
    },
    FieldSpec {
        key: "ph",
        label: "Soil pH",
        group: FieldGroup::SoilAndWater,
        min: 0.0,
        max: 14.0,
        default: 6.4,
        step: 0.1,
    },
    FieldSpec {
        key: "rainfall",
        label: "Rainfall (mm)",
        group: FieldGroup::SoilAndWater,
        min: 0.0,
        max: 300.0,
        default: 120.0,
        step: 1.0,
    },
];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("{label} is required")]
    Missing { label: &'static str },

    #[error("{label} must be a number, got '{raw}'")]
    NotANumber { label: &'static str, raw: String },

    #[error("{label} must be between {min} and {max}, got {value}")]
    OutOfRange {
        label: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
}

impl FieldSpec {
    pub fn find(key: &str) -> Option<FieldSpec> {
        FIELDS.iter().find(|f| f.key == key).copied()
    }

    pub fn parse(&self, raw: Option<&str>) -> Result<f64, FieldError> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or(FieldError::Missing {
            label: self.label,
        })?;

        let value: f64 = raw.parse().map_err(|_| FieldError::NotANumber {
            label: self.label,
            raw: raw.to_string(),
        })?;

        // NaN fails both comparisons, infinities fail one of them
        if !(value >= self.min && value <= self.max) {
            return Err(FieldError::OutOfRange {
                label: self.label,
                min: self.min,
                max: self.max,
                value,
            });
        }

        Ok(value)
    }
}

/// A single prediction request. Serializes to exactly the seven wire keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilRecord {
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "P")]
    pub p: f64,
    #[serde(rename = "K")]
    pub k: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl SoilRecord {
    /// Validates submitted form values against [`FIELDS`], collecting every
    /// failing field rather than stopping at the first.
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self, Vec<FieldError>> {
        let mut values = [0.0; FIELDS.len()];
        let mut errors = Vec::new();

        for (slot, spec) in values.iter_mut().zip(FIELDS.iter()) {
            match spec.parse(form.get(spec.key).map(String::as_str)) {
                Ok(value) => *slot = value,
                Err(e) => errors.push(e),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let [n, p, k, temperature, humidity, ph, rainfall] = values;
        Ok(Self {
            n,
            p,
            k,
            temperature,
            humidity,
            ph,
            rainfall,
        })
    }

    pub fn value(&self, key: &str) -> Option<f64> {
        match key {
            "N" => Some(self.n),
            "P" => Some(self.p),
            "K" => Some(self.k),
            "temperature" => Some(self.temperature),
            "humidity" => Some(self.humidity),
            "ph" => Some(self.ph),
            "rainfall" => Some(self.rainfall),
            _ => None,
        }
    }

    /// Form values as they would be rendered back into the inputs.
    pub fn to_form(&self) -> HashMap<String, String> {
        FIELDS
            .iter()
            .filter_map(|f| self.value(f.key).map(|v| (f.key.to_string(), v.to_string())))
            .collect()
    }
}

impl Default for SoilRecord {
    fn default() -> Self {
        let [n, p, k, temperature, humidity, ph, rainfall] = FIELDS.map(|f| f.default);
        Self {
            n,
            p,
            k,
            temperature,
            humidity,
            ph,
            rainfall,
        }
    }
}

//! Mapping final marks to degree classes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Scheme;

/// A named degree class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    First,
    UpperSecond,
    LowerSecond,
    Third,
    Fail,
}

impl Classification {
    /// Full label as printed on results.
    pub fn label(&self) -> &'static str {
        match self {
            Classification::First => "First Class Honours",
            Classification::UpperSecond => "Upper Second (2:1)",
            Classification::LowerSecond => "Lower Second (2:2)",
            Classification::Third => "Third Class",
            Classification::Fail => "Fail",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Threshold table used to band a final mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandTable {
    /// 70 / 60 / 50 / 40.
    Undergraduate,
    /// 70 / 60 / 50, no third.
    Postgraduate,
}

impl BandTable {
    pub fn for_scheme(scheme: Scheme) -> Self {
        match scheme {
            Scheme::Undergraduate => BandTable::Undergraduate,
            Scheme::IntegratedMasters | Scheme::Masters => BandTable::Postgraduate,
        }
    }

    /// Band a final mark. Lower bounds are inclusive.
    ///
    /// | Mark  | Undergraduate | Postgraduate |
    /// |-------|---------------|--------------|
    /// | >= 70 | First         | First        |
    /// | >= 60 | Upper Second  | Upper Second |
    /// | >= 50 | Lower Second  | Lower Second |
    /// | >= 40 | Third         | Fail         |
    /// | < 40  | Fail          | Fail         |
    pub fn classify(&self, mark: f64) -> Classification {
        match (self, mark) {
            (_, m) if m >= 70.0 => Classification::First,
            (_, m) if m >= 60.0 => Classification::UpperSecond,
            (_, m) if m >= 50.0 => Classification::LowerSecond,
            (BandTable::Undergraduate, m) if m >= 40.0 => Classification::Third,
            _ => Classification::Fail,
        }
    }
}

/// Classify an optional final mark under the scheme's band table.
/// An undefined mark yields no classification.
pub fn classify(scheme: Scheme, mark: Option<f64>) -> Option<Classification> {
    mark.map(|m| BandTable::for_scheme(scheme).classify(m))
}

/// Threshold summary line for the scheme, as shown next to the result.
pub fn thresholds_text(scheme: Scheme) -> &'static str {
    match scheme {
        Scheme::Undergraduate => {
            "Undergraduate classes: 1st ≥ 70 · 2:1 ≥ 60 · 2:2 ≥ 50 · 3rd ≥ 40 · Fail < 40"
        }
        Scheme::IntegratedMasters => {
            "Integrated Masters classes: 1st ≥ 70 · 2:1 ≥ 60 · 2:2 ≥ 50 · Fail < 50"
        }
        Scheme::Masters => "Masters classes: First ≥ 70 · 2:1 ≥ 60 · 2:2 ≥ 50 · Fail < 50",
    }
}

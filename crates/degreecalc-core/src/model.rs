//! Core data model types for degreecalc.
//!
//! These are the fundamental types the rest of the crate works with:
//! scored modules, degree schemes, the undergraduate weighting policy,
//! and the settings value passed into every evaluation.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single scored academic module.
///
/// `credits` and `mark` are optional: a module missing either one is kept
/// in the list but takes no part in sums or averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Academic level (5, 6 or 7). Zero means "no usable level".
    #[serde(default, deserialize_with = "lenient_level")]
    pub level: u8,
    /// Free-form module code, compared case-insensitively.
    #[serde(default, deserialize_with = "lenient_code")]
    pub code: String,
    /// Credit volume.
    #[serde(default, deserialize_with = "lenient_number")]
    pub credits: Option<f64>,
    /// Mark, conventionally in 0..=100.
    #[serde(default, deserialize_with = "lenient_number")]
    pub mark: Option<f64>,
}

impl Module {
    pub fn new(level: u8, code: impl Into<String>, credits: f64, mark: f64) -> Self {
        Self {
            level,
            code: code.into(),
            credits: Some(credits),
            mark: Some(mark),
        }
    }

    /// Finite credit value, if any.
    pub fn finite_credits(&self) -> Option<f64> {
        self.credits.filter(|c| c.is_finite())
    }

    /// Finite mark, if any.
    pub fn finite_mark(&self) -> Option<f64> {
        self.mark.filter(|m| m.is_finite())
    }

    /// A module is complete when both credits and mark are finite numbers.
    pub fn is_complete(&self) -> bool {
        self.finite_credits().is_some() && self.finite_mark().is_some()
    }

    /// Code normalized for comparison: trimmed and uppercased.
    pub fn normalized_code(&self) -> String {
        self.code.trim().to_uppercase()
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_f64())
        .filter(|n| n.is_finite()))
}

fn lenient_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        _ => String::new(),
    })
}

fn lenient_level<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_f64())
        .filter(|n| n.fract() == 0.0 && (0.0..=255.0).contains(n))
        .map(|n| n as u8)
        .unwrap_or(0))
}

/// Degree scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    #[default]
    #[serde(rename = "ug", alias = "undergraduate")]
    Undergraduate,
    #[serde(rename = "im", alias = "integrated-masters", alias = "integrated_masters")]
    IntegratedMasters,
    #[serde(rename = "masters")]
    Masters,
}

impl Scheme {
    /// Levels that feed this scheme's averages, in display order.
    pub fn levels(&self) -> &'static [u8] {
        match self {
            Scheme::Undergraduate => &[5, 6],
            Scheme::IntegratedMasters => &[6, 7],
            Scheme::Masters => &[7],
        }
    }

    pub fn accepts_level(&self, level: u8) -> bool {
        self.levels().contains(&level)
    }

    /// Human-readable scheme name.
    pub fn title(&self) -> &'static str {
        match self {
            Scheme::Undergraduate => "Undergraduate",
            Scheme::IntegratedMasters => "Integrated Masters",
            Scheme::Masters => "Masters",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Undergraduate => write!(f, "ug"),
            Scheme::IntegratedMasters => write!(f, "im"),
            Scheme::Masters => write!(f, "masters"),
        }
    }
}

impl FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ug" | "undergraduate" => Ok(Scheme::Undergraduate),
            "im" | "integrated-masters" | "integrated_masters" => Ok(Scheme::IntegratedMasters),
            "masters" | "ma" | "msc" => Ok(Scheme::Masters),
            other => Err(format!("unknown scheme: {other}")),
        }
    }
}

/// Weighting policy for undergraduate degrees, keyed on start year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UgPolicy {
    /// Best of the 20/80 and 10/90 weightings.
    #[default]
    Before2023,
    /// 10/90 weighting only.
    OnOrAfter2023,
}

impl fmt::Display for UgPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UgPolicy::Before2023 => write!(f, "before_2023"),
            UgPolicy::OnOrAfter2023 => write!(f, "on_or_after_2023"),
        }
    }
}

impl FromStr for UgPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "before_2023" | "old" => Ok(UgPolicy::Before2023),
            "on_or_after_2023" | "new" => Ok(UgPolicy::OnOrAfter2023),
            other => Err(format!("unknown undergraduate policy: {other}")),
        }
    }
}

/// Immutable settings for one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub scheme: Scheme,
    #[serde(default)]
    pub ug_policy: UgPolicy,
}

impl Settings {
    pub fn new(scheme: Scheme, ug_policy: UgPolicy) -> Self {
        Self { scheme, ug_policy }
    }
}

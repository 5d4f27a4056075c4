//! Evaluation report types with display helpers and JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::classify::{thresholds_text, Classification};
use crate::model::{Scheme, Settings, UgPolicy};
use crate::scheme::Breakdown;
use crate::validate::{format_credit_hint, LevelCredits, Warning};

/// The complete result of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Settings the evaluation ran under.
    pub settings: Settings,
    /// Scheme-specific sub-averages and totals.
    pub breakdown: Breakdown,
    /// Final mark, `None` when there is not enough data.
    pub final_mark: Option<f64>,
    /// Degree class for the final mark.
    pub classification: Option<Classification>,
    /// Advisory warnings.
    pub warnings: Vec<Warning>,
    /// Credits entered at each of the scheme's levels.
    pub credit_hint: Vec<LevelCredits>,
    /// Number of modules in the input list.
    pub module_count: usize,
    /// Modules that took no part: wrong level for the scheme, or incomplete.
    pub excluded_modules: usize,
}

/// A headline figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tile {
    pub label: &'static str,
    pub value: TileValue,
    /// Marks the figure that decides the result.
    pub highlighted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TileValue {
    Mark(Option<f64>),
    Credits(f64),
}

impl TileValue {
    pub fn render(&self, decimals: usize) -> String {
        match self {
            TileValue::Mark(m) => format_mark(*m, decimals),
            TileValue::Credits(c) => c.to_string(),
        }
    }
}

/// Most decimal places a mark is rendered with.
pub const MAX_DECIMALS: usize = 10;

/// Round half up to `decimals` places (at most [`MAX_DECIMALS`]); `—` when
/// undefined.
pub fn format_mark(mark: Option<f64>, decimals: usize) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    match mark {
        Some(m) => {
            let factor = 10f64.powi(decimals as i32);
            let rounded = (m * factor + 0.5).floor() / factor;
            format!("{rounded:.decimals$}")
        }
        None => "—".to_string(),
    }
}

impl Evaluation {
    pub fn scheme(&self) -> Scheme {
        self.settings.scheme
    }

    /// Headline figures in display order.
    pub fn tiles(&self) -> Vec<Tile> {
        let mark = |label: &'static str, value: Option<f64>, highlighted: bool| Tile {
            label,
            value: TileValue::Mark(value),
            highlighted,
        };

        match &self.breakdown {
            Breakdown::Undergraduate(b) => {
                let mut tiles = vec![
                    mark("L5 avg", b.l5_average, false),
                    mark("L6 avg", b.l6_best90_average, false),
                ];
                match b.policy {
                    UgPolicy::Before2023 => {
                        let both = b.before_2023.zip(b.on_or_after_2023);
                        let old_wins = both.is_some_and(|(old, new)| old > new);
                        let new_wins = both.is_some_and(|(old, new)| new >= old);
                        tiles.push(mark("Before 2023 (20/80)", b.before_2023, old_wins));
                        tiles.push(mark(
                            "On or after 2023 (10/90)",
                            b.on_or_after_2023,
                            new_wins,
                        ));
                    }
                    UgPolicy::OnOrAfter2023 => {
                        tiles.push(mark("Final (10/90)", b.on_or_after_2023, true));
                    }
                }
                tiles
            }
            Breakdown::IntegratedMasters(b) => vec![
                mark("L6 avg", b.l6_average, false),
                mark("L7 avg", b.l7_average, false),
                mark("Final (20/80)", b.final_mark, true),
            ],
            Breakdown::Masters(b) => vec![
                Tile {
                    label: "Level 7 total credits",
                    value: TileValue::Credits(b.l7_credits),
                    highlighted: false,
                },
                mark("Level 7 avg", b.l7_average, true),
            ],
        }
    }

    /// How the final mark is put together, one line per rule.
    pub fn explanation(&self) -> Vec<&'static str> {
        match &self.breakdown {
            Breakdown::Undergraduate(b) => match b.policy {
                UgPolicy::Before2023 => vec![
                    "L5 average: credit-weighted mean across L5 modules, capped at 120 total credits (if exceeded, best 120 by value).",
                    "L6 best 90: selection up to 90 credits by highest credit-weighted value; overall L6 entry should not exceed 120.",
                    "before_2023 policy: both 0.2×L5 + 0.8×L6best90 and 0.1×L5 + 0.9×L6best90 are computed and the higher is taken.",
                ],
                UgPolicy::OnOrAfter2023 => vec![
                    "L5 average: credit-weighted mean across L5 modules, capped at 120 total credits.",
                    "L6 best 90: selection up to 90 credits by highest credit-weighted value.",
                    "Policy: starters in or after 2023/24 use only 0.1×L5 + 0.9×L6best90.",
                ],
            },
            Breakdown::IntegratedMasters(_) => vec![
                "Level 6 (20%): average of all L6 modules (capped at 120 credits).",
                "Level 7 (80%): average of all L7 modules (capped at 120 credits).",
                "Final: 0.2×L6 + 0.8×L7",
            ],
            Breakdown::Masters(_) => vec![
                "Average of all Level 7 modules (credit-weighted mean across everything entered).",
            ],
        }
    }

    /// Class band thresholds for the scheme.
    pub fn thresholds(&self) -> &'static str {
        thresholds_text(self.scheme())
    }

    /// One-line outcome.
    pub fn headline(&self) -> String {
        match self.classification {
            Some(class) => format!("Final classification: {class}"),
            None => "Enter modules to see your classification.".to_string(),
        }
    }

    /// Warning messages, in order.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.to_string()).collect()
    }

    /// Format the evaluation as markdown.
    pub fn to_markdown(&self, decimals: usize) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "## {} result {}\n\n",
            self.scheme().title(),
            format_credit_hint(&self.credit_hint)
        ));

        md.push_str("| Measure | Value |\n");
        md.push_str("|---------|-------|\n");
        for tile in self.tiles() {
            let value = tile.value.render(decimals);
            if tile.highlighted {
                md.push_str(&format!("| **{}** | **{}** |\n", tile.label, value));
            } else {
                md.push_str(&format!("| {} | {} |\n", tile.label, value));
            }
        }
        md.push('\n');

        md.push_str(&format!(
            "**Final mark:** {}\n\n",
            format_mark(self.final_mark, decimals)
        ));
        md.push_str(&format!("**{}**\n\n", self.headline()));

        md.push_str("### How it is calculated\n\n");
        for line in self.explanation() {
            md.push_str(&format!("- {line}\n"));
        }
        md.push('\n');
        md.push_str(self.thresholds());
        md.push('\n');

        if !self.warnings.is_empty() {
            md.push_str("\n### Warnings\n\n");
            for message in self.warning_messages() {
                md.push_str(&format!("- {message}\n"));
            }
        }

        md
    }

    /// Save the evaluation as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize evaluation")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write evaluation to {}", path.display()))?;
        Ok(())
    }

    /// Load an evaluation from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read evaluation from {}", path.display()))?;
        let evaluation: Evaluation =
            serde_json::from_str(&content).context("failed to parse evaluation JSON")?;
        Ok(evaluation)
    }
}

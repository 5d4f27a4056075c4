//! Advisory checks over a module list: duplicate codes, credit volumes
//! above a level cap or below the target volume, and per-level credit hints.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::aggregate::sum_credits;
use crate::model::{Module, Scheme};
use crate::scheme::{Breakdown, BEST_L6_CAP, LEVEL_CAP};

/// An advisory warning. Warnings never block an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Fewer credits than the target volume at a level; all are used.
    BelowTarget { level: u8, credits: f64 },
    /// A level exceeds its cap; the best `cap` credits are selected.
    OverCap { level: u8, credits: f64, cap: usize },
    /// Undergraduate level 6 exceeds the overall 120-credit entry limit.
    OverEntryLimit { level: u8, credits: f64 },
    /// Codes used by more than one module, normalized.
    DuplicateCodes { codes: Vec<String> },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::BelowTarget { level, credits } => write!(
                f,
                "Only {credits} L{level} credits entered; using all for L{level} average."
            ),
            Warning::OverCap {
                level: 5,
                cap,
                ..
            } => write!(f, "L5 exceeds {cap} credits; using best {cap} for L5 avg."),
            Warning::OverCap { level, cap, .. } => {
                write!(f, "Level {level} exceeds {cap} credits; using best {cap}.")
            }
            Warning::OverEntryLimit { level, .. } => write!(
                f,
                "L{level} exceeds {LEVEL_CAP} credits; overall cap is {LEVEL_CAP} for validity."
            ),
            Warning::DuplicateCodes { codes } => {
                write!(f, "Duplicate module codes detected: {}", codes.join(", "))
            }
        }
    }
}

/// Normalized codes that appear on more than one module, each reported
/// once, in order of first repetition. Empty codes are ignored.
pub fn find_duplicate_codes(modules: &[Module]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for module in modules {
        let code = module.normalized_code();
        if code.is_empty() {
            continue;
        }
        if !seen.insert(code.clone()) && reported.insert(code.clone()) {
            duplicates.push(code);
        }
    }

    duplicates
}

/// Credit-volume warnings for a scheme breakdown. Totals are over complete
/// modules, as used by the evaluator.
pub fn credit_warnings(breakdown: &Breakdown) -> Vec<Warning> {
    let mut warnings = Vec::new();

    match breakdown {
        Breakdown::Undergraduate(b) => {
            if b.l6_credits > 0.0 && b.l6_credits < BEST_L6_CAP as f64 {
                warnings.push(Warning::BelowTarget {
                    level: 6,
                    credits: b.l6_credits,
                });
            }
            if b.l5_credits > LEVEL_CAP as f64 {
                warnings.push(Warning::OverCap {
                    level: 5,
                    credits: b.l5_credits,
                    cap: LEVEL_CAP,
                });
            }
            if b.l6_credits > LEVEL_CAP as f64 {
                warnings.push(Warning::OverEntryLimit {
                    level: 6,
                    credits: b.l6_credits,
                });
            }
        }
        Breakdown::IntegratedMasters(b) => {
            for (level, credits) in [(6, b.l6_credits), (7, b.l7_credits)] {
                if credits > LEVEL_CAP as f64 {
                    warnings.push(Warning::OverCap {
                        level,
                        credits,
                        cap: LEVEL_CAP,
                    });
                }
            }
        }
        Breakdown::Masters(_) => {}
    }

    warnings
}

/// All warnings for an evaluation: credit warnings first, duplicates last.
pub fn warnings(modules: &[Module], breakdown: &Breakdown) -> Vec<Warning> {
    let mut warnings = credit_warnings(breakdown);
    let codes = find_duplicate_codes(modules);
    if !codes.is_empty() {
        warnings.push(Warning::DuplicateCodes { codes });
    }
    warnings
}

/// Credits entered at one level, counting every module with numeric
/// credits whether or not it has a mark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelCredits {
    pub level: u8,
    pub credits: f64,
}

/// Per-level credit hint for the scheme's levels.
pub fn credit_hint(modules: &[Module], scheme: Scheme) -> Vec<LevelCredits> {
    scheme
        .levels()
        .iter()
        .map(|&level| LevelCredits {
            level,
            credits: sum_credits(modules.iter().filter(|m| m.level == level)),
        })
        .collect()
}

/// Render a credit hint as `(L5: 90 credits, L6: 105 credits)`.
pub fn format_credit_hint(hint: &[LevelCredits]) -> String {
    let parts: Vec<String> = hint
        .iter()
        .map(|h| format!("L{}: {} credits", h.level, h.credits))
        .collect();
    format!("({})", parts.join(", "))
}

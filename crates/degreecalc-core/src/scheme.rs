//! Scheme-specific evaluation pipelines.
//!
//! Each degree scheme turns the complete modules at its levels into
//! sub-averages and a single final mark. The pipelines share the
//! aggregation primitives and the capped selector; [`Evaluator`] picks the
//! pipeline for a [`Settings`] value.

use serde::{Deserialize, Serialize};

use crate::aggregate::{complete_at_level, sum_credits, weighted_average};
use crate::model::{Module, Scheme, Settings, UgPolicy};
use crate::selector::select_best_credits;

/// Maximum credits counted towards a full level average.
pub const LEVEL_CAP: usize = 120;

/// Credits counted towards the undergraduate level-6 "best 90" average.
pub const BEST_L6_CAP: usize = 90;

/// Evaluate a module list into a scheme breakdown.
pub trait Evaluate {
    fn evaluate(&self, modules: &[Module]) -> Breakdown;
}

/// Per-scheme intermediate results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum Breakdown {
    Undergraduate(UndergraduateBreakdown),
    IntegratedMasters(IntegratedMastersBreakdown),
    Masters(MastersBreakdown),
}

impl Breakdown {
    pub fn final_mark(&self) -> Option<f64> {
        match self {
            Breakdown::Undergraduate(b) => b.final_mark(),
            Breakdown::IntegratedMasters(b) => b.final_mark,
            Breakdown::Masters(b) => b.l7_average,
        }
    }

    pub fn scheme(&self) -> Scheme {
        match self {
            Breakdown::Undergraduate(_) => Scheme::Undergraduate,
            Breakdown::IntegratedMasters(_) => Scheme::IntegratedMasters,
            Breakdown::Masters(_) => Scheme::Masters,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndergraduateBreakdown {
    pub policy: UgPolicy,
    /// Level-5 average, capped at 120 credits.
    pub l5_average: Option<f64>,
    /// Level-6 average over the best 90 credits.
    pub l6_best90_average: Option<f64>,
    /// Complete-module credits at level 5.
    pub l5_credits: f64,
    /// Complete-module credits at level 6.
    pub l6_credits: f64,
    /// `0.2 * L5 + 0.8 * L6best90`.
    pub before_2023: Option<f64>,
    /// `0.1 * L5 + 0.9 * L6best90`.
    pub on_or_after_2023: Option<f64>,
}

impl UndergraduateBreakdown {
    pub fn final_mark(&self) -> Option<f64> {
        match self.policy {
            UgPolicy::Before2023 => self
                .before_2023
                .zip(self.on_or_after_2023)
                .map(|(old, new)| old.max(new)),
            UgPolicy::OnOrAfter2023 => self.on_or_after_2023,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegratedMastersBreakdown {
    pub l6_average: Option<f64>,
    pub l7_average: Option<f64>,
    pub l6_credits: f64,
    pub l7_credits: f64,
    /// `0.2 * L6 + 0.8 * L7`.
    pub final_mark: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MastersBreakdown {
    /// Uncapped level-7 average; this is the final mark.
    pub l7_average: Option<f64>,
    pub l7_credits: f64,
}

/// Average of a level, falling back to the capped selector when the level
/// carries more than `cap` credits.
fn capped_level_average(level: &[&Module], cap: usize) -> Option<f64> {
    let total = sum_credits(level.iter().copied());
    if total <= 0.0 {
        return None;
    }
    if total <= cap as f64 {
        weighted_average(level.iter().copied())
    } else {
        select_best_credits(level, cap).average()
    }
}

fn weighted_pair(low: Option<f64>, high: Option<f64>, weights: (f64, f64)) -> Option<f64> {
    low.zip(high).map(|(l, h)| weights.0 * l + weights.1 * h)
}

/// Undergraduate: level 5 capped at 120, level 6 best 90.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undergraduate {
    pub policy: UgPolicy,
}

impl Evaluate for Undergraduate {
    fn evaluate(&self, modules: &[Module]) -> Breakdown {
        let l5 = complete_at_level(modules, 5);
        let l6 = complete_at_level(modules, 6);

        let l5_credits = sum_credits(l5.iter().copied());
        let l6_credits = sum_credits(l6.iter().copied());

        let l5_average = capped_level_average(&l5, LEVEL_CAP);
        // Level 6 always goes through the selector, even under the cap.
        let l6_best90_average = if l6_credits > 0.0 {
            select_best_credits(&l6, BEST_L6_CAP).average()
        } else {
            None
        };

        Breakdown::Undergraduate(UndergraduateBreakdown {
            policy: self.policy,
            l5_average,
            l6_best90_average,
            l5_credits,
            l6_credits,
            before_2023: weighted_pair(l5_average, l6_best90_average, (0.2, 0.8)),
            on_or_after_2023: weighted_pair(l5_average, l6_best90_average, (0.1, 0.9)),
        })
    }
}

/// Integrated masters: levels 6 and 7, each capped at 120, weighted 20/80.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegratedMasters;

impl Evaluate for IntegratedMasters {
    fn evaluate(&self, modules: &[Module]) -> Breakdown {
        let l6 = complete_at_level(modules, 6);
        let l7 = complete_at_level(modules, 7);

        let l6_average = capped_level_average(&l6, LEVEL_CAP);
        let l7_average = capped_level_average(&l7, LEVEL_CAP);

        Breakdown::IntegratedMasters(IntegratedMastersBreakdown {
            l6_average,
            l7_average,
            l6_credits: sum_credits(l6.iter().copied()),
            l7_credits: sum_credits(l7.iter().copied()),
            final_mark: weighted_pair(l6_average, l7_average, (0.2, 0.8)),
        })
    }
}

/// Masters: plain level-7 average, no cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Masters;

impl Evaluate for Masters {
    fn evaluate(&self, modules: &[Module]) -> Breakdown {
        let l7 = complete_at_level(modules, 7);

        Breakdown::Masters(MastersBreakdown {
            l7_average: weighted_average(l7.iter().copied()),
            l7_credits: sum_credits(l7.iter().copied()),
        })
    }
}

/// The evaluator selected by a [`Settings`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluator {
    Undergraduate(Undergraduate),
    IntegratedMasters(IntegratedMasters),
    Masters(Masters),
}

impl Evaluator {
    pub fn for_settings(settings: &Settings) -> Self {
        match settings.scheme {
            Scheme::Undergraduate => Evaluator::Undergraduate(Undergraduate {
                policy: settings.ug_policy,
            }),
            Scheme::IntegratedMasters => Evaluator::IntegratedMasters(IntegratedMasters),
            Scheme::Masters => Evaluator::Masters(Masters),
        }
    }
}

impl Evaluate for Evaluator {
    fn evaluate(&self, modules: &[Module]) -> Breakdown {
        match self {
            Evaluator::Undergraduate(e) => e.evaluate(modules),
            Evaluator::IntegratedMasters(e) => e.evaluate(modules),
            Evaluator::Masters(e) => e.evaluate(modules),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("expected a defined value");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn ug_sample() -> Vec<Module> {
        vec![
            Module::new(5, "COMP2101", 30.0, 62.0),
            Module::new(5, "DBMS2010", 15.0, 58.0),
            Module::new(5, "SOFT2068", 15.0, 68.0),
            Module::new(5, "OSYS2077", 30.0, 64.0),
            Module::new(6, "PROJ3154", 45.0, 72.0),
            Module::new(6, "NETS3110", 30.0, 66.0),
            Module::new(6, "CYBR3142", 15.0, 74.0),
            Module::new(6, "CLOUD3161", 15.0, 63.0),
        ]
    }

    fn ug(modules: &[Module], policy: UgPolicy) -> UndergraduateBreakdown {
        match (Undergraduate { policy }).evaluate(modules) {
            Breakdown::Undergraduate(b) => b,
            other => panic!("unexpected breakdown: {other:?}"),
        }
    }

    #[test]
    fn undergraduate_sample() {
        let b = ug(&ug_sample(), UgPolicy::Before2023);
        approx(b.l5_average, 63.0);
        approx(b.l6_best90_average, 6330.0 / 90.0);
        assert_eq!(b.l5_credits, 90.0);
        assert_eq!(b.l6_credits, 105.0);
        approx(b.before_2023, 0.2 * 63.0 + 0.8 * (6330.0 / 90.0));
        approx(b.on_or_after_2023, 0.1 * 63.0 + 0.9 * (6330.0 / 90.0));
        approx(b.final_mark(), 0.1 * 63.0 + 0.9 * (6330.0 / 90.0));
    }

    #[test]
    fn undergraduate_policy_picks_formula() {
        // L6 well below L5 makes the 20/80 weighting the better one.
        let modules = vec![
            Module::new(5, "A", 120.0, 80.0),
            Module::new(6, "B", 90.0, 50.0),
        ];
        let before = ug(&modules, UgPolicy::Before2023);
        let after = ug(&modules, UgPolicy::OnOrAfter2023);
        approx(before.final_mark(), 56.0);
        approx(after.final_mark(), 53.0);
    }

    #[test]
    fn undergraduate_l5_over_cap_uses_selector() {
        let modules = vec![
            Module::new(5, "LOW", 60.0, 50.0),
            Module::new(5, "HIGH", 60.0, 70.0),
            Module::new(5, "SMALL", 15.0, 80.0),
            Module::new(6, "P", 90.0, 65.0),
        ];
        let b = ug(&modules, UgPolicy::OnOrAfter2023);
        assert_eq!(b.l5_credits, 135.0);
        approx(b.l5_average, 60.0);
    }

    #[test]
    fn undergraduate_l6_under_cap_still_selects() {
        let modules = vec![
            Module::new(5, "A", 120.0, 60.0),
            Module::new(6, "GOOD", 30.0, 70.0),
            Module::new(6, "ZERO", 15.0, 0.0),
        ];
        let b = ug(&modules, UgPolicy::OnOrAfter2023);
        approx(b.l6_best90_average, 70.0);
    }

    #[test]
    fn undergraduate_missing_level_is_undefined() {
        let modules = vec![Module::new(5, "A", 120.0, 60.0)];
        let b = ug(&modules, UgPolicy::Before2023);
        approx(b.l5_average, 60.0);
        assert_eq!(b.l6_best90_average, None);
        assert_eq!(b.before_2023, None);
        assert_eq!(b.final_mark(), None);
    }

    #[test]
    fn integrated_masters_sample() {
        let modules = vec![
            Module::new(6, "INTR6001", 30.0, 65.0),
            Module::new(6, "CORE6010", 30.0, 62.0),
            Module::new(6, "OPTI6030", 30.0, 68.0),
            Module::new(6, "LABS6040", 30.0, 64.0),
            Module::new(7, "PROJ7001", 60.0, 72.0),
            Module::new(7, "ADVN7030", 30.0, 66.0),
            Module::new(7, "ELEC7040", 30.0, 70.0),
        ];
        let b = IntegratedMasters.evaluate(&modules);
        approx(b.final_mark(), 0.2 * 64.75 + 0.8 * 70.0);
        match b {
            Breakdown::IntegratedMasters(im) => {
                approx(im.l6_average, 64.75);
                approx(im.l7_average, 70.0);
                assert_eq!(im.l6_credits, 120.0);
            }
            other => panic!("unexpected breakdown: {other:?}"),
        }
    }

    #[test]
    fn integrated_masters_caps_each_level() {
        let modules = vec![
            Module::new(6, "A", 60.0, 50.0),
            Module::new(6, "B", 60.0, 60.0),
            Module::new(6, "C", 60.0, 90.0),
            Module::new(7, "D", 120.0, 70.0),
        ];
        match IntegratedMasters.evaluate(&modules) {
            Breakdown::IntegratedMasters(im) => {
                assert_eq!(im.l6_credits, 180.0);
                // The weakest 60 credits are dropped.
                approx(im.l6_average, 75.0);
            }
            other => panic!("unexpected breakdown: {other:?}"),
        }
    }

    #[test]
    fn masters_is_uncapped() {
        let modules = vec![
            Module::new(7, "PROJ7001", 60.0, 72.0),
            Module::new(7, "RESM7005", 30.0, 65.0),
            Module::new(7, "ADVT7012", 30.0, 68.0),
            Module::new(7, "ELECT7031", 30.0, 62.0),
            Module::new(6, "IGNORED", 30.0, 10.0),
        ];
        let b = Masters.evaluate(&modules);
        approx(b.final_mark(), 10170.0 / 150.0);
    }

    #[test]
    fn evaluator_dispatches_on_settings() {
        let settings = Settings::new(Scheme::Masters, UgPolicy::Before2023);
        let b = Evaluator::for_settings(&settings).evaluate(&[]);
        assert_eq!(b.scheme(), Scheme::Masters);
        assert_eq!(b.final_mark(), None);
    }
}

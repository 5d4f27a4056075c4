//! Capped optimal selection of modules.
//!
//! A 0/1 knapsack over integer credit budgets. Each module weighs its
//! truncated credit count and is worth `weight * mark`; the selector picks
//! the subset with the largest total worth whose weight fits under the cap.
//!
//! Inclusion only happens on a strict improvement, and the chosen subset is
//! reconstructed from the last module backwards. Together these make ties
//! resolve towards modules that appear earlier in the input.

use serde::Serialize;

use crate::aggregate::{sum_credit_weighted_mark, sum_credits};
use crate::model::Module;

/// Outcome of a capped selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection<'a> {
    /// Picked modules, in reconstruction order (last input first).
    pub modules: Vec<&'a Module>,
    /// Sum of the picked modules' finite credits.
    pub credits: f64,
}

impl Selection<'_> {
    /// Credit-weighted average over the picked modules.
    pub fn average(&self) -> Option<f64> {
        if self.credits == 0.0 {
            return None;
        }
        Some(sum_credit_weighted_mark(self.modules.iter().copied()) / self.credits)
    }

    /// Total knapsack value of the picked modules.
    pub fn value(&self) -> f64 {
        self.modules.iter().map(|m| value(m)).fold(0.0, |acc, v| acc + v)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Knapsack weight: credits truncated toward zero. Missing, non-finite or
/// negative credits weigh nothing.
pub fn weight(module: &Module) -> usize {
    match module.finite_credits() {
        Some(c) if c > 0.0 => c.trunc() as usize,
        _ => 0,
    }
}

/// Knapsack value: weight times mark, with a missing mark counting as zero.
pub fn value(module: &Module) -> f64 {
    weight(module) as f64 * module.finite_mark().unwrap_or(0.0)
}

/// Select the subset of `modules` with the greatest total value whose total
/// weight does not exceed `cap`.
pub fn select_best_credits<'a>(modules: &[&'a Module], cap: usize) -> Selection<'a> {
    let n = modules.len();
    let weights: Vec<usize> = modules.iter().map(|m| weight(m)).collect();
    let values: Vec<f64> = modules.iter().map(|m| value(m)).collect();

    // Every capacity at or above the combined weight of the modules that fit
    // at all yields the same table, so the table stops there.
    let fitting = weights
        .iter()
        .filter(|&&w| w <= cap)
        .fold(0usize, |acc, &w| acc.saturating_add(w));
    let cap = cap.min(fitting);
    let Some(width) = cap.checked_add(1) else {
        tracing::debug!(modules = n, "selection capacity out of range");
        return Selection {
            modules: Vec::new(),
            credits: 0.0,
        };
    };

    let mut best = vec![vec![0.0f64; width]; n + 1];
    let mut take = vec![vec![false; width]; n + 1];

    for i in 1..=n {
        let (w, v) = (weights[i - 1], values[i - 1]);
        for c in 0..=cap {
            best[i][c] = best[i - 1][c];
            if w <= c {
                let alt = best[i - 1][c - w] + v;
                if alt > best[i][c] {
                    best[i][c] = alt;
                    take[i][c] = true;
                }
            }
        }
    }

    let mut remaining = cap;
    let mut picked = Vec::new();
    for i in (1..=n).rev() {
        if take[i][remaining] {
            picked.push(modules[i - 1]);
            remaining -= weights[i - 1];
        }
    }

    let credits = sum_credits(picked.iter().copied());
    tracing::debug!(
        modules = n,
        cap,
        picked = picked.len(),
        credits,
        "capped selection complete"
    );

    Selection {
        modules: picked,
        credits,
    }
}

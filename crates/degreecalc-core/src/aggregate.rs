//! Credit-weighted aggregation primitives.
//!
//! None of these fail: missing or non-finite numbers are excluded from the
//! sums rather than reported.

use crate::model::Module;

/// Sum of finite `credits` across `modules`.
pub fn sum_credits<'a, I>(modules: I) -> f64
where
    I: IntoIterator<Item = &'a Module>,
{
    modules
        .into_iter()
        .filter_map(Module::finite_credits)
        .fold(0.0, |acc, c| acc + c)
}

/// Sum of `credits * mark` across modules where both are finite.
pub fn sum_credit_weighted_mark<'a, I>(modules: I) -> f64
where
    I: IntoIterator<Item = &'a Module>,
{
    modules
        .into_iter()
        .filter_map(|m| Some(m.finite_credits()? * m.finite_mark()?))
        .fold(0.0, |acc, v| acc + v)
}

/// Credit-weighted mean mark. `None` when the credit total is zero.
pub fn weighted_average<'a, I>(modules: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Module>,
    I::IntoIter: Clone,
{
    let iter = modules.into_iter();
    let credits = sum_credits(iter.clone());
    if credits == 0.0 {
        return None;
    }
    Some(sum_credit_weighted_mark(iter) / credits)
}

/// Complete modules at `level`, in input order.
pub fn complete_at_level(modules: &[Module], level: u8) -> Vec<&Module> {
    modules
        .iter()
        .filter(|m| m.level == level && m.is_complete())
        .collect()
}

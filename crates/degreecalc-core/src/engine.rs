//! Evaluation entry point.
//!
//! Runs the evaluator chosen by the settings, classifies the final mark and
//! collects warnings and credit hints into a single [`Evaluation`]. Every
//! call works from the module list it is given and keeps no state between
//! calls.

use crate::classify::classify;
use crate::model::{Module, Settings};
use crate::report::Evaluation;
use crate::scheme::{Evaluate, Evaluator};
use crate::validate::{credit_hint, warnings};

/// Evaluate `modules` under `settings`.
pub fn evaluate(modules: &[Module], settings: &Settings) -> Evaluation {
    let scheme = settings.scheme;
    let breakdown = Evaluator::for_settings(settings).evaluate(modules);
    let final_mark = breakdown.final_mark();

    let off_scheme = modules
        .iter()
        .filter(|m| !scheme.accepts_level(m.level))
        .count();
    let incomplete = modules
        .iter()
        .filter(|m| scheme.accepts_level(m.level) && !m.is_complete())
        .count();
    if off_scheme > 0 {
        tracing::debug!(
            %scheme,
            off_scheme,
            "modules outside the scheme's levels are excluded"
        );
    }

    let evaluation = Evaluation {
        settings: *settings,
        classification: classify(scheme, final_mark),
        final_mark,
        warnings: warnings(modules, &breakdown),
        credit_hint: credit_hint(modules, scheme),
        module_count: modules.len(),
        excluded_modules: off_scheme + incomplete,
        breakdown,
    };

    tracing::debug!(
        %scheme,
        policy = %settings.ug_policy,
        final_mark = ?evaluation.final_mark,
        classification = ?evaluation.classification,
        warnings = evaluation.warnings.len(),
        "evaluation complete"
    );

    evaluation
}

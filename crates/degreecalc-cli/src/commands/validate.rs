//! The `degreecalc validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use degreecalc_core::validate::format_credit_hint;
use degreecalc_core::{evaluate, Document, Scheme};

use crate::config::load_config_from;

pub fn execute(input: PathBuf, scheme: Option<Scheme>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let document = Document::load(&input)
        .with_context(|| format!("failed to load document {}", input.display()))?;

    let settings = config.resolve_settings(scheme, None, document.evaluation_settings());
    let evaluation = evaluate(&document.modules, &settings);

    println!(
        "Document: {} module(s), {} {}",
        evaluation.module_count,
        settings.scheme.title(),
        format_credit_hint(&evaluation.credit_hint)
    );
    if evaluation.excluded_modules > 0 {
        println!(
            "  {} module(s) will not be counted",
            evaluation.excluded_modules
        );
    }

    for message in evaluation.warning_messages() {
        println!("  WARNING: {message}");
    }

    if evaluation.warnings.is_empty() {
        println!("Document valid.");
    } else {
        println!("\n{} warning(s) found.", evaluation.warnings.len());
    }

    Ok(())
}

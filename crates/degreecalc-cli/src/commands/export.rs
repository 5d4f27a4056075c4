//! The `degreecalc export` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use degreecalc_core::{Document, Scheme};

pub fn execute(input: PathBuf, output: PathBuf, scheme: Option<Scheme>) -> Result<()> {
    let document = Document::load(&input)
        .with_context(|| format!("failed to load document {}", input.display()))?;

    let mut exported = document.normalized();
    if let Some(scheme) = scheme {
        exported = exported.with_scheme(scheme);
    }

    exported
        .save(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "Exported {} module(s) to {} ({})",
        exported.modules.len(),
        output.display(),
        exported.settings.scheme
    );

    Ok(())
}

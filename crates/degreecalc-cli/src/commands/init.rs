//! The `degreecalc init` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use degreecalc_core::document::sample_document;
use degreecalc_core::Scheme;

pub fn execute(scheme: Scheme, output: PathBuf) -> Result<()> {
    if output.exists() {
        println!("{} already exists, skipping.", output.display());
    } else {
        sample_document(scheme)
            .save(&output)
            .with_context(|| format!("failed to write sample to {}", output.display()))?;
        println!("Created {} ({} sample)", output.display(), scheme.title());
    }

    println!("\nNext steps:");
    println!("  1. Edit {} with your modules", output.display());
    println!("  2. Run: degreecalc validate --input {}", output.display());
    println!("  3. Run: degreecalc evaluate --input {}", output.display());

    Ok(())
}

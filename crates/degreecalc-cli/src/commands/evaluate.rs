//! The `degreecalc evaluate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use degreecalc_core::report::format_mark;
use degreecalc_core::validate::format_credit_hint;
use degreecalc_core::{evaluate, Document, Evaluation, Scheme, UgPolicy};

use crate::config::load_config_from;

pub fn execute(
    input: PathBuf,
    scheme: Option<Scheme>,
    ug_policy: Option<UgPolicy>,
    format: Option<String>,
    save: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let document = Document::load(&input)
        .with_context(|| format!("failed to load document {}", input.display()))?;

    let settings = config.resolve_settings(scheme, ug_policy, document.evaluation_settings());
    let evaluation = evaluate(&document.modules, &settings);
    let decimals = config.decimals;

    match format.as_deref().unwrap_or(config.format.as_str()) {
        "markdown" | "md" => {
            println!("{}", evaluation.to_markdown(decimals));
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&evaluation)?);
        }
        _ => print_text(&evaluation, decimals),
    }

    if let Some(path) = save {
        evaluation.save_json(&path)?;
        tracing::info!(path = %path.display(), "evaluation saved");
    }

    Ok(())
}

fn print_text(evaluation: &Evaluation, decimals: usize) {
    use comfy_table::{Cell, Table};

    println!(
        "{} result {}",
        evaluation.scheme().title(),
        format_credit_hint(&evaluation.credit_hint)
    );

    let mut table = Table::new();
    table.set_header(vec!["Measure", "Value", ""]);
    for tile in evaluation.tiles() {
        table.add_row(vec![
            Cell::new(tile.label),
            Cell::new(tile.value.render(decimals)),
            Cell::new(if tile.highlighted { "*" } else { "" }),
        ]);
    }
    println!("{table}");

    println!(
        "\nFinal mark: {}",
        format_mark(evaluation.final_mark, decimals)
    );
    println!("{}", evaluation.headline());

    println!("\nHow it is calculated:");
    for line in evaluation.explanation() {
        println!("  - {line}");
    }
    println!("{}", evaluation.thresholds());

    if evaluation.excluded_modules > 0 {
        println!(
            "\n{} of {} module(s) not counted (level outside the scheme or missing credits/mark).",
            evaluation.excluded_modules, evaluation.module_count
        );
    }

    if !evaluation.warnings.is_empty() {
        println!("\nWarnings:");
        for message in evaluation.warning_messages() {
            println!("  WARNING: {message}");
        }
    }
}

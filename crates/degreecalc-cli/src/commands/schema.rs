//! The `degreecalc schema` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    let schema = degreecalc_core::document::schema();
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use degreecalc_core::{Scheme, Settings, UgPolicy};

/// Top-level degreecalc configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreecalcConfig {
    /// Scheme override applied to every document.
    #[serde(default)]
    pub scheme: Option<Scheme>,
    /// Undergraduate policy override applied to every document.
    #[serde(default)]
    pub ug_policy: Option<UgPolicy>,
    /// Output format: text, json, markdown.
    #[serde(default = "default_format")]
    pub format: String,
    /// Decimal places used when rendering marks.
    #[serde(default = "default_decimals")]
    pub decimals: usize,
}

fn default_format() -> String {
    "text".to_string()
}
fn default_decimals() -> usize {
    1
}

impl Default for DegreecalcConfig {
    fn default() -> Self {
        Self {
            scheme: None,
            ug_policy: None,
            format: default_format(),
            decimals: default_decimals(),
        }
    }
}

impl DegreecalcConfig {
    /// Settings for one evaluation. Explicit flags win over this config,
    /// which wins over the document's own settings.
    pub fn resolve_settings(
        &self,
        scheme: Option<Scheme>,
        ug_policy: Option<UgPolicy>,
        document: Settings,
    ) -> Settings {
        Settings::new(
            scheme.or(self.scheme).unwrap_or(document.scheme),
            ug_policy.or(self.ug_policy).unwrap_or(document.ug_policy),
        )
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `degreecalc.toml` in the current directory
/// 2. `~/.config/degreecalc/config.toml`
///
/// Environment variable overrides: `DEGREECALC_SCHEME`,
/// `DEGREECALC_UG_POLICY`, `DEGREECALC_FORMAT`.
pub fn load_config_from(path: Option<&Path>) -> Result<DegreecalcConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("degreecalc.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<DegreecalcConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "config loaded");
            config
        }
        None => DegreecalcConfig::default(),
    };

    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Apply `DEGREECALC_*` overrides read through `lookup`.
fn apply_env_overrides<F>(mut config: DegreecalcConfig, lookup: F) -> Result<DegreecalcConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("DEGREECALC_SCHEME") {
        let scheme = value
            .parse::<Scheme>()
            .map_err(anyhow::Error::msg)
            .context("invalid DEGREECALC_SCHEME")?;
        config.scheme = Some(scheme);
    }

    if let Some(value) = lookup("DEGREECALC_UG_POLICY") {
        let policy = value
            .parse::<UgPolicy>()
            .map_err(anyhow::Error::msg)
            .context("invalid DEGREECALC_UG_POLICY")?;
        config.ug_policy = Some(policy);
    }

    if let Some(format) = lookup("DEGREECALC_FORMAT") {
        config.format = format;
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("degreecalc"))
}

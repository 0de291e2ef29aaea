//! Layered configuration for fixture-gen.
//!
//! Highest priority first: command-line flags (and their environment
//! variables), the YAML file given by `--config`, the input image's layout
//! record (overlay only), built-in defaults.
//!
//! The YAML file supports `${VAR}` and `${VAR:-default}` substitution:
//!
//! ```yaml
//! layout:
//!   cell_size: 30
//!   margin_left: ${FIXTURE_ROW_MARGIN:-120}
//!   margin_top: 80
//! fonts:
//!   - /opt/fonts/DejaVuSans-Bold.ttf
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nonogram_common::LayoutConfig;
use serde::{Deserialize, Serialize};

// ============================================================================
// File configuration
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub layout: LayoutOverrides,
    /// Font candidates tried before the built-in face
    #[serde(default)]
    pub fonts: Vec<PathBuf>,
}

/// Partial layout: any field left unset falls through to the next layer.
///
/// `margin` sets both edges; `margin_left`/`margin_top` from the same
/// layer win over it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutOverrides {
    pub cell_size: Option<u32>,
    pub margin: Option<u32>,
    pub margin_left: Option<u32>,
    pub margin_top: Option<u32>,
}

impl LayoutOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, base: LayoutConfig) -> LayoutConfig {
        let margin_left = self.margin_left.or(self.margin).unwrap_or(base.margin_left);
        let margin_top = self.margin_top.or(self.margin).unwrap_or(base.margin_top);
        LayoutConfig::with_margins(
            self.cell_size.unwrap_or(base.cell_size),
            margin_left,
            margin_top,
        )
    }
}

/// Load the YAML configuration file, or the empty configuration when no
/// path is given.
pub fn load_file_config(path: Option<&Path>) -> Result<FileConfig> {
    let Some(path) = path else {
        return Ok(FileConfig::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;
    let expanded = expand_env_vars(&content)?;

    let config: FileConfig = serde_yaml::from_str(&expanded)
        .with_context(|| format!("Failed to parse config from {:?}", path))?;

    if let Some(cell_size) = config.layout.cell_size {
        anyhow::ensure!(cell_size > 0, "layout.cell_size must be greater than 0");
    }

    tracing::debug!(path = %path.display(), fonts = config.fonts.len(), "Loaded config file");
    Ok(config)
}

// ============================================================================
// Layer resolution
// ============================================================================

/// Layout for `render`: flags over file over defaults.
pub fn render_layout(cli: &LayoutOverrides, file: &FileConfig) -> LayoutConfig {
    cli.apply_to(file.layout.apply_to(LayoutConfig::default()))
}

/// Layout requested for `overlay`, if any layer sets one.
///
/// Unset fields come from `recorded` (the input's layout record) when
/// present, otherwise from the defaults. `None` lets the overlay use the
/// recorded layout as is.
pub fn overlay_layout(
    cli: &LayoutOverrides,
    file: &FileConfig,
    recorded: Option<LayoutConfig>,
) -> Option<LayoutConfig> {
    if cli.is_empty() && file.layout.is_empty() {
        return None;
    }
    let base = recorded.unwrap_or_default();
    Some(cli.apply_to(file.layout.apply_to(base)))
}

/// Font candidates: `--font` flags, else the file's `fonts`, else `defaults`.
pub fn font_candidates(cli: &[PathBuf], file: &FileConfig, defaults: &[&str]) -> Vec<PathBuf> {
    if !cli.is_empty() {
        cli.to_vec()
    } else if !file.fonts.is_empty() {
        file.fonts.clone()
    } else {
        defaults.iter().map(PathBuf::from).collect()
    }
}

// ============================================================================
// Environment substitution
// ============================================================================

/// Replace `${VAR}` and `${VAR:-default}` with environment values.
fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find('}')
            .with_context(|| format!("Unclosed variable substitution: ${{{}", after))?;
        result.push_str(&resolve_var_expr(&after[..end])?);
        rest = &after[end + 1..];
    }
    result.push_str(rest);

    Ok(result)
}

fn resolve_var_expr(expr: &str) -> Result<String> {
    match expr.split_once(":-") {
        Some((name, default)) => match std::env::var(name.trim()) {
            Ok(value) if !value.is_empty() => Ok(value),
            _ => Ok(default.to_string()),
        },
        None => std::env::var(expr.trim())
            .with_context(|| format!("Environment variable {} not set", expr)),
    }
}

//! Rendering of extraction results

use crate::cli::{CliError, OutputFormat};
use flakedeps_flake::{PackageDependency, PackageFileContent};
use serde::Serialize;
use std::fmt::Write;

/// Extraction result for one package file found by `scan`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanEntry {
    /// Package file path relative to the scanned directory
    pub package_file: String,
    /// Extracted dependencies
    #[serde(flatten)]
    pub content: PackageFileContent,
}

/// Render the result of a single extraction
///
/// # Errors
/// Returns an error if JSON serialization fails
pub fn render_content(
    content: Option<&PackageFileContent>,
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => to_json(&content),
        OutputFormat::Text => Ok(content.map_or_else(
            || "no dependencies".to_string(),
            |content| render_deps(&content.deps),
        )),
    }
}

/// Render the results of a scan
///
/// # Errors
/// Returns an error if JSON serialization fails
pub fn render_scan(entries: &[ScanEntry], format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => to_json(&entries),
        OutputFormat::Text => {
            if entries.is_empty() {
                return Ok("no dependencies".to_string());
            }
            let mut out = String::new();
            for entry in entries {
                let _ = writeln!(out, "{}:", entry.package_file);
                for line in render_deps(&entry.content.deps).lines() {
                    let _ = writeln!(out, "  {line}");
                }
            }
            Ok(out.trim_end().to_string())
        }
    }
}

fn render_deps(deps: &[PackageDependency]) -> String {
    let width = deps.iter().map(|d| d.dep_name.len()).max().unwrap_or(0);
    deps.iter()
        .map(|dep| {
            format!(
                "{:width$}  {}  {}  {}",
                dep.dep_name,
                dep.package_name,
                dep.current_value.as_deref().unwrap_or("-"),
                dep.current_digest,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize output: {e}")))
}

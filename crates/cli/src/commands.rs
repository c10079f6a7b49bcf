//! Subcommand implementations

use crate::cli::{Cli, CliError, Command};
use crate::output::{ScanEntry, render_content, render_scan};
use flakedeps_flake::{
    ExtractConfig, FsReader, PackageFileContent, TracingObserver, extract_inline,
    extract_package_file, manager,
};
use futures::future::join_all;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use walkdir::{DirEntry, WalkDir};

/// Run the parsed command and return the rendered output
///
/// # Errors
/// Returns an error if configuration or input cannot be read
pub async fn run(cli: &Cli) -> Result<String, CliError> {
    let config = cli.extract_config()?;
    debug!(?config, "Resolved extraction config");

    match &cli.command {
        Command::Extract { package_file } => {
            let content = extract(package_file, &config).await;
            render_content(content.as_ref(), cli.format)
        }
        Command::Inline { lock_file } => {
            let text = read_input(lock_file)?;
            let content = extract_inline(&text, &config, &TracingObserver);
            render_content(content.as_ref(), cli.format)
        }
        Command::Scan { dir } => {
            let entries = scan(dir, &config).await?;
            render_scan(&entries, cli.format)
        }
    }
}

async fn extract(package_file: &Path, config: &ExtractConfig) -> Option<PackageFileContent> {
    extract_package_file(package_file, &FsReader::new(), config, &TracingObserver).await
}

fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| CliError::io(format!("Failed to read stdin: {e}")))?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display())))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Package files below `dir`, relative to it and sorted
///
/// # Errors
/// Returns an error if `dir` is not a readable directory
pub fn find_package_files(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    if !dir.is_dir() {
        return Err(CliError::config(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry))
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.path().strip_prefix(dir).ok().map(Path::to_path_buf))
        .filter(|path| manager::is_package_file(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Extract every package file below `dir` concurrently
///
/// # Errors
/// Returns an error if `dir` is not a readable directory
#[instrument(skip(config))]
pub async fn scan(dir: &Path, config: &ExtractConfig) -> Result<Vec<ScanEntry>, CliError> {
    let package_files = find_package_files(dir)?;
    info!(count = package_files.len(), "Found flake package files");

    let reader = FsReader::with_base(dir);
    let results = join_all(package_files.iter().map(|package_file| {
        extract_package_file(package_file, &reader, config, &TracingObserver)
    }))
    .await;

    Ok(package_files
        .into_iter()
        .zip(results)
        .filter_map(|(package_file, content)| {
            content.map(|content| ScanEntry {
                package_file: package_file.to_string_lossy().replace('\\', "/"),
                content,
            })
        })
        .collect())
}

use anyhow::{bail, Context, Result};
use shared_types::DocumentFormat;
use std::path::{Path, PathBuf};

/// One document to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub format: DocumentFormat,
}

impl InputFile {
    pub fn new(path: PathBuf) -> Self {
        let format = DocumentFormat::from_extension(path.extension().and_then(|e| e.to_str()));
        Self { path, format }
    }

    /// File name without extension, used to name the outputs.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "contacts".to_string())
    }
}

/// Expands the command-line inputs: files are taken as given, folders
/// contribute their `.csv` and `.vcf` files (not recursive, sorted by name).
pub fn discover_inputs(paths: &[PathBuf]) -> Result<Vec<InputFile>> {
    let mut inputs = Vec::new();

    for path in paths {
        if path.is_dir() {
            let found = scan_folder(path)?;
            if found.is_empty() {
                tracing::warn!("No CSV or VCF files found in '{}'", path.display());
            }
            inputs.extend(found);
        } else if path.is_file() {
            inputs.push(InputFile::new(path.clone()));
        } else {
            bail!("'{}' not found", path.display());
        }
    }

    Ok(inputs)
}

fn scan_folder(folder: &Path) -> Result<Vec<InputFile>> {
    let entries = std::fs::read_dir(folder)
        .with_context(|| format!("Failed to read folder {}", folder.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && has_contact_extension(&path) {
            files.push(path);
        }
    }
    files.sort();

    let inputs: Vec<InputFile> = files.into_iter().map(InputFile::new).collect();
    let vcf_count = inputs
        .iter()
        .filter(|input| input.format == DocumentFormat::Vcf)
        .count();
    tracing::info!(
        "Found {} CSV file(s) and {} VCF file(s) in '{}'",
        inputs.len() - vcf_count,
        vcf_count,
        folder.display()
    );

    Ok(inputs)
}

fn has_contact_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv") || e.eq_ignore_ascii_case("vcf"))
        .unwrap_or(false)
}

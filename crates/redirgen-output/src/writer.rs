#![deny(unsafe_code)]

//! Writes one compiled batch to disk.
//!
//! Four files per run, sharing a timestamp-derived base name: a verbatim
//! copy of the input CSV for audit, the redirect commands, the unbind
//! commands, and the full rollback commands. Everything is buffered in
//! memory before the first file is opened, so a failed run leaves no
//! partial output behind.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use tracing::info;

use redirgen_compile::BatchOutput;

/// Paths of the four files written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPaths {
    pub input_copy: PathBuf,
    pub redirects: PathBuf,
    pub unbind: PathBuf,
    pub rollback: PathBuf,
}

/// Shared base name for one run's output files: `YYYYMMDD-HHMMSS`.
pub fn timestamp_base(now: DateTime<Local>) -> String {
    now.format("%Y%m%d-%H%M%S").to_string()
}

/// Join lines with `\n` terminators. Always `\n`, never the platform
/// default: the files are consumed on the appliance side.
fn render_lines(lines: &[String]) -> String {
    let mut text = String::new();
    for line in lines {
        let _ = writeln!(text, "{line}");
    }
    text
}

fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    fs::write(path, render_lines(lines))
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Write the batch outputs and the input audit copy.
///
/// # Errors
///
/// Fails before writing anything when `output_dir` does not exist; this
/// is the single configuration check of the run. Individual write
/// failures surface with the offending path in context.
pub fn write_batch(
    output_dir: &Path,
    base: &str,
    input_csv: &Path,
    batch: &BatchOutput,
) -> Result<BatchPaths> {
    if !output_dir.is_dir() {
        bail!(
            "output directory {} does not exist",
            output_dir.display()
        );
    }

    let paths = BatchPaths {
        input_copy: output_dir.join(format!("{base}_input.csv")),
        redirects: output_dir.join(format!("{base}_redirects.txt")),
        unbind: output_dir.join(format!("{base}_unbind.txt")),
        rollback: output_dir.join(format!("{base}_rollback.txt")),
    };

    fs::copy(input_csv, &paths.input_copy).with_context(|| {
        format!(
            "failed to copy {} to {}",
            input_csv.display(),
            paths.input_copy.display()
        )
    })?;
    write_lines(&paths.redirects, &batch.redirects)?;
    write_lines(&paths.unbind, &batch.unbind)?;
    write_lines(&paths.rollback, &batch.rollback)?;

    info!(
        output_dir = %output_dir.display(),
        base,
        redirect_lines = batch.redirects.len(),
        "batch written"
    );
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn test_batch() -> BatchOutput {
        BatchOutput {
            redirects: vec!["add one".to_string(), "add two".to_string()],
            unbind: vec!["unbind one".to_string()],
            rollback: vec!["unbind one".to_string(), "rm one".to_string()],
            specific_rules: 1,
            fallback_rules: 0,
        }
    }

    #[test]
    fn timestamp_base_format() {
        let now = Local.with_ymd_and_hms(2026, 8, 23, 14, 5, 9).unwrap();
        assert_eq!(timestamp_base(now), "20260823-140509");
    }

    #[test]
    fn writes_four_files_with_newline_terminators() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rules.csv");
        fs::write(&input, "Domain;RequestUrl;RedirectUrl\na;/b;c\n").unwrap();

        let paths = write_batch(dir.path(), "20260823-140509", &input, &test_batch()).unwrap();

        let redirects = fs::read_to_string(&paths.redirects).unwrap();
        assert_eq!(redirects, "add one\nadd two\n");
        let unbind = fs::read_to_string(&paths.unbind).unwrap();
        assert_eq!(unbind, "unbind one\n");
        let rollback = fs::read_to_string(&paths.rollback).unwrap();
        assert_eq!(rollback, "unbind one\nrm one\n");

        let copied = fs::read_to_string(&paths.input_copy).unwrap();
        assert_eq!(copied, "Domain;RequestUrl;RedirectUrl\na;/b;c\n");
        assert!(
            paths
                .redirects
                .file_name()
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("20260823-140509_")
        );
    }

    #[test]
    fn missing_output_directory_is_fatal_before_any_write() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rules.csv");
        fs::write(&input, "x\n").unwrap();
        let missing = dir.path().join("nope");

        let error = write_batch(&missing, "20260823-140509", &input, &test_batch()).unwrap_err();
        assert!(error.to_string().contains("does not exist"));
        assert!(!missing.exists());
    }
}

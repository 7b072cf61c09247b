#![deny(unsafe_code)]

//! CSV reader for redirect rules.
//!
//! The input is a `;`-delimited UTF-8 file with a header row containing
//! `Domain`, `RequestUrl` and `RedirectUrl`. Columns are located by name,
//! not position, so extra columns and reordering are tolerated. Every
//! required field must be non-empty after trimming; anything else is a
//! fatal ingest error, which is the only place empty fields are checked.

use std::path::{Path, PathBuf};

use tracing::debug;

use redirgen_model::RedirectRule;

/// Header of the column holding the matched hostname.
pub const DOMAIN_COLUMN: &str = "Domain";
/// Header of the column holding the request path pattern.
pub const REQUEST_URL_COLUMN: &str = "RequestUrl";
/// Header of the column holding the relative redirect destination.
pub const REDIRECT_URL_COLUMN: &str = "RedirectUrl";

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("missing required column {column} in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("empty {field} field on data line {line} of {path}")]
    EmptyField {
        path: PathBuf,
        line: u64,
        field: String,
    },
}

/// Strip surrounding whitespace and a UTF-8 BOM from a header cell.
fn normalize_header(raw: &str) -> &str {
    raw.trim().trim_matches('\u{feff}')
}

/// Unwrap the underlying io error where there is one; everything else is
/// a parse problem.
fn csv_error(path: &Path, source: csv::Error) -> IngestError {
    let message = source.to_string();
    match source.into_kind() {
        csv::ErrorKind::Io(io) => IngestError::Io {
            path: path.to_path_buf(),
            source: io,
        },
        _ => IngestError::Csv {
            path: path.to_path_buf(),
            message,
        },
    }
}

fn column_index(headers: &csv::StringRecord, name: &str, path: &Path) -> Result<usize, IngestError> {
    headers
        .iter()
        .position(|h| normalize_header(h) == name)
        .ok_or_else(|| IngestError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
}

fn required_field(
    record: &csv::StringRecord,
    index: usize,
    field: &str,
    line: u64,
    path: &Path,
) -> Result<String, IngestError> {
    let value = record.get(index).unwrap_or("").trim();
    if value.is_empty() {
        return Err(IngestError::EmptyField {
            path: path.to_path_buf(),
            line,
            field: field.to_string(),
        });
    }
    Ok(value.to_string())
}

/// Read all redirect rules from a `;`-delimited CSV file.
///
/// Rows are returned in file order; sorting is the orchestrator's job.
///
/// # Errors
///
/// Returns an error when the file cannot be read, a required column is
/// absent from the header, or a required field is empty.
pub fn read_redirect_rules(path: &Path) -> Result<Vec<RedirectRule>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| csv_error(path, source))?;

    let headers = reader
        .headers()
        .map_err(|source| csv_error(path, source))?
        .clone();
    let domain_idx = column_index(&headers, DOMAIN_COLUMN, path)?;
    let request_idx = column_index(&headers, REQUEST_URL_COLUMN, path)?;
    let redirect_idx = column_index(&headers, REDIRECT_URL_COLUMN, path)?;

    let mut rules = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|source| csv_error(path, source))?;
        let line = (idx as u64) + 1;

        rules.push(RedirectRule {
            domain: required_field(&record, domain_idx, DOMAIN_COLUMN, line, path)?,
            request_path: required_field(&record, request_idx, REQUEST_URL_COLUMN, line, path)?,
            redirect_path: required_field(&record, redirect_idx, REDIRECT_URL_COLUMN, line, path)?,
        });
    }
    debug!(path = %path.display(), rule_count = rules.len(), "redirect rules loaded");
    Ok(rules)
}

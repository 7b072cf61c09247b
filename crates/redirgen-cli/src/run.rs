//! End-to-end run: ingest, compile, write.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{info, info_span};

use redirgen_compile::compile_batch;
use redirgen_ingest::read_redirect_rules;
use redirgen_model::CompileOptions;
use redirgen_output::{BatchPaths, timestamp_base, write_batch};

/// Everything one generation run needs, resolved from the CLI surface.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub csv_path: PathBuf,
    pub output_dir: PathBuf,
    pub options: CompileOptions,
}

/// Outcome of a successful run, consumed by the summary printer.
#[derive(Debug)]
pub struct RunResult {
    pub base: String,
    pub rule_count: usize,
    pub specific_rules: usize,
    pub fallback_rules: usize,
    pub paths: BatchPaths,
}

/// Execute one generation run.
///
/// Strictly sequential: the CSV is fully read before compilation, and
/// all command lines are buffered before any output file is opened.
pub fn run(request: &RunRequest) -> Result<RunResult> {
    let span = info_span!("generate", csv = %request.csv_path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let rules = read_redirect_rules(&request.csv_path)
        .with_context(|| format!("failed to load rules from {}", request.csv_path.display()))?;
    let rule_count = rules.len();

    let batch = compile_batch(rules, &request.options);
    let base = timestamp_base(Local::now());
    let paths = write_batch(&request.output_dir, &base, &request.csv_path, &batch)
        .context("failed to write outputs")?;

    info!(
        rule_count,
        specific_rules = batch.specific_rules,
        fallback_rules = batch.fallback_rules,
        duration_ms = start.elapsed().as_millis(),
        "generation complete"
    );
    Ok(RunResult {
        base,
        rule_count,
        specific_rules: batch.specific_rules,
        fallback_rules: batch.fallback_rules,
        paths,
    })
}

//! CLI argument definitions for the redirect generator.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "redirgen",
    version,
    about = "Generate responder redirect policies from a CSV rule list",
    long_about = "Compile a semicolon-delimited CSV of redirect rules \
                  (Domain;RequestUrl;RedirectUrl) into responder action, \
                  responder policy and vserver bind commands, plus matching \
                  unbind and rollback command files."
)]
pub struct Cli {
    /// Path to the redirect rule CSV (Domain;RequestUrl;RedirectUrl).
    #[arg(value_name = "CSV_PATH")]
    pub csv_path: PathBuf,

    /// URL prefix every redirect target is joined onto.
    #[arg(long = "redirect-url-prefix", value_name = "URL")]
    pub redirect_url_prefix: String,

    /// Content-switching vserver handling HTTP traffic.
    #[arg(long = "http-vserver", value_name = "NAME")]
    pub http_vserver: String,

    /// Content-switching vserver handling HTTPS traffic.
    #[arg(long = "https-vserver", value_name = "NAME")]
    pub https_vserver: String,

    /// Directory the four output files are written to. Must exist.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// First rule number for specific (non-wildcard) rules.
    #[arg(long = "specific-rule-number-begin", value_name = "N", default_value_t = 1000)]
    pub specific_rule_number_begin: u32,

    /// First rule number for fallback (trailing-wildcard) rules.
    #[arg(long = "fallback-rule-number-begin", value_name = "N", default_value_t = 9000)]
    pub fallback_rule_number_begin: u32,

    /// Step between consecutive rule numbers within a group.
    #[arg(long = "rule-number-increment", value_name = "N", default_value_t = 1)]
    pub rule_number_increment: u32,

    /// First bind priority; fallback rules continue where specific rules end.
    #[arg(long = "priority-begin", value_name = "N", default_value_t = 100)]
    pub priority_begin: u32,

    /// Step between consecutive bind priorities.
    #[arg(long = "priority-increment", value_name = "N", default_value_t = 10)]
    pub priority_increment: u32,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

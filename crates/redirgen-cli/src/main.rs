//! Redirect policy generator CLI.

use clap::{ColorChoice, Parser};
use redirgen_cli::logging::{LogConfig, LogFormat, init_logging};
use redirgen_cli::run::{RunRequest, run};
use redirgen_model::{CompileOptions, NumberingOptions};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, LogFormatArg, LogLevelArg};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let request = request_from_cli(&cli);
    let exit_code = match run(&request) {
        Ok(result) => {
            print_summary(&result);
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn request_from_cli(cli: &Cli) -> RunRequest {
    let numbering = NumberingOptions {
        specific_rule_number_begin: cli.specific_rule_number_begin,
        fallback_rule_number_begin: cli.fallback_rule_number_begin,
        rule_number_increment: cli.rule_number_increment,
        priority_begin: cli.priority_begin,
        priority_increment: cli.priority_increment,
    };
    RunRequest {
        csv_path: cli.csv_path.clone(),
        output_dir: cli.output_dir.clone(),
        options: CompileOptions::new(
            cli.redirect_url_prefix.clone(),
            cli.http_vserver.clone(),
            cli.https_vserver.clone(),
        )
        .with_numbering(numbering),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! ulog demo entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Deserialize;
use thiserror::Error;

use ulog::backend::level_for;
use ulog::config::{self, ConfigOverrides, ResolvedConfig};
use ulog::telemetry::init_telemetry;
use ulog::{
    args, ArgsConfig, CallError, ExceptionConfig, Function, Instrument, ReturnConfig, Severity,
    Signature, TypedFunc, Ulog,
};

/// ulog - call logging decorators.
#[derive(Parser)]
#[command(name = "ulog")]
#[command(author, version, about = "Call logging decorators demo", long_about = None)]
struct Cli {
    /// Minimum severity that reaches the log (debug, info, warning, error, critical or a rank like 30)
    #[arg(short, long, env = "ULOG_THRESHOLD")]
    threshold: Option<Severity>,

    /// Config file (default: ulog.json, .ulog.json, ulog.yaml or ulog.yml in the current directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not attach backtraces to failure records
    #[arg(long)]
    no_trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Divide two integers with argument, return and failure logging attached
    Divide {
        #[arg(allow_negative_numbers = true)]
        x: i64,
        #[arg(allow_negative_numbers = true)]
        y: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum DivError {
    #[error("division by zero")]
    ZeroDivision,
    #[error("integer overflow")]
    Overflow,
}

#[derive(Debug, Deserialize)]
struct DivideArgs {
    x: i64,
    y: i64,
}

fn divide(args: DivideArgs) -> Result<i64, DivError> {
    if args.y == 0 {
        return Err(DivError::ZeroDivision);
    }
    args.x.checked_div(args.y).ok_or(DivError::Overflow)
}

fn load(cli: &Cli) -> anyhow::Result<ResolvedConfig> {
    let overrides = ConfigOverrides {
        threshold: cli.threshold,
        include_trace: cli.no_trace.then_some(false),
        ..Default::default()
    };
    match &cli.config {
        Some(path) => config::load_config_from(path, overrides)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => config::load_config(Path::new("."), overrides).context("Failed to load config"),
    }
}

fn run_divide(ulog: &Ulog, config: &ResolvedConfig, x: i64, y: i64) -> anyhow::Result<ExitCode> {
    let signature = Signature::function("divide").param("x").param("y").build()?;
    let divide = TypedFunc::new(signature, divide)
        .log_args(ulog, ArgsConfig::default())?
        .log_return(ulog, ReturnConfig::default())?
        .log_exception(ulog, ExceptionConfig::default().with_trace(config.include_trace))?;

    match divide.invoke(&args![x, y]) {
        Ok(quotient) => {
            println!("{} {x} / {y} = {}", "ok".green().bold(), quotient.to_string().cyan());
            Ok(ExitCode::SUCCESS)
        }
        Err(CallError::Raised(err)) => {
            eprintln!("{} {err}", "error:".red().bold());
            Ok(ExitCode::FAILURE)
        }
        Err(CallError::Instrumentation(err)) => Err(err.into()),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    // Let records at the chosen threshold through the subscriber too.
    let mut telemetry = config.telemetry.clone();
    let level = level_for(config.threshold);
    if level > telemetry.default_level {
        telemetry = telemetry.with_level(level);
    }
    let _guard = init_telemetry(&telemetry).context("Failed to initialize telemetry")?;

    tracing::debug!(
        threshold = %config.threshold,
        logger = %config.logger_name,
        "Configuration loaded"
    );

    let ulog = Ulog::from_config(&config);
    match cli.command {
        Commands::Divide { x, y } => run_divide(&ulog, &config, x, y),
    }
}

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use scriptext::{CompilationSnapshot, ScriptExtPlugin, TagDescriptor, TagRenderer};

/// Rewrite bundler-generated script tags from a compilation snapshot
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Plugin options file (JSON)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    options: Option<PathBuf>,

    /// Compilation snapshot file: assets, chunks, output options, head/body tags
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    compilation: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "html")]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Html,
    Json,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    head: &'a [TagDescriptor],
    body: &'a [TagDescriptor],
    removed_assets: &'a [String],
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let plugin = match &cli.options {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read options {}", path.display()))?;
            ScriptExtPlugin::from_json(&text)
                .with_context(|| format!("invalid options in {}", path.display()))?
        }
        None => ScriptExtPlugin::default(),
    };

    let snapshot = CompilationSnapshot::load(&cli.compilation)
        .with_context(|| format!("failed to load compilation {}", cli.compilation.display()))?;
    let CompilationSnapshot {
        mut compilation,
        document,
    } = snapshot;

    let document = plugin.alter_asset_tags(&compilation, document)?;
    let removed = plugin.emit(&mut compilation);

    match cli.format {
        OutputFormat::Html => {
            println!("<!-- head -->");
            println!("{}", TagRenderer::render_all(&document.head));
            println!("<!-- body -->");
            println!("{}", TagRenderer::render_all(&document.body));
            if !removed.is_empty() {
                println!("<!-- removed assets: {} -->", removed.join(", "));
            }
        }
        OutputFormat::Json => {
            let report = Report {
                head: &document.head,
                body: &document.body,
                removed_assets: &removed,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

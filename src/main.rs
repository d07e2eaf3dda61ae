//! ckan-mirror CLI - one-way mirroring between CKAN catalogs
//!
//! Usage: ckan-mirror -s <URL> -d <URL> [-S <KEY>] [-D <KEY>] [-t <DIR>]
//!
//! Exit status: 0 in sync, 1 changes applied, 2 error.

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use ckan_mirror::domain::ports::Catalog;
use ckan_mirror::infrastructure::{JsonEventSink, TracingEventSink};
use ckan_mirror::presentation::output::EXIT_FAILURE;
use ckan_mirror::presentation::{
    create_mirror_use_case, exit_code, load_settings, Cli, OutputFormat, TextRenderer,
};
use ckan_mirror::ChangeSet;

fn main() {
    // Usage errors (including no arguments) exit 2; --help and --version exit 0
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(changes) => std::process::exit(exit_code(&changes)),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(EXIT_FAILURE);
        }
    }
}

fn run(cli: &Cli) -> Result<ChangeSet> {
    let (settings, warnings) = load_settings(cli).context("invalid configuration")?;
    for warning in &warnings {
        warn!("{}", warning);
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let use_case = create_mirror_use_case(&settings)?;
    let source = use_case.source().display_name();
    let destination = use_case.destination().display_name();

    let changes = match format {
        OutputFormat::Json => use_case.with_events(JsonEventSink::stdout()).sync_all(),
        OutputFormat::Text => use_case.with_events(TracingEventSink).sync_all(),
    }
    .context("mirror run failed")?;

    if format == OutputFormat::Text {
        let renderer = TextRenderer {
            unicode: std::io::stdout().is_terminal(),
        };
        renderer
            .render(&changes, &source, &destination)
            .context("failed to write summary")?;
    }

    Ok(changes)
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

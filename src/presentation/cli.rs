//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Connection flags are optional here; missing values may still come from
//!   the environment or the config file
//! - The scratch directory default (`.`) is applied by the config layer so
//!   that a flag left unset does not mask lower layers

use std::path::PathBuf;

use clap::Parser;

use crate::config::ConfigOverrides;

/// ckan-mirror - one-way mirroring between CKAN catalogs
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "ckan-mirror")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
#[command(
    after_help = "Exit status: 0 when already in sync, 1 when changes were applied, 2 on error."
)]
pub struct Cli {
    /// Source catalog API root (e.g. https://source.example.org/api/3/)
    #[arg(short = 's', long, value_name = "URL")]
    pub source: Option<String>,

    /// API key for the source catalog
    #[arg(short = 'S', long, value_name = "KEY")]
    pub source_api_key: Option<String>,

    /// Destination catalog API root
    #[arg(short = 'd', long, value_name = "URL")]
    pub destination: Option<String>,

    /// API key for the destination catalog
    #[arg(short = 'D', long, value_name = "KEY")]
    pub destination_api_key: Option<String>,

    /// Directory for staging resource payloads [default: .]
    #[arg(short = 't', long, value_name = "DIR")]
    pub temporary_path: Option<PathBuf>,

    /// Config file (default: <config dir>/ckan-mirror/config.toml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Stream NDJSON events on stdout
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Settings given on the command line, highest-priority layer
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            source_url: self.source.clone(),
            source_api_key: self.source_api_key.clone(),
            destination_url: self.destination.clone(),
            destination_api_key: self.destination_api_key.clone(),
            temporary_path: self.temporary_path.clone(),
        }
    }
}

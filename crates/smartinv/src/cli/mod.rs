pub mod info;
pub mod list;
pub mod scan;

use clap::{Parser, Subcommand};
use smartinv_lib::{Config, InterfaceHint, Overrides, Result};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "smartinv")]
#[command(about = "Inventory of physical storage devices via smartctl", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Path to the smartctl binary")]
    pub smartctl: Option<PathBuf>,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, short = 'q', global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List deduplicated storage devices")]
    List {
        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,

        #[arg(long, overrides_with = "no_parallel", help = "Query devices concurrently")]
        parallel: bool,

        #[arg(
            long,
            overrides_with = "parallel",
            help = "Query devices one at a time, even if the config enables parallel"
        )]
        no_parallel: bool,

        #[arg(long, help = "Per-device query timeout in seconds (0 disables)")]
        timeout: Option<u64>,
    },

    #[command(about = "List scanned device names without querying them")]
    Scan {
        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },

    #[command(about = "Query a single device")]
    Info {
        #[arg(help = "Device name as printed by scan (e.g. sda, csmi0,0)")]
        name: String,

        #[arg(long, help = "Interface hint: csmi or unknown (default: inferred from the name)")]
        hint: Option<InterfaceHint>,

        #[arg(long, short = 'd', help = "smartctl device type to force (e.g. sat, nvme)")]
        device_type: Option<String>,

        #[arg(long, help = "Print JSON")]
        json: bool,

        #[arg(long, help = "Query timeout in seconds (0 disables)")]
        timeout: Option<u64>,
    },
}

pub fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Collapses a `--flag`/`--no-flag` pair; `None` when neither was given.
pub fn flag_pair(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

pub fn load_config(cli: &Cli, timeout: Option<u64>, parallel: Option<bool>) -> Result<Config> {
    let config = Config::new(Overrides {
        config_path: cli.config.clone(),
        smartctl_path: cli.smartctl.clone(),
        timeout_secs: timeout,
        parallel,
    })?;

    if let Some(path) = &config.config_path {
        log::info!("Using config file {}", path.display());
    }

    Ok(config)
}

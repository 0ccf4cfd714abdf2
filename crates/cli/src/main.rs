// SPDX-License-Identifier: MIT

//! `upkeep` - unattended host maintenance with email notification.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

mod commands;
mod exit_error;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::exit_error::ExitError;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_GIT_HASH"), ")");

#[derive(Parser)]
#[command(name = "upkeep", version = VERSION, about = "Unattended host maintenance with email notification")]
struct Cli {
    /// Settings file with the mail relay and addresses
    #[arg(long, global = true, default_value = upkeep_core::DEFAULT_SETTINGS_PATH)]
    env_file: PathBuf,

    /// Write logs to daily-rolling files under this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the maintenance plan and email the outcome
    Update(commands::update::UpdateArgs),
    /// Update the DNS filter appliance when it is installed
    FilterUpdate(commands::filter::FilterArgs),
    /// Validate the settings file
    Check(commands::check::CheckArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_dir.as_deref());

    let result = match cli.command {
        Commands::Update(args) => commands::update::run(args, &cli.env_file).await,
        Commands::FilterUpdate(args) => commands::filter::run(args, &cli.env_file).await,
        Commands::Check(args) => commands::check::run(args, &cli.env_file).await,
    };

    if let Err(error) = result {
        let code = error.downcast_ref::<ExitError>().map_or(1, |exit| exit.code);
        eprintln!("error: {error}");
        std::process::exit(code);
    }
}

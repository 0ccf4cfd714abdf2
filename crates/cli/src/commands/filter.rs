// SPDX-License-Identifier: MIT

//! `upkeep filter-update` - refresh the DNS filter appliance when present.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use upkeep_adapters::{HostProcessAdapter, SmtpNotifyAdapter};
use upkeep_core::MailSettings;
use upkeep_engine::{FilterOutcome, FilterUpdate, DEFAULT_FILTER_BIN};

use crate::exit_error::ExitError;

#[derive(Args)]
pub struct FilterArgs {
    /// Appliance binary to probe and run
    #[arg(long, default_value = DEFAULT_FILTER_BIN)]
    pub bin: PathBuf,
}

pub async fn run(args: FilterArgs, env_file: &Path) -> Result<()> {
    let settings = MailSettings::load(env_file).map_err(|error| {
        tracing::error!(error = %error, "configuration error, nothing was run");
        ExitError::config(error)
    })?;

    let filter = FilterUpdate::new(HostProcessAdapter::new(), SmtpNotifyAdapter::new(settings))
        .bin(args.bin);

    match filter.run().await {
        FilterOutcome::Skipped => println!("DNS filter not installed, nothing to do."),
        FilterOutcome::Updated(output) => {
            println!("DNS filter updated.");
            if !output.is_empty() {
                println!("{output}");
            }
        }
        FilterOutcome::Failed(description) => {
            println!("DNS filter update failed: {description}");
        }
    }
    Ok(())
}

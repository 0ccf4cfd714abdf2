// SPDX-License-Identifier: MIT

//! Optional DNS-filter appliance update.
//!
//! Some of the hosts this tool maintains run a DNS-filtering appliance with
//! its own self-updater. The workflow probes for the binary, runs its update
//! flag elevated, and mails the result. A host without the appliance skips
//! the whole thing without sending anything.

use std::path::PathBuf;

use upkeep_adapters::{NotifyAdapter, ProcessAdapter};
use upkeep_core::{CommandSpec, NotificationPayload};

/// Default install location of the appliance binary.
pub const DEFAULT_FILTER_BIN: &str = "/usr/local/bin/pihole";

/// Result of one appliance update attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The appliance binary is not installed.
    Skipped,
    /// The updater ran to completion; carries its output.
    Updated(String),
    /// The updater failed; carries the failure description.
    Failed(String),
}

upkeep_core::simple_display! {
    FilterOutcome {
        Skipped => "skipped",
        Updated(..) => "updated",
        Failed(..) => "failed",
    }
}

pub struct FilterUpdate<P, N> {
    processes: P,
    notifier: N,
    bin: PathBuf,
}

impl<P, N> FilterUpdate<P, N>
where
    P: ProcessAdapter,
    N: NotifyAdapter,
{
    pub fn new(processes: P, notifier: N) -> Self {
        Self {
            processes,
            notifier,
            bin: PathBuf::from(DEFAULT_FILTER_BIN),
        }
    }

    upkeep_core::setters! {
        into { bin: PathBuf }
    }

    pub async fn run(&self) -> FilterOutcome {
        if !tokio::fs::try_exists(&self.bin).await.unwrap_or(false) {
            tracing::warn!(bin = %self.bin.display(), "dns filter not installed, skipping update");
            return FilterOutcome::Skipped;
        }

        let bin = self.bin.to_string_lossy();
        let spec = CommandSpec::new([bin.as_ref(), "-up"]).elevated();
        tracing::info!(cmd = %spec.command_line(), "updating dns filter");
        let outcome = self.processes.execute(&spec).await;

        let (payload, result) = match &outcome.result {
            Ok(output) => (
                NotificationPayload::new(
                    "DNS Filter Update Successful",
                    format!("The DNS filter was updated successfully.\n\n{output}"),
                ),
                FilterOutcome::Updated(output.clone()),
            ),
            Err(error) => (
                NotificationPayload::new(
                    "DNS Filter Update Failed",
                    format!("An error occurred while updating the DNS filter.\n\nError: {error}"),
                ),
                FilterOutcome::Failed(error.to_string()),
            ),
        };

        if let Err(notify_error) = self.notifier.notify(&payload).await {
            tracing::warn!(subject = %payload.subject, %notify_error, "notification failed, continuing");
        }
        result
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;

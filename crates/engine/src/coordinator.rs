// SPDX-License-Identifier: MIT

//! Post-run reboot gating.
//!
//! When a run leaves a reboot pending, the coordinator waits out a grace
//! interval (so the notification has time to leave the host) and then issues
//! the privileged reboot command. The reboot is the terminal action of the
//! workflow; a failure to issue it is logged and nothing else happens.

use std::time::Duration;

use upkeep_adapters::ProcessAdapter;
use upkeep_core::{reboot_command, UpdateRun};

/// Delay between the notification attempt and the reboot.
pub const DEFAULT_GRACE: Duration = Duration::from_secs(60);

/// When the coordinator may proceed to reboot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RebootGate {
    /// Proceed once the notification was attempted, delivered or not.
    /// Delivery failure must not suppress a required reboot.
    #[default]
    AfterAttempt,
    /// Proceed only if the notification was actually delivered.
    AfterDelivery,
}

upkeep_core::simple_display! {
    RebootGate {
        AfterAttempt => "after-attempt",
        AfterDelivery => "after-delivery",
    }
}

pub struct RebootCoordinator<P> {
    processes: P,
    gate: RebootGate,
    grace: Duration,
}

impl<P: ProcessAdapter> RebootCoordinator<P> {
    pub fn new(processes: P) -> Self {
        Self {
            processes,
            gate: RebootGate::default(),
            grace: DEFAULT_GRACE,
        }
    }

    upkeep_core::setters! {
        set {
            gate: RebootGate,
            grace: Duration,
        }
    }

    /// Reboot the host if the run requires it and the gate allows it.
    ///
    /// Returns whether the reboot command was issued successfully.
    pub async fn maybe_reboot(&self, run: &UpdateRun, delivered: bool) -> bool {
        if !run.reboot.required {
            return false;
        }
        if self.gate == RebootGate::AfterDelivery && !delivered {
            tracing::warn!(
                gate = %self.gate,
                "reboot required but the notification was not delivered, skipping reboot"
            );
            return false;
        }

        tracing::info!(
            grace_secs = self.grace.as_secs(),
            reason = %run.reboot.reason(),
            "reboot pending, waiting out the grace interval"
        );
        tokio::time::sleep(self.grace).await;

        let spec = reboot_command();
        let outcome = self.processes.execute(&spec).await;
        match outcome.result {
            Ok(_) => {
                tracing::info!("reboot issued");
                true
            }
            Err(error) => {
                tracing::error!(%error, "reboot command failed");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;

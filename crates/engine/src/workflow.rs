// SPDX-License-Identifier: MIT

//! The end-to-end update workflow: sequence, classify, notify, maybe reboot.

use std::time::Duration;

use serde::Serialize;

use upkeep_adapters::{NotifyAdapter, ProcessAdapter, RebootMarkerAdapter};
use upkeep_core::{classify, CommandSpec, NotificationPayload, RunStatus, UpdateRun};

use crate::coordinator::{RebootCoordinator, RebootGate};
use crate::sequencer::UpdateSequencer;

/// What one maintenance run did, for callers that render output.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub status: RunStatus,
    pub run: UpdateRun,
    pub payload: NotificationPayload,
    pub delivered: bool,
    pub reboot_issued: bool,
}

/// Drives one maintenance run from first command to final reboot decision.
///
/// Exactly one notification payload is produced per run, and the reboot
/// decision comes strictly after the notification attempt.
pub struct UpdateWorkflow<P, M, N> {
    sequencer: UpdateSequencer<P, M>,
    coordinator: RebootCoordinator<P>,
    notifier: N,
}

impl<P, M, N> UpdateWorkflow<P, M, N>
where
    P: ProcessAdapter,
    M: RebootMarkerAdapter,
    N: NotifyAdapter,
{
    pub fn new(processes: P, marker: M, notifier: N) -> Self {
        Self {
            sequencer: UpdateSequencer::new(processes.clone(), marker),
            coordinator: RebootCoordinator::new(processes),
            notifier,
        }
    }

    pub fn gate(mut self, gate: RebootGate) -> Self {
        self.coordinator = self.coordinator.gate(gate);
        self
    }

    pub fn grace(mut self, grace: Duration) -> Self {
        self.coordinator = self.coordinator.grace(grace);
        self
    }

    pub async fn run(&self, specs: &[CommandSpec]) -> RunReport {
        let run = self.sequencer.run(specs).await;
        let payload = classify(&run);
        let delivered = self.notify(&payload).await;
        let reboot_issued = self.coordinator.maybe_reboot(&run, delivered).await;

        let status = run.status();
        tracing::info!(%status, delivered, reboot_issued, "maintenance run finished");
        RunReport {
            status,
            run,
            payload,
            delivered,
            reboot_issued,
        }
    }

    /// Attempt delivery; failure is folded into `false`, never raised.
    async fn notify(&self, payload: &NotificationPayload) -> bool {
        match self.notifier.notify(payload).await {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(subject = %payload.subject, %error, "notification failed, continuing");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT

//! Ordered execution of the maintenance plan.

use upkeep_adapters::{ProcessAdapter, RebootMarkerAdapter};
use upkeep_core::{CommandSpec, UpdateRun};

/// Runs every spec in declaration order and accumulates the outcomes.
///
/// An individual failure never short-circuits the sequence: the run always
/// carries one outcome per spec. The reboot marker is probed once, after the
/// last command, so restarts requested by this run's upgrades are seen.
pub struct UpdateSequencer<P, M> {
    processes: P,
    marker: M,
}

impl<P, M> UpdateSequencer<P, M>
where
    P: ProcessAdapter,
    M: RebootMarkerAdapter,
{
    pub fn new(processes: P, marker: M) -> Self {
        Self { processes, marker }
    }

    pub async fn run(&self, specs: &[CommandSpec]) -> UpdateRun {
        let mut outcomes = Vec::with_capacity(specs.len());
        for (idx, spec) in specs.iter().enumerate() {
            tracing::info!(
                cmd = %spec.command_line(),
                step = idx + 1,
                total = specs.len(),
                "running maintenance command"
            );
            let outcome = self.processes.execute(spec).await;
            match &outcome.result {
                Ok(_) => tracing::info!(cmd = %spec.command_line(), "command succeeded"),
                Err(error) => {
                    tracing::warn!(cmd = %spec.command_line(), %error, "command failed, continuing")
                }
            }
            outcomes.push(outcome);
        }

        let reboot = self.marker.probe().await;
        UpdateRun::new(outcomes, reboot)
    }
}

#[cfg(test)]
#[path = "sequencer_tests.rs"]
mod tests;

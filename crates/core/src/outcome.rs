// SPDX-License-Identifier: MIT

//! Per-command outcomes and the aggregate view of a finished run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::command::CommandSpec;

// ---------------------------------------------------------------------------
// Command errors
// ---------------------------------------------------------------------------

/// Ways a single maintenance command can fail.
///
/// Failures are recorded, never propagated: a failing command does not stop
/// the commands after it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum CommandError {
    /// The process ran to completion with a non-zero exit status.
    #[error("exit status {code}: {stderr}")]
    ExitNonZero { code: i32, stderr: String },
    /// The process exceeded its wall-clock budget and was stopped.
    #[error("timed out after {}s", .budget.as_secs())]
    Timeout { budget: Duration },
    /// The program could not be found on the host.
    #[error("command not found")]
    NotFound,
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// The result of running one command from the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub spec: CommandSpec,
    pub result: Result<String, CommandError>,
}

impl CommandOutcome {
    pub fn success(spec: CommandSpec, stdout: impl Into<String>) -> Self {
        Self {
            spec,
            result: Ok(stdout.into()),
        }
    }

    pub fn failure(spec: CommandSpec, error: CommandError) -> Self {
        Self {
            spec,
            result: Err(error),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    /// Captured stdout for a successful command.
    pub fn output(&self) -> Option<&str> {
        self.result.as_deref().ok()
    }

    /// `command: error` line for failure reports.
    pub fn describe_failure(&self) -> Option<String> {
        self.result
            .as_ref()
            .err()
            .map(|e| format!("{}: {e}", self.spec.command_line()))
    }
}

/// Whether the host asked for a restart after the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebootPending {
    pub required: bool,
    /// Packages that requested the restart, when the host records them.
    pub packages: Vec<String>,
}

impl RebootPending {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn required_by(packages: Vec<String>) -> Self {
        Self {
            required: true,
            packages,
        }
    }

    /// Comma-separated package list, or `unknown` when nothing was recorded.
    pub fn reason(&self) -> String {
        if self.packages.is_empty() {
            "unknown".to_string()
        } else {
            self.packages.join(", ")
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregate run
// ---------------------------------------------------------------------------

/// Everything observed during one maintenance run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRun {
    /// One outcome per planned command, in execution order.
    pub outcomes: Vec<CommandOutcome>,
    pub reboot: RebootPending,
}

impl UpdateRun {
    pub fn new(outcomes: Vec<CommandOutcome>, reboot: RebootPending) -> Self {
        Self { outcomes, reboot }
    }

    pub fn any_succeeded(&self) -> bool {
        self.outcomes.iter().any(CommandOutcome::succeeded)
    }

    pub fn any_failed(&self) -> bool {
        self.outcomes.iter().any(|o| !o.succeeded())
    }

    /// Aggregate status over all outcomes.
    pub fn status(&self) -> RunStatus {
        match (self.any_succeeded(), self.any_failed()) {
            (true, false) => RunStatus::Success,
            (true, true) => RunStatus::Partial,
            (false, true) => RunStatus::Failed,
            (false, false) => RunStatus::NoChanges,
        }
    }

    /// Command lines of the outcomes that succeeded, in order.
    pub fn successful_lines(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|o| o.succeeded())
            .map(|o| o.spec.command_line())
            .collect()
    }

    /// `command: error` lines for the outcomes that failed, in order.
    pub fn failure_lines(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(CommandOutcome::describe_failure)
            .collect()
    }
}

/// Aggregate status of a maintenance run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunStatus {
    /// Every command succeeded.
    Success,
    /// Some commands succeeded and some failed.
    Partial,
    /// Every command failed.
    Failed,
    /// No successes and no failures (an empty plan).
    NoChanges,
}

crate::simple_display! {
    RunStatus {
        Success => "success",
        Partial => "partial",
        Failed => "failed",
        NoChanges => "no-changes",
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT

//! Command specifications and the standard maintenance plan.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default wall-clock budget for a single maintenance command.
pub const DEFAULT_BUDGET: Duration = Duration::from_secs(600);

/// One external command to run, with its execution policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Program and arguments in order; the first token is the program.
    pub tokens: Vec<String>,
    /// Run under `sudo` when true.
    pub elevate: bool,
    /// Extra environment entries applied to the child process.
    pub env: Vec<(String, String)>,
    /// Wall-clock budget before the command is forcibly stopped.
    pub budget: Duration,
}

impl CommandSpec {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            elevate: false,
            env: Vec::new(),
            budget: DEFAULT_BUDGET,
        }
    }

    /// Mark the command to run under `sudo`.
    pub fn elevated(mut self) -> Self {
        self.elevate = true;
        self
    }

    /// Add one environment entry for the child process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    crate::setters! {
        set { budget: Duration }
    }

    /// Program name, if the spec has any tokens.
    pub fn program(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    /// Arguments after the program name.
    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or(&[])
    }

    /// Human-readable command line, without the elevation prefix.
    pub fn command_line(&self) -> String {
        self.tokens.join(" ")
    }
}

/// The standard Debian maintenance sequence, in execution order.
///
/// Every entry runs elevated. `dist-upgrade` additionally pins dpkg to keep
/// existing configuration files and suppresses interactive prompts, so the
/// sequence can run unattended.
pub fn maintenance_plan() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new(["apt-get", "-y", "update"]).elevated(),
        CommandSpec::new(["apt-get", "-y", "upgrade"]).elevated(),
        CommandSpec::new([
            "apt-get",
            "-y",
            "-o",
            "Dpkg::Options::=--force-confdef",
            "-o",
            "Dpkg::Options::=--force-confold",
            "dist-upgrade",
        ])
        .elevated()
        .env("DEBIAN_FRONTEND", "noninteractive"),
        CommandSpec::new(["apt-get", "-y", "autoremove"]).elevated(),
        CommandSpec::new(["apt-get", "-y", "autoclean"]).elevated(),
    ]
}

/// Command that restarts the host immediately.
pub fn reboot_command() -> CommandSpec {
    CommandSpec::new(["shutdown", "-r", "now"]).elevated()
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;

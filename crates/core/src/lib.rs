// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Domain types and pure logic for the upkeep maintenance workflow.
//!
//! - [`command`]: command specifications and the standard maintenance plan
//! - [`outcome`]: per-command outcomes and aggregate run classification inputs
//! - [`report`]: notification payload construction from a finished run
//! - [`settings`]: mail settings loaded from a key=value environment file

pub mod command;
pub mod macros;
pub mod outcome;
pub mod report;
pub mod settings;

pub use command::{maintenance_plan, reboot_command, CommandSpec, DEFAULT_BUDGET};
pub use outcome::{CommandError, CommandOutcome, RebootPending, RunStatus, UpdateRun};
pub use report::{classify, fatal_payload, NotificationPayload};
pub use settings::{ConfigError, MailSettings, DEFAULT_SETTINGS_PATH};

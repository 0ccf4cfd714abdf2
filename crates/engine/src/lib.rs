// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Orchestration of the maintenance workflows.
//!
//! - [`sequencer`]: run the command plan to completion, never short-circuiting
//! - [`coordinator`]: gate and issue the post-run reboot
//! - [`workflow`]: sequence, classify, notify, then maybe reboot
//! - [`filter`]: the optional DNS-filter appliance update

pub mod coordinator;
pub mod filter;
pub mod sequencer;
pub mod workflow;

pub use coordinator::{RebootCoordinator, RebootGate, DEFAULT_GRACE};
pub use filter::{FilterOutcome, FilterUpdate, DEFAULT_FILTER_BIN};
pub use sequencer::UpdateSequencer;
pub use workflow::{RunReport, UpdateWorkflow};

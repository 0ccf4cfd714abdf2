// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Host-facing adapters for the upkeep workflow.
//!
//! Each adapter is a small async trait with one production implementation and
//! a `Fake` counterpart for tests (exported under the `test-support` feature):
//!
//! - [`process`]: run one external command with elevation and a time budget
//! - [`reboot`]: probe the host's reboot-pending marker
//! - [`notify`]: deliver a notification email over authenticated SMTP

pub mod notify;
pub mod process;
pub mod reboot;

pub use notify::{NotifyAdapter, NotifyError, SmtpNotifyAdapter};
pub use process::{HostProcessAdapter, ProcessAdapter};
pub use reboot::{HostRebootMarker, RebootMarkerAdapter};

#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotifyAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use process::FakeProcessAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use reboot::FakeRebootMarker;

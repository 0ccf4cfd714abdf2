// SPDX-License-Identifier: MIT

//! Reboot-pending marker probe.
//!
//! Debian-family hosts drop `/run/reboot-required` when an installed update
//! needs a restart, plus a `.pkgs` file naming the packages responsible. The
//! probe never fails: an unreadable marker is treated as "no reboot pending",
//! and a missing packages file leaves the reason unknown.

use std::path::PathBuf;

use async_trait::async_trait;

use upkeep_core::RebootPending;

/// Flag file indicating a pending reboot.
pub const REBOOT_REQUIRED_PATH: &str = "/run/reboot-required";
/// Companion file listing the packages that requested it.
pub const REBOOT_PACKAGES_PATH: &str = "/run/reboot-required.pkgs";

/// Adapter for reading the host's reboot-pending state.
#[async_trait]
pub trait RebootMarkerAdapter: Clone + Send + Sync + 'static {
    async fn probe(&self) -> RebootPending;
}

/// Reads the marker files from the live filesystem.
#[derive(Clone, Debug)]
pub struct HostRebootMarker {
    marker: PathBuf,
    packages: PathBuf,
}

impl Default for HostRebootMarker {
    fn default() -> Self {
        Self::new()
    }
}

impl HostRebootMarker {
    pub fn new() -> Self {
        Self::at(REBOOT_REQUIRED_PATH, REBOOT_PACKAGES_PATH)
    }

    /// Probe alternative marker locations (containers, tests).
    pub fn at(marker: impl Into<PathBuf>, packages: impl Into<PathBuf>) -> Self {
        Self {
            marker: marker.into(),
            packages: packages.into(),
        }
    }
}

#[async_trait]
impl RebootMarkerAdapter for HostRebootMarker {
    async fn probe(&self) -> RebootPending {
        if !tokio::fs::try_exists(&self.marker).await.unwrap_or(false) {
            return RebootPending::none();
        }

        let packages = match tokio::fs::read_to_string(&self.packages).await {
            Ok(content) => {
                let mut packages: Vec<String> = Vec::new();
                for line in content.lines() {
                    let name = line.trim();
                    if !name.is_empty() && !packages.iter().any(|p| p == name) {
                        packages.push(name.to_string());
                    }
                }
                packages
            }
            Err(_) => Vec::new(),
        };
        tracing::info!(packages = packages.len(), "reboot-pending marker found");
        RebootPending::required_by(packages)
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use upkeep_core::RebootPending;

    use super::RebootMarkerAdapter;

    /// Fake marker with a scriptable pending state.
    #[derive(Clone)]
    pub struct FakeRebootMarker {
        inner: Arc<Mutex<RebootPending>>,
    }

    impl Default for FakeRebootMarker {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(RebootPending::none())),
            }
        }
    }

    impl FakeRebootMarker {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set(&self, pending: RebootPending) {
            *self.inner.lock() = pending;
        }
    }

    #[async_trait]
    impl RebootMarkerAdapter for FakeRebootMarker {
        async fn probe(&self) -> RebootPending {
            self.inner.lock().clone()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeRebootMarker;

#[cfg(test)]
#[path = "reboot_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT

//! Shared helpers for driving the `upkeep` binary.

use std::path::{Path, PathBuf};
use std::process::Output;

use tempfile::TempDir;

/// A settings file covering all four required keys.
pub const VALID_SETTINGS: &str = "FROM_EMAIL=updates@example.net\n\
TO_EMAIL=admin@example.net\n\
SMTP_SERVER=mail.example.net\n\
EMAIL_PASSWORD=hunter2\n";

/// Start building an `upkeep` invocation.
pub fn cli() -> Cmd {
    Cmd::new()
}

pub struct Cmd {
    inner: assert_cmd::Command,
}

impl Cmd {
    fn new() -> Self {
        let inner = assert_cmd::Command::cargo_bin("upkeep").unwrap();
        Self { inner }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.inner.args(args);
        self
    }

    /// Run and require a zero exit status.
    pub fn passes(mut self) -> Checked {
        let output = self.inner.output().unwrap();
        assert!(
            output.status.success(),
            "expected success, got {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        Checked { output }
    }

    /// Run and require the given exit code.
    pub fn fails_with(mut self, code: i32) -> Checked {
        let output = self.inner.output().unwrap();
        assert_eq!(
            output.status.code(),
            Some(code),
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        Checked { output }
    }
}

pub struct Checked {
    output: Output,
}

impl Checked {
    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(stdout.contains(needle), "stdout missing {needle:?}:\n{stdout}");
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(!stdout.contains(needle), "stdout must not contain {needle:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(stderr.contains(needle), "stderr missing {needle:?}:\n{stderr}");
        self
    }
}

/// A settings file in a fresh temp directory.
pub struct SettingsFile {
    _dir: TempDir,
    path: PathBuf,
}

impl SettingsFile {
    pub fn valid() -> Self {
        Self::with(VALID_SETTINGS)
    }

    pub fn with(content: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("env");
        std::fs::write(&path, content).unwrap();
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Invocation pre-wired to this settings file.
    pub fn cli(&self) -> Cmd {
        cli().args(&["--env-file", &self.path.to_string_lossy()])
    }
}

// SPDX-License-Identifier: MIT

//! `upkeep update` specs.
//!
//! Only dry runs and configuration failures here. The real plan elevates
//! apt and these specs must never touch the host.

use crate::prelude::*;

#[test]
fn dry_run_lists_the_whole_plan() {
    let settings = SettingsFile::valid();
    settings
        .cli()
        .args(&["update", "--dry-run"])
        .passes()
        .stdout_has("Would run 5 commands:")
        .stdout_has("apt-get -y update")
        .stdout_has("apt-get -y upgrade")
        .stdout_has("dist-upgrade")
        .stdout_has("apt-get -y autoremove")
        .stdout_has("apt-get -y autoclean");
}

#[test]
fn dry_run_reports_the_reboot_policy() {
    let settings = SettingsFile::valid();
    settings
        .cli()
        .args(&["update", "--dry-run", "--grace-secs", "5", "--confirm-delivery"])
        .passes()
        .stdout_has("Reboot policy: after-delivery, 5s grace");
}

#[test]
fn dry_run_defaults_to_the_attempt_gate() {
    let settings = SettingsFile::valid();
    settings
        .cli()
        .args(&["update", "--dry-run"])
        .passes()
        .stdout_has("Reboot policy: after-attempt, 60s grace");
}

#[test]
fn update_refuses_to_start_without_settings() {
    cli()
        .args(&["--env-file", "/nonexistent/upkeep/env", "update"])
        .fails_with(1)
        .stderr_has("not found");
}

#[test]
fn update_refuses_to_start_on_incomplete_settings() {
    let settings = SettingsFile::with("FROM_EMAIL=updates@example.net\n");
    settings.cli().args(&["update"]).fails_with(1).stderr_has("missing required settings key");
}

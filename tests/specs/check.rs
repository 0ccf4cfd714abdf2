// SPDX-License-Identifier: MIT

//! `upkeep check` specs.
//!
//! Settings validation against real files, no network.

use crate::prelude::*;

#[test]
fn check_accepts_a_complete_settings_file() {
    let settings = SettingsFile::valid();
    settings
        .cli()
        .args(&["check"])
        .passes()
        .stdout_has("is valid")
        .stdout_has("updates@example.net")
        .stdout_has("admin@example.net")
        .stdout_has("mail.example.net");
}

#[test]
fn check_never_prints_the_credential() {
    let settings = SettingsFile::valid();
    settings.cli().args(&["check"]).passes().stdout_lacks("hunter2");
    settings.cli().args(&["check", "--json"]).passes().stdout_lacks("hunter2");
}

#[test]
fn check_json_reports_the_settings() {
    let settings = SettingsFile::valid();
    settings
        .cli()
        .args(&["check", "--json"])
        .passes()
        .stdout_has("\"valid\": true")
        .stdout_has("\"relay_host\": \"mail.example.net\"")
        .stdout_has("\"test_delivered\": null");
}

#[test]
fn check_fails_when_the_file_is_missing() {
    cli()
        .args(&["--env-file", "/nonexistent/upkeep/env", "check"])
        .fails_with(1)
        .stderr_has("not found");
}

#[test]
fn check_fails_on_a_missing_key() {
    let settings = SettingsFile::with(
        "FROM_EMAIL=updates@example.net\nSMTP_SERVER=mail.example.net\nEMAIL_PASSWORD=hunter2\n",
    );
    settings
        .cli()
        .args(&["check"])
        .fails_with(1)
        .stderr_has("TO_EMAIL");
}

#[test]
fn check_tolerates_junk_lines() {
    let mut content = String::from("this line has no separator\n\n");
    content.push_str(VALID_SETTINGS);
    let settings = SettingsFile::with(&content);
    settings.cli().args(&["check"]).passes().stdout_has("is valid");
}

// SPDX-License-Identifier: MIT

//! CLI surface specs.
//!
//! Verify help, version, and usage-error behavior.

use crate::prelude::*;

#[test]
fn upkeep_help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("update")
        .stdout_has("filter-update")
        .stdout_has("check");
}

#[test]
fn upkeep_no_args_is_a_usage_error() {
    cli().fails_with(2).stderr_has("Usage:");
}

#[test]
fn upkeep_unknown_subcommand_is_a_usage_error() {
    cli().args(&["defragment"]).fails_with(2);
}

#[test]
fn update_help_shows_flags() {
    cli()
        .args(&["update", "--help"])
        .passes()
        .stdout_has("--dry-run")
        .stdout_has("--json")
        .stdout_has("--grace-secs")
        .stdout_has("--confirm-delivery");
}

#[test]
fn filter_update_help_shows_bin_flag() {
    cli().args(&["filter-update", "--help"]).passes().stdout_has("--bin");
}

#[test]
fn upkeep_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

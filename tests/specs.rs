// SPDX-License-Identifier: MIT

//! End-to-end specs for the compiled `upkeep` binary.

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/check.rs"]
mod check;
#[path = "specs/help.rs"]
mod help;
#[path = "specs/update.rs"]
mod update;

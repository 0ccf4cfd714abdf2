// SPDX-License-Identifier: MIT

//! CLI command implementations.

pub mod check;
pub mod filter;
pub mod update;

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end for parsing, validating and formatting recurrence rules.

mod cli;
mod cmd_format;
mod cmd_generate_completion;
mod cmd_parse;
mod cmd_validate;
mod config;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::{Config, FormatConfig};

/// Name of the command, also the configuration directory.
pub const APP_NAME: &str = "recur";

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end for decoding iCalendar recurrence rules.

mod cli;
mod cmd_check;
mod cmd_decode;
mod cmd_generate_completion;
mod config;
mod input;
mod rule_formatter;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::cmd_decode::Summary;
pub use crate::config::{Config, DecoderConfig, parse_config};

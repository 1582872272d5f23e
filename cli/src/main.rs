// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! recur - decode iCalendar recurrence rules

use std::process::ExitCode;

use recur_cli::run;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

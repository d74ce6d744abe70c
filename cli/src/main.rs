// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! recur - parse, validate and format iCalendar recurrence rules

use std::process::ExitCode;

fn main() -> ExitCode {
    recur_cli::run()
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgMatches, arg};

/// The output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgOutputFormat {
    #[default]
    Text,
    Json,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(-o --output <FORMAT> "Output format, defaults to the configured one")
            .value_parser(clap::value_parser!(ArgOutputFormat))
    }

    pub fn from(matches: &ArgMatches) -> Option<Self> {
        matches.get_one("output").copied()
    }
}

pub fn arg_rules() -> Arg {
    arg!(rules: <RRULE> ... "Recurrence rules, e.g. FREQ=WEEKLY;BYDAY=MO")
}

pub fn get_rules(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("rules")
        .map(|rules| rules.cloned().collect())
        .unwrap_or_default()
}

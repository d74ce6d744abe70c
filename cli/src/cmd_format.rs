// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use clap::{ArgMatches, Command, arg};
use recur_ical::{RecurrenceRule, Validations};

use crate::config::Config;
use crate::util::{arg_rules, get_rules};

#[derive(Debug, Clone)]
pub struct CmdFormat {
    pub rules: Vec<String>,
    pub until: bool,
    pub property: bool,
}

impl CmdFormat {
    pub const NAME: &str = "format";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Write recurrence rules in canonical form")
            .arg(arg_rules())
            .arg(arg!(--until "Write the UNTIL rule part, left out by default"))
            .arg(arg!(-p --property "Write folded RRULE content lines"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            rules: get_rules(matches),
            until: matches.get_flag("until"),
            property: matches.get_flag("property"),
        }
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "formatting recurrence rules...");
        self.write(&mut io::stdout().lock(), config)
    }

    pub fn write(&self, w: &mut impl io::Write, config: &Config) -> Result<(), Box<dyn Error>> {
        let options = config.format_options(self.until);
        for src in &self.rules {
            let rule = RecurrenceRule::parse(src);
            for error in rule.errors() {
                tracing::warn!(rule = %src, %error, "formatting a rule with problems");
            }

            if self.property {
                options.write_property(&rule, w)?;
            } else {
                options.write_value(&rule, w)?;
                writeln!(w)?;
            }
        }
        Ok(())
    }
}

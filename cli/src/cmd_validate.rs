// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use clap::{ArgMatches, Command};
use colored::Colorize;
use recur_ical::{RecurrenceRule, Validations};

use crate::config::Config;
use crate::util::{ArgOutputFormat, arg_rules, get_rules};

#[derive(Debug, Clone)]
pub struct CmdValidate {
    pub rules: Vec<String>,
    pub output: Option<ArgOutputFormat>,
}

impl CmdValidate {
    pub const NAME: &str = "validate";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Check recurrence rules, failing if any has problems")
            .arg(arg_rules())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            rules: get_rules(matches),
            output: ArgOutputFormat::from(matches),
        }
    }

    /// Returns whether every rule is valid.
    pub fn run(self, config: &Config) -> Result<bool, Box<dyn Error>> {
        tracing::debug!(?self, "validating recurrence rules...");
        self.write(&mut io::stdout().lock(), config)
    }

    pub fn write(&self, w: &mut impl io::Write, config: &Config) -> Result<bool, Box<dyn Error>> {
        let results: Vec<_> = self
            .rules
            .iter()
            .map(|src| {
                let mut rule = RecurrenceRule::parse(src);
                let errors = rule.validate().iter().map(ToString::to_string).collect();
                ValidationResult {
                    input: src.clone(),
                    valid: rule.is_valid(),
                    errors,
                }
            })
            .collect();

        match self.output.unwrap_or(config.format.output) {
            ArgOutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, &results)?;
                writeln!(w)?;
            }
            ArgOutputFormat::Text => {
                for result in &results {
                    if result.valid {
                        writeln!(w, "{} {}", "ok".green(), result.input)?;
                    } else {
                        writeln!(w, "{} {}", "invalid".red(), result.input)?;
                        for error in &result.errors {
                            writeln!(w, "  {error}")?;
                        }
                    }
                }
            }
        }

        Ok(results.iter().all(|r| r.valid))
    }
}

#[derive(Debug, serde::Serialize)]
struct ValidationResult {
    input: String,
    valid: bool,
    errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_validate(args: &[&str]) -> (bool, String) {
        let cmd = Command::new("test").subcommand(CmdValidate::command());
        let mut argv = vec!["test", "validate"];
        argv.extend_from_slice(args);
        let matches = cmd.try_get_matches_from(argv).unwrap();
        let sub_matches = matches.subcommand_matches("validate").unwrap();

        let mut output = vec![];
        let valid = CmdValidate::from(sub_matches)
            .write(&mut output, &Config::default())
            .unwrap();
        (valid, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_validate_valid_rules() {
        colored::control::set_override(false);
        let (valid, out) = run_validate(&["FREQ=DAILY", "FREQ=MONTHLY;BYMONTHDAY=-1"]);
        assert!(valid);
        assert_eq!(out, "ok FREQ=DAILY\nok FREQ=MONTHLY;BYMONTHDAY=-1\n");
    }

    #[test]
    fn test_validate_reports_problems() {
        let (valid, out) = run_validate(&["--output", "json", "FREQ=DAILY", "BYHOUR=24"]);
        assert!(!valid);

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["valid"], true);
        assert_eq!(value[1]["valid"], false);
        assert_eq!(value[1]["errors"][0], "Missing required rule part 'FREQ'");
        assert_eq!(value[1]["errors"][1], "Invalid value '24' for rule part 'BYHOUR'");
    }
}

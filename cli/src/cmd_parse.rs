// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{collections::BTreeMap, error::Error, io};

use clap::{ArgMatches, Command};
use colored::Colorize;
use recur_ical::{ByPartStorage, RecurrenceRule, Validations};

use crate::config::Config;
use crate::util::{ArgOutputFormat, arg_rules, get_rules};

#[derive(Debug, Clone)]
pub struct CmdParse {
    pub rules: Vec<String>,
    pub output: Option<ArgOutputFormat>,
}

impl CmdParse {
    pub const NAME: &str = "parse";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Parse recurrence rules and show their fields")
            .arg(arg_rules())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            rules: get_rules(matches),
            output: ArgOutputFormat::from(matches),
        }
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "parsing recurrence rules...");
        self.write(&mut io::stdout().lock(), config)
    }

    pub fn write(&self, w: &mut impl io::Write, config: &Config) -> Result<(), Box<dyn Error>> {
        let options = config.format_options(true);
        let reports = self
            .rules
            .iter()
            .map(|src| RuleReport::new(src, &RecurrenceRule::parse(src), options))
            .collect::<Result<Vec<_>, _>>()?;

        match self.output.unwrap_or(config.format.output) {
            ArgOutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, &reports)?;
                writeln!(w)?;
            }
            ArgOutputFormat::Text => {
                for (i, report) in reports.iter().enumerate() {
                    if i > 0 {
                        writeln!(w)?;
                    }
                    report.write_text(w)?;
                }
            }
        }
        Ok(())
    }
}

/// The fields of one parsed rule.
#[derive(Debug, serde::Serialize)]
pub struct RuleReport {
    pub input: String,
    pub freq: Option<String>,
    pub interval: u32,
    pub count: Option<u32>,
    pub until: Option<String>,
    pub wkst: String,
    pub wkst_day: usize,
    pub by_parts: BTreeMap<String, Vec<String>>,
    pub bounded: bool,
    pub canonical: String,
    pub errors: Vec<String>,
}

impl RuleReport {
    pub fn new(
        input: &str,
        rule: &RecurrenceRule,
        options: recur_ical::FormatOptions,
    ) -> io::Result<Self> {
        Ok(Self {
            input: input.to_owned(),
            freq: rule.freq().ok(),
            interval: rule.interval(),
            count: rule.count(),
            until: rule.until().map(|until| until.to_string()),
            wkst: rule.wkst(),
            wkst_day: rule.wkst_day(),
            by_parts: rule
                .by_list()
                .iter()
                .map(|(part, values)| (part.to_string(), values.clone()))
                .collect(),
            bounded: rule.bounded(),
            canonical: options.write_value_to_string(rule)?,
            errors: rule.errors().iter().map(ToString::to_string).collect(),
        })
    }

    fn write_text(&self, w: &mut impl io::Write) -> io::Result<()> {
        const MISSING: &str = "-";
        writeln!(w, "{}", self.input.bold())?;
        writeln!(w, "  FREQ      {}", self.freq.as_deref().unwrap_or(MISSING))?;
        writeln!(w, "  INTERVAL  {}", self.interval)?;
        match (self.count, &self.until) {
            (Some(count), _) => writeln!(w, "  COUNT     {count}")?,
            (None, Some(until)) => writeln!(w, "  UNTIL     {until}")?,
            (None, None) => writeln!(w, "  BOUND     {MISSING}")?,
        }
        writeln!(w, "  WKST      {} ({})", self.wkst, self.wkst_day)?;
        for (part, values) in &self.by_parts {
            writeln!(w, "  {part:<10}{}", values.join(","))?;
        }
        writeln!(w, "  BOUNDED   {}", self.bounded)?;
        writeln!(w, "  CANONICAL {}", self.canonical)?;
        for error in &self.errors {
            writeln!(w, "  {} {error}", "Error:".red())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_parse(args: &[&str], config: &Config) -> String {
        let cmd = Command::new("test").subcommand(CmdParse::command());
        let mut argv = vec!["test", "parse"];
        argv.extend_from_slice(args);
        let matches = cmd.try_get_matches_from(argv).unwrap();
        let sub_matches = matches.subcommand_matches("parse").unwrap();

        let mut output = vec![];
        CmdParse::from(sub_matches)
            .write(&mut output, config)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_text_output() {
        colored::control::set_override(false);
        let out = run_parse(&["FREQ=WEEKLY;COUNT=10;BYDAY=MO,WE,FR"], &Config::default());
        assert!(out.contains("FREQ      WEEKLY"));
        assert!(out.contains("COUNT     10"));
        assert!(out.contains("BYDAY     MO,WE,FR"));
        assert!(out.contains("BOUNDED   true"));
        assert!(!out.contains("Error:"));
    }

    #[test]
    fn test_parse_json_output() {
        let out = run_parse(
            &["--output", "json", "FREQ=DAILY;UNTIL=20240101;FOO=1"],
            &Config::default(),
        );
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let report = &value[0];
        assert_eq!(report["freq"], "DAILY");
        assert_eq!(report["until"], "20240101");
        assert_eq!(report["canonical"], "FREQ=DAILY;UNTIL=20240101");
        assert_eq!(report["bounded"], true);
        assert_eq!(report["errors"][0], "Unrecognized rule part 'FOO'");
    }

    #[test]
    fn test_parse_output_from_config() {
        let config: Config = "[format]\noutput = \"json\"\n".parse().unwrap();
        let out = run_parse(&["FREQ=DAILY", "FREQ=YEARLY"], &config);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf};

use clap::{ArgMatches, Command};
use colored::Colorize;
use recur_ical::{DecodeError, DuplicatePartBehavior, RRuleDecoder, RecurrenceRule};

use crate::config::Config;
use crate::input::read_rules;
use crate::rule_formatter::RuleFormatter;
use crate::util::{
    ArgOutputFormat, arg_duplicates, arg_file, arg_rules, get_duplicates, get_file, get_rules,
};

#[derive(Debug, Clone)]
pub struct CmdDecode {
    pub rules: Vec<String>,
    pub file: Option<PathBuf>,
    pub duplicates: Option<DuplicatePartBehavior>,
    pub output_format: ArgOutputFormat,
}

impl CmdDecode {
    pub const NAME: &str = "decode";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Decode recurrence rules and print their parts")
            .arg(arg_rules())
            .arg(arg_file())
            .arg(arg_duplicates())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            rules: get_rules(matches),
            file: get_file(matches),
            duplicates: get_duplicates(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, config: &Config) -> Result<Summary, Box<dyn Error>> {
        tracing::debug!(?self, "decoding rules...");
        let decoder = config.decoder.decoder(self.duplicates);
        let rules = read_rules(self.rules, self.file.as_deref()).await?;
        let formatter = RuleFormatter::new().with_output_format(self.output_format);
        Ok(decode_each(decoder, &rules, |src, rule| {
            println!("{}", formatter.format(src, rule));
        }))
    }
}

/// Counts of decoded and rejected rules.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub decoded: usize,
    pub failed: usize,
}

impl Summary {
    pub fn is_success(self) -> bool {
        self.failed == 0
    }
}

/// Decode every rule, handing successes to `on_rule` and reporting failures on stderr.
pub(crate) fn decode_each<F>(decoder: RRuleDecoder, rules: &[String], mut on_rule: F) -> Summary
where
    F: FnMut(&str, &RecurrenceRule),
{
    let mut summary = Summary::default();
    for src in rules {
        match decode_line(decoder, src) {
            Ok(rule) => {
                on_rule(src, &rule);
                summary.decoded += 1;
            }
            Err(e) => {
                eprintln!("{} {}: {}", "Error:".red(), src, e);
                summary.failed += 1;
            }
        }
    }
    tracing::debug!(decoded = summary.decoded, failed = summary.failed, "rules processed");
    summary
}

/// Decode a content line, or a bare value such as `FREQ=DAILY` when the line has no colon.
fn decode_line(decoder: RRuleDecoder, src: &str) -> Result<RecurrenceRule, DecodeError> {
    if src.contains(':') {
        decoder.decode(src)
    } else {
        decoder.decode_value(src.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decode() {
        let cmd = Command::new("test").subcommand(CmdDecode::command());
        let matches = cmd
            .try_get_matches_from([
                "test",
                "decode",
                "RRULE:FREQ=DAILY",
                "--duplicates",
                "take-last",
                "--output-format",
                "json",
            ])
            .unwrap();
        let sub_matches = matches.subcommand_matches("decode").unwrap();
        let parsed = CmdDecode::from(sub_matches);
        assert_eq!(parsed.rules, ["RRULE:FREQ=DAILY"]);
        assert_eq!(parsed.file, None);
        assert_eq!(parsed.duplicates, Some(DuplicatePartBehavior::TakeLast));
        assert_eq!(parsed.output_format, ArgOutputFormat::Json);
    }

    #[test]
    fn counts_failures() {
        let rules = [
            "RRULE:FREQ=DAILY;COUNT=3",
            "RRULE:COUNT=3",
            "RRULE:FREQ=DAILY;FREQ=WEEKLY",
            "FREQ=YEARLY;BYMONTH=13",
        ]
        .map(str::to_owned);

        let mut decoded = Vec::new();
        let summary = decode_each(RRuleDecoder::default(), &rules, |src, rule| {
            decoded.push((src.to_owned(), rule.freq));
        });
        assert_eq!(
            summary,
            Summary {
                decoded: 1,
                failed: 3
            }
        );
        assert!(!summary.is_success());
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].0, "RRULE:FREQ=DAILY;COUNT=3");
    }

    #[test]
    fn accepts_bare_values() {
        let decoder = RRuleDecoder::default();
        let rule = decode_line(decoder, "FREQ=WEEKLY;COUNT=2").unwrap();
        assert_eq!(rule.count(), Some(2));

        let rule = decode_line(decoder, r#"RRULE;X-A="b:c":FREQ=WEEKLY"#).unwrap();
        assert_eq!(rule.freq, recur_ical::RecurrenceFrequency::Weekly);

        assert_eq!(
            decode_line(decoder, "EXRULE:FREQ=DAILY"),
            Err(DecodeError::NotARule {
                name: "EXRULE".to_owned()
            })
        );
    }

    #[test]
    fn applies_duplicate_behavior() {
        let rules = ["RRULE:FREQ=DAILY;FREQ=WEEKLY".to_owned()];
        let decoder = RRuleDecoder::new(DuplicatePartBehavior::TakeLast);

        let mut freqs = Vec::new();
        let summary = decode_each(decoder, &rules, |_, rule| freqs.push(rule.freq));
        assert!(summary.is_success());
        assert_eq!(freqs, [recur_ical::RecurrenceFrequency::Weekly]);
    }

    #[tokio::test]
    async fn decodes_rules_from_arguments() {
        let cmd = CmdDecode {
            rules: vec!["RRULE:FREQ=HOURLY;INTERVAL=4".to_owned()],
            file: None,
            duplicates: None,
            output_format: ArgOutputFormat::Table,
        };
        let summary = cmd.run(&Config::default()).await.unwrap();
        assert_eq!(
            summary,
            Summary {
                decoded: 1,
                failed: 0
            }
        );
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Arg, ArgMatches, ValueHint, arg, value_parser};
use recur_ical::DuplicatePartBehavior;
use strum::IntoEnumIterator;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

pub fn arg_verbose() -> Arg {
    arg!(-v --verbose "Show debug logs on stderr").global(true)
}

pub fn get_verbose(matches: &ArgMatches) -> bool {
    matches.get_flag("verbose")
}

pub fn arg_rules() -> Arg {
    arg!(rules: [RULE]... "RRULE content lines, e.g. RRULE:FREQ=DAILY;COUNT=3")
        .long_help(
            "\
RRULE content lines to decode. A bare value such as FREQ=DAILY is accepted \
too. When neither rules nor --file are given, rules are read from stdin, one per line.",
        )
}

pub fn get_rules(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("rules")
        .map(|rules| rules.cloned().collect())
        .unwrap_or_default()
}

pub fn arg_file() -> Arg {
    arg!(-f --file <PATH> "Read rules from a file, one per line")
        .value_parser(value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

pub fn get_file(matches: &ArgMatches) -> Option<PathBuf> {
    matches.get_one("file").cloned()
}

pub fn arg_duplicates() -> Arg {
    let names = DuplicatePartBehavior::iter().map(<&'static str>::from);
    arg!(--duplicates <POLICY> "How to resolve a rule part that occurs more than once")
        .long_help(
            "\
How to resolve a rule part that occurs more than once. Overrides \
`decoder.duplicate-parts` from the configuration file.",
        )
        .value_parser(
            PossibleValuesParser::new(names).try_map(|s| s.parse::<DuplicatePartBehavior>()),
        )
}

pub fn get_duplicates(matches: &ArgMatches) -> Option<DuplicatePartBehavior> {
    matches.get_one("duplicates").copied()
}

#[cfg(test)]
mod tests {
    use clap::Command;

    use super::*;

    fn command() -> Command {
        Command::new("test")
            .arg(arg_rules())
            .arg(arg_file())
            .arg(arg_duplicates())
            .arg(ArgOutputFormat::arg())
    }

    #[test]
    fn test_parse_duplicates() {
        for behavior in DuplicatePartBehavior::iter() {
            let name: &str = behavior.into();
            let matches = command()
                .try_get_matches_from(["test", "--duplicates", name])
                .unwrap();
            assert_eq!(get_duplicates(&matches), Some(behavior));
        }

        let matches = command().try_get_matches_from(["test"]).unwrap();
        assert_eq!(get_duplicates(&matches), None);

        let result = command().try_get_matches_from(["test", "--duplicates", "newest"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rules_and_file() {
        let matches = command()
            .try_get_matches_from(["test", "RRULE:FREQ=DAILY", "FREQ=WEEKLY", "-f", "rules.txt"])
            .unwrap();
        assert_eq!(get_rules(&matches), ["RRULE:FREQ=DAILY", "FREQ=WEEKLY"]);
        assert_eq!(get_file(&matches), Some(PathBuf::from("rules.txt")));

        let matches = command().try_get_matches_from(["test"]).unwrap();
        assert!(get_rules(&matches).is_empty());
        assert_eq!(get_file(&matches), None);
    }

    #[test]
    fn test_parse_output_format() {
        let matches = command().try_get_matches_from(["test"]).unwrap();
        assert_eq!(ArgOutputFormat::from(&matches), ArgOutputFormat::Table);

        let matches = command()
            .try_get_matches_from(["test", "--output-format", "json"])
            .unwrap();
        assert_eq!(ArgOutputFormat::from(&matches), ArgOutputFormat::Json);
    }
}

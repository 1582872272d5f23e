// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf};

use clap::{ArgMatches, Command};
use colored::Colorize;
use recur_ical::DuplicatePartBehavior;

use crate::cmd_decode::{Summary, decode_each};
use crate::config::Config;
use crate::input::read_rules;
use crate::util::{arg_duplicates, arg_file, arg_rules, get_duplicates, get_file, get_rules};

#[derive(Debug, Clone)]
pub struct CmdCheck {
    pub rules: Vec<String>,
    pub file: Option<PathBuf>,
    pub duplicates: Option<DuplicatePartBehavior>,
}

impl CmdCheck {
    pub const NAME: &str = "check";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Check that recurrence rules decode")
            .arg(arg_rules())
            .arg(arg_file())
            .arg(arg_duplicates())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            rules: get_rules(matches),
            file: get_file(matches),
            duplicates: get_duplicates(matches),
        }
    }

    pub async fn run(self, config: &Config) -> Result<Summary, Box<dyn Error>> {
        tracing::debug!(?self, "checking rules...");
        let decoder = config.decoder.decoder(self.duplicates);
        let rules = read_rules(self.rules, self.file.as_deref()).await?;
        Ok(decode_each(decoder, &rules, |src, _| {
            println!("{} {}", "ok".green(), src);
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_parse_check() {
        let cmd = Command::new("test").subcommand(CmdCheck::command());
        let matches = cmd
            .try_get_matches_from(["test", "check", "--file", "rules.txt"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("check").unwrap();
        let parsed = CmdCheck::from(sub_matches);
        assert!(parsed.rules.is_empty());
        assert_eq!(parsed.file, Some(PathBuf::from("rules.txt")));
        assert_eq!(parsed.duplicates, None);
    }

    #[tokio::test]
    async fn checks_rules_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rules.txt");
        fs::write(&path, "RRULE:FREQ=DAILY\nRRULE:FREQ=DAILY;COUNT=1;UNTIL=20000101\n").unwrap();

        let cmd = CmdCheck {
            rules: Vec::new(),
            file: Some(path),
            duplicates: None,
        };
        let summary = cmd.run(&Config::default()).await.unwrap();
        assert_eq!(
            summary,
            Summary {
                decoded: 1,
                failed: 1
            }
        );
    }
}

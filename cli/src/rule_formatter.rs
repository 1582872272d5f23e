// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;
use std::fmt;

use colored::Colorize;
use recur_ical::{RecurrenceRule, RulePart};
use strum::IntoEnumIterator;

use crate::util::ArgOutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct RuleFormatter {
    format: ArgOutputFormat,
}

impl RuleFormatter {
    pub fn new() -> Self {
        Self {
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, source: &'a str, rule: &'a RecurrenceRule) -> Display<'a> {
        Display {
            format: self.format,
            source,
            rule,
        }
    }
}

impl Default for RuleFormatter {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Display<'a> {
    format: ArgOutputFormat,
    source: &'a str,
    rule: &'a RecurrenceRule,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            ArgOutputFormat::Json => {
                let json = JsonRule {
                    source: self.source,
                    rule: self.rule,
                };
                let s = serde_json::to_string(&json).map_err(|_| fmt::Error)?;
                f.write_str(&s)
            }
            ArgOutputFormat::Table => {
                write!(f, "{}", self.source.bold())?;
                let rows = rule_rows(self.rule);
                let width = rows.iter().map(|(part, _)| part.name().len()).max();
                for (part, value) in &rows {
                    let name = format!("{:<width$}", part.name(), width = width.unwrap_or(0));
                    write!(f, "\n  {}  {}", name.cyan(), value)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(serde::Serialize)]
struct JsonRule<'a> {
    source: &'a str,
    #[serde(flatten)]
    rule: &'a RecurrenceRule,
}

/// The parts present in `rule`, in RFC 5545 order, with their canonical values.
pub fn rule_rows(rule: &RecurrenceRule) -> Vec<(RulePart, String)> {
    RulePart::iter()
        .filter_map(|part| part_value(rule, part).map(|value| (part, value)))
        .collect()
}

fn part_value(rule: &RecurrenceRule, part: RulePart) -> Option<String> {
    match part {
        RulePart::Freq => Some(rule.freq.to_string()),
        RulePart::Until => rule.until().map(ToString::to_string),
        RulePart::Count => rule.count().map(|count| count.to_string()),
        RulePart::Interval => rule.interval.map(|interval| interval.to_string()),
        RulePart::BySecond => join(&rule.by_second),
        RulePart::ByMinute => join(&rule.by_minute),
        RulePart::ByHour => join(&rule.by_hour),
        RulePart::ByDay => join(&rule.by_day),
        RulePart::ByMonthDay => join(&rule.by_month_day),
        RulePart::ByYearDay => join(&rule.by_year_day),
        RulePart::ByWeekNo => join(&rule.by_week_no),
        RulePart::ByMonth => join(&rule.by_month),
        RulePart::BySetPos => join(&rule.by_set_pos),
        RulePart::WeekStart => rule.wkst.map(|wkst| wkst.to_string()),
    }
}

fn join<T: fmt::Display>(set: &BTreeSet<T>) -> Option<String> {
    if set.is_empty() {
        return None;
    }
    let values: Vec<_> = set.iter().map(ToString::to_string).collect();
    Some(values.join(","))
}

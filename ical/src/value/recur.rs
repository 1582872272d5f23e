// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule type definitions for iCalendar.

use std::collections::BTreeSet;
use std::fmt::{self, Display};

use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE,
    KW_RRULE_FREQ_DAILY, KW_RRULE_FREQ_HOURLY, KW_RRULE_FREQ_MINUTELY, KW_RRULE_FREQ_MONTHLY,
    KW_RRULE_FREQ_SECONDLY, KW_RRULE_FREQ_WEEKLY, KW_RRULE_FREQ_YEARLY,
};
use crate::value::datetime::{ValueDate, ValueDateTime};

/// Recurrence rule
///
/// Every `by_*` set is empty when the corresponding rule part was absent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecurrenceRule {
    /// Frequency of recurrence
    pub freq: RecurrenceFrequency,
    /// How the recurrence ends, by date or by occurrence count
    pub end: Option<RecurrenceEnd>,
    /// Interval between recurrences
    pub interval: Option<u32>,
    /// Second specifier, 0 to 60
    pub by_second: BTreeSet<u8>,
    /// Minute specifier, 0 to 59
    pub by_minute: BTreeSet<u8>,
    /// Hour specifier, 0 to 23
    pub by_hour: BTreeSet<u8>,
    /// Day of month specifier, ±1 to ±31
    pub by_month_day: BTreeSet<i8>,
    /// Day of year specifier, ±1 to ±366
    pub by_year_day: BTreeSet<i16>,
    /// Week number specifier, ±1 to ±53
    pub by_week_no: BTreeSet<i8>,
    /// Month specifier, 1 to 12
    pub by_month: BTreeSet<u8>,
    /// Day of week specifier
    pub by_day: BTreeSet<WeekDayNum>,
    /// Position in the set of recurrence instances, ±1 to ±366
    pub by_set_pos: BTreeSet<i16>,
    /// Start day of week
    pub wkst: Option<WeekDay>,
}

impl RecurrenceRule {
    /// Create a rule with the given frequency and no other parts.
    #[must_use]
    pub const fn new(freq: RecurrenceFrequency) -> Self {
        Self {
            freq,
            end: None,
            interval: None,
            by_second: BTreeSet::new(),
            by_minute: BTreeSet::new(),
            by_hour: BTreeSet::new(),
            by_month_day: BTreeSet::new(),
            by_year_day: BTreeSet::new(),
            by_week_no: BTreeSet::new(),
            by_month: BTreeSet::new(),
            by_day: BTreeSet::new(),
            by_set_pos: BTreeSet::new(),
            wkst: None,
        }
    }

    /// The UNTIL bound, if the rule ends at a date.
    #[must_use]
    pub const fn until(&self) -> Option<&Until> {
        match &self.end {
            Some(RecurrenceEnd::Until(until)) => Some(until),
            _ => None,
        }
    }

    /// The COUNT limit, if the rule ends after a number of occurrences.
    #[must_use]
    pub const fn count(&self) -> Option<u32> {
        match self.end {
            Some(RecurrenceEnd::Count(count)) => Some(count),
            _ => None,
        }
    }

    /// The interval, defaulting to 1 when absent.
    #[must_use]
    pub fn effective_interval(&self) -> u32 {
        self.interval.unwrap_or(1)
    }
}

/// The end of a recurrence.
///
/// UNTIL and COUNT MUST NOT occur in the same rule, so they share one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RecurrenceEnd {
    /// Bounded by an inclusive date or date-time
    Until(Until),
    /// Bounded by a number of occurrences
    Count(u32),
}

/// The value of an UNTIL rule part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Until {
    /// A DATE value
    Date(ValueDate),
    /// A DATE-TIME value, with any UTC designator removed
    DateTime(ValueDateTime),
}

impl Until {
    /// Convert to `jiff::civil::DateTime`, a date maps to its midnight.
    ///
    /// ## Errors
    ///
    /// Fails if the value does not exist in the calendar.
    #[cfg(feature = "jiff")]
    pub fn civil_date_time(self) -> Result<jiff::civil::DateTime, jiff::Error> {
        match self {
            Self::Date(date) => Ok(date.civil_date()?.to_datetime(jiff::civil::Time::midnight())),
            Self::DateTime(dt) => dt.civil_date_time(),
        }
    }
}

impl Display for Until {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => date.fmt(f),
            Self::DateTime(dt) => dt.fmt(f),
        }
    }
}

impl From<ValueDate> for Until {
    fn from(date: ValueDate) -> Self {
        Self::Date(date)
    }
}

impl From<ValueDateTime> for Until {
    fn from(dt: ValueDateTime) -> Self {
        Self::DateTime(dt)
    }
}

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[expect(missing_docs)]
pub enum RecurrenceFrequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrenceFrequency {
    /// All frequencies, from the shortest period to the longest.
    pub const ALL: [Self; 7] = [
        Self::Secondly,
        Self::Minutely,
        Self::Hourly,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Yearly,
    ];

    /// The RFC 5545 keyword for this frequency.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondly => KW_RRULE_FREQ_SECONDLY,
            Self::Minutely => KW_RRULE_FREQ_MINUTELY,
            Self::Hourly => KW_RRULE_FREQ_HOURLY,
            Self::Daily => KW_RRULE_FREQ_DAILY,
            Self::Weekly => KW_RRULE_FREQ_WEEKLY,
            Self::Monthly => KW_RRULE_FREQ_MONTHLY,
            Self::Yearly => KW_RRULE_FREQ_YEARLY,
        }
    }

    /// Look up a frequency by keyword, ignoring ASCII case.
    #[must_use]
    pub fn from_keyword(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|freq| freq.as_str().eq_ignore_ascii_case(s))
    }
}

impl Display for RecurrenceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of week with optional occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeekDayNum {
    /// Day of the week
    pub day: WeekDay,
    /// Occurrence within the period, ±1 to ±53, negative counts from the end
    pub occurrence: Option<i8>,
}

impl WeekDayNum {
    /// Every occurrence of `day` within the period.
    #[must_use]
    pub const fn every(day: WeekDay) -> Self {
        Self {
            day,
            occurrence: None,
        }
    }

    /// The `occurrence`-th `day` within the period.
    #[must_use]
    pub const fn nth(day: WeekDay, occurrence: i8) -> Self {
        Self {
            day,
            occurrence: Some(occurrence),
        }
    }
}

impl Display for WeekDayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(occurrence) = self.occurrence {
            write!(f, "{occurrence}")?;
        }
        write!(f, "{}", self.day)
    }
}

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(missing_docs)]
pub enum WeekDay {
    #[cfg_attr(feature = "serde", serde(rename = "SU"))]
    Sunday,
    #[cfg_attr(feature = "serde", serde(rename = "MO"))]
    Monday,
    #[cfg_attr(feature = "serde", serde(rename = "TU"))]
    Tuesday,
    #[cfg_attr(feature = "serde", serde(rename = "WE"))]
    Wednesday,
    #[cfg_attr(feature = "serde", serde(rename = "TH"))]
    Thursday,
    #[cfg_attr(feature = "serde", serde(rename = "FR"))]
    Friday,
    #[cfg_attr(feature = "serde", serde(rename = "SA"))]
    Saturday,
}

impl WeekDay {
    /// All days, starting on Sunday.
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// The two-letter RFC 5545 code for this day.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => KW_DAY_SU,
            Self::Monday => KW_DAY_MO,
            Self::Tuesday => KW_DAY_TU,
            Self::Wednesday => KW_DAY_WE,
            Self::Thursday => KW_DAY_TH,
            Self::Friday => KW_DAY_FR,
            Self::Saturday => KW_DAY_SA,
        }
    }

    /// Look up a day by its two-letter code, ignoring ASCII case.
    #[must_use]
    pub fn from_code(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(s))
    }
}

impl Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "jiff")]
impl From<WeekDay> for jiff::civil::Weekday {
    fn from(day: WeekDay) -> Self {
        match day {
            WeekDay::Sunday => Self::Sunday,
            WeekDay::Monday => Self::Monday,
            WeekDay::Tuesday => Self::Tuesday,
            WeekDay::Wednesday => Self::Wednesday,
            WeekDay::Thursday => Self::Thursday,
            WeekDay::Friday => Self::Friday,
            WeekDay::Saturday => Self::Saturday,
        }
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Decoder from RRULE content lines to [`RecurrenceRule`] values.
//!
//! ```txt
//! recur           = recur-rule-part *( ";" recur-rule-part )
//!                 ;
//!                 ; The rule parts are not ordered in any
//!                 ; particular sequence.
//!                 ;
//!                 ; The FREQ rule part is REQUIRED,
//!                 ; but MUST NOT occur more than once.
//!                 ;
//!                 ; The UNTIL or COUNT rule parts are OPTIONAL,
//!                 ; but they MUST NOT occur in the same 'recur'.
//!                 ;
//!                 ; The other rule parts are OPTIONAL,
//!                 ; but MUST NOT occur more than once.
//! ```
//!
//! Repeated rule parts are resolved by a [`DuplicatePartBehavior`], unknown
//! rule parts are skipped.

mod error;
mod list;
mod part;
mod policy;
mod weekday;

use std::collections::BTreeSet;

pub use error::DecodeError;
pub use list::{FieldRange, parse_int_set};
pub use part::RulePart;
pub use policy::{DuplicatePartBehavior, DuplicatePartRejected, PartValue};
pub use weekday::parse_week_day_num;

use crate::content_line::parse_property;
use crate::decoder::list::{parse_set, parse_unsigned};
use crate::keyword::KW_RRULE;
use crate::value::{
    RecurrenceEnd, RecurrenceFrequency, RecurrenceRule, Until, WeekDay, WeekDayNum, parse_date,
    parse_date_time,
};

/// Decoder for RRULE content lines.
///
/// The decoder holds no state besides its [`DuplicatePartBehavior`], so one
/// instance can be shared freely between threads.
///
/// ```
/// use recur_ical::{RRuleDecoder, RecurrenceFrequency};
///
/// let rule = RRuleDecoder::default()
///     .decode("RRULE:FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=10")
///     .unwrap();
/// assert_eq!(rule.freq, RecurrenceFrequency::Weekly);
/// assert_eq!(rule.count(), Some(10));
/// assert_eq!(rule.by_day.len(), 3);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RRuleDecoder {
    behavior: DuplicatePartBehavior,
}

impl RRuleDecoder {
    /// Create a decoder resolving repeated rule parts with `behavior`.
    #[must_use]
    pub const fn new(behavior: DuplicatePartBehavior) -> Self {
        Self { behavior }
    }

    /// The behavior applied to repeated rule parts.
    #[must_use]
    pub const fn behavior(&self) -> DuplicatePartBehavior {
        self.behavior
    }

    /// Decode a full content line such as `RRULE:FREQ=DAILY;COUNT=3`.
    ///
    /// The property name is matched ignoring case, property parameters are
    /// ignored.
    ///
    /// ## Errors
    ///
    /// Returns a [`DecodeError`] if the line is not a content line, not an
    /// RRULE property, or its value does not decode.
    #[tracing::instrument(level = "debug", skip(self), fields(behavior = %self.behavior))]
    pub fn decode(&self, src: &str) -> Result<RecurrenceRule, DecodeError> {
        let line = parse_property(src)?;
        if !line.name.eq_ignore_ascii_case(KW_RRULE) {
            return Err(DecodeError::NotARule { name: line.name });
        }

        for param in &line.parameters {
            tracing::debug!(parameter = %param.name, "ignoring RRULE parameter");
        }

        self.decode_value(&line.value)
    }

    /// Decode a property value such as `FREQ=DAILY;COUNT=3`.
    ///
    /// ## Errors
    ///
    /// Returns a [`DecodeError`] on the first rule part that fails to decode,
    /// or if FREQ is missing.
    pub fn decode_value(&self, value: &str) -> Result<RecurrenceRule, DecodeError> {
        let mut draft = Draft::default();

        for segment in value.split(';').filter(|segment| !segment.is_empty()) {
            let Some((name, value)) = segment.split_once('=') else {
                return Err(DecodeError::MalformedField {
                    segment: segment.to_owned(),
                });
            };

            let name = name.to_ascii_uppercase();
            let Ok(part) = name.parse::<RulePart>() else {
                tracing::debug!(name = %name, "ignoring unknown rule part");
                continue;
            };

            self.decode_part(&mut draft, part, value)?;
        }

        draft.finish()
    }

    fn decode_part(
        &self,
        draft: &mut Draft,
        part: RulePart,
        value: &str,
    ) -> Result<(), DecodeError> {
        match part {
            RulePart::Freq => self.store(part, &mut draft.freq, decode_freq(value)?),
            RulePart::Until => {
                let until = RecurrenceEnd::Until(decode_until(value)?);
                self.store_end(part, &mut draft.end, until)
            }
            RulePart::Count => {
                let count = RecurrenceEnd::Count(decode_count(value)?);
                self.store_end(part, &mut draft.end, count)
            }
            RulePart::Interval => self.store(part, &mut draft.interval, decode_interval(value)?),
            RulePart::BySecond => {
                let set = parse_int_set(part, value, FieldRange::BY_SECOND)?;
                self.store(part, &mut draft.by_second, set)
            }
            RulePart::ByMinute => {
                let set = parse_int_set(part, value, FieldRange::BY_MINUTE)?;
                self.store(part, &mut draft.by_minute, set)
            }
            RulePart::ByHour => {
                let set = parse_int_set(part, value, FieldRange::BY_HOUR)?;
                self.store(part, &mut draft.by_hour, set)
            }
            RulePart::ByDay => {
                let set = parse_set(part, value, parse_week_day_num)?;
                self.store(part, &mut draft.by_day, set)
            }
            RulePart::ByMonthDay => {
                let set = parse_int_set(part, value, FieldRange::BY_MONTH_DAY)?;
                self.store(part, &mut draft.by_month_day, set)
            }
            RulePart::ByYearDay => {
                let set = parse_int_set(part, value, FieldRange::BY_YEAR_DAY)?;
                self.store(part, &mut draft.by_year_day, set)
            }
            RulePart::ByWeekNo => {
                let set = parse_int_set(part, value, FieldRange::BY_WEEK_NO)?;
                self.store(part, &mut draft.by_week_no, set)
            }
            RulePart::ByMonth => {
                let set = parse_int_set(part, value, FieldRange::BY_MONTH)?;
                self.store(part, &mut draft.by_month, set)
            }
            RulePart::BySetPos => {
                let set = parse_int_set(part, value, FieldRange::BY_SET_POS)?;
                self.store(part, &mut draft.by_set_pos, set)
            }
            RulePart::WeekStart => self.store(part, &mut draft.wkst, decode_wkst(value)?),
        }
    }

    fn store<T: PartValue>(
        &self,
        part: RulePart,
        slot: &mut Option<T>,
        new: T,
    ) -> Result<(), DecodeError> {
        let duplicated = slot.is_some();
        let value = self
            .behavior
            .apply(slot.take(), new)
            .map_err(|DuplicatePartRejected| DecodeError::DuplicateField { part })?;

        if duplicated {
            tracing::debug!(%part, behavior = %self.behavior, "resolved duplicate rule part");
        }
        *slot = Some(value);
        Ok(())
    }

    /// UNTIL and COUNT share one slot, a repeat of either kind is a duplicate.
    fn store_end(
        &self,
        part: RulePart,
        slot: &mut Option<RecurrenceEnd>,
        new: RecurrenceEnd,
    ) -> Result<(), DecodeError> {
        let first = slot.as_ref().map(end_part);
        self.store(part, slot, new).map_err(|err| match first {
            Some(first) if first != part => DecodeError::ConflictingUntilCount {
                first,
                second: part,
            },
            _ => err,
        })
    }
}

/// Values collected so far, one slot per rule part.
#[derive(Debug, Default)]
struct Draft {
    freq: Option<RecurrenceFrequency>,
    end: Option<RecurrenceEnd>,
    interval: Option<u32>,
    by_second: Option<BTreeSet<u8>>,
    by_minute: Option<BTreeSet<u8>>,
    by_hour: Option<BTreeSet<u8>>,
    by_day: Option<BTreeSet<WeekDayNum>>,
    by_month_day: Option<BTreeSet<i8>>,
    by_year_day: Option<BTreeSet<i16>>,
    by_week_no: Option<BTreeSet<i8>>,
    by_month: Option<BTreeSet<u8>>,
    by_set_pos: Option<BTreeSet<i16>>,
    wkst: Option<WeekDay>,
}

impl Draft {
    fn finish(self) -> Result<RecurrenceRule, DecodeError> {
        let freq = self.freq.ok_or(DecodeError::MissingFrequency)?;
        Ok(RecurrenceRule {
            freq,
            end: self.end,
            interval: self.interval,
            by_second: self.by_second.unwrap_or_default(),
            by_minute: self.by_minute.unwrap_or_default(),
            by_hour: self.by_hour.unwrap_or_default(),
            by_month_day: self.by_month_day.unwrap_or_default(),
            by_year_day: self.by_year_day.unwrap_or_default(),
            by_week_no: self.by_week_no.unwrap_or_default(),
            by_month: self.by_month.unwrap_or_default(),
            by_day: self.by_day.unwrap_or_default(),
            by_set_pos: self.by_set_pos.unwrap_or_default(),
            wkst: self.wkst,
        })
    }
}

const fn end_part(end: &RecurrenceEnd) -> RulePart {
    match end {
        RecurrenceEnd::Until(_) => RulePart::Until,
        RecurrenceEnd::Count(_) => RulePart::Count,
    }
}

fn unrecognized(part: RulePart, token: &str) -> DecodeError {
    DecodeError::UnrecognizedToken {
        part,
        token: token.to_owned(),
    }
}

/// ```txt
/// freq        = "SECONDLY" / "MINUTELY" / "HOURLY" / "DAILY"
///             / "WEEKLY" / "MONTHLY" / "YEARLY"
/// ```
fn decode_freq(value: &str) -> Result<RecurrenceFrequency, DecodeError> {
    RecurrenceFrequency::from_keyword(value).ok_or_else(|| unrecognized(RulePart::Freq, value))
}

/// ```txt
/// enddate     = date / date-time
/// ```
///
/// A trailing UTC designator is dropped before parsing. Only a DATE-TIME
/// carries the `T` separator.
fn decode_until(value: &str) -> Result<Until, DecodeError> {
    let text = value.strip_suffix('Z').unwrap_or(value);
    let until = if text.contains('T') {
        parse_date_time(text).map(Until::DateTime)
    } else {
        parse_date(text).map(Until::Date)
    };
    until.map_err(|source| DecodeError::InvalidUntil {
        token: value.to_owned(),
        source,
    })
}

/// ```txt
/// ( "COUNT" "=" 1*DIGIT )
/// ```
fn decode_count(value: &str) -> Result<u32, DecodeError> {
    parse_unsigned(value).ok_or_else(|| unrecognized(RulePart::Count, value))
}

/// ```txt
/// ( "INTERVAL" "=" 1*DIGIT )
/// ```
///
/// The interval is a positive integer.
fn decode_interval(value: &str) -> Result<u32, DecodeError> {
    parse_unsigned(value)
        .filter(|&n| n > 0)
        .ok_or_else(|| unrecognized(RulePart::Interval, value))
}

/// ```txt
/// ( "WKST" "=" weekday )
/// ```
fn decode_wkst(value: &str) -> Result<WeekDay, DecodeError> {
    WeekDay::from_code(value).ok_or_else(|| unrecognized(RulePart::WeekStart, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ValueDate, ValueDateTime, ValueTime};

    fn decode(src: &str) -> Result<RecurrenceRule, DecodeError> {
        RRuleDecoder::default().decode(src)
    }

    #[test]
    fn decodes_minimal_rule() {
        let rule = decode("RRULE:FREQ=DAILY").unwrap();
        assert_eq!(rule, RecurrenceRule::new(RecurrenceFrequency::Daily));
    }

    #[test]
    fn decodes_every_part() {
        let rule = decode(
            "RRULE:FREQ=YEARLY;INTERVAL=2;COUNT=10;BYSECOND=0,30;BYMINUTE=15;BYHOUR=8,9;\
             BYDAY=MO,-1FR;BYMONTHDAY=-1,15;BYYEARDAY=100;BYWEEKNO=20;BYMONTH=1,6;\
             BYSETPOS=-1;WKST=SU",
        )
        .unwrap();

        assert_eq!(rule.freq, RecurrenceFrequency::Yearly);
        assert_eq!(rule.interval, Some(2));
        assert_eq!(rule.count(), Some(10));
        assert_eq!(rule.by_second, BTreeSet::from([0, 30]));
        assert_eq!(rule.by_minute, BTreeSet::from([15]));
        assert_eq!(rule.by_hour, BTreeSet::from([8, 9]));
        assert_eq!(
            rule.by_day,
            BTreeSet::from([
                WeekDayNum::every(WeekDay::Monday),
                WeekDayNum::nth(WeekDay::Friday, -1),
            ])
        );
        assert_eq!(rule.by_month_day, BTreeSet::from([-1, 15]));
        assert_eq!(rule.by_year_day, BTreeSet::from([100]));
        assert_eq!(rule.by_week_no, BTreeSet::from([20]));
        assert_eq!(rule.by_month, BTreeSet::from([1, 6]));
        assert_eq!(rule.by_set_pos, BTreeSet::from([-1]));
        assert_eq!(rule.wkst, Some(WeekDay::Sunday));
    }

    #[test]
    fn matches_names_ignoring_case() {
        let rule = decode("rrule:freq=weekly;byday=mo;wkst=su").unwrap();
        assert_eq!(rule.freq, RecurrenceFrequency::Weekly);
        assert_eq!(rule.by_day, BTreeSet::from([WeekDayNum::every(WeekDay::Monday)]));
        assert_eq!(rule.wkst, Some(WeekDay::Sunday));
    }

    #[test]
    fn decodes_until() {
        let date = ValueDate {
            year: 1997,
            month: 12,
            day: 24,
        };
        #[rustfmt::skip]
        let cases = [
            ("19971224", Until::Date(date)),
            ("19971224Z", Until::Date(date)),
            ("19971224T000000Z", Until::DateTime(ValueDateTime::new(date, ValueTime::new(0, 0, 0)))),
            ("19971224T235960", Until::DateTime(ValueDateTime::new(date, ValueTime::new(23, 59, 60)))),
        ];
        for (src, expected) in cases {
            assert_eq!(decode_until(src), Ok(expected), "decode {src}");
        }

        #[rustfmt::skip]
        let cases = [
            ("", "DATE", ""),
            ("Z", "DATE", ""),
            ("19971324", "DATE", "19971324"),
            ("19971224T", "DATE-TIME", "19971224T"),
            ("19971224T000000+0800", "DATE-TIME", "19971224T000000+0800"),
            ("19971224T000000ZZ", "DATE-TIME", "19971224T000000Z"),
        ];
        for (src, expected, text) in cases {
            match decode_until(src) {
                Err(DecodeError::InvalidUntil { token, source }) => {
                    assert_eq!(token, src);
                    assert_eq!(source.expected, expected, "decode {src}");
                    assert_eq!(source.text, text, "decode {src}");
                    assert!(!source.reason.is_empty(), "decode {src}");
                }
                other => panic!("expected UNTIL error for {src:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn until_error_carries_reason() {
        let err = decode_until("20201301Z").unwrap_err();
        let reason = match &err {
            DecodeError::InvalidUntil { source, .. } => source.reason.clone(),
            other => panic!("expected UNTIL error, got {other:?}"),
        };
        assert_eq!(
            err.to_string(),
            format!("unrecognized UNTIL value '20201301Z': {reason}")
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn decodes_scalars() {
        assert_eq!(decode_interval("1"), Ok(1));
        assert_eq!(decode_interval("0"), Err(unrecognized(RulePart::Interval, "0")));
        assert_eq!(decode_interval("-1"), Err(unrecognized(RulePart::Interval, "-1")));
        assert_eq!(decode_count("0"), Ok(0));
        assert_eq!(decode_count("x"), Err(unrecognized(RulePart::Count, "x")));
        assert_eq!(decode_freq("Monthly"), Ok(RecurrenceFrequency::Monthly));
        assert_eq!(decode_freq("NEVER"), Err(unrecognized(RulePart::Freq, "NEVER")));
        assert_eq!(decode_wkst("MONDAY"), Err(unrecognized(RulePart::WeekStart, "MONDAY")));
    }

    #[test]
    fn skips_empty_segments_and_unknown_parts() {
        let rule = decode("RRULE:;FREQ=DAILY;;X-FOO=BAR;RSCALE=GREGORIAN;").unwrap();
        assert_eq!(rule, RecurrenceRule::new(RecurrenceFrequency::Daily));
    }

    #[test]
    fn ignores_parameters() {
        let rule = decode(r#"RRULE;X-NOTE="a;b":FREQ=HOURLY"#).unwrap();
        assert_eq!(rule.freq, RecurrenceFrequency::Hourly);
    }

    #[test]
    fn rejects_malformed_rules() {
        assert_eq!(
            decode("EXRULE:FREQ=DAILY"),
            Err(DecodeError::NotARule {
                name: "EXRULE".to_owned()
            })
        );
        assert_eq!(
            decode("RRULE:FREQ=DAILY;COUNT"),
            Err(DecodeError::MalformedField {
                segment: "COUNT".to_owned()
            })
        );
        assert_eq!(decode("RRULE:"), Err(DecodeError::MissingFrequency));
        assert!(matches!(
            decode("FREQ=DAILY"),
            Err(DecodeError::ContentLine(_))
        ));
    }

    #[test]
    fn reports_until_count_conflicts() {
        let decoder = RRuleDecoder::new(DuplicatePartBehavior::Error);
        assert_eq!(
            decoder.decode_value("FREQ=DAILY;COUNT=3;UNTIL=20200101"),
            Err(DecodeError::ConflictingUntilCount {
                first: RulePart::Count,
                second: RulePart::Until,
            })
        );
        assert_eq!(
            decoder.decode_value("FREQ=DAILY;COUNT=3;COUNT=4"),
            Err(DecodeError::DuplicateField {
                part: RulePart::Count
            })
        );
    }

    #[test]
    fn exposes_behavior() {
        let decoder = RRuleDecoder::new(DuplicatePartBehavior::TakeLast);
        assert_eq!(decoder.behavior(), DuplicatePartBehavior::TakeLast);
        assert_eq!(
            RRuleDecoder::default().behavior(),
            DuplicatePartBehavior::Error
        );
    }
}

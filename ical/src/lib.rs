// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Decode iCalendar recurrence rules (RFC 5545 Section 3.3.10).
//!
//! ```
//! use recur_ical::{DuplicatePartBehavior, RRuleDecoder, RecurrenceFrequency};
//!
//! let decoder = RRuleDecoder::new(DuplicatePartBehavior::TakeLast);
//! let rule = decoder.decode("RRULE:FREQ=WEEKLY;COUNT=5;FREQ=DAILY").unwrap();
//! assert_eq!(rule.freq, RecurrenceFrequency::Daily);
//! assert_eq!(rule.count(), Some(5));
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else)]

pub mod content_line;
pub mod decoder;
pub mod keyword;
pub mod lexer;
pub mod value;

pub use crate::content_line::{ContentLine, ContentLineError, parse_property, unfold};
pub use crate::decoder::{
    DecodeError, DuplicatePartBehavior, FieldRange, RRuleDecoder, RulePart, parse_week_day_num,
};
pub use crate::value::{
    DateTimeError, RecurrenceEnd, RecurrenceFrequency, RecurrenceRule, Until, ValueDate,
    ValueDateTime, ValueTime, WeekDay, WeekDayNum,
};

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Value types produced by the recurrence decoder.
//!
//! The DATE and DATE-TIME parsers follow RFC 5545 Section 3.3.4 and 3.3.5, the
//! recurrence rule model follows Section 3.3.10.

mod datetime;
mod recur;

pub use datetime::{DateTimeError, ValueDate, ValueDateTime, ValueTime, parse_date, parse_date_time};
pub use recur::{RecurrenceEnd, RecurrenceFrequency, RecurrenceRule, Until, WeekDay, WeekDayNum};

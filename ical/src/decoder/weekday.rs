// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chumsky::extra::ParserExtra;
use chumsky::prelude::*;

use crate::decoder::{DecodeError, RulePart};
use crate::value::{WeekDay, WeekDayNum};

/// Parse a single BYDAY entry such as `MO`, `-1FR` or `+2TU`.
///
/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// ordwk       = 1*2DIGIT       ;1 to 53
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
///
/// The whole token must match, the weekday code is matched ignoring case.
/// A sign without an ordinal is tolerated and has no effect.
///
/// ## Errors
///
/// - [`DecodeError::InvalidEntry`] if the token does not have this shape
/// - [`DecodeError::OrdinalOutOfRange`] if the ordinal is not in 1 to 53
/// - [`DecodeError::UnknownWeekDay`] if the code is not a weekday
pub fn parse_week_day_num(token: &str) -> Result<WeekDayNum, DecodeError> {
    let invalid = || DecodeError::InvalidEntry {
        part: RulePart::ByDay,
        token: token.to_owned(),
    };

    let (negative, ordwk, code) = weekdaynum::<'_, extra::Default>()
        .parse(token)
        .into_result()
        .map_err(|_| invalid())?;

    let occurrence = match ordwk {
        Some(digits) => {
            let ordinal = lexical::parse::<u8, _>(digits).map_err(|_| invalid())?;
            if !(1..=53).contains(&ordinal) {
                return Err(DecodeError::OrdinalOutOfRange {
                    token: token.to_owned(),
                    ordinal,
                });
            }
            let n = i8::try_from(ordinal).map_err(|_| invalid())?;
            Some(if negative { -n } else { n })
        }
        None => None,
    };

    let day = WeekDay::from_code(code).ok_or_else(|| DecodeError::UnknownWeekDay {
        code: code.to_owned(),
    })?;

    Ok(WeekDayNum { day, occurrence })
}

/// Split an entry into its sign, its ordinal digits and its two-letter code.
fn weekdaynum<'src, E>() -> impl Parser<'src, &'src str, (bool, Option<&'src str>, &'src str), E>
where
    E: ParserExtra<'src, &'src str>,
{
    let sign = one_of("+-").or_not().map(|sign| sign == Some('-'));

    let ordwk = any()
        .filter(char::is_ascii_digit)
        .repeated()
        .at_least(1)
        .at_most(2)
        .to_slice();

    let weekday = any()
        .filter(char::is_ascii_alphabetic)
        .repeated()
        .exactly(2)
        .to_slice();

    sign.then(ordwk.or_not())
        .then(weekday)
        .then_ignore(end())
        .map(|((negative, ordwk), code)| (negative, ordwk, code))
}

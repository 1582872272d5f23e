// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use crate::decoder::{DecodeError, RulePart};

/// Inclusive legal range of an integer list rule part.
///
/// For a signed range the bounds apply to the magnitude, so zero is never
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRange {
    /// Smallest accepted value or magnitude
    pub min: u16,
    /// Largest accepted value or magnitude
    pub max: u16,
    /// Whether negative values are accepted
    pub signed: bool,
}

impl FieldRange {
    /// ```txt
    /// seconds    = 1*2DIGIT       ;0 to 60
    /// ```
    pub const BY_SECOND: Self = Self::unsigned(0, 60);

    /// ```txt
    /// minutes    = 1*2DIGIT       ;0 to 59
    /// ```
    pub const BY_MINUTE: Self = Self::unsigned(0, 59);

    /// ```txt
    /// hour       = 1*2DIGIT       ;0 to 23
    /// ```
    pub const BY_HOUR: Self = Self::unsigned(0, 23);

    /// ```txt
    /// monthdaynum = [plus / minus] ordmoday
    /// ordmoday    = 1*2DIGIT       ;1 to 31
    /// ```
    pub const BY_MONTH_DAY: Self = Self::signed(1, 31);

    /// ```txt
    /// yeardaynum = [plus / minus] ordyrday
    /// ordyrday   = 1*3DIGIT      ;1 to 366
    /// ```
    pub const BY_YEAR_DAY: Self = Self::signed(1, 366);

    /// ```txt
    /// weeknum    = [plus / minus] ordwk
    /// ordwk      = 1*2DIGIT       ;1 to 53
    /// ```
    pub const BY_WEEK_NO: Self = Self::signed(1, 53);

    /// ```txt
    /// monthnum   = 1*2DIGIT       ;1 to 12
    /// ```
    pub const BY_MONTH: Self = Self::unsigned(1, 12);

    /// ```txt
    /// setposday  = yeardaynum
    /// ```
    pub const BY_SET_POS: Self = Self::signed(1, 366);

    /// Create a range of non-negative values.
    #[must_use]
    pub const fn unsigned(min: u16, max: u16) -> Self {
        Self {
            min,
            max,
            signed: false,
        }
    }

    /// Create a range of magnitudes that may carry either sign.
    #[must_use]
    pub const fn signed(min: u16, max: u16) -> Self {
        Self {
            min,
            max,
            signed: true,
        }
    }

    /// Check whether `value` is legal for this range.
    #[must_use]
    pub fn contains(self, value: i32) -> bool {
        let (min, max) = (i32::from(self.min), i32::from(self.max));
        if self.signed {
            value != 0 && (min..=max).contains(&value.abs())
        } else {
            (min..=max).contains(&value)
        }
    }
}

/// Parse a comma separated list of integers into a set.
///
/// Every member is an optional sign followed by digits and must lie in
/// `range`, repeated members collapse.
///
/// ## Errors
///
/// Returns [`DecodeError::InvalidEntry`] naming the first rejected member.
pub fn parse_int_set<T>(
    part: RulePart,
    value: &str,
    range: FieldRange,
) -> Result<BTreeSet<T>, DecodeError>
where
    T: Ord + TryFrom<i32>,
{
    parse_set(part, value, |token| {
        parse_signed(token)
            .filter(|&v| range.contains(v))
            .and_then(|v| T::try_from(v).ok())
            .ok_or_else(|| DecodeError::InvalidEntry {
                part,
                token: token.to_owned(),
            })
    })
}

/// Parse a comma separated list with `parse_entry`, collecting into a set.
///
/// An empty member is an invalid entry.
pub(crate) fn parse_set<T, F>(
    part: RulePart,
    value: &str,
    parse_entry: F,
) -> Result<BTreeSet<T>, DecodeError>
where
    T: Ord,
    F: Fn(&str) -> Result<T, DecodeError>,
{
    value
        .split(',')
        .map(|token| {
            if token.is_empty() {
                Err(DecodeError::InvalidEntry {
                    part,
                    token: String::new(),
                })
            } else {
                parse_entry(token)
            }
        })
        .collect()
}

/// Parse `[plus / minus] 1*DIGIT`.
///
/// Returns `None` on any other text or when the magnitude overflows `i32`.
pub(crate) fn parse_signed(token: &str) -> Option<i32> {
    let (negative, digits) = match token.as_bytes().first() {
        Some(b'+') => (false, token.get(1..)?),
        Some(b'-') => (true, token.get(1..)?),
        _ => (false, token),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude = i32::try_from(lexical::parse::<u32, _>(digits).ok()?).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse `1*DIGIT` into a `u32`.
pub(crate) fn parse_unsigned(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    lexical::parse::<u32, _>(token).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checks_ranges() {
        let hour = FieldRange::BY_HOUR;
        assert!(hour.contains(0));
        assert!(hour.contains(23));
        assert!(!hour.contains(24));
        assert!(!hour.contains(-1));

        let month_day = FieldRange::BY_MONTH_DAY;
        assert!(month_day.contains(1));
        assert!(month_day.contains(-31));
        assert!(!month_day.contains(0));
        assert!(!month_day.contains(32));
        assert!(!month_day.contains(-32));
    }

    #[test]
    fn parses_signed_integers() {
        let cases = [
            ("0", Some(0)),
            ("7", Some(7)),
            ("+7", Some(7)),
            ("-7", Some(-7)),
            ("007", Some(7)),
            ("", None),
            ("+", None),
            ("-", None),
            ("+-1", None),
            ("1.5", None),
            ("1 ", None),
            (" 1", None),
            ("0x1", None),
            ("99999999999", None),
        ];
        for (src, expected) in cases {
            assert_eq!(parse_signed(src), expected, "parse {src:?}");
        }
    }

    #[test]
    fn parses_unsigned_integers() {
        assert_eq!(parse_unsigned("0"), Some(0));
        assert_eq!(parse_unsigned("4294967295"), Some(u32::MAX));
        assert_eq!(parse_unsigned("4294967296"), None);
        assert_eq!(parse_unsigned("+1"), None);
        assert_eq!(parse_unsigned("-1"), None);
        assert_eq!(parse_unsigned(""), None);
    }

    #[test]
    fn parses_int_sets() {
        let set: BTreeSet<u8> =
            parse_int_set(RulePart::ByHour, "9,17,9,+0", FieldRange::BY_HOUR).unwrap();
        assert_eq!(set, BTreeSet::from([0, 9, 17]));

        let set: BTreeSet<i16> =
            parse_int_set(RulePart::ByYearDay, "-366,1,366", FieldRange::BY_YEAR_DAY).unwrap();
        assert_eq!(set, BTreeSet::from([-366, 1, 366]));
    }

    #[test]
    fn rejects_invalid_members() {
        let cases = [
            ("1,,2", ""),
            ("", ""),
            ("1,", ""),
            ("24", "24"),
            ("-1", "-1"),
            ("1,x", "x"),
        ];
        for (src, token) in cases {
            let err = parse_int_set::<u8>(RulePart::ByHour, src, FieldRange::BY_HOUR).unwrap_err();
            assert_eq!(
                err,
                DecodeError::InvalidEntry {
                    part: RulePart::ByHour,
                    token: token.to_owned(),
                },
                "parse {src:?}"
            );
        }
    }
}

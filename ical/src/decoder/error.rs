// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::content_line::ContentLineError;
use crate::decoder::RulePart;
use crate::value::DateTimeError;

/// Error returned when a recurrence rule cannot be decoded.
///
/// Decoding either fully succeeds or fails with the first problem found.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The text is not a well-formed content line
    #[error(transparent)]
    ContentLine(#[from] ContentLineError),

    /// The property is not a recurrence rule
    #[error("expected an RRULE property, got '{name}'")]
    NotARule {
        /// The property name that was found
        name: String,
    },

    /// A rule part lacks the `=` between name and value
    #[error("malformed rule part '{segment}', expected NAME=VALUE")]
    MalformedField {
        /// The offending `;` separated segment
        segment: String,
    },

    /// A list member failed to parse or is out of range
    #[error("invalid {part} entry '{token}'")]
    InvalidEntry {
        /// The rule part holding the list
        part: RulePart,
        /// The rejected list member
        token: String,
    },

    /// A scalar rule part value is not recognized
    #[error("unrecognized {part} value '{token}'")]
    UnrecognizedToken {
        /// The scalar rule part
        part: RulePart,
        /// The rejected value
        token: String,
    },

    /// An UNTIL value is neither a DATE nor a DATE-TIME
    #[error("unrecognized UNTIL value '{token}': {}", .source.reason)]
    InvalidUntil {
        /// The rejected value, UTC designator included
        token: String,
        /// Why the date parser rejected it
        source: DateTimeError,
    },

    /// A weekday ordinal is outside ±1 to ±53
    #[error("ordinal {ordinal} in '{token}' is out of range, expected 1 to 53")]
    OrdinalOutOfRange {
        /// The BYDAY entry holding the ordinal
        token: String,
        /// The unsigned ordinal that was found
        ordinal: u8,
    },

    /// A weekday code is not one of the seven RFC 5545 codes
    #[error("unknown weekday '{code}', expected one of SU, MO, TU, WE, TH, FR, SA")]
    UnknownWeekDay {
        /// The rejected two-letter code
        code: String,
    },

    /// A rule part occurs more than once
    #[error("duplicate rule part {part}")]
    DuplicateField {
        /// The repeated rule part
        part: RulePart,
    },

    /// Both UNTIL and COUNT occur in the rule
    #[error("{second} conflicts with {first}, UNTIL and COUNT must not both occur")]
    ConflictingUntilCount {
        /// The part that occurred first
        first: RulePart,
        /// The part that occurred second
        second: RulePart,
    },

    /// The FREQ rule part is missing
    #[error("missing required rule part FREQ")]
    MissingFrequency,
}

impl DecodeError {
    /// The rule part this error is about, if any.
    #[must_use]
    pub const fn part(&self) -> Option<RulePart> {
        match self {
            Self::InvalidEntry { part, .. }
            | Self::UnrecognizedToken { part, .. }
            | Self::DuplicateField { part } => Some(*part),
            Self::InvalidUntil { .. } => Some(RulePart::Until),
            Self::OrdinalOutOfRange { .. } | Self::UnknownWeekDay { .. } => Some(RulePart::ByDay),
            Self::ConflictingUntilCount { second, .. } => Some(*second),
            Self::MissingFrequency => Some(RulePart::Freq),
            Self::ContentLine(_) | Self::NotARule { .. } | Self::MalformedField { .. } => None,
        }
    }
}

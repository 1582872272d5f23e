// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use crate::value::{RecurrenceEnd, RecurrenceFrequency, WeekDay};

/// What to do when a rule part occurs more than once in one rule.
///
/// RFC 5545 forbids repeated parts, but rules found in the wild often repeat
/// them anyway. The behavior applies uniformly to every part of a rule.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DuplicatePartBehavior {
    /// Reject the rule
    #[default]
    Error,
    /// Keep the first occurrence and ignore the later ones
    TakeFirst,
    /// Keep the last occurrence
    TakeLast,
    /// Union list parts, keep the last occurrence of scalar parts
    MergePreferLast,
}

impl DuplicatePartBehavior {
    /// Resolve a freshly parsed value against the value already stored for the
    /// same part.
    ///
    /// ## Errors
    ///
    /// Returns [`DuplicatePartRejected`] when `old` is present and the
    /// behavior is [`DuplicatePartBehavior::Error`].
    pub fn apply<T: PartValue>(self, old: Option<T>, new: T) -> Result<T, DuplicatePartRejected> {
        let Some(old) = old else {
            return Ok(new);
        };

        match self {
            Self::Error => Err(DuplicatePartRejected),
            Self::TakeFirst => Ok(old),
            Self::TakeLast => Ok(new),
            Self::MergePreferLast => Ok(old.merge(new)),
        }
    }
}

/// A repeated rule part was rejected by [`DuplicatePartBehavior::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("duplicate rule part rejected")]
pub struct DuplicatePartRejected;

/// A value stored for a rule part.
pub trait PartValue: Sized {
    /// Combine an earlier value with a later one under
    /// [`DuplicatePartBehavior::MergePreferLast`].
    #[must_use]
    fn merge(self, newer: Self) -> Self;
}

impl<T: Ord> PartValue for BTreeSet<T> {
    fn merge(mut self, mut newer: Self) -> Self {
        self.append(&mut newer);
        self
    }
}

macro_rules! impl_scalar_part_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl PartValue for $ty {
                fn merge(self, newer: Self) -> Self {
                    newer
                }
            }
        )+
    };
}

impl_scalar_part_value!(RecurrenceFrequency, RecurrenceEnd, WeekDay, u32);

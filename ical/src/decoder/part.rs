// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, str::FromStr};

use crate::keyword::{
    KW_RRULE_BYDAY, KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYSECOND, KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT,
    KW_RRULE_FREQ, KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
};

macro_rules! impl_rule_part_mapping {
    (
        $(#[$attr:meta])*
        enum $ty:ident {
            $(
                $variant:ident => $kw:ident
            ),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
        $(#[$attr])*
        pub enum $ty {
            $(
                $variant,
            )+
        }

        impl $ty {
            /// Returns the name keyword for the rule part
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $kw,
                    )+
                }
            }
        }

        impl FromStr for $ty {
            type Err = ();

            /// Names are matched exactly, callers upper-case them first.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(
                        $kw => Ok(Self::$variant),
                    )+
                    _ => Err(()),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

impl_rule_part_mapping! {
    /// Rule parts of a recurrence rule, RFC 5545 Section 3.3.10
    #[expect(missing_docs)]
    enum RulePart {
        Freq        => KW_RRULE_FREQ,
        Until       => KW_RRULE_UNTIL,
        Count       => KW_RRULE_COUNT,
        Interval    => KW_RRULE_INTERVAL,
        BySecond    => KW_RRULE_BYSECOND,
        ByMinute    => KW_RRULE_BYMINUTE,
        ByHour      => KW_RRULE_BYHOUR,
        ByDay       => KW_RRULE_BYDAY,
        ByMonthDay  => KW_RRULE_BYMONTHDAY,
        ByYearDay   => KW_RRULE_BYYEARDAY,
        ByWeekNo    => KW_RRULE_BYWEEKNO,
        ByMonth     => KW_RRULE_BYMONTH,
        BySetPos    => KW_RRULE_BYSETPOS,
        WeekStart   => KW_RRULE_WKST,
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Frequency and weekday codes of the recurrence rule.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::RecurrenceError;
use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE,
    KW_RRULE_FREQ_DAILY, KW_RRULE_FREQ_HOURLY, KW_RRULE_FREQ_MINUTELY, KW_RRULE_FREQ_MONTHLY,
    KW_RRULE_FREQ_SECONDLY, KW_RRULE_FREQ_WEEKLY, KW_RRULE_FREQ_YEARLY,
};
use crate::rrule::ByPart;

/// Weekday codes in week order starting from Sunday, `wkst_day` indexes into it.
pub(crate) const WEEKDAY_TABLE: [&str; 7] = [
    KW_DAY_SU, KW_DAY_MO, KW_DAY_TU, KW_DAY_WE, KW_DAY_TH, KW_DAY_FR, KW_DAY_SA,
];

/// Recurrence frequency
///
/// ```txt
/// freq        = "SECONDLY" / "MINUTELY" / "HOURLY" / "DAILY"
///             / "WEEKLY" / "MONTHLY" / "YEARLY"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::EnumIter)]
#[strum(ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum RecurrenceFrequency {
    #[strum(serialize = "SECONDLY")]
    Secondly,
    #[strum(serialize = "MINUTELY")]
    Minutely,
    #[strum(serialize = "HOURLY")]
    Hourly,
    #[strum(serialize = "DAILY")]
    Daily,
    #[strum(serialize = "WEEKLY")]
    Weekly,
    #[strum(serialize = "MONTHLY")]
    Monthly,
    #[strum(serialize = "YEARLY")]
    Yearly,
}

impl Display for RecurrenceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceFrequency::Secondly => write!(f, "{KW_RRULE_FREQ_SECONDLY}"),
            RecurrenceFrequency::Minutely => write!(f, "{KW_RRULE_FREQ_MINUTELY}"),
            RecurrenceFrequency::Hourly => write!(f, "{KW_RRULE_FREQ_HOURLY}"),
            RecurrenceFrequency::Daily => write!(f, "{KW_RRULE_FREQ_DAILY}"),
            RecurrenceFrequency::Weekly => write!(f, "{KW_RRULE_FREQ_WEEKLY}"),
            RecurrenceFrequency::Monthly => write!(f, "{KW_RRULE_FREQ_MONTHLY}"),
            RecurrenceFrequency::Yearly => write!(f, "{KW_RRULE_FREQ_YEARLY}"),
        }
    }
}

/// Day of the week
///
/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::EnumIter)]
#[strum(ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum WeekDay {
    #[strum(serialize = "SU")]
    Sunday,
    #[strum(serialize = "MO")]
    Monday,
    #[strum(serialize = "TU")]
    Tuesday,
    #[strum(serialize = "WE")]
    Wednesday,
    #[strum(serialize = "TH")]
    Thursday,
    #[strum(serialize = "FR")]
    Friday,
    #[strum(serialize = "SA")]
    Saturday,
}

impl WeekDay {
    /// The two-letter code of the day.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            WeekDay::Sunday => KW_DAY_SU,
            WeekDay::Monday => KW_DAY_MO,
            WeekDay::Tuesday => KW_DAY_TU,
            WeekDay::Wednesday => KW_DAY_WE,
            WeekDay::Thursday => KW_DAY_TH,
            WeekDay::Friday => KW_DAY_FR,
            WeekDay::Saturday => KW_DAY_SA,
        }
    }

    /// Zero-based position in the week, Sunday first.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Day of week with optional occurrence, an element of BYDAY
///
/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// ordwk       = 1*2DIGIT       ;1 to 53
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekDayNum {
    /// Day of the week
    pub day: WeekDay,

    /// Occurrence within the month or year (optional), -53 to -1 or 1 to 53
    pub occurrence: Option<i8>,
}

impl Display for WeekDayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(occurrence) = self.occurrence {
            write!(f, "{occurrence}")?;
        }
        write!(f, "{}", self.day)
    }
}

impl FromStr for WeekDayNum {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RecurrenceError::InvalidByPartValue {
            part: ByPart::ByDay,
            value: s.to_owned(),
        };

        let split = s.len().checked_sub(2).ok_or_else(invalid)?;
        if !s.is_char_boundary(split) {
            return Err(invalid());
        }

        let (ordinal, day) = s.split_at(split);
        let day = day.parse::<WeekDay>().map_err(|_| invalid())?;
        if ordinal.is_empty() {
            return Ok(Self {
                day,
                occurrence: None,
            });
        }

        let (negative, digits) = match ordinal.strip_prefix('-') {
            Some(digits) => (true, digits),
            None => (false, ordinal.strip_prefix('+').unwrap_or(ordinal)),
        };
        if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let n = lexical::parse::<i8, _>(digits).map_err(|_| invalid())?;
        if !(1..=53).contains(&n) {
            return Err(invalid());
        }

        Ok(Self {
            day,
            occurrence: Some(if negative { -n } else { n }),
        })
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn parses_frequency_case_insensitively() {
        let freqs = [
            ("SECONDLY", RecurrenceFrequency::Secondly),
            ("minutely", RecurrenceFrequency::Minutely),
            ("Hourly", RecurrenceFrequency::Hourly),
            ("DAILY", RecurrenceFrequency::Daily),
            ("weekly", RecurrenceFrequency::Weekly),
            ("MONTHLY", RecurrenceFrequency::Monthly),
            ("yEaRlY", RecurrenceFrequency::Yearly),
        ];
        for (src, expected) in freqs {
            assert_eq!(src.parse::<RecurrenceFrequency>().unwrap(), expected);
            assert_eq!(expected.to_string(), src.to_ascii_uppercase());
        }
        assert!("FORTNIGHTLY".parse::<RecurrenceFrequency>().is_err());
    }

    #[test]
    fn weekday_table_has_every_day_in_order() {
        assert_eq!(WEEKDAY_TABLE.len(), 7);
        for (i, day) in WeekDay::iter().enumerate() {
            assert_eq!(day.index(), i);
            assert_eq!(WEEKDAY_TABLE.get(i).copied(), Some(day.code()));
            assert_eq!(day.code().parse::<WeekDay>().unwrap(), day);
        }
        assert_eq!(WeekDay::Thursday.index(), 4);
    }

    #[test]
    fn parses_weekdaynum() {
        let success_cases = [
            ("MO", WeekDay::Monday, None),
            ("th", WeekDay::Thursday, None),
            ("1MO", WeekDay::Monday, Some(1)),
            ("+2TU", WeekDay::Tuesday, Some(2)),
            ("-1SU", WeekDay::Sunday, Some(-1)),
            ("20FR", WeekDay::Friday, Some(20)),
            ("-53SA", WeekDay::Saturday, Some(-53)),
            ("01WE", WeekDay::Wednesday, Some(1)),
        ];
        for (src, day, occurrence) in success_cases {
            let parsed = src.parse::<WeekDayNum>().unwrap();
            assert_eq!(parsed, WeekDayNum { day, occurrence }, "Failed for {src}");
        }

        let fail_cases = [
            "", "M", "XX", "0MO", "54MO", "-0MO", "+MO", "100MO", "1 MO", "MON", " WE", "MO ",
        ];
        for src in fail_cases {
            assert!(src.parse::<WeekDayNum>().is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn displays_weekdaynum() {
        let cases = [
            (WeekDayNum { day: WeekDay::Monday, occurrence: None }, "MO"),
            (WeekDayNum { day: WeekDay::Friday, occurrence: Some(-1) }, "-1FR"),
            (WeekDayNum { day: WeekDay::Sunday, occurrence: Some(2) }, "2SU"),
        ];
        for (value, expected) in cases {
            assert_eq!(value.to_string(), expected);
        }
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The nine BYxxx rule parts and their list storage.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use crate::keyword::{
    KW_RRULE_BYDAY, KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYSECOND, KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY,
};
use crate::rrule::WeekDayNum;

/// By-part lists keyed by part, iterated in serialization order.
pub type ByList = BTreeMap<ByPart, Vec<String>>;

/// A BYxxx rule part.
///
/// Variants are declared in the order they are written out, so the derived
/// `Ord` gives the serialization order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum ByPart {
    #[strum(serialize = "BYSECOND")]
    BySecond,
    #[strum(serialize = "BYMINUTE")]
    ByMinute,
    #[strum(serialize = "BYHOUR")]
    ByHour,
    #[strum(serialize = "BYDAY")]
    ByDay,
    #[strum(serialize = "BYMONTHDAY")]
    ByMonthDay,
    #[strum(serialize = "BYYEARDAY")]
    ByYearDay,
    #[strum(serialize = "BYWEEKNO")]
    ByWeekNo,
    #[strum(serialize = "BYMONTH")]
    ByMonth,
    #[strum(serialize = "BYSETPOS")]
    BySetPos,
}

impl ByPart {
    /// The rule part name, e.g. `BYDAY`.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            ByPart::BySecond => KW_RRULE_BYSECOND,
            ByPart::ByMinute => KW_RRULE_BYMINUTE,
            ByPart::ByHour => KW_RRULE_BYHOUR,
            ByPart::ByDay => KW_RRULE_BYDAY,
            ByPart::ByMonthDay => KW_RRULE_BYMONTHDAY,
            ByPart::ByYearDay => KW_RRULE_BYYEARDAY,
            ByPart::ByWeekNo => KW_RRULE_BYWEEKNO,
            ByPart::ByMonth => KW_RRULE_BYMONTH,
            ByPart::BySetPos => KW_RRULE_BYSETPOS,
        }
    }

    /// Whether `value` is a well-formed, in-range element of this part.
    ///
    /// ```txt
    /// byseclist   = ( seconds *("," seconds) )        ; 0 to 60
    /// byminlist   = ( minutes *("," minutes) )        ; 0 to 59
    /// byhrlist    = ( hour *("," hour) )              ; 0 to 23
    /// bywdaylist  = ( weekdaynum *("," weekdaynum) )
    /// bymodaylist = ( monthdaynum *("," monthdaynum) ) ; [+/-] 1 to 31
    /// byyrdaylist = ( yeardaynum *("," yeardaynum) )  ; [+/-] 1 to 366
    /// bywknolist  = ( weeknum *("," weeknum) )        ; [+/-] 1 to 53
    /// bymolist    = ( monthnum *("," monthnum) )      ; 1 to 12
    /// bysplist    = ( setposday *("," setposday) )    ; [+/-] 1 to 366
    /// ```
    #[must_use]
    pub fn accepts(self, value: &str) -> bool {
        match self {
            ByPart::BySecond => unsigned_in(value, 0, 60),
            ByPart::ByMinute => unsigned_in(value, 0, 59),
            ByPart::ByHour => unsigned_in(value, 0, 23),
            ByPart::ByDay => value.parse::<WeekDayNum>().is_ok(),
            ByPart::ByMonthDay => signed_ordinal(value, 31),
            ByPart::ByYearDay | ByPart::BySetPos => signed_ordinal(value, 366),
            ByPart::ByWeekNo => signed_ordinal(value, 53),
            ByPart::ByMonth => unsigned_in(value, 1, 12),
        }
    }
}

impl Display for ByPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Storage of the by-part lists.
pub trait ByPartStorage {
    /// The by-part lists, keyed by part in serialization order.
    fn by_list(&self) -> &ByList;

    /// Replace the list of one by-part, an empty list removes it.
    fn set_by_part<I, S>(&mut self, part: ByPart, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    /// The list of one by-part, `None` if the part is not in the rule.
    fn by_part(&self, part: ByPart) -> Option<&[String]> {
        self.by_list().get(&part).map(Vec::as_slice)
    }
}

fn unsigned_in(value: &str, min: u16, max: u16) -> bool {
    parse_digits(value).is_some_and(|n| (min..=max).contains(&n))
}

fn signed_ordinal(value: &str, max: u16) -> bool {
    let digits = value
        .strip_prefix('-')
        .or_else(|| value.strip_prefix('+'))
        .unwrap_or(value);
    parse_digits(digits).is_some_and(|n| (1..=max).contains(&n))
}

fn parse_digits(s: &str) -> Option<u16> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    lexical::parse::<u16, _>(s).ok()
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn parses_part_names_case_insensitively() {
        for part in ByPart::iter() {
            assert_eq!(part.keyword().parse::<ByPart>().unwrap(), part);
            let lower = part.keyword().to_ascii_lowercase();
            assert_eq!(lower.parse::<ByPart>().unwrap(), part);
        }
        assert!("BYWEEK".parse::<ByPart>().is_err());
        assert!("FREQ".parse::<ByPart>().is_err());
    }

    #[test]
    fn orders_parts_for_serialization() {
        let order: Vec<_> = ByPart::iter().map(ByPart::keyword).collect();
        assert_eq!(
            order,
            [
                "BYSECOND",
                "BYMINUTE",
                "BYHOUR",
                "BYDAY",
                "BYMONTHDAY",
                "BYYEARDAY",
                "BYWEEKNO",
                "BYMONTH",
                "BYSETPOS",
            ]
        );
        let mut sorted: Vec<_> = ByPart::iter().rev().collect();
        sorted.sort();
        assert_eq!(sorted, ByPart::iter().collect::<Vec<_>>());
    }

    #[test]
    fn accepts_in_range_values() {
        let success_cases = [
            (ByPart::BySecond, "0"),
            (ByPart::BySecond, "60"),
            (ByPart::ByMinute, "59"),
            (ByPart::ByHour, "23"),
            (ByPart::ByDay, "-1FR"),
            (ByPart::ByDay, "SU"),
            (ByPart::ByMonthDay, "-31"),
            (ByPart::ByMonthDay, "+1"),
            (ByPart::ByYearDay, "366"),
            (ByPart::ByWeekNo, "-53"),
            (ByPart::ByMonth, "12"),
            (ByPart::BySetPos, "-366"),
        ];
        for (part, value) in success_cases {
            assert!(part.accepts(value), "{part} should accept {value}");
        }

        let fail_cases = [
            (ByPart::BySecond, "61"),
            (ByPart::BySecond, "-1"),
            (ByPart::ByMinute, "60"),
            (ByPart::ByHour, "24"),
            (ByPart::ByHour, ""),
            (ByPart::ByDay, "1XX"),
            (ByPart::ByMonthDay, "0"),
            (ByPart::ByMonthDay, "32"),
            (ByPart::ByYearDay, "367"),
            (ByPart::ByWeekNo, "54"),
            (ByPart::ByMonth, "0"),
            (ByPart::ByMonth, "13"),
            (ByPart::BySetPos, "--1"),
            (ByPart::BySetPos, "abc"),
        ];
        for (part, value) in fail_cases {
            assert!(!part.accepts(value), "{part} should reject {value}");
        }
    }
}

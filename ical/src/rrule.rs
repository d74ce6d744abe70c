// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule value (RFC 5545 Section 3.3.10).
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
//!
//! recur-rule-part = ( "FREQ" "=" freq )
//!                 / ( "UNTIL" "=" enddate )
//!                 / ( "COUNT" "=" 1*DIGIT )
//!                 / ( "INTERVAL" "=" 1*DIGIT )
//!                 / ( "BYSECOND" "=" byseclist )
//!                 / ( "BYMINUTE" "=" byminlist )
//!                 / ( "BYHOUR" "=" byhrlist )
//!                 / ( "BYDAY" "=" bywdaylist )
//!                 / ( "BYMONTHDAY" "=" bymodaylist )
//!                 / ( "BYYEARDAY" "=" byyrdaylist )
//!                 / ( "BYWEEKNO" "=" bywknolist )
//!                 / ( "BYMONTH" "=" bymolist )
//!                 / ( "BYSETPOS" "=" bysplist )
//!                 / ( "WKST" "=" weekday )
//! ```
//!
//! Parsing never fails: problems with the text are recorded on the rule, see
//! [`Validations`].

mod by_part;
mod enums;
mod initialization;
mod validation;

use std::cell::Cell;
use std::fmt::{self, Display};

pub use crate::rrule::by_part::{ByList, ByPart, ByPartStorage};
pub(crate) use crate::rrule::enums::WEEKDAY_TABLE;
pub use crate::rrule::enums::{RecurrenceFrequency, WeekDay, WeekDayNum};
pub use crate::rrule::initialization::{InitializationMethods, RulePartMap};
pub use crate::rrule::validation::Validations;

use crate::error::RecurrenceError;
use crate::keyword::{KW_DAY_MO, KW_RRULE_COUNT, KW_RRULE_INTERVAL, RRULE_PART_SEPARATOR};
use crate::value::{DateTimeValue, IntegerValue, ValueDateTime};

/// Index of Monday in the weekday table, used for unrecognized week starts.
const MONDAY_INDEX: usize = 1;

/// A recurrence rule, the value of the RRULE property.
///
/// Fields are set through the setters, which first clear the recorded
/// problems and then record what is wrong with the new value. COUNT and
/// UNTIL exclude each other: setting one clears the other.
///
/// Two rules are equal when their fields are, ignoring the raw text and the
/// recorded problems.
#[derive(Debug, Clone, Default)]
pub struct RecurrenceRule {
    raw_value: Option<String>,
    freq: Option<String>,
    count: Option<u32>,
    until: Option<ValueDateTime>,
    interval: Option<u32>,
    wkst: Option<String>,
    wkst_day: Cell<Option<usize>>,
    by_list: ByList,
    errors: Vec<RecurrenceError>,
}

impl RecurrenceRule {
    /// Create an empty rule, with no FREQ set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a rule from its text, e.g. `FREQ=WEEKLY;COUNT=10;BYDAY=MO,WE,FR`.
    ///
    /// This never fails, check [`Validations::is_valid`] on the result.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut rule = Self::new();
        rule.set_value(text);
        rule
    }

    /// Replace every field with the ones parsed from `text`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn set_value(&mut self, text: &str) {
        *self = Self {
            raw_value: Some(text.to_owned()),
            ..Self::default()
        };

        let hash = text
            .split(RRULE_PART_SEPARATOR)
            .fold(RulePartMap::new(), Self::add_part_to_hash);
        self.initialize_from_hash(hash);

        if !self.errors.is_empty() {
            tracing::debug!(
                problems = self.errors.len(),
                "recurrence rule parsed with problems"
            );
        }
    }

    /// The text the rule was parsed from.
    #[must_use]
    pub fn raw_value(&self) -> Option<&str> {
        self.raw_value.as_deref()
    }

    /// The frequency code, upper-cased.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::MissingFrequency`] if FREQ is not set.
    pub fn freq(&self) -> Result<String, RecurrenceError> {
        self.freq
            .as_deref()
            .map(str::to_ascii_uppercase)
            .ok_or(RecurrenceError::MissingFrequency)
    }

    /// The frequency.
    ///
    /// # Errors
    ///
    /// Returns an error if FREQ is not set or not a frequency code.
    pub fn frequency(&self) -> Result<RecurrenceFrequency, RecurrenceError> {
        let freq = self.freq()?;
        freq.parse()
            .map_err(|_| RecurrenceError::InvalidFrequency { value: freq })
    }

    /// Set the frequency, stored as given.
    pub fn set_freq(&mut self, value: impl Into<String>) {
        self.reset_errors();
        let value = value.into();
        if value.parse::<RecurrenceFrequency>().is_err() {
            self.record_error(RecurrenceError::InvalidFrequency {
                value: value.clone(),
            });
        }
        self.freq = Some(value);
    }

    /// The week start code, upper-cased, `MO` if not set.
    #[must_use]
    pub fn wkst(&self) -> String {
        self.wkst
            .as_deref()
            .map_or_else(|| KW_DAY_MO.to_owned(), str::to_ascii_uppercase)
    }

    /// The week start.
    ///
    /// Returns `None` if the stored code is not a weekday.
    #[must_use]
    pub fn week_start(&self) -> Option<WeekDay> {
        self.wkst().parse().ok()
    }

    /// Set the week start, stored as given.
    pub fn set_wkst(&mut self, value: impl Into<String>) {
        self.reset_errors();
        let value = value.into();
        if !WEEKDAY_TABLE.contains(&value.to_ascii_uppercase().as_str()) {
            self.record_error(RecurrenceError::InvalidWeekday {
                value: value.clone(),
            });
        }
        self.wkst = Some(value);
        self.wkst_day.set(None);
    }

    /// Index of the week start in the week, Sunday being 0.
    ///
    /// An unrecognized week start counts as Monday.
    #[must_use]
    pub fn wkst_day(&self) -> usize {
        if let Some(day) = self.wkst_day.get() {
            return day;
        }

        let wkst = self.wkst();
        let day = WEEKDAY_TABLE
            .iter()
            .position(|&code| code == wkst)
            .unwrap_or(MONDAY_INDEX);
        self.wkst_day.set(Some(day));
        day
    }

    /// The number of occurrences bounding the rule.
    #[must_use]
    pub fn count(&self) -> Option<u32> {
        self.count
    }

    /// Set the number of occurrences, clearing UNTIL.
    ///
    /// A value that is not a non-negative integer is recorded as a problem and
    /// leaves the rule unchanged.
    pub fn set_count(&mut self, value: impl IntegerValue) {
        self.reset_errors();
        let Some(count) = value.to_integer().and_then(|n| u32::try_from(n).ok()) else {
            self.record_error(RecurrenceError::InvalidInteger {
                part: KW_RRULE_COUNT,
                value: value.to_string(),
            });
            return;
        };

        if self.until.take().is_some() {
            tracing::debug!(count, "COUNT replaces UNTIL");
        }
        self.count = Some(count);
    }

    /// Unset COUNT.
    pub fn clear_count(&mut self) {
        self.reset_errors();
        self.count = None;
    }

    /// The date or date-time bounding the rule, inclusive.
    #[must_use]
    pub fn until(&self) -> Option<ValueDateTime> {
        self.until
    }

    /// Set the bounding date or date-time, clearing COUNT.
    ///
    /// A value that is not a date or date-time is recorded as a problem and
    /// leaves the rule unchanged.
    pub fn set_until(&mut self, value: impl DateTimeValue) {
        self.reset_errors();
        let Some(until) = value.to_date_time_value() else {
            self.record_error(RecurrenceError::InvalidDateTime {
                value: value.to_string(),
            });
            return;
        };

        if self.count.take().is_some() {
            tracing::debug!(%until, "UNTIL replaces COUNT");
        }
        self.until = Some(until);
    }

    /// Unset UNTIL.
    pub fn clear_until(&mut self) {
        self.reset_errors();
        self.until = None;
    }

    /// The interval between repetitions, 1 if not set.
    #[must_use]
    pub fn interval(&self) -> u32 {
        self.interval.unwrap_or(1)
    }

    /// Set the interval.
    ///
    /// A value that is not a positive integer is recorded as a problem and
    /// leaves the interval unchanged.
    pub fn set_interval(&mut self, value: impl IntegerValue) {
        self.reset_errors();
        match value
            .to_integer()
            .and_then(|n| u32::try_from(n).ok())
            .filter(|&n| n > 0)
        {
            Some(interval) => self.interval = Some(interval),
            None => self.record_error(RecurrenceError::InvalidInteger {
                part: KW_RRULE_INTERVAL,
                value: value.to_string(),
            }),
        }
    }

    /// Whether the rule is bounded by COUNT or UNTIL.
    #[must_use]
    pub fn bounded(&self) -> bool {
        self.count.is_some() || self.until.is_some()
    }

    /// The BYDAY elements.
    ///
    /// # Errors
    ///
    /// Returns the first element that is not a weekday with optional occurrence.
    pub fn by_day_values(&self) -> Result<Vec<WeekDayNum>, RecurrenceError> {
        self.by_part(ByPart::ByDay)
            .unwrap_or_default()
            .iter()
            .map(|v| v.parse())
            .collect()
    }
}

macro_rules! by_part_setters {
    ($($name:ident => $part:ident),+ $(,)?) => {
        impl RecurrenceRule {
            $(
                #[doc = concat!("Set the `", stringify!($part), "` list, an empty list removes it.")]
                pub fn $name<I, S>(&mut self, values: I)
                where
                    I: IntoIterator<Item = S>,
                    S: Into<String>,
                {
                    self.set_by_part(ByPart::$part, values);
                }
            )+
        }
    };
}

by_part_setters!(
    set_by_second => BySecond,
    set_by_minute => ByMinute,
    set_by_hour => ByHour,
    set_by_day => ByDay,
    set_by_month_day => ByMonthDay,
    set_by_year_day => ByYearDay,
    set_by_week_no => ByWeekNo,
    set_by_month => ByMonth,
    set_by_set_pos => BySetPos,
);

impl ByPartStorage for RecurrenceRule {
    fn by_list(&self) -> &ByList {
        &self.by_list
    }

    fn set_by_part<I, S>(&mut self, part: ByPart, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reset_errors();
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.by_list.remove(&part);
        } else {
            self.by_list.insert(part, values);
        }
    }
}

impl PartialEq for RecurrenceRule {
    fn eq(&self, other: &Self) -> bool {
        self.freq().ok() == other.freq().ok()
            && self.count == other.count
            && self.until == other.until
            && self.interval() == other.interval()
            && self.wkst() == other.wkst()
            && self.by_list == other.by_list
    }
}

impl Eq for RecurrenceRule {}

impl From<&str> for RecurrenceRule {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl Display for RecurrenceRule {
    /// Writes the rule text without UNTIL, see [`FormatOptions`](crate::formatter::FormatOptions)
    /// to include it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::formatter::format(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

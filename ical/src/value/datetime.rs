// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Date and date-time values as defined in RFC 5545 Section 3.3.4 and 3.3.5.

use std::borrow::Cow;
use std::fmt::{self, Display};

use chumsky::Parser;
use chumsky::error::RichPattern;
use chumsky::extra::ParserExtra;
use chumsky::input::{Input, Stream};
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

/// Failure reasons when a date or time was expected but not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueExpected {
    /// A calendar date that does not exist, e.g. February 30
    Date,
}

impl From<ValueExpected> for RichPattern<'_, char> {
    fn from(expected: ValueExpected) -> Self {
        match expected {
            ValueExpected::Date => Self::Label(Cow::Borrowed("invalid date")),
        }
    }
}

/// Date value in the iCalendar format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueDate {
    /// Year component.
    pub year: i16,

    /// Month component, 1-12.
    pub month: i8,

    /// Day component, 1-31.
    pub day: i8,
}

impl ValueDate {
    /// Whether the date exists in the proleptic Gregorian calendar.
    #[must_use]
    pub fn is_valid(self) -> bool {
        (0..=9999).contains(&self.year)
            && (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= days_in_month(self.year, self.month)
    }

    /// Convert to `jiff::civil::Date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the date does not exist.
    #[cfg(feature = "jiff")]
    pub fn civil_date(self) -> Result<jiff::civil::Date, jiff::Error> {
        self.try_into()
    }
}

impl Display for ValueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

#[cfg(feature = "jiff")]
impl TryFrom<ValueDate> for jiff::civil::Date {
    type Error = jiff::Error;

    fn try_from(value: ValueDate) -> Result<Self, Self::Error> {
        jiff::civil::Date::new(value.year, value.month, value.day)
    }
}

#[cfg(feature = "jiff")]
impl From<jiff::civil::Date> for ValueDate {
    fn from(value: jiff::civil::Date) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
            day: value.day(),
        }
    }
}

/// Time value defined in the RFC 5545 Section 3.3.12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueTime {
    /// Hour component, 0-23.
    pub hour: u8,

    /// Minute component, 0-59.
    pub minute: u8,

    /// Second component, 0-60 (60 for leap second).
    pub second: u8,

    /// Whether the time is in UTC (indicated by a trailing 'Z').
    pub utc: bool,
}

impl ValueTime {
    /// Create a new `ValueTime` from components.
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8, utc: bool) -> Self {
        Self {
            hour,
            minute,
            second,
            utc,
        }
    }

    /// Whether every component is within its range.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.hour <= 23 && self.minute <= 59 && self.second <= 60
    }
}

impl Display for ValueTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}{:02}", self.hour, self.minute, self.second)?;
        if self.utc {
            write!(f, "Z")?;
        }
        Ok(())
    }
}

/// Date or Date-Time value, the canonical form of the UNTIL rule part.
///
/// A value without time is a DATE (RFC 5545 Section 3.3.4), a value with time
/// is a DATE-TIME (RFC 5545 Section 3.3.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueDateTime {
    /// Date component.
    pub date: ValueDate,

    /// Time component, `None` for a DATE value.
    pub time: Option<ValueTime>,
}

impl ValueDateTime {
    /// Create a DATE-TIME value.
    #[must_use]
    pub const fn new(date: ValueDate, time: ValueTime) -> Self {
        Self {
            date,
            time: Some(time),
        }
    }

    /// Whether this is a DATE value without time.
    #[must_use]
    pub const fn is_date_only(&self) -> bool {
        self.time.is_none()
    }

    /// Whether this is a DATE-TIME value in UTC.
    #[must_use]
    pub fn is_utc(&self) -> bool {
        self.time.is_some_and(|t| t.utc)
    }

    /// Whether both the date and the time exist.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.date.is_valid() && self.time.is_none_or(ValueTime::is_valid)
    }

    /// Convert to `jiff::civil::DateTime`, a DATE value becomes midnight.
    ///
    /// # Errors
    ///
    /// Returns an error if the date or the time does not exist.
    #[cfg(feature = "jiff")]
    pub fn civil_date_time(&self) -> Result<jiff::civil::DateTime, jiff::Error> {
        let date = self.date.civil_date()?;
        let time = self.time.unwrap_or(ValueTime::new(0, 0, 0, false));
        // NOTE: We contract leap second 60 to 59 for simplicity
        let time = jiff::civil::Time::new(
            i8::try_from(time.hour).unwrap_or(i8::MAX),
            i8::try_from(time.minute).unwrap_or(i8::MAX),
            i8::try_from(time.second.min(59)).unwrap_or(i8::MAX),
            0,
        )?;
        Ok(date.to_datetime(time))
    }
}

impl From<ValueDate> for ValueDateTime {
    fn from(date: ValueDate) -> Self {
        Self { date, time: None }
    }
}

impl Display for ValueDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date)?;
        if let Some(time) = self.time {
            write!(f, "T{time}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "jiff")]
impl From<jiff::civil::DateTime> for ValueDateTime {
    fn from(value: jiff::civil::DateTime) -> Self {
        civil_to_value(value, false)
    }
}

#[cfg(feature = "jiff")]
impl From<jiff::Timestamp> for ValueDateTime {
    fn from(value: jiff::Timestamp) -> Self {
        civil_to_value(value.to_zoned(jiff::tz::TimeZone::UTC).datetime(), true)
    }
}

#[cfg(feature = "jiff")]
fn civil_to_value(dt: jiff::civil::DateTime, utc: bool) -> ValueDateTime {
    ValueDateTime::new(
        dt.date().into(),
        ValueTime::new(
            dt.hour().unsigned_abs(),
            dt.minute().unsigned_abs(),
            dt.second().unsigned_abs(),
            utc,
        ),
    )
}

/// Conversion of an UNTIL candidate into the canonical [`ValueDateTime`].
///
/// Implemented for text in the RFC 5545 DATE or DATE-TIME form, for the
/// value types of this crate and, with the `jiff` feature, for the civil and
/// absolute time types of `jiff`. Absolute times are converted to UTC.
pub trait DateTimeValue: Display {
    /// Convert to the canonical value, `None` if the input is not a date or date-time.
    fn to_date_time_value(&self) -> Option<ValueDateTime>;
}

impl DateTimeValue for str {
    fn to_date_time_value(&self) -> Option<ValueDateTime> {
        parse_date_or_date_time(self)
    }
}

impl DateTimeValue for String {
    fn to_date_time_value(&self) -> Option<ValueDateTime> {
        parse_date_or_date_time(self)
    }
}

impl DateTimeValue for ValueDate {
    fn to_date_time_value(&self) -> Option<ValueDateTime> {
        self.is_valid().then(|| ValueDateTime::from(*self))
    }
}

impl DateTimeValue for ValueDateTime {
    fn to_date_time_value(&self) -> Option<ValueDateTime> {
        self.is_valid().then_some(*self)
    }
}

#[cfg(feature = "jiff")]
impl DateTimeValue for jiff::civil::Date {
    fn to_date_time_value(&self) -> Option<ValueDateTime> {
        Some(ValueDateTime::from(ValueDate::from(*self))).filter(ValueDateTime::is_valid)
    }
}

#[cfg(feature = "jiff")]
impl DateTimeValue for jiff::civil::DateTime {
    fn to_date_time_value(&self) -> Option<ValueDateTime> {
        Some(ValueDateTime::from(*self)).filter(ValueDateTime::is_valid)
    }
}

#[cfg(feature = "jiff")]
impl DateTimeValue for jiff::Timestamp {
    fn to_date_time_value(&self) -> Option<ValueDateTime> {
        Some(ValueDateTime::from(*self)).filter(ValueDateTime::is_valid)
    }
}

#[cfg(feature = "jiff")]
impl DateTimeValue for jiff::Zoned {
    fn to_date_time_value(&self) -> Option<ValueDateTime> {
        self.timestamp().to_date_time_value()
    }
}

impl<T: DateTimeValue + ?Sized> DateTimeValue for &T {
    fn to_date_time_value(&self) -> Option<ValueDateTime> {
        (**self).to_date_time_value()
    }
}

/// Parse text in the DATE or DATE-TIME form, case-insensitively.
pub(crate) fn parse_date_or_date_time(src: &str) -> Option<ValueDateTime> {
    let src = src.trim().to_ascii_uppercase();
    let stream = Stream::from_iter(src.chars());
    enddate::<'_, _, extra::Err<Rich<'_, char>>>()
        .parse(stream)
        .into_result()
        .ok()
}

/// ```txt
/// enddate     = date / date-time
/// ```
fn enddate<'src, I, E>() -> impl Parser<'src, I, ValueDateTime, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    choice((value_date_time(), value_date().map(ValueDateTime::from)))
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date               = date-value
///
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
fn value_date<'src, I, E>() -> impl Parser<'src, I, ValueDate, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let year = i16_0_9()
        .then(i16_0_9())
        .then(i16_0_9())
        .then(i16_0_9())
        .map(|(((a, b), c), d)| 1000 * a + 100 * b + 10 * c + d);

    let month = choice((
        just('0').ignore_then(i8_1_9()),
        just('1').ignore_then(i8_0_2()).map(|b| 10 + b),
    ));

    let day = choice((
        just('0').ignore_then(i8_1_9()),
        i8_1_2().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('3').ignore_then(i8_0_1()).map(|b| 30 + b),
    ));

    year.then(month)
        .then(day)
        .try_map(|((year, month), day), span| {
            let date = ValueDate { year, month, day };
            if date.is_valid() {
                Ok(date)
            } else {
                Err(E::Error::expected_found([ValueExpected::Date], None, span))
            }
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date-time  = date "T" time ;As specified in the DATE and TIME
/// ```
fn value_date_time<'src, I, E>() -> impl Parser<'src, I, ValueDateTime, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    value_date()
        .then_ignore(just('T'))
        .then(value_time())
        .map(|(date, time)| ValueDateTime::new(date, time))
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// time         = time-hour time-minute time-second [time-utc]
///
/// time-hour    = 2DIGIT        ;00-23
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-60
/// ;The "60" value is used to account for positive "leap" seconds.
///
/// time-utc     = "Z"
/// ```
fn value_time<'src, I, E>() -> impl Parser<'src, I, ValueTime, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    time_hour()
        .then(time_minute())
        .then(time_second())
        .then(just('Z').or_not())
        .map(|(((hour, minute), second), utc)| ValueTime::new(hour, minute, second, utc.is_some()))
}

fn time_hour<'src, I, E>() -> impl Parser<'src, I, u8, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        u8_0_1().then(u8_0_9()).map(|(a, b)| 10 * a + b),
        just('2').ignore_then(u8_0_3()).map(|b| 20 + b),
    ))
}

fn time_minute<'src, I, E>() -> impl Parser<'src, I, u8, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    u8_0_5().then(u8_0_9()).map(|(a, b)| 10 * a + b)
}

fn time_second<'src, I, E>() -> impl Parser<'src, I, u8, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        u8_0_5().then(u8_0_9()).map(|(a, b)| 10 * a + b),
        just('6').ignore_then(just('0').ignored().to(60)), // leap second
    ))
}

const fn days_in_month(year: i16, month: i8) -> i8 {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

macro_rules! define_digit_select {
    ($fname:ident : $ty:ty => { $($ch:literal),+ $(,)? }) => {
        #[allow(trivial_numeric_casts, clippy::cast_lossless, clippy::char_lit_as_u8, clippy::cast_possible_wrap)]
        const fn $fname<'src, I, E>() -> impl Parser<'src, I, $ty, E> + Copy
        where
            I: Input<'src, Token = char, Span = SimpleSpan>,
            E: ParserExtra<'src, I>,
        {
            select! {
                $(
                    $ch => (($ch as u8 - b'0') as $ty),
                )+
            }
        }
    };
}

define_digit_select!(u8_0_1 : u8 => { '0', '1' });
define_digit_select!(u8_0_3 : u8 => { '0', '1', '2', '3' });
define_digit_select!(u8_0_5 : u8 => { '0', '1', '2', '3', '4', '5' });
define_digit_select!(u8_0_9 : u8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_0_1 : i8 => { '0', '1' });
define_digit_select!(i8_0_2 : i8 => { '0', '1', '2' });
define_digit_select!(i8_0_9 : i8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_1_2 : i8 => { '1', '2' });
define_digit_select!(i8_1_9 : i8 => { '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i16_0_9 : i16 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date() {
        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.4
            ("19970714", ValueDate { year: 1997, month: 7, day: 14 }),
            // extra tests
            ("20240101", ValueDate { year: 2024, month: 1, day: 1 }),
            ("20000229", ValueDate { year: 2000, month: 2, day: 29 }), // leap year
            ("19000101", ValueDate { year: 1900, month: 1, day: 1 }),
        ];
        for (src, expected) in success_cases {
            let parsed = parse_date_or_date_time(src).unwrap();
            assert_eq!(parsed, ValueDateTime::from(expected), "Failed for {src}");
            assert!(parsed.is_date_only());
        }

        let fail_cases = [
            "20241301",  // invalid month
            "20240001",  // invalid month
            "abcd1234",  // invalid characters
            "2024011",   // invalid length
            "202401011", // invalid length
            "19970230",  // invalid date
            "19000229",  // not a leap year
            "",          // empty string
        ];
        for src in fail_cases {
            assert!(
                parse_date_or_date_time(src).is_none(),
                "Parse {src} should fail"
            );
        }
    }

    #[test]
    fn parses_date_time() {
        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.5
            ("19980118T230000",  (ValueDate { year: 1998, month: 1, day: 18 }, ValueTime::new(23, 0, 0, false))),
            ("19980119T070000Z", (ValueDate { year: 1998, month: 1, day: 19 }, ValueTime::new(7, 0, 0, true))),
            ("19970630T235960Z", (ValueDate { year: 1997, month: 6, day: 30 }, ValueTime::new(23, 59, 60, true))),
            // extra tests
            ("19970714t133000z", (ValueDate { year: 1997, month: 7, day: 14 }, ValueTime::new(13, 30, 0, true))),
            (" 19970714T133000 ", (ValueDate { year: 1997, month: 7, day: 14 }, ValueTime::new(13, 30, 0, false))),
        ];
        for (src, (date, time)) in success_cases {
            let parsed = parse_date_or_date_time(src).unwrap();
            assert_eq!(parsed, ValueDateTime::new(date, time), "Failed for {src}");
        }

        let fail_cases = [
            "19980119T230000-0800", // invalid time format
            "19970714 133000",      // missing 'T'
            "19970714T250000",      // invalid hour
            "19970714T126000",      // invalid minute
            "19970714T123461",      // invalid second
            "19970714T",            // missing time
        ];
        for src in fail_cases {
            assert!(
                parse_date_or_date_time(src).is_none(),
                "Parse {src} should fail"
            );
        }
    }

    #[test]
    fn displays_in_rfc5545_form() {
        let date = ValueDate {
            year: 2024,
            month: 1,
            day: 5,
        };
        assert_eq!(ValueDateTime::from(date).to_string(), "20240105");
        assert_eq!(
            ValueDateTime::new(date, ValueTime::new(9, 5, 0, false)).to_string(),
            "20240105T090500"
        );
        assert_eq!(
            ValueDateTime::new(date, ValueTime::new(23, 59, 59, true)).to_string(),
            "20240105T235959Z"
        );
    }

    #[test]
    fn converts_value_types() {
        let date = ValueDate {
            year: 2024,
            month: 2,
            day: 29,
        };
        assert_eq!(date.to_date_time_value(), Some(ValueDateTime::from(date)));

        let invalid = ValueDate {
            year: 2023,
            month: 2,
            day: 29,
        };
        assert_eq!(invalid.to_date_time_value(), None);

        let invalid_time = ValueDateTime::new(date, ValueTime::new(24, 0, 0, false));
        assert_eq!(invalid_time.to_date_time_value(), None);

        assert_eq!(
            "20240229".to_date_time_value(),
            Some(ValueDateTime::from(date))
        );
        assert_eq!(
            String::from("20240229T120000Z").to_date_time_value(),
            Some(ValueDateTime::new(date, ValueTime::new(12, 0, 0, true)))
        );
    }

    #[cfg(feature = "jiff")]
    #[test]
    fn converts_jiff_types() {
        let date = jiff::civil::date(2024, 3, 10);
        assert_eq!(
            date.to_date_time_value().unwrap().to_string(),
            "20240310"
        );

        let dt = jiff::civil::datetime(2024, 3, 10, 8, 30, 15, 0);
        assert_eq!(
            dt.to_date_time_value().unwrap().to_string(),
            "20240310T083015"
        );

        let ts: jiff::Timestamp = "2024-03-10T08:30:15Z".parse().unwrap();
        assert_eq!(
            ts.to_date_time_value().unwrap().to_string(),
            "20240310T083015Z"
        );

        let zoned = ts.to_zoned(jiff::tz::TimeZone::fixed(jiff::tz::offset(2)));
        assert_eq!(
            zoned.to_date_time_value().unwrap().to_string(),
            "20240310T083015Z"
        );

        let value = parse_date_or_date_time("20240310T083015Z").unwrap();
        assert_eq!(value.civil_date_time().unwrap(), dt);
        assert_eq!(
            ValueDateTime::from(ValueDate::from(date))
                .civil_date_time()
                .unwrap(),
            jiff::civil::datetime(2024, 3, 10, 0, 0, 0, 0)
        );
    }

    #[cfg(feature = "jiff")]
    #[test]
    fn rejects_jiff_years_before_zero() {
        assert_eq!(jiff::civil::date(-5, 1, 1).to_date_time_value(), None);
        assert_eq!(
            jiff::civil::datetime(-1, 12, 31, 23, 0, 0, 0).to_date_time_value(),
            None
        );

        let ts: jiff::Timestamp = "-000005-01-01T00:00:00Z".parse().unwrap();
        assert_eq!(ts.to_date_time_value(), None);
        let zoned = ts.to_zoned(jiff::tz::TimeZone::UTC);
        assert_eq!(zoned.to_date_time_value(), None);

        assert!(jiff::civil::date(0, 1, 1).to_date_time_value().is_some());
    }
}

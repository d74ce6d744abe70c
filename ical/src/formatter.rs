// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule formatter.
//!
//! This module writes a [`RecurrenceRule`] back to its RFC 5545 text, either
//! as a bare value or as a folded `RRULE` content line, to any
//! `std::io::Write` implementer.
//!
//! # Example
//!
//! ```
//! use recur_ical::RecurrenceRule;
//! use recur_ical::formatter::{FormatOptions, format};
//!
//! let rule = RecurrenceRule::parse("FREQ=WEEKLY;UNTIL=20241231;BYDAY=MO");
//! assert_eq!(format(&rule)?, "FREQ=WEEKLY;BYDAY=MO");
//!
//! let text = FormatOptions::default().until(true).write_value_to_string(&rule)?;
//! assert_eq!(text, "FREQ=WEEKLY;UNTIL=20241231;BYDAY=MO");
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Write};

use crate::keyword::{
    KW_DAY_MO, KW_RRULE_COUNT, KW_RRULE_FREQ, KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
    RRULE_LIST_SEPARATOR, RRULE_PART_SEPARATOR,
};
use crate::property_value::PropertyValue;
use crate::rrule::{ByPartStorage, RecurrenceRule};

/// Format a rule value to a `String` with default options, UNTIL left out.
///
/// # Errors
///
/// Returns an error if writing to the internal buffer fails.
pub fn format(rule: &RecurrenceRule) -> io::Result<String> {
    FormatOptions::default().write_value_to_string(rule)
}

/// Formatting options for the recurrence rule formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Whether to write the UNTIL rule part, directly after FREQ.
    ///
    /// Default: `false`.
    pub until: bool,

    /// Maximum content line length in octets before folding.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n octets
    ///
    /// Only applies to content lines, a bare value is never folded.
    ///
    /// Default: `Some(75)` for RFC 5545 compliance.
    pub folding: Option<usize>,

    /// Line folding style.
    ///
    /// Default: `FoldingStyle::Space` (CRLF + SPACE).
    pub folding_style: FoldingStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            until: false,
            folding: Some(75),
            folding_style: FoldingStyle::default(),
        }
    }
}

impl FormatOptions {
    /// Set whether to write UNTIL.
    #[must_use]
    pub const fn until(mut self, until: bool) -> Self {
        self.until = until;
        self
    }

    /// Set the line folding option.
    #[must_use]
    pub const fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }

    /// Set the line folding style.
    #[must_use]
    pub const fn folding_style(mut self, style: FoldingStyle) -> Self {
        self.folding_style = style;
        self
    }

    /// Write the rule value, e.g. `FREQ=DAILY;COUNT=3`.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_value(&self, rule: &RecurrenceRule, w: &mut impl Write) -> io::Result<()> {
        let mut formatter = Formatter::new(w, self.folding(None));
        write_recurrence_rule(&mut formatter, rule)
    }

    /// Write the rule value to a `String`.
    ///
    /// # Errors
    /// Returns an error if writing fails or if the output contains invalid UTF-8 data.
    pub fn write_value_to_string(&self, rule: &RecurrenceRule) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write_value(rule, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Write the rule as a content line, e.g. `RRULE:FREQ=DAILY;COUNT=3\r\n`.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_property(&self, rule: &RecurrenceRule, w: &mut impl Write) -> io::Result<()> {
        let mut formatter = Formatter::new(w, *self);
        formatter.write_property(rule)
    }

    /// Write the rule as a content line to a `String`.
    ///
    /// # Errors
    /// Returns an error if writing fails or if the output contains invalid UTF-8 data.
    pub fn write_property_to_string(&self, rule: &RecurrenceRule) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write_property(rule, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Line folding style for RFC 5545 formatting.
///
/// RFC 5545 specifies that folded lines should start with CRLF followed by
/// a whitespace character (SPACE or TAB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FoldingStyle {
    /// CRLF + SPACE (RFC 5545 default)
    #[default]
    Space,
    /// CRLF + TAB
    Tab,
}

impl FoldingStyle {
    const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Space => b"\r\n ",
            Self::Tab => b"\r\n\t",
        }
    }
}

/// Length of the whitespace that starts a continuation line.
const CONTINUATION_LEN: usize = 1;

/// Recurrence rule formatter that writes to any `Write` implementer.
///
/// Bytes written through its `Write` implementation are folded according to
/// the options, never splitting a UTF-8 sequence.
#[derive(Debug)]
pub struct Formatter<W: Write> {
    writer: W,
    options: FormatOptions,
    /// Current line length in bytes (excluding the pending CRLF).
    line_length: usize,
}

impl<W: Write> Formatter<W> {
    /// Create a new formatter with options.
    #[must_use]
    pub fn new(writer: W, options: FormatOptions) -> Self {
        Self {
            writer,
            options,
            line_length: 0,
        }
    }

    /// Get a mutable reference to the underlying writer.
    #[must_use]
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Get a reference to the underlying writer.
    #[must_use]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consumes this formatter, returning the underlying writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write the rule as a content line, terminated by CRLF.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_property(&mut self, rule: &RecurrenceRule) -> io::Result<()> {
        write!(self, "{}:", rule.property_name())?;
        write_recurrence_rule(self, rule)?;
        self.writeln()
    }

    /// Write a CRLF line ending.
    fn writeln(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\r\n")?;
        self.line_length = 0;
        Ok(())
    }

    fn insert_fold(&mut self) -> io::Result<()> {
        self.writer
            .write_all(self.options.folding_style.as_bytes())?;
        self.line_length = CONTINUATION_LEN;
        Ok(())
    }
}

impl<W: Write> Write for Formatter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Some(max_len) = self.options.folding.filter(|&n| n > CONTINUATION_LEN) else {
            return self.writer.write(buf);
        };

        let mut remaining = buf;
        while !remaining.is_empty() {
            if self.line_length >= max_len {
                self.insert_fold()?;
            }

            let available = max_len - self.line_length;
            let mut split = safe_split_point(remaining, available);
            if split == 0 {
                if self.line_length > CONTINUATION_LEN {
                    self.insert_fold()?;
                    continue;
                }
                split = first_char_len(remaining);
            }

            let (head, tail) = remaining.split_at(split);
            self.writer.write_all(head)?;
            self.line_length += head.len();
            remaining = tail;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Largest prefix length of at most `max` bytes that ends on a UTF-8 boundary.
fn safe_split_point(buf: &[u8], max: usize) -> usize {
    if max >= buf.len() {
        return buf.len();
    }

    let mut pos = max;
    while pos > 0 && is_continuation(buf, pos) {
        pos -= 1;
    }
    pos
}

fn first_char_len(buf: &[u8]) -> usize {
    (1..buf.len())
        .find(|&pos| !is_continuation(buf, pos))
        .unwrap_or(buf.len())
}

fn is_continuation(buf: &[u8], pos: usize) -> bool {
    buf.get(pos).is_some_and(|b| b & 0xC0 == 0x80)
}

/// Format a recurrence rule value (RFC 5545 Section 3.3.10).
///
/// Parts are written in a fixed order: FREQ, UNTIL (when enabled), COUNT,
/// INTERVAL (when not 1), the by-parts, WKST (when not Monday). An unset FREQ
/// is written empty.
///
/// # Errors
/// Returns an error if writing fails.
pub fn write_recurrence_rule<W: Write>(
    f: &mut Formatter<W>,
    rule: &RecurrenceRule,
) -> io::Result<()> {
    write!(f, "{KW_RRULE_FREQ}={}", rule.freq().unwrap_or_default())?;

    if f.options.until
        && let Some(until) = rule.until()
    {
        write!(f, "{RRULE_PART_SEPARATOR}{KW_RRULE_UNTIL}={until}")?;
    }

    if let Some(count) = rule.count() {
        write!(f, "{RRULE_PART_SEPARATOR}{KW_RRULE_COUNT}={count}")?;
    }

    let interval = rule.interval();
    if interval != 1 {
        write!(f, "{RRULE_PART_SEPARATOR}{KW_RRULE_INTERVAL}={interval}")?;
    }

    for (part, values) in rule.by_list() {
        write!(f, "{RRULE_PART_SEPARATOR}{part}=")?;
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                write!(f, "{RRULE_LIST_SEPARATOR}")?;
            }
            write!(f, "{value}")?;
        }
    }

    let wkst = rule.wkst();
    if wkst != KW_DAY_MO {
        write!(f, "{RRULE_PART_SEPARATOR}{KW_RRULE_WKST}={wkst}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_parts_in_fixed_order() {
        let mut rule = RecurrenceRule::new();
        rule.set_wkst("su");
        rule.set_by_set_pos(["-1"]);
        rule.set_by_day(["MO", "TU"]);
        rule.set_by_second(["0"]);
        rule.set_interval(3);
        rule.set_count(8);
        rule.set_freq("monthly");

        assert_eq!(
            format(&rule).unwrap(),
            "FREQ=MONTHLY;COUNT=8;INTERVAL=3;BYSECOND=0;BYDAY=MO,TU;BYSETPOS=-1;WKST=SU"
        );
    }

    #[test]
    fn omits_defaults() {
        let mut rule = RecurrenceRule::new();
        rule.set_freq("DAILY");
        rule.set_interval(1);
        rule.set_wkst("MO");
        assert_eq!(format(&rule).unwrap(), "FREQ=DAILY");
    }

    #[test]
    fn writes_empty_freq_when_unset() {
        let rule = RecurrenceRule::new();
        assert_eq!(format(&rule).unwrap(), "FREQ=");
        assert_eq!(rule.to_string(), "FREQ=");
    }

    #[test]
    fn writes_until_on_request() {
        let rule = RecurrenceRule::parse("FREQ=DAILY;UNTIL=20240301T100000Z;BYHOUR=10");
        assert_eq!(format(&rule).unwrap(), "FREQ=DAILY;BYHOUR=10");

        let options = FormatOptions::default().until(true);
        assert_eq!(
            options.write_value_to_string(&rule).unwrap(),
            "FREQ=DAILY;UNTIL=20240301T100000Z;BYHOUR=10"
        );
    }

    #[test]
    fn writes_property_line() {
        let rule = RecurrenceRule::parse("FREQ=YEARLY;BYMONTH=1");
        let line = FormatOptions::default()
            .write_property_to_string(&rule)
            .unwrap();
        assert_eq!(line, "RRULE:FREQ=YEARLY;BYMONTH=1\r\n");
    }

    #[test]
    fn folds_long_property_line() {
        let mut rule = RecurrenceRule::new();
        rule.set_freq("YEARLY");
        rule.set_by_year_day((1..=40).map(|d| d.to_string()));

        let line = FormatOptions::default()
            .write_property_to_string(&rule)
            .unwrap();
        let physical: Vec<_> = line.trim_end_matches("\r\n").split("\r\n").collect();
        assert!(physical.len() > 1);
        for (i, l) in physical.iter().enumerate() {
            assert!(l.len() <= 75, "line {i} too long: {}", l.len());
            if i > 0 {
                assert!(l.starts_with(' '));
            }
        }

        let unfolded = line.replace("\r\n ", "");
        assert_eq!(
            unfolded,
            format!("RRULE:{}\r\n", format(&rule).unwrap())
        );
    }

    #[test]
    fn folds_with_tab_or_not_at_all() {
        let mut rule = RecurrenceRule::new();
        rule.set_freq("YEARLY");
        rule.set_by_year_day((1..=40).map(|d| d.to_string()));

        let tab = FormatOptions::default()
            .folding_style(FoldingStyle::Tab)
            .write_property_to_string(&rule)
            .unwrap();
        assert!(tab.contains("\r\n\t"));

        let flat = FormatOptions::default()
            .folding(None)
            .write_property_to_string(&rule)
            .unwrap();
        assert_eq!(flat.matches("\r\n").count(), 1);
    }

    #[test]
    fn never_splits_utf8_sequences() {
        let mut f = Formatter::new(Vec::new(), FormatOptions::default().folding(Some(4)));
        f.write_all("abcé€x".as_bytes()).unwrap();
        let out = String::from_utf8(f.into_writer()).unwrap();
        assert_eq!(out.replace("\r\n ", ""), "abcé€x");
        for line in out.split("\r\n") {
            assert!(line.len() <= 4);
        }
    }

    #[test]
    fn safe_split_point_keeps_characters_whole() {
        let s = "aé".as_bytes();
        assert_eq!(safe_split_point(s, 2), 1);
        assert_eq!(safe_split_point(s, 3), 3);
        assert_eq!(safe_split_point("€".as_bytes(), 1), 0);
        assert_eq!(first_char_len("€x".as_bytes()), 3);
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;

use crate::keyword::KW_RRULE;
use crate::rrule::RecurrenceRule;

/// A structured property value that keeps the text it was parsed from.
pub trait PropertyValue: Display {
    /// Name of the property carrying the value, e.g. `RRULE`.
    fn property_name(&self) -> &'static str;

    /// The text the value was parsed from, `None` if built in code.
    fn raw_value(&self) -> Option<&str>;

    /// The canonical text of the value.
    fn to_ical(&self) -> String {
        self.to_string()
    }
}

impl PropertyValue for RecurrenceRule {
    fn property_name(&self) -> &'static str {
        KW_RRULE
    }

    fn raw_value(&self) -> Option<&str> {
        RecurrenceRule::raw_value(self)
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Problems found while building or reading a recurrence rule.

use crate::rrule::ByPart;

/// A problem with a recurrence rule.
///
/// Parsing and per-field validation record these on the rule instead of
/// returning them, see [`Validations`](crate::Validations). Reading a field
/// that has no default returns one directly.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecurrenceError {
    /// The FREQ rule part was read or required before it was set
    #[error("Missing required rule part 'FREQ'")]
    MissingFrequency,

    /// FREQ is not one of the seven frequency codes
    #[error("Invalid frequency '{value}'")]
    InvalidFrequency {
        /// The rejected value
        value: String,
    },

    /// COUNT or INTERVAL could not be coerced to an integer of the required range
    #[error("Invalid integer '{value}' for rule part '{part}'")]
    InvalidInteger {
        /// The rule part name, e.g. `COUNT`
        part: &'static str,
        /// The rejected value
        value: String,
    },

    /// UNTIL could not be converted to a date or date-time value
    #[error("Invalid date or date-time '{value}' for rule part 'UNTIL'")]
    InvalidDateTime {
        /// The rejected value
        value: String,
    },

    /// WKST is not one of the seven weekday codes
    #[error("Invalid weekday '{value}' for rule part 'WKST'")]
    InvalidWeekday {
        /// The rejected value
        value: String,
    },

    /// The rule text carries a key that is not a rule part
    #[error("Unrecognized rule part '{key}'")]
    UnrecognizedKey {
        /// The key, upper-cased
        key: String,
    },

    /// The rule text carries both COUNT and UNTIL; the later one was kept
    #[error("COUNT and UNTIL must not occur in the same rule")]
    ConflictingBound,

    /// A part of the rule text is not of the form `KEY=VALUE`
    #[error("Malformed rule part '{part}', expected KEY=VALUE")]
    MalformedPart {
        /// The offending text
        part: String,
    },

    /// An element of a by-part list is out of range or malformed
    #[error("Invalid value '{value}' for rule part '{part}'")]
    InvalidByPartValue {
        /// The by-part holding the element
        part: ByPart,
        /// The rejected element
        value: String,
    },
}

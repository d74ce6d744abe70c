// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse, inspect and write iCalendar recurrence rules (RFC 5545 Section 3.3.10).
//!
//! ```
//! use recur_ical::{RecurrenceRule, Validations};
//!
//! let rule = RecurrenceRule::parse("FREQ=WEEKLY;COUNT=10;BYDAY=MO,WE,FR");
//! assert!(rule.is_valid());
//! assert_eq!(rule.freq()?, "WEEKLY");
//! assert_eq!(rule.count(), Some(10));
//! assert!(rule.bounded());
//! assert_eq!(rule.to_string(), "FREQ=WEEKLY;COUNT=10;BYDAY=MO,WE,FR");
//! # Ok::<(), recur_ical::RecurrenceError>(())
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else)]

mod error;
pub mod formatter;
pub mod keyword;
mod property_value;
mod rrule;
pub mod value;

pub use crate::error::RecurrenceError;
pub use crate::formatter::{FoldingStyle, FormatOptions};
pub use crate::property_value::PropertyValue;
pub use crate::rrule::{
    ByList, ByPart, ByPartStorage, InitializationMethods, RecurrenceFrequency, RecurrenceRule,
    RulePartMap, Validations, WeekDay, WeekDayNum,
};
pub use crate::value::{DateTimeValue, IntegerValue, ValueDate, ValueDateTime, ValueTime};

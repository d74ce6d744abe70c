// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Value types consumed by the recurrence rule.
//!
//! This module holds the canonical date and date-time value the UNTIL rule
//! part is stored as (RFC 5545 Section 3.3.4 and 3.3.5), together with the
//! conversions the rule setters accept their input through.

mod datetime;
mod numeric;

pub use datetime::{DateTimeValue, ValueDate, ValueDateTime, ValueTime};
pub use numeric::IntegerValue;

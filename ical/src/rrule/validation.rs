// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::RecurrenceError;
use crate::rrule::{ByPartStorage, RecurrenceFrequency, RecurrenceRule, WEEKDAY_TABLE};

/// Tracking of the problems recorded on a value.
///
/// Every mutation of the value resets the list, then records what the new
/// value got wrong. [`validate`](Validations::validate) adds the problems of
/// the value as a whole.
pub trait Validations {
    /// The problems recorded so far, in the order they were found.
    fn errors(&self) -> &[RecurrenceError];

    /// Clear the recorded problems.
    fn reset_errors(&mut self);

    /// Record a problem.
    fn record_error(&mut self, error: RecurrenceError);

    /// Remove and return the recorded problems.
    fn take_errors(&mut self) -> Vec<RecurrenceError>;

    /// Problems of the value as a whole, recomputed on every call.
    fn check(&self) -> Vec<RecurrenceError>;

    /// Merge the problems of the value as a whole into the recorded ones,
    /// skipping those already recorded.
    fn validate(&mut self) -> &[RecurrenceError] {
        for problem in self.check() {
            if !self.errors().contains(&problem) {
                self.record_error(problem);
            }
        }
        self.errors()
    }

    /// Whether no problem is recorded.
    fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }
}

impl Validations for RecurrenceRule {
    fn errors(&self) -> &[RecurrenceError] {
        &self.errors
    }

    fn reset_errors(&mut self) {
        self.errors.clear();
    }

    fn record_error(&mut self, error: RecurrenceError) {
        self.errors.push(error);
    }

    fn take_errors(&mut self) -> Vec<RecurrenceError> {
        std::mem::take(&mut self.errors)
    }

    fn check(&self) -> Vec<RecurrenceError> {
        let mut problems = Vec::new();

        match &self.freq {
            None => problems.push(RecurrenceError::MissingFrequency),
            Some(freq) if freq.parse::<RecurrenceFrequency>().is_err() => {
                problems.push(RecurrenceError::InvalidFrequency {
                    value: freq.clone(),
                });
            }
            Some(_) => {}
        }

        if let Some(wkst) = &self.wkst
            && !WEEKDAY_TABLE.contains(&wkst.to_ascii_uppercase().as_str())
        {
            problems.push(RecurrenceError::InvalidWeekday {
                value: wkst.clone(),
            });
        }

        for (&part, values) in self.by_list() {
            for value in values.iter().filter(|v| !part.accepts(v)) {
                problems.push(RecurrenceError::InvalidByPartValue {
                    part,
                    value: value.clone(),
                });
            }
        }

        problems
    }
}

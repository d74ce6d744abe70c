// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Building a rule from its `KEY=VALUE` parts.

use crate::error::RecurrenceError;
use crate::keyword::{
    KW_RRULE_COUNT, KW_RRULE_FREQ, KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
    RRULE_KEY_VALUE_SEPARATOR, RRULE_LIST_SEPARATOR,
};
use crate::rrule::{ByPart, ByPartStorage, RecurrenceRule, Validations};

/// Rule parts keyed by upper-cased name, in first-seen order.
///
/// Inserting a key again replaces its value in place. Parts that are not of
/// the form `KEY=VALUE` are kept aside as malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RulePartMap {
    entries: Vec<(String, String)>,
    malformed: Vec<String>,
}

impl RulePartMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a part, replacing the value of an existing key.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let key = key.trim().to_ascii_uppercase();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    /// The value of a key, matched case-insensitively.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Whether the key is present, matched case-insensitively.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate the parts in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of well-formed parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no well-formed parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parts that were not of the form `KEY=VALUE`.
    #[must_use]
    pub fn malformed(&self) -> &[String] {
        &self.malformed
    }
}

/// Initialization of a value from its textual parts.
pub trait InitializationMethods {
    /// Add one `KEY=VALUE` part to the map.
    ///
    /// Blank parts are skipped, parts without `=` are kept as malformed.
    #[must_use]
    fn add_part_to_hash(mut hash: RulePartMap, part: &str) -> RulePartMap {
        let part = part.trim();
        if part.is_empty() {
            return hash;
        }

        match part.split_once(RRULE_KEY_VALUE_SEPARATOR) {
            Some((key, value)) if !key.trim().is_empty() => hash.insert(key, value.trim()),
            _ => hash.malformed.push(part.to_owned()),
        }
        hash
    }

    /// Replace the fields of the value with the parts of the map.
    fn initialize_from_hash(&mut self, hash: RulePartMap);
}

impl InitializationMethods for RecurrenceRule {
    fn initialize_from_hash(&mut self, hash: RulePartMap) {
        let mut problems: Vec<_> = hash
            .malformed()
            .iter()
            .map(|part| RecurrenceError::MalformedPart { part: part.clone() })
            .collect();

        for (key, value) in hash.iter() {
            match key {
                KW_RRULE_FREQ => self.set_freq(value),
                KW_RRULE_COUNT => self.set_count(value),
                KW_RRULE_UNTIL => self.set_until(value),
                KW_RRULE_INTERVAL => self.set_interval(value),
                KW_RRULE_WKST => self.set_wkst(value),
                _ => match key.parse::<ByPart>() {
                    Ok(part) => {
                        self.set_by_part(part, value.split(RRULE_LIST_SEPARATOR).map(str::trim));
                    }
                    Err(_) => {
                        tracing::debug!(key, "unrecognized rule part");
                        self.record_error(RecurrenceError::UnrecognizedKey {
                            key: key.to_owned(),
                        });
                    }
                },
            }
            problems.append(&mut self.take_errors());
        }

        if hash.contains_key(KW_RRULE_COUNT) && hash.contains_key(KW_RRULE_UNTIL) {
            problems.push(RecurrenceError::ConflictingBound);
        }

        self.errors = problems;
        self.validate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_of(parts: &[&str]) -> RulePartMap {
        parts.iter().fold(RulePartMap::new(), |hash, part| {
            RecurrenceRule::add_part_to_hash(hash, part)
        })
    }

    #[test]
    fn add_part_to_hash_normalizes_keys() {
        let hash = hash_of(&["freq=weekly", " Count = 10 ", "byday=MO,WE"]);
        let entries: Vec<_> = hash.iter().collect();
        assert_eq!(
            entries,
            [("FREQ", "weekly"), ("COUNT", "10"), ("BYDAY", "MO,WE")]
        );
        assert_eq!(hash.get("count"), Some("10"));
    }

    #[test]
    fn add_part_to_hash_keeps_last_value_at_first_position() {
        let hash = hash_of(&["FREQ=DAILY", "COUNT=1", "freq=YEARLY"]);
        let entries: Vec<_> = hash.iter().collect();
        assert_eq!(entries, [("FREQ", "YEARLY"), ("COUNT", "1")]);
        assert_eq!(hash.len(), 2);
    }

    #[test]
    fn add_part_to_hash_sets_aside_malformed_parts() {
        let hash = hash_of(&["", "  ", "FREQ=DAILY", "GARBAGE", "=5"]);
        assert_eq!(hash.len(), 1);
        assert_eq!(hash.malformed(), ["GARBAGE", "=5"]);
        assert!(!hash.is_empty());
    }

    #[test]
    fn initialize_from_hash_collects_every_problem() {
        let hash = hash_of(&["FREQ=WEEKLY", "COUNT=ten", "NOPE", "FOO=BAR", "BYHOUR=25"]);
        let mut rule = RecurrenceRule::new();
        rule.initialize_from_hash(hash);

        assert_eq!(rule.freq().unwrap(), "WEEKLY");
        assert_eq!(rule.count(), None);
        assert_eq!(
            rule.errors(),
            [
                RecurrenceError::MalformedPart {
                    part: "NOPE".to_owned()
                },
                RecurrenceError::InvalidInteger {
                    part: KW_RRULE_COUNT,
                    value: "ten".to_owned(),
                },
                RecurrenceError::UnrecognizedKey {
                    key: "FOO".to_owned()
                },
                RecurrenceError::InvalidByPartValue {
                    part: ByPart::ByHour,
                    value: "25".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn initialize_from_hash_flags_conflicting_bounds() {
        let hash = hash_of(&["FREQ=DAILY", "UNTIL=20240101", "COUNT=3"]);
        let mut rule = RecurrenceRule::new();
        rule.initialize_from_hash(hash);

        assert_eq!(rule.count(), Some(3));
        assert_eq!(rule.until(), None);
        assert_eq!(rule.errors(), [RecurrenceError::ConflictingBound]);
    }
}

//! Per-day engagement totals summed across profiles.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Number, Value};

/// A running engagement sum. Stays integral until a fractional value is added.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EngagementTally {
    Int(i64),
    Float(f64),
}

impl EngagementTally {
    fn from_number(n: &Number) -> Option<Self> {
        if let Some(i) = n.as_i64() {
            return Some(Self::Int(i));
        }
        n.as_f64().map(Self::Float)
    }

    #[allow(clippy::cast_precision_loss)]
    fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    #[must_use]
    fn plus(self, other: Self) -> Self {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a
                .checked_add(b)
                .map_or_else(|| Self::Float(self.as_f64() + other.as_f64()), Self::Int),
            _ => Self::Float(self.as_f64() + other.as_f64()),
        }
    }
}

/// Date-keyed engagement sums. ISO date keys sort chronologically.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EngagementTotals(BTreeMap<String, EngagementTally>);

impl EngagementTotals {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `engagement` to the running total for `date`, creating the entry if absent.
    pub fn add(&mut self, date: &str, engagement: &Number) {
        let Some(value) = EngagementTally::from_number(engagement) else {
            return;
        };
        self.0
            .entry(date.to_owned())
            .and_modify(|total| *total = total.plus(value))
            .or_insert(value);
    }

    /// Folds one profile's day-keyed records into the totals.
    ///
    /// `records` is the upstream per-profile payload: an object (or array) whose
    /// values each carry a `date` and an `engagement`. Records missing either
    /// field, or with a non-numeric engagement, are skipped. Anything that is
    /// not an object or array contributes nothing.
    pub fn absorb_profile(&mut self, records: &Value) {
        let days: Vec<&Value> = match records {
            Value::Object(map) => map.values().collect(),
            Value::Array(items) => items.iter().collect(),
            _ => return,
        };

        for day in days {
            let date = match day.get("date") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => continue,
            };
            if let Some(Value::Number(engagement)) = day.get("engagement") {
                self.add(&date, engagement);
            }
        }
    }

    #[must_use]
    pub fn get(&self, date: &str) -> Option<EngagementTally> {
        self.0.get(date).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn sums_same_day_across_profiles() {
        let mut totals = EngagementTotals::new();
        let profile = json!({"day1": {"date": "2024-01-01", "engagement": 5}});
        totals.absorb_profile(&profile);
        totals.absorb_profile(&profile);
        assert_eq!(totals.get("2024-01-01"), Some(EngagementTally::Int(10)));
    }

    #[test]
    fn keeps_distinct_days_separate() {
        let mut totals = EngagementTotals::new();
        totals.absorb_profile(&json!({
            "a": {"date": "2024-01-01", "engagement": 3},
            "b": {"date": "2024-01-02", "engagement": 4}
        }));
        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get("2024-01-02"), Some(EngagementTally::Int(4)));
    }

    #[test]
    fn fractional_engagement_promotes_to_float() {
        let mut totals = EngagementTotals::new();
        totals.absorb_profile(&json!([
            {"date": "2024-01-01", "engagement": 1},
            {"date": "2024-01-01", "engagement": 0.5}
        ]));
        assert_eq!(totals.get("2024-01-01"), Some(EngagementTally::Float(1.5)));
    }

    #[test]
    fn skips_incomplete_records_and_non_containers() {
        let mut totals = EngagementTotals::new();
        totals.absorb_profile(&json!({
            "a": {"date": "2024-01-01"},
            "b": {"engagement": 9},
            "c": {"date": "2024-01-01", "engagement": "12"}
        }));
        totals.absorb_profile(&Value::Null);
        totals.absorb_profile(&json!("oops"));
        assert!(totals.is_empty());
    }

    #[test]
    fn serializes_as_plain_date_map() {
        let mut totals = EngagementTotals::new();
        totals.absorb_profile(&json!({"d": {"date": "2024-01-01", "engagement": 7}}));
        let json = serde_json::to_value(&totals).expect("serialize");
        assert_eq!(json, json!({"2024-01-01": 7}));
    }
}

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One tracked social account, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    /// Platform discriminator, e.g. `"facebook_page"` or `"instagram_profile"`.
    pub profile_type: String,
}

/// Calendar window as received from the caller.
///
/// Either bound may be absent or `null`; it is then sent upstream as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", default)]
    pub end_date: Option<String>,
}

impl DateRange {
    /// Start of the window in epoch milliseconds, or `None` if unparseable.
    #[must_use]
    pub fn start_millis(&self) -> Option<i64> {
        self.start_date.as_deref().and_then(to_epoch_millis)
    }

    /// End of the window in epoch milliseconds, or `None` if unparseable.
    #[must_use]
    pub fn end_millis(&self) -> Option<i64> {
        self.end_date.as_deref().and_then(to_epoch_millis)
    }
}

/// Request body shared by the posts and statistics aggregators.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileQuery {
    pub profiles: Vec<Profile>,
    #[serde(flatten)]
    pub range: DateRange,
}

/// Converts a caller-supplied date to epoch milliseconds.
///
/// Date-only strings (`2024-01-31`) resolve to UTC midnight. RFC 3339
/// date-times keep their offset. Date-times without an offset
/// (`2024-01-31T10:00:00`, `2024-01-31T10:00`) are read as UTC. Anything
/// else yields `None`.
#[must_use]
pub fn to_epoch_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_only_resolves_to_utc_midnight() {
        assert_eq!(to_epoch_millis("2024-01-01"), Some(1_704_067_200_000));
    }

    #[test]
    fn rfc3339_honours_offset() {
        assert_eq!(
            to_epoch_millis("2024-01-01T01:00:00+01:00"),
            Some(1_704_067_200_000)
        );
    }

    #[test]
    fn naive_date_time_is_read_as_utc() {
        assert_eq!(to_epoch_millis("2024-01-01T10:00:00"), Some(1_704_103_200_000));
        assert_eq!(to_epoch_millis("2024-01-01T10:00:00.250"), Some(1_704_103_200_250));
        assert_eq!(to_epoch_millis("2024-01-01T10:00"), Some(1_704_103_200_000));
    }

    #[test]
    fn garbage_yields_none() {
        assert_eq!(to_epoch_millis("last tuesday"), None);
        assert_eq!(to_epoch_millis(""), None);
    }

    #[test]
    fn profile_query_reads_camel_case_dates() {
        let query: ProfileQuery = serde_json::from_value(serde_json::json!({
            "profiles": [{"id": "123", "profile_type": "facebook_page"}],
            "startDate": "2024-01-01",
            "endDate": "2024-01-31"
        }))
        .expect("valid query");

        assert_eq!(query.profiles.len(), 1);
        assert_eq!(query.profiles[0].profile_type, "facebook_page");
        assert_eq!(query.range.start_millis(), Some(1_704_067_200_000));
        assert_eq!(query.range.end_millis(), Some(1_706_659_200_000));
    }

    #[test]
    fn missing_or_null_dates_become_none() {
        let query: ProfileQuery = serde_json::from_value(serde_json::json!({
            "profiles": [{"id": "123", "profile_type": "facebook_page"}],
            "startDate": null
        }))
        .expect("dates are optional");

        assert_eq!(query.range, DateRange::default());
        assert_eq!(query.range.start_millis(), None);
        assert_eq!(query.range.end_millis(), None);
    }

    #[test]
    fn profile_query_requires_profiles() {
        let result = serde_json::from_value::<ProfileQuery>(serde_json::json!({
            "startDate": "2024-01-01",
            "endDate": "2024-01-31"
        }));
        assert!(result.is_err());
    }
}

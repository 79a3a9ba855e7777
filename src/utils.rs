use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// Duration that deserializes from ISO 8601 (e.g. "PT5M")
#[derive(Debug, Clone, Copy)]
pub struct Duration(chrono::Duration);

impl From<chrono::Duration> for Duration {
    fn from(d: chrono::Duration) -> Self {
        Duration(d)
    }
}

impl std::ops::Deref for Duration {
    type Target = chrono::Duration;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> ::serde::Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: ::serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let dur = time_parse::duration::parse(&s)
            .ok()
            .and_then(|d| chrono::Duration::from_std(d).ok())
            .ok_or_else(|| serde::de::Error::custom("invalid duration".to_owned()))?;
        Ok(Duration(dur))
    }
}

/// Parses an ISO 8601 / RFC 3339 timestamp carrying an UTC offset.
pub fn parse_datetime(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
}

pub fn parse_opt_datetime(s: &Option<String>) -> Option<DateTime<FixedOffset>> {
    s.as_ref().and_then(|v| parse_datetime(v))
}

/// Later of two optional instants; None only when both are absent.
pub fn latest(
    a: Option<DateTime<FixedOffset>>,
    b: Option<DateTime<FixedOffset>>,
) -> Option<DateTime<FixedOffset>> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if b > a { b } else { a }),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Formats an instant as the 8 digit calendar date used by GTFS (YYYYMMDD).
pub fn format_date_yyyymmdd(t: &DateTime<FixedOffset>) -> String {
    t.format("%Y%m%d").to_string()
}

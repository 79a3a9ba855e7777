//! How long a produced entity stays valid for downstream consumers.

use chrono::{DateTime, Duration, FixedOffset, Utc};

/// Alerts without explicit bounds are long lived.
pub fn alert_fallback() -> Duration {
    Duration::days(365)
}

/// Time left until `deadline` when it is still in the future, else `fallback`.
///
/// The result is always strictly positive.
pub fn remaining_or(
    deadline: Option<DateTime<FixedOffset>>,
    now: DateTime<Utc>,
    fallback: Duration,
) -> Duration {
    match deadline {
        Some(deadline) => {
            let left = deadline.signed_duration_since(now);
            if left > Duration::zero() {
                left
            } else {
                fallback
            }
        }
        None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.ymd(2025, 9, 12).and_hms(10, 0, 0)
    }

    #[test]
    fn future_deadline_gives_the_remaining_time() {
        let deadline = crate::utils::parse_datetime("2025-09-12T10:05:00+00:00");
        assert_eq!(
            remaining_or(deadline, now(), Duration::minutes(1)),
            Duration::minutes(5)
        );
    }

    #[test]
    fn past_deadline_falls_back_to_the_grace_period() {
        let deadline = crate::utils::parse_datetime("2025-09-12T09:00:00+00:00");
        assert_eq!(
            remaining_or(deadline, now(), Duration::minutes(5)),
            Duration::minutes(5)
        );
    }

    #[test]
    fn absent_deadline_falls_back_too() {
        assert_eq!(
            remaining_or(None, now(), Duration::minutes(5)),
            Duration::minutes(5)
        );
    }
}

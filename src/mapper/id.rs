//! Entity id derivation from the references available on a journey.

use crate::utils;

/// Strips a namespace prefix from the front of a reference.
///
/// An exact prefix match passes through unchanged, so a stripped
/// reference can never be empty.
pub fn strip_prefix<'a>(reference: &'a str, prefix: &str) -> &'a str {
    if reference.len() > prefix.len() && reference.starts_with(prefix) {
        &reference[prefix.len()..]
    } else {
        reference
    }
}

/// A journey reference suffixed with its departure date when it parses,
/// so the same journey running on two days gets two ids.
pub fn journey_id(journey_ref: &str, origin_departure: Option<&str>) -> String {
    match origin_departure.and_then(utils::parse_datetime) {
        Some(t) => format!("{}-{}", journey_ref, utils::format_date_yyyymmdd(&t)),
        None => journey_ref.to_owned(),
    }
}

/// Derives a stable entity id: a non empty vehicle reference wins,
/// then the dated journey reference. References must already be stripped.
pub fn entity_id(
    vehicle_ref: Option<&str>,
    journey_ref: Option<&str>,
    origin_departure: Option<&str>,
) -> Option<String> {
    match vehicle_ref {
        Some(v) if !v.is_empty() => Some(v.to_owned()),
        _ => journey_ref
            .filter(|j| !j.is_empty())
            .map(|j| journey_id(j, origin_departure)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_known_prefix() {
        assert_eq!(strip_prefix("SOFIA:Line:12", "SOFIA:Line:"), "12");
        assert_eq!(strip_prefix("12", "SOFIA:Line:"), "12");
        // an exact match would leave an empty reference, keep it whole
        assert_eq!(strip_prefix("SOFIA:Line:", "SOFIA:Line:"), "SOFIA:Line:");
    }

    #[test]
    fn journey_id_gets_the_departure_date() {
        assert_eq!(
            journey_id("X", Some("2025-09-12T09:55:00+00:00")),
            "X-20250912"
        );
        assert_eq!(journey_id("X", None), "X");
        assert_eq!(journey_id("X", Some("not a date")), "X");
    }

    #[test]
    fn vehicle_reference_wins() {
        assert_eq!(
            entity_id(Some("veh-1"), Some("trip-1"), None),
            Some("veh-1".to_owned())
        );
        assert_eq!(
            entity_id(Some(""), Some("trip-1"), Some("2025-09-12T09:55:00+00:00")),
            Some("trip-1-20250912".to_owned())
        );
        assert_eq!(entity_id(None, None, None), None);
        assert_eq!(entity_id(Some(""), Some(""), None), None);
    }
}

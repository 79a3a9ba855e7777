//! PtSituationElement -> Alert

use crate::config::Options;
use crate::convert::{Entity, EntityKind};
use crate::mapper::{classifier, ttl};
use crate::siri::shared::TimestampRange;
use crate::siri::situation_exchange::{Affects, AffectedRoutes, AffectedStopPoint, PtSituationElement};
use crate::transit_realtime;
use crate::transit_realtime::alert::{Cause, Effect, SeverityLevel};
use crate::transit_realtime::translated_string::Translation;
use crate::transit_realtime::{EntitySelector, TranslatedString};
use crate::utils;
use chrono::{DateTime, Utc};

pub fn map_situation(situation: &PtSituationElement, opts: &Options) -> Option<Entity> {
    map_situation_at(situation, opts, Utc::now())
}

/// Same as [`map_situation`], with an injected clock.
///
/// A situation without a situation number produces no entity.
pub fn map_situation_at(
    situation: &PtSituationElement,
    opts: &Options,
    now: DateTime<Utc>,
) -> Option<Entity> {
    let number = situation.situation_number.as_deref()?;
    let id = opts.strip_situation(number).to_owned();

    let latest_end = situation
        .validity_period
        .iter()
        .fold(None, |acc, period| {
            utils::latest(acc, utils::parse_opt_datetime(&period.end_time))
        });
    let ttl = ttl::remaining_or(latest_end, now, ttl::alert_fallback());

    let mut alert = transit_realtime::Alert::default();

    let summary = bilingual(
        &situation
            .summary
            .iter()
            .map(|s| (s.lang.as_deref(), s.value.as_str()))
            .collect::<Vec<_>>(),
    );
    let description = bilingual(
        &situation
            .description
            .iter()
            .map(|d| (d.lang.as_deref(), d.value.as_str()))
            .collect::<Vec<_>>(),
    );
    let links = bilingual(
        &situation
            .info_links
            .iter()
            .flat_map(|l| &l.info_link)
            .map(|l| (l.lang.as_deref(), l.uri.as_deref().unwrap_or("")))
            .collect::<Vec<_>>(),
    );

    // classification prefers the English summary, falls back to any summary
    let classified = if !summary.en.is_empty() {
        Some(summary.en.clone())
    } else {
        situation.summary.first().map(|s| s.value.clone())
    };
    let (cause, effect) = match classified.as_deref().filter(|text| !text.is_empty()) {
        Some(text) => classifier::classify(text),
        None => (Cause::UnknownCause, Effect::UnknownEffect),
    };
    alert.cause = Some(cause as i32);
    alert.effect = Some(effect as i32);

    if let Some(severity) = situation.severity.as_deref() {
        alert.severity_level = Some(severity_level(severity) as i32);
    }

    alert.header_text = Some(summary.translated_string());
    alert.description_text = Some(description.translated_string());
    alert.url = Some(links.translated_string());

    // an explicit publication window supersedes the validity periods
    let window = situation
        .publication_window
        .as_ref()
        .filter(|w| w.start_time.is_some() || w.end_time.is_some());
    match window {
        Some(window) => alert.active_period.push(time_range(window)),
        None => {
            for period in &situation.validity_period {
                alert.active_period.push(time_range(period));
            }
        }
    }

    if let Some(affects) = &situation.affects {
        alert.informed_entity = informed_entities(affects, opts);
    }

    let message = transit_realtime::FeedEntity {
        id: id.clone(),
        alert: Some(alert),
        ..Default::default()
    };

    Some(Entity {
        id,
        datasource: situation.participant_ref.clone().unwrap_or_default(),
        kind: EntityKind::Alert,
        message,
        ttl,
    })
}

struct Bilingual {
    bg: String,
    en: String,
}

// First entry per language wins; entries without a tag count as English.
fn bilingual(entries: &[(Option<&str>, &str)]) -> Bilingual {
    let first = |lang: &str| {
        entries
            .iter()
            .find(|(l, _)| l.unwrap_or("en") == lang)
            .map(|(_, text)| (*text).to_owned())
            .unwrap_or_default()
    };
    Bilingual {
        bg: first("bg"),
        en: first("en"),
    }
}

impl Bilingual {
    // always two translations, bg first, even when one side is empty
    fn translated_string(&self) -> TranslatedString {
        TranslatedString {
            translation: vec![
                Translation {
                    text: self.bg.clone(),
                    language: Some("bg".to_owned()),
                },
                Translation {
                    text: self.en.clone(),
                    language: Some("en".to_owned()),
                },
            ],
        }
    }
}

fn severity_level(token: &str) -> SeverityLevel {
    match token {
        "noImpact" | "verySlight" => SeverityLevel::Info,
        "slight" | "normal" => SeverityLevel::Warning,
        "severe" | "verySevere" => SeverityLevel::Severe,
        _ => SeverityLevel::UnknownSeverity,
    }
}

fn time_range(period: &TimestampRange) -> transit_realtime::TimeRange {
    transit_realtime::TimeRange {
        start: utils::parse_opt_datetime(&period.start_time).map(|t| t.timestamp() as u64),
        end: utils::parse_opt_datetime(&period.end_time).map(|t| t.timestamp() as u64),
    }
}

// One selector per affected stop, route and trip, in document order.
// Duplicates are left to downstream consumers.
fn informed_entities(affects: &Affects, opts: &Options) -> Vec<EntitySelector> {
    let mut selectors = Vec::new();

    for stop in affects
        .stop_points
        .iter()
        .flat_map(|s| &s.affected_stop_point)
    {
        if let Some(stop_ref) = stop.stop_point_ref.as_deref() {
            selectors.push(stop_selector(opts.strip_stop_point(stop_ref)));
        }
    }

    for journey in affects
        .vehicle_journeys
        .iter()
        .flat_map(|v| &v.affected_vehicle_journey)
    {
        if let Some(line_ref) = journey.line_ref.as_deref() {
            selectors.push(route_selector(opts.strip_line(line_ref)));
        }
        if let Some(framed) = &journey.framed_vehicle_journey_ref {
            if let Some(journey_ref) = framed.dated_vehicle_journey_ref.as_deref() {
                let mut trip = transit_realtime::TripDescriptor {
                    trip_id: Some(opts.strip_trip(journey_ref).to_owned()),
                    ..Default::default()
                };
                trip.start_date = framed.data_frame_ref.as_deref().map(data_frame_date);
                selectors.push(trip_selector(trip));
            }
        }
        for journey_ref in &journey.dated_vehicle_journey_ref {
            let mut trip = transit_realtime::TripDescriptor {
                trip_id: Some(opts.strip_trip(journey_ref).to_owned()),
                ..Default::default()
            };
            trip.start_date = utils::parse_opt_datetime(&journey.origin_aimed_departure_time)
                .map(|t| utils::format_date_yyyymmdd(&t));
            selectors.push(trip_selector(trip));
        }
        for stop in route_stop_points(&journey.routes) {
            if let Some(stop_ref) = stop.stop_point_ref.as_deref() {
                selectors.push(stop_selector(opts.strip_stop_point(stop_ref)));
            }
        }
    }

    for network in affects.networks.iter().flat_map(|n| &n.affected_network) {
        for line in &network.affected_line {
            if let Some(line_ref) = line.line_ref.as_deref() {
                selectors.push(route_selector(opts.strip_line(line_ref)));
            }
            for stop in route_stop_points(&line.routes) {
                if let Some(stop_ref) = stop.stop_point_ref.as_deref() {
                    let mut selector = stop_selector(opts.strip_stop_point(stop_ref));
                    // the line is known here, pair it with the stop
                    selector.route_id = line
                        .line_ref
                        .as_deref()
                        .map(|l| opts.strip_line(l).to_owned());
                    selectors.push(selector);
                }
            }
        }
    }

    selectors
}

fn route_stop_points(
    routes: &Option<AffectedRoutes>,
) -> impl Iterator<Item = &AffectedStopPoint> {
    routes
        .iter()
        .flat_map(|r| &r.affected_route)
        .flat_map(|r| r.stop_points.iter())
        .flat_map(|s| &s.affected_stop_point)
}

fn stop_selector(stop_id: &str) -> EntitySelector {
    EntitySelector {
        stop_id: Some(stop_id.to_owned()),
        ..Default::default()
    }
}

fn route_selector(route_id: &str) -> EntitySelector {
    EntitySelector {
        route_id: Some(route_id.to_owned()),
        ..Default::default()
    }
}

fn trip_selector(trip: transit_realtime::TripDescriptor) -> EntitySelector {
    EntitySelector {
        trip: Some(trip),
        ..Default::default()
    }
}

// A DataFrameRef usually holds the operating date, "2025-09-12"
fn data_frame_date(reference: &str) -> String {
    let bytes = reference.as_bytes();
    if reference.len() == 10 && bytes[4] == b'-' && bytes[7] == b'-' {
        format!(
            "{}{}{}",
            &reference[0..4],
            &reference[5..7],
            &reference[8..10]
        )
    } else {
        reference.to_owned()
    }
}

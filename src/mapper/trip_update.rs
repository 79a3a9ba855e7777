//! EstimatedVehicleJourney -> TripUpdate

use crate::config::{Options, StopTimeMode};
use crate::convert::{Entity, EntityKind};
use crate::mapper::{id, ttl};
use crate::siri::estimated_timetable::{EstimatedCall, EstimatedVehicleJourney, RecordedCall};
use crate::transit_realtime;
use crate::transit_realtime::trip_update::{StopTimeEvent, StopTimeUpdate};
use crate::utils;
use chrono::{DateTime, FixedOffset, Utc};

pub fn map_estimated_vehicle_journey(
    journey: &EstimatedVehicleJourney,
    opts: &Options,
) -> Option<Entity> {
    map_estimated_vehicle_journey_at(journey, opts, Utc::now())
}

/// Same as [`map_estimated_vehicle_journey`], with an injected clock.
///
/// A journey without a dated journey reference produces no entity.
pub fn map_estimated_vehicle_journey_at(
    journey: &EstimatedVehicleJourney,
    opts: &Options,
    now: DateTime<Utc>,
) -> Option<Entity> {
    let journey_ref = journey
        .framed_vehicle_journey_ref
        .as_ref()
        .and_then(|f| f.dated_vehicle_journey_ref.as_deref())
        .or_else(|| journey.dated_vehicle_journey_ref.as_deref())?;
    let trip_id = opts.strip_trip(journey_ref);
    let id = id::journey_id(trip_id, journey.origin_aimed_departure_time.as_deref());

    let recorded = journey
        .recorded_calls
        .as_ref()
        .map(|c| c.recorded_call.as_slice())
        .unwrap_or(&[]);
    let estimated = journey
        .estimated_calls
        .as_ref()
        .map(|c| c.estimated_call.as_slice())
        .unwrap_or(&[]);

    // the update is useful as long as its last known call time
    let ttl = ttl::remaining_or(latest_call_time(recorded, estimated), now, *opts.grace_period);

    let mut trip = transit_realtime::TripDescriptor {
        trip_id: Some(trip_id.to_owned()),
        route_id: journey
            .line_ref
            .as_deref()
            .map(|l| opts.strip_line(l).to_owned()),
        schedule_relationship: Some(
            transit_realtime::trip_descriptor::ScheduleRelationship::Scheduled as i32,
        ),
        ..Default::default()
    };
    if let Some(departure) =
        utils::parse_opt_datetime(&journey.origin_aimed_departure_time)
    {
        trip.start_date = Some(utils::format_date_yyyymmdd(&departure));
        trip.start_time = Some(departure.format("%H:%M:%S").to_string());
    }

    let mut update = transit_realtime::TripUpdate {
        trip,
        timestamp: utils::parse_opt_datetime(&journey.recorded_at_time)
            .map(|t| t.timestamp() as u64),
        ..Default::default()
    };
    if let Some(vehicle_ref) = journey.vehicle_ref.as_deref().filter(|v| !v.is_empty()) {
        update.vehicle = Some(transit_realtime::VehicleDescriptor {
            id: Some(opts.strip_vehicle(vehicle_ref).to_owned()),
            ..Default::default()
        });
    }

    let mut sequence = 0u32;
    for call in recorded {
        update
            .stop_time_update
            .push(recorded_stop_time(call, &mut sequence, opts));
    }
    for call in estimated {
        update
            .stop_time_update
            .push(estimated_stop_time(call, &mut sequence, opts));
    }

    let message = transit_realtime::FeedEntity {
        id: id.clone(),
        is_deleted: Some(false),
        trip_update: Some(update),
        ..Default::default()
    };

    Some(Entity {
        id,
        datasource: journey.data_source.clone().unwrap_or_default(),
        kind: EntityKind::TripUpdate,
        message,
        ttl,
    })
}

fn recorded_stop_time(call: &RecordedCall, sequence: &mut u32, opts: &Options) -> StopTimeUpdate {
    let mut update = stop_time_update(call.stop_point_ref.as_deref(), call.order, sequence, opts);
    match opts.stop_time_mode {
        StopTimeMode::Delay => {
            if call.aimed_arrival_time.is_some() {
                update.arrival = delay_event(
                    &call.aimed_arrival_time,
                    &call.actual_arrival_time,
                    &call.expected_arrival_time,
                );
            }
            if call.aimed_departure_time.is_some() {
                update.departure = delay_event(
                    &call.aimed_departure_time,
                    &call.actual_departure_time,
                    &call.expected_departure_time,
                );
            }
        }
        StopTimeMode::AbsoluteTime => {
            // a call already served: prefer what actually happened
            update.arrival =
                preferred_absolute_event(&call.actual_arrival_time, &call.expected_arrival_time);
            update.departure = preferred_absolute_event(
                &call.actual_departure_time,
                &call.expected_departure_time,
            );
        }
    }
    update
}

fn estimated_stop_time(call: &EstimatedCall, sequence: &mut u32, opts: &Options) -> StopTimeUpdate {
    let mut update = stop_time_update(call.stop_point_ref.as_deref(), call.order, sequence, opts);
    match opts.stop_time_mode {
        StopTimeMode::Delay => {
            if call.aimed_arrival_time.is_some() {
                update.arrival =
                    estimated_delay_event(&call.aimed_arrival_time, &call.expected_arrival_time);
            }
            if call.aimed_departure_time.is_some() {
                update.departure = estimated_delay_event(
                    &call.aimed_departure_time,
                    &call.expected_departure_time,
                );
            }
        }
        StopTimeMode::AbsoluteTime => {
            update.arrival = absolute_event(&call.expected_arrival_time);
            update.departure = absolute_event(&call.expected_departure_time);
        }
    }
    update
}

fn stop_time_update(
    stop_point_ref: Option<&str>,
    order: Option<u32>,
    sequence: &mut u32,
    opts: &Options,
) -> StopTimeUpdate {
    StopTimeUpdate {
        stop_id: stop_point_ref.map(|s| opts.strip_stop_point(s).to_owned()),
        stop_sequence: Some(next_sequence(order, sequence)),
        schedule_relationship: Some(
            transit_realtime::trip_update::stop_time_update::ScheduleRelationship::Scheduled
                as i32,
        ),
        ..Default::default()
    }
}

// The SIRI order is 1-based when present; the counter keeps running over
// the recorded -> estimated boundary so unordered calls stay sequential.
fn next_sequence(order: Option<u32>, counter: &mut u32) -> u32 {
    let sequence = match order {
        Some(order) if order > 0 => order - 1,
        _ => *counter,
    };
    *counter += 1;
    sequence
}

/// Delay of the measured (actual, else expected) time against the aimed one.
fn delay_event(
    aimed: &Option<String>,
    actual: &Option<String>,
    expected: &Option<String>,
) -> Option<StopTimeEvent> {
    let updated = actual.as_ref().or_else(|| expected.as_ref())?;
    seconds_late(aimed.as_ref()?, updated)
}

/// Delay of the expected time against the aimed one; both must be present.
fn estimated_delay_event(
    aimed: &Option<String>,
    expected: &Option<String>,
) -> Option<StopTimeEvent> {
    seconds_late(aimed.as_ref()?, expected.as_ref()?)
}

fn seconds_late(aimed: &str, updated: &str) -> Option<StopTimeEvent> {
    let aimed = utils::parse_datetime(aimed)?;
    let updated = utils::parse_datetime(updated)?;
    Some(StopTimeEvent {
        delay: Some(updated.signed_duration_since(aimed).num_seconds() as i32),
        ..Default::default()
    })
}

fn preferred_absolute_event(
    actual: &Option<String>,
    expected: &Option<String>,
) -> Option<StopTimeEvent> {
    if actual.is_some() {
        absolute_event(actual)
    } else {
        absolute_event(expected)
    }
}

fn absolute_event(time: &Option<String>) -> Option<StopTimeEvent> {
    let time = utils::parse_datetime(time.as_ref()?)?;
    Some(StopTimeEvent {
        time: Some(time.timestamp()),
        uncertainty: Some(0),
        ..Default::default()
    })
}

fn latest_call_time(
    recorded: &[RecordedCall],
    estimated: &[EstimatedCall],
) -> Option<DateTime<FixedOffset>> {
    let recorded_times = recorded.iter().flat_map(|c| {
        vec![
            &c.actual_arrival_time,
            &c.expected_arrival_time,
            &c.aimed_arrival_time,
            &c.actual_departure_time,
            &c.expected_departure_time,
            &c.aimed_departure_time,
        ]
    });
    let estimated_times = estimated.iter().flat_map(|c| {
        vec![
            &c.expected_arrival_time,
            &c.aimed_arrival_time,
            &c.expected_departure_time,
            &c.aimed_departure_time,
        ]
    });
    recorded_times
        .chain(estimated_times)
        .fold(None, |acc, t| utils::latest(acc, utils::parse_opt_datetime(t)))
}

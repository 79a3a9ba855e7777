//! VehicleActivity -> VehiclePosition

use crate::config::Options;
use crate::convert::{Entity, EntityKind};
use crate::mapper::{id, ttl};
use crate::siri::shared::Location;
use crate::siri::vehicle_monitoring::{
    MonitoredVehicleJourney, ProgressBetweenStops, VehicleActivity,
};
use crate::transit_realtime;
use crate::transit_realtime::vehicle_position::{
    CongestionLevel, OccupancyStatus, VehicleStopStatus,
};
use crate::utils;
use chrono::{DateTime, Utc};

pub fn map_vehicle_activity(activity: &VehicleActivity, opts: &Options) -> Option<Entity> {
    map_vehicle_activity_at(activity, opts, Utc::now())
}

/// Same as [`map_vehicle_activity`], with an injected clock.
///
/// An activity without a location, or without any way to identify the
/// vehicle or its journey, produces no entity.
pub fn map_vehicle_activity_at(
    activity: &VehicleActivity,
    opts: &Options,
    now: DateTime<Utc>,
) -> Option<Entity> {
    let journey = activity.monitored_vehicle_journey.as_ref()?;
    let location = journey.vehicle_location.as_ref()?;
    let journey_ref = journey
        .framed_vehicle_journey_ref
        .as_ref()
        .and_then(|f| f.dated_vehicle_journey_ref.as_deref());
    if journey_ref.is_none() && journey.vehicle_ref.is_none() {
        return None;
    }

    let vehicle_ref = journey.vehicle_ref.as_deref().map(|v| opts.strip_vehicle(v));
    let id = id::entity_id(
        vehicle_ref,
        journey_ref.map(|j| opts.strip_trip(j)),
        journey.origin_aimed_departure_time.as_deref(),
    )?;

    let ttl = ttl::remaining_or(
        utils::parse_opt_datetime(&activity.valid_until_time),
        now,
        *opts.grace_period,
    );

    let mut vehicle = transit_realtime::VehiclePosition {
        position: Some(position(location, journey)),
        ..Default::default()
    };
    if let Some(journey_ref) = journey_ref {
        vehicle.trip = Some(trip_descriptor(journey, opts.strip_trip(journey_ref), opts));
    }
    if let Some(vehicle_ref) = vehicle_ref.filter(|v| !v.is_empty()) {
        vehicle.vehicle = Some(transit_realtime::VehicleDescriptor {
            id: Some(vehicle_ref.to_owned()),
            ..Default::default()
        });
    }
    if let Some(call) = &journey.monitored_call {
        vehicle.stop_id = call
            .stop_point_ref
            .as_deref()
            .map(|s| opts.strip_stop_point(s).to_owned());
    }
    vehicle.current_status =
        current_status(journey, activity.progress_between_stops.as_ref(), opts)
            .map(|s| s as i32);
    vehicle.congestion_level = journey.in_congestion.map(|in_congestion| {
        if in_congestion {
            CongestionLevel::Congestion as i32
        } else {
            CongestionLevel::UnknownCongestionLevel as i32
        }
    });
    vehicle.occupancy_status = journey
        .occupancy
        .as_deref()
        .map(|token| occupancy_status(token) as i32);
    vehicle.timestamp = utils::parse_opt_datetime(&activity.recorded_at_time)
        .map(|t| t.timestamp() as u64);

    let message = transit_realtime::FeedEntity {
        id: id.clone(),
        vehicle: Some(vehicle),
        ..Default::default()
    };

    Some(Entity {
        id,
        datasource: journey.data_source.clone().unwrap_or_default(),
        kind: EntityKind::VehiclePosition,
        message,
        ttl,
    })
}

fn position(
    location: &Location,
    journey: &MonitoredVehicleJourney,
) -> transit_realtime::Position {
    transit_realtime::Position {
        latitude: location.latitude as f32,
        longitude: location.longitude as f32,
        bearing: journey.bearing,
        speed: journey.velocity.map(|v| v as f32),
        ..Default::default()
    }
}

fn trip_descriptor(
    journey: &MonitoredVehicleJourney,
    trip_id: &str,
    opts: &Options,
) -> transit_realtime::TripDescriptor {
    transit_realtime::TripDescriptor {
        trip_id: Some(trip_id.to_owned()),
        route_id: journey
            .line_ref
            .as_deref()
            .map(|l| opts.strip_line(l).to_owned()),
        start_date: journey
            .origin_aimed_departure_time
            .as_deref()
            .and_then(utils::parse_datetime)
            .map(|t| utils::format_date_yyyymmdd(&t)),
        schedule_relationship: Some(
            transit_realtime::trip_descriptor::ScheduleRelationship::Scheduled as i32,
        ),
        ..Default::default()
    }
}

// The status is only known when the producer says whether the vehicle is
// at its monitored stop; the progress on the link refines "in transit"
// into "incoming" near the end of the link.
fn current_status(
    journey: &MonitoredVehicleJourney,
    progress: Option<&ProgressBetweenStops>,
    opts: &Options,
) -> Option<VehicleStopStatus> {
    let at_stop = journey.monitored_call.as_ref()?.vehicle_at_stop?;
    if at_stop {
        Some(VehicleStopStatus::StoppedAt)
    } else if progress.map_or(false, |p| close_to_next_stop(p, opts)) {
        Some(VehicleStopStatus::IncomingAt)
    } else {
        Some(VehicleStopStatus::InTransitTo)
    }
}

fn close_to_next_stop(progress: &ProgressBetweenStops, opts: &Options) -> bool {
    let percentage = match progress.percentage {
        Some(p) => p,
        None => return false,
    };
    if percentage >= f64::from(opts.close_to_next_stop_percentage) {
        return true;
    }
    match progress.link_distance {
        Some(link_distance) => {
            let remaining = link_distance * (100.0 - percentage) / 100.0;
            remaining <= f64::from(opts.close_to_next_stop_distance)
        }
        None => false,
    }
}

fn occupancy_status(token: &str) -> OccupancyStatus {
    match token {
        "manySeatsAvailable" => OccupancyStatus::ManySeatsAvailable,
        "seatsAvailable" => OccupancyStatus::FewSeatsAvailable,
        "standingAvailable" => OccupancyStatus::StandingRoomOnly,
        "full" => OccupancyStatus::Full,
        _ => OccupancyStatus::NoDataAvailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::siri::shared::FramedVehicleJourneyRef;
    use crate::siri::vehicle_monitoring::MonitoredCall;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.ymd(2025, 9, 12).and_hms(10, 0, 0)
    }

    fn activity() -> VehicleActivity {
        VehicleActivity {
            recorded_at_time: Some("2025-09-12T09:59:30+00:00".to_owned()),
            monitored_vehicle_journey: Some(MonitoredVehicleJourney {
                line_ref: Some("SOFIA:Line:12".to_owned()),
                framed_vehicle_journey_ref: Some(FramedVehicleJourneyRef {
                    dated_vehicle_journey_ref: Some("SOFIA:ServiceJourney:trip-1".to_owned()),
                    ..Default::default()
                }),
                vehicle_ref: Some("SOFIA:VehicleRef:veh-1".to_owned()),
                data_source: Some("sofia".to_owned()),
                vehicle_location: Some(Location {
                    latitude: 42.6977,
                    longitude: 23.3219,
                }),
                bearing: Some(90.0),
                velocity: Some(12.5),
                origin_aimed_departure_time: Some("2025-09-12T09:55:00+00:00".to_owned()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn nominal_mapping() {
        let entity = map_vehicle_activity_at(&activity(), &Options::default(), now()).unwrap();
        assert_eq!(entity.id, "veh-1");
        assert_eq!(entity.datasource, "sofia");
        assert_eq!(entity.kind, EntityKind::VehiclePosition);
        // no ValidUntilTime, the grace period applies
        assert_eq!(entity.ttl, chrono::Duration::minutes(5));

        let vehicle = entity.message.vehicle.unwrap();
        let trip = vehicle.trip.unwrap();
        assert_eq!(trip.trip_id.as_deref(), Some("trip-1"));
        assert_eq!(trip.route_id.as_deref(), Some("12"));
        assert_eq!(trip.start_date.as_deref(), Some("20250912"));
        let position = vehicle.position.unwrap();
        assert!((position.latitude - 42.6977).abs() < 1e-4);
        assert_eq!(position.bearing, Some(90.0));
        assert_eq!(position.speed, Some(12.5));
        assert_eq!(vehicle.timestamp, Some(1757584770));
    }

    #[test]
    fn no_location_no_entity() {
        let mut activity = activity();
        activity
            .monitored_vehicle_journey
            .as_mut()
            .unwrap()
            .vehicle_location = None;
        assert!(map_vehicle_activity_at(&activity, &Options::default(), now()).is_none());
    }

    #[test]
    fn no_reference_no_entity() {
        let mut activity = activity();
        {
            let journey = activity.monitored_vehicle_journey.as_mut().unwrap();
            journey.vehicle_ref = None;
            journey.framed_vehicle_journey_ref = None;
        }
        assert!(map_vehicle_activity_at(&activity, &Options::default(), now()).is_none());
    }

    #[test]
    fn journey_reference_used_when_no_vehicle_ref() {
        let mut activity = activity();
        activity.monitored_vehicle_journey.as_mut().unwrap().vehicle_ref = None;
        let entity = map_vehicle_activity_at(&activity, &Options::default(), now()).unwrap();
        assert_eq!(entity.id, "trip-1-20250912");
    }

    #[test]
    fn valid_until_time_drives_the_ttl() {
        let mut activity = activity();
        activity.valid_until_time = Some("2025-09-12T10:05:00+00:00".to_owned());
        let entity = map_vehicle_activity_at(&activity, &Options::default(), now()).unwrap();
        assert_eq!(entity.ttl, chrono::Duration::minutes(5));

        activity.valid_until_time = Some("2025-09-12T09:00:00+00:00".to_owned());
        let entity = map_vehicle_activity_at(&activity, &Options::default(), now()).unwrap();
        // already expired, back to the grace period
        assert_eq!(entity.ttl, chrono::Duration::minutes(5));

        activity.valid_until_time = Some("2025-09-12T10:01:00+00:00".to_owned());
        let entity = map_vehicle_activity_at(&activity, &Options::default(), now()).unwrap();
        assert_eq!(entity.ttl, chrono::Duration::minutes(1));
    }

    #[test]
    fn congestion_and_occupancy() {
        let mut activity = activity();
        {
            let journey = activity.monitored_vehicle_journey.as_mut().unwrap();
            journey.in_congestion = Some(true);
            journey.occupancy = Some("seatsAvailable".to_owned());
        }
        let entity = map_vehicle_activity_at(&activity, &Options::default(), now()).unwrap();
        let vehicle = entity.message.vehicle.unwrap();
        assert_eq!(vehicle.congestion_level, Some(CongestionLevel::Congestion as i32));
        assert_eq!(
            vehicle.occupancy_status,
            Some(OccupancyStatus::FewSeatsAvailable as i32)
        );
    }

    #[test]
    fn current_status_from_the_monitored_call() {
        let mut activity = activity();
        activity.monitored_vehicle_journey.as_mut().unwrap().monitored_call =
            Some(MonitoredCall {
                stop_point_ref: Some("SOFIA:Quay:stop-1".to_owned()),
                vehicle_at_stop: Some(true),
                ..Default::default()
            });
        let entity = map_vehicle_activity_at(&activity, &Options::default(), now()).unwrap();
        let vehicle = entity.message.vehicle.unwrap();
        assert_eq!(vehicle.stop_id.as_deref(), Some("stop-1"));
        assert_eq!(
            vehicle.current_status,
            Some(VehicleStopStatus::StoppedAt as i32)
        );
    }

    #[test]
    fn progress_refines_in_transit_into_incoming() {
        let mut activity = activity();
        activity.monitored_vehicle_journey.as_mut().unwrap().monitored_call =
            Some(MonitoredCall {
                vehicle_at_stop: Some(false),
                ..Default::default()
            });
        activity.progress_between_stops = Some(ProgressBetweenStops {
            link_distance: Some(1200.0),
            percentage: Some(50.0),
        });
        let entity = map_vehicle_activity_at(&activity, &Options::default(), now()).unwrap();
        assert_eq!(
            entity.message.vehicle.unwrap().current_status,
            Some(VehicleStopStatus::InTransitTo as i32)
        );

        // 96% of the link covered
        activity.progress_between_stops = Some(ProgressBetweenStops {
            link_distance: Some(1200.0),
            percentage: Some(96.0),
        });
        let entity = map_vehicle_activity_at(&activity, &Options::default(), now()).unwrap();
        assert_eq!(
            entity.message.vehicle.unwrap().current_status,
            Some(VehicleStopStatus::IncomingAt as i32)
        );

        // only 60% covered but less than 500m left
        activity.progress_between_stops = Some(ProgressBetweenStops {
            link_distance: Some(1000.0),
            percentage: Some(60.0),
        });
        let entity = map_vehicle_activity_at(&activity, &Options::default(), now()).unwrap();
        assert_eq!(
            entity.message.vehicle.unwrap().current_status,
            Some(VehicleStopStatus::IncomingAt as i32)
        );
    }
}

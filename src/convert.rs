use crate::config::Options;
use crate::mapper;
use crate::siri::ServiceDelivery;
use crate::transit_realtime;
use log::debug;

/// Kind of GTFS-RT entity produced by a mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    TripUpdate,
    VehiclePosition,
    Alert,
}

/// A GTFS-RT entity together with its conversion metadata.
///
/// Expiry itself is a downstream concern; this crate only computes
/// how long the entity remains valid.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: String,
    pub datasource: String,
    pub kind: EntityKind,
    pub message: transit_realtime::FeedEntity,
    pub ttl: chrono::Duration,
}

/// Converts every delivery of a SIRI ServiceDelivery into GTFS-RT entities.
///
/// Elements missing their mandatory identifying fields are skipped, they
/// are expected from partial upstream messages and never abort the batch.
pub fn convert(service_delivery: &ServiceDelivery, opts: &Options) -> Vec<Entity> {
    let mut entities = Vec::new();

    for delivery in &service_delivery.estimated_timetable_delivery {
        for frame in &delivery.estimated_journey_version_frame {
            for journey in &frame.estimated_vehicle_journey {
                entities.extend(mapper::map_estimated_vehicle_journey(journey, opts));
            }
        }
    }

    for delivery in &service_delivery.vehicle_monitoring_delivery {
        for activity in &delivery.vehicle_activity {
            entities.extend(mapper::map_vehicle_activity(activity, opts));
        }
    }

    for delivery in &service_delivery.situation_exchange_delivery {
        if let Some(situations) = &delivery.situations {
            for situation in &situations.pt_situation_element {
                entities.extend(mapper::map_situation(situation, opts));
            }
        }
    }

    debug!("converted {} entities", entities.len());
    entities
}

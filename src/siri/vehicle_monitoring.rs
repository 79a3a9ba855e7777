use crate::siri::shared::{FramedVehicleJourneyRef, Location};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VehicleMonitoringDelivery {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vehicle_activity: Vec<VehicleActivity>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VehicleActivity {
    /// Datetime at which the position was measured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at_time: Option<String>,
    /// Datetime until which the activity can be considered up to date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_between_stops: Option<ProgressBetweenStops>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitored_vehicle_journey: Option<MonitoredVehicleJourney>,
}

/// Where the vehicle stands on the link to its next stop
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProgressBetweenStops {
    /// Total length of the link, in meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_distance: Option<f64>,
    /// Percentage of the link already covered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MonitoredVehicleJourney {
    /// Id of the line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framed_vehicle_journey_ref: Option<FramedVehicleJourneyRef>,
    /// Id of the vehicle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_ref: Option<String>,
    /// Id of the system producing the data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_location: Option<Location>,
    /// Degrees, clockwise from north
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearing: Option<f32>,
    /// Meters per second
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity: Option<f64>,
    /// true if the vehicle is currently caught in traffic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_congestion: Option<bool>,
    /// How full the vehicle is (manySeatsAvailable, seatsAvailable, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupancy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_aimed_departure_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitored_call: Option<MonitoredCall>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MonitoredCall {
    /// Id of the stop point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_point_ref: Option<String>,
    /// Rank of the stop within the journey, starting at 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    /// true if the vehicle is at the stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_at_stop: Option<bool>,
}

use crate::siri::shared::FramedVehicleJourneyRef;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EstimatedTimetableDelivery {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub estimated_journey_version_frame: Vec<EstimatedJourneyVersionFrame>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EstimatedJourneyVersionFrame {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub estimated_vehicle_journey: Vec<EstimatedVehicleJourney>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EstimatedVehicleJourney {
    /// Datetime of the information update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at_time: Option<String>,
    /// Id of the line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framed_vehicle_journey_ref: Option<FramedVehicleJourneyRef>,
    /// Some producers put the journey reference here instead of framing it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dated_vehicle_journey_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_aimed_departure_time: Option<String>,
    /// Calls already served by the vehicle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_calls: Option<RecordedCalls>,
    /// Calls still ahead of the vehicle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_calls: Option<EstimatedCalls>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordedCalls {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recorded_call: Vec<RecordedCall>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EstimatedCalls {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub estimated_call: Vec<EstimatedCall>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordedCall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_point_ref: Option<String>,
    /// Rank of the stop within the journey, starting at 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aimed_arrival_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_arrival_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_arrival_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aimed_departure_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_departure_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_departure_time: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EstimatedCall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_point_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aimed_arrival_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_arrival_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aimed_departure_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_departure_time: Option<String>,
}

/// Reference to a journey within a data frame (usually an operating day)
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FramedVehicleJourneyRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_frame_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dated_vehicle_journey_ref: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

/// Localized text; a missing Lang means the producer's default language
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NaturalLangString {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    pub value: String,
}

/// Half-open timestamp range, both bounds optional
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimestampRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

use crate::siri::shared::{FramedVehicleJourneyRef, NaturalLangString, TimestampRange};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SituationExchangeDelivery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub situations: Option<Situations>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Situations {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pt_situation_element: Vec<PtSituationElement>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PtSituationElement {
    /// Id of the participant publishing the situation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_ref: Option<String>,
    /// Uniq identifier of the situation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub situation_number: Option<String>,
    /// Severity token (normal, severe, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    /// Window during which the situation should be published
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_window: Option<TimestampRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validity_period: Vec<TimestampRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub summary: Vec<NaturalLangString>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub description: Vec<NaturalLangString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affects: Option<Affects>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_links: Option<InfoLinks>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InfoLinks {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info_link: Vec<InfoLink>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InfoLink {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// What the situation impacts, each branch optional
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Affects {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_points: Option<AffectedStopPoints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_journeys: Option<AffectedVehicleJourneys>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub networks: Option<AffectedNetworks>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AffectedStopPoints {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_stop_point: Vec<AffectedStopPoint>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AffectedStopPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_point_ref: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AffectedVehicleJourneys {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_vehicle_journey: Vec<AffectedVehicleJourney>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AffectedVehicleJourney {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framed_vehicle_journey_ref: Option<FramedVehicleJourneyRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dated_vehicle_journey_ref: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_aimed_departure_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<AffectedRoutes>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AffectedRoutes {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_route: Vec<AffectedRoute>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AffectedRoute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_points: Option<AffectedStopPoints>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AffectedNetworks {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_network: Vec<AffectedNetwork>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AffectedNetwork {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_line: Vec<AffectedLine>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AffectedLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<AffectedRoutes>,
}

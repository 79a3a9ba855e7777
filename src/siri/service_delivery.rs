use crate::siri::estimated_timetable::EstimatedTimetableDelivery;
use crate::siri::situation_exchange::SituationExchangeDelivery;
use crate::siri::vehicle_monitoring::VehicleMonitoringDelivery;

/// Root of a SIRI document, as handed over by the external decoder.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Siri {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_delivery: Option<ServiceDelivery>,
}

/// The three delivery kinds this crate maps; anything else in the
/// document is ignored.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceDelivery {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub estimated_timetable_delivery: Vec<EstimatedTimetableDelivery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vehicle_monitoring_delivery: Vec<VehicleMonitoringDelivery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub situation_exchange_delivery: Vec<SituationExchangeDelivery>,
}

use siri_gtfsrt::siri::estimated_timetable::{
    EstimatedCall, EstimatedCalls, EstimatedJourneyVersionFrame, EstimatedTimetableDelivery,
    EstimatedVehicleJourney,
};
use siri_gtfsrt::siri::shared::{FramedVehicleJourneyRef, Location, NaturalLangString};
use siri_gtfsrt::siri::situation_exchange::{
    PtSituationElement, SituationExchangeDelivery, Situations,
};
use siri_gtfsrt::siri::vehicle_monitoring::{
    MonitoredVehicleJourney, VehicleActivity, VehicleMonitoringDelivery,
};

// Note: as each integration test is built as a separate binary,
// these helpers might be seen as dead code for some tests

#[allow(dead_code)]
pub fn framed_ref(journey_ref: &str) -> FramedVehicleJourneyRef {
    FramedVehicleJourneyRef {
        dated_vehicle_journey_ref: Some(journey_ref.to_owned()),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn lang_string(lang: &str, value: &str) -> NaturalLangString {
    NaturalLangString {
        lang: Some(lang.to_owned()),
        value: value.to_owned(),
    }
}

#[allow(dead_code)]
pub fn vehicle_monitoring_delivery(
    datasource: &str,
    vehicle_ref: &str,
) -> VehicleMonitoringDelivery {
    VehicleMonitoringDelivery {
        vehicle_activity: vec![VehicleActivity {
            recorded_at_time: Some("2025-09-12T09:59:30+00:00".to_owned()),
            monitored_vehicle_journey: Some(MonitoredVehicleJourney {
                line_ref: Some("SOFIA:Line:12".to_owned()),
                vehicle_ref: Some(vehicle_ref.to_owned()),
                data_source: Some(datasource.to_owned()),
                vehicle_location: Some(Location {
                    latitude: 42.6977,
                    longitude: 23.3219,
                }),
                ..Default::default()
            }),
            ..Default::default()
        }],
    }
}

#[allow(dead_code)]
pub fn estimated_timetable_delivery(
    datasource: &str,
    journey_ref: &str,
) -> EstimatedTimetableDelivery {
    EstimatedTimetableDelivery {
        estimated_journey_version_frame: vec![EstimatedJourneyVersionFrame {
            estimated_vehicle_journey: vec![EstimatedVehicleJourney {
                line_ref: Some("SOFIA:Line:12".to_owned()),
                framed_vehicle_journey_ref: Some(framed_ref(journey_ref)),
                data_source: Some(datasource.to_owned()),
                origin_aimed_departure_time: Some("2025-09-12T09:55:00+00:00".to_owned()),
                estimated_calls: Some(EstimatedCalls {
                    estimated_call: vec![EstimatedCall {
                        stop_point_ref: Some("SOFIA:Quay:stop-1".to_owned()),
                        aimed_arrival_time: Some("2025-09-12T10:05:00+00:00".to_owned()),
                        expected_arrival_time: Some("2025-09-12T10:06:00+00:00".to_owned()),
                        ..Default::default()
                    }],
                }),
                ..Default::default()
            }],
        }],
    }
}

#[allow(dead_code)]
pub fn situation_exchange_delivery(
    datasource: &str,
    situation_number: &str,
) -> SituationExchangeDelivery {
    SituationExchangeDelivery {
        situations: Some(Situations {
            pt_situation_element: vec![PtSituationElement {
                participant_ref: Some(datasource.to_owned()),
                situation_number: Some(situation_number.to_owned()),
                summary: vec![
                    lang_string("bg", "Поддръжка:Преместена спирка"),
                    lang_string("en", "Maintenance:Stop moved"),
                ],
                ..Default::default()
            }],
        }),
    }
}

use crate::mapper::id::strip_prefix;
use crate::utils::Duration;

/// How a TripUpdate expresses its arrival/departure events.
///
/// Downstream consumers differ on which representation they expect,
/// so this is a configuration choice and not a compile time one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopTimeMode {
    /// signed delay in seconds against the aimed time
    Delay,
    /// absolute epoch times, no delay computed
    AbsoluteTime,
}

/// Namespace prefixes used by the SIRI producer for its references.
///
/// A prefix is stripped from the front of a reference when present;
/// references without the prefix pass through unchanged.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Namespace {
    pub service_journey: String,
    pub vehicle: String,
    pub line: String,
    pub stop_point: String,
    pub situation: String,
}

impl Default for Namespace {
    fn default() -> Self {
        Namespace {
            service_journey: "SOFIA:ServiceJourney:".to_owned(),
            vehicle: "SOFIA:VehicleRef:".to_owned(),
            line: "SOFIA:Line:".to_owned(),
            stop_point: "SOFIA:Quay:".to_owned(),
            situation: "SOFIA:SituationNumber:".to_owned(),
        }
    }
}

/// Conversion options, shared by all the mappers.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Options {
    /// TTL given to an entity when no usable validity information is present
    pub grace_period: Duration,
    pub stop_time_mode: StopTimeMode,
    /// prefixes stripped from source references; `None` keeps raw ids
    pub namespace: Option<Namespace>,
    /// whether situation numbers are stripped like the other references
    pub strip_situation_ids: bool,
    /// progress percentage over which a vehicle is reported as incoming at the next stop
    pub close_to_next_stop_percentage: u8,
    /// remaining link distance (meters) under which a vehicle is reported as incoming
    pub close_to_next_stop_distance: u32,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            grace_period: chrono::Duration::minutes(5).into(),
            stop_time_mode: StopTimeMode::AbsoluteTime,
            namespace: Some(Namespace::default()),
            strip_situation_ids: true,
            close_to_next_stop_percentage: 95,
            close_to_next_stop_distance: 500,
        }
    }
}

impl Options {
    pub fn strip_trip<'a>(&self, reference: &'a str) -> &'a str {
        match &self.namespace {
            Some(ns) => strip_prefix(reference, &ns.service_journey),
            None => reference,
        }
    }

    pub fn strip_vehicle<'a>(&self, reference: &'a str) -> &'a str {
        match &self.namespace {
            Some(ns) => strip_prefix(reference, &ns.vehicle),
            None => reference,
        }
    }

    pub fn strip_line<'a>(&self, reference: &'a str) -> &'a str {
        match &self.namespace {
            Some(ns) => strip_prefix(reference, &ns.line),
            None => reference,
        }
    }

    pub fn strip_stop_point<'a>(&self, reference: &'a str) -> &'a str {
        match &self.namespace {
            Some(ns) => strip_prefix(reference, &ns.stop_point),
            None => reference,
        }
    }

    pub fn strip_situation<'a>(&self, reference: &'a str) -> &'a str {
        if !self.strip_situation_ids {
            return reference;
        }
        match &self.namespace {
            Some(ns) => strip_prefix(reference, &ns.situation),
            None => reference,
        }
    }
}

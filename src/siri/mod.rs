pub mod estimated_timetable;
pub mod service_delivery;
pub mod shared;
pub mod situation_exchange;
pub mod vehicle_monitoring;

pub use service_delivery::{ServiceDelivery, Siri};

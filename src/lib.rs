#[macro_use]
extern crate prost_derive;
#[macro_use]
extern crate serde_derive;

pub mod transit_realtime {
    include!(concat!(env!("OUT_DIR"), "/transit_realtime.rs"));
}

pub mod config;
pub mod convert;
pub mod feed;
pub mod mapper;
pub mod siri;
pub mod utils;

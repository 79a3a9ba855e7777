//! Assembles converted entities into GTFS-RT feed messages.

use crate::convert::Entity;
use crate::transit_realtime::{feed_header::Incrementality, FeedHeader, FeedMessage};
use std::collections::HashMap;

const GTFS_RT_VERSION: &str = "2.0";

fn new_header() -> FeedHeader {
    FeedHeader {
        gtfs_realtime_version: GTFS_RT_VERSION.to_owned(),
        incrementality: Some(Incrementality::FullDataset as i32),
        timestamp: Some(chrono::Utc::now().timestamp() as u64),
    }
}

/// One feed message with every entity, in encounter order.
pub fn feed_message(entities: &[Entity]) -> FeedMessage {
    FeedMessage {
        header: new_header(),
        entity: entities.iter().map(|e| e.message.clone()).collect(),
    }
}

/// One feed message per datasource.
pub fn feed_messages_by_datasource(entities: &[Entity]) -> HashMap<String, FeedMessage> {
    let mut feeds = HashMap::new();
    for entity in entities {
        feeds
            .entry(entity.datasource.clone())
            .or_insert_with(|| FeedMessage {
                header: new_header(),
                entity: vec![],
            })
            .entity
            .push(entity.message.clone());
    }
    feeds
}

use serde::{Deserialize, Serialize};

use super::UserRecord;
use crate::RoomId;

/// `GET /room/{id}.json` -> `{"room": {...}}`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoomEnvelope {
    pub room: RoomAttributes,
}

/// Full representation of a room, the source of every cached attribute
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoomAttributes {
    pub id: RoomId,
    pub name: String,
    pub topic: Option<String>,
    pub full: bool,
    /// Absent or null when guest access was never configured
    #[serde(default)]
    pub open_to_guests: Option<bool>,
    pub active_token_value: Option<String>,
    pub membership_limit: Option<u32>,
    pub users: Vec<UserRecord>,
}

/// Entry of the room listings, which carry no roster
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoomSummary {
    pub id: RoomId,
    pub name: String,
    pub topic: Option<String>,
    pub membership_limit: Option<u32>,
}

/// `GET /rooms.json` and `GET /presence.json` -> `{"rooms": [...]}`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoomsEnvelope {
    pub rooms: Vec<RoomSummary>,
}

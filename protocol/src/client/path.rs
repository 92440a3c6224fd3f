use chrono::NaiveDate;

use super::Format;
use crate::{RoomId, UserId};

/// `/room/{id}.json`
pub fn room_path(room: RoomId) -> String {
    format!("/room/{}.json", room)
}

/// `/room/{id}/{action}.{format}`
pub fn room_action_path(room: RoomId, action: &str, format: Format) -> String {
    format!("/room/{}/{}.{}", room, action, format.extension())
}

/// `/room/{id}/transcript/{yyyy}/{mm}/{dd}.json`
pub fn transcript_path(room: RoomId, date: NaiveDate) -> String {
    format!("/room/{}/transcript/{}.json", room, date.format("%Y/%m/%d"))
}

/// `/room/{id}/recent.json`, with an optional `limit` query
pub fn recent_path(room: RoomId, limit: Option<u32>) -> String {
    match limit {
        Some(limit) => format!("/room/{}/recent.json?limit={}", room, limit),
        None => format!("/room/{}/recent.json", room),
    }
}

/// `/users/{id}.json`
pub fn user_path(user: UserId) -> String {
    format!("/users/{}.json", user)
}

pub fn rooms_path() -> &'static str {
    "/rooms.json"
}

pub fn presence_path() -> &'static str {
    "/presence.json"
}

pub fn me_path() -> &'static str {
    "/users/me.json"
}

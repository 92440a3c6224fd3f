mod path;

pub use path::{
    me_path, presence_path, recent_path, room_action_path, room_path, rooms_path,
    transcript_path, user_path,
};

use serde::Serialize;

/// Serialization format selected by an endpoint's path suffix.
///
/// Most endpoints speak JSON, but `join` and `leave` are only exposed as
/// `.xml` by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

/// How the service should render a posted message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    /// Plain chat line
    #[default]
    Text,
    /// Multi-line block shown in a fixed-width box
    Paste,
    /// Name of a sound clip to play in the room
    Sound,
    /// Tweet URL, rendered inline
    Tweet,
}

impl MessageKind {
    /// The wire `type` tag
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Text => "TextMessage",
            Self::Paste => "PasteMessage",
            Self::Sound => "SoundMessage",
            Self::Tweet => "TweetMessage",
        }
    }
}

/// Body of `POST /room/{id}/speak.json`: `{"message": {"body", "type"}}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakPayload {
    pub message: OutgoingMessage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingMessage {
    pub body: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl SpeakPayload {
    pub fn new(body: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            message: OutgoingMessage {
                body: body.into(),
                kind: kind.type_tag(),
            },
        }
    }
}

/// Merge-style partial update sent as `PUT /room/{id}.json`.
///
/// Only the attributes that are set end up in the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoomUpdate {
    pub room: RoomUpdateAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoomUpdateAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl RoomUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            room: RoomUpdateAttributes {
                name: Some(name.into()),
                topic: None,
            },
        }
    }

    pub fn topic(topic: impl Into<String>) -> Self {
        Self {
            room: RoomUpdateAttributes {
                name: None,
                topic: Some(topic.into()),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.room.name.is_none() && self.room.topic.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_tags() {
        assert_eq!(MessageKind::default().type_tag(), "TextMessage");
        assert_eq!(MessageKind::Paste.type_tag(), "PasteMessage");
        assert_eq!(MessageKind::Sound.type_tag(), "SoundMessage");
        assert_eq!(MessageKind::Tweet.type_tag(), "TweetMessage");
    }

    #[test]
    fn test_speak_payload_shape() {
        let payload = SpeakPayload::new("crickets", MessageKind::Sound);

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "message": { "body": "crickets", "type": "SoundMessage" } })
        );
    }

    #[test]
    fn test_room_update_only_serializes_set_attribute() {
        assert_eq!(
            serde_json::to_value(RoomUpdate::name("Foo")).unwrap(),
            json!({ "room": { "name": "Foo" } })
        );
        assert_eq!(
            serde_json::to_value(RoomUpdate::topic("Release day")).unwrap(),
            json!({ "room": { "topic": "Release day" } })
        );
        assert!(RoomUpdate::default().is_empty());
    }
}

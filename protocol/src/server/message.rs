use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::parse_timestamp;
use crate::{MessageId, ProtocolError, RoomId, UserId};

/// `{"messages": [...]}`, returned by the transcript and recent endpoints
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MessagesEnvelope {
    pub messages: Vec<WireMessage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WireMessage {
    pub id: MessageId,
    pub room_id: Option<RoomId>,
    /// Null for service-generated entries such as timestamps
    pub user_id: Option<UserId>,
    pub body: Option<String>,
    pub created_at: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// One line of a transcript.
///
/// Timestamps have the service's granularity, nominally five minutes.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub id: MessageId,
    pub user_id: Option<UserId>,
    pub message: Option<String>,
    pub timestamp: DateTime<FixedOffset>,
    pub kind: Option<String>,
}

impl TryFrom<WireMessage> for TranscriptEntry {
    type Error = ProtocolError;

    fn try_from(wire: WireMessage) -> Result<Self, Self::Error> {
        Ok(Self {
            id: wire.id,
            user_id: wire.user_id,
            message: wire.body,
            timestamp: parse_timestamp(&wire.created_at)?,
            kind: wire.kind,
        })
    }
}

impl MessagesEnvelope {
    /// Normalize every message, keeping the service's order
    pub fn into_entries(self) -> Result<Vec<TranscriptEntry>, ProtocolError> {
        self.messages
            .into_iter()
            .map(TranscriptEntry::try_from)
            .collect()
    }
}

mod message;
mod room;
mod upload;
mod user;

use chrono::{DateTime, FixedOffset};

use crate::ProtocolError;

pub use message::{MessagesEnvelope, TranscriptEntry, WireMessage};
pub use room::{RoomAttributes, RoomEnvelope, RoomSummary, RoomsEnvelope};
pub use upload::{Upload, UploadEnvelope, UploadsEnvelope};
pub use user::{User, UserEnvelope, UserRecord};

/// Formats the service has been seen to use, tried after RFC 3339
const TIMESTAMP_FORMATS: &[&str] = &["%Y/%m/%d %H:%M:%S %z", "%Y-%m-%d %H:%M:%S %z"];

/// Parse a wire `created_at` value into a structured timestamp
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, ProtocolError> {
    let raw = raw.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp);
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| ProtocolError::InvalidTimestamp(raw.to_string()))
}

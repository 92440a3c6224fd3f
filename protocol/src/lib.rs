use thiserror::Error;

pub mod client;
pub mod ids;
pub mod server;

pub use client::{Format, MessageKind, RoomUpdate, SpeakPayload};
pub use ids::{MessageId, RoomId, UploadId, UserId};
pub use server::{
    MessagesEnvelope, RoomAttributes, RoomEnvelope, RoomSummary, RoomsEnvelope,
    TranscriptEntry, Upload, UploadEnvelope, UploadsEnvelope, User, UserEnvelope, UserRecord,
    WireMessage, parse_timestamp,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),
}

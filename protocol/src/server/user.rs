use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::parse_timestamp;
use crate::{ProtocolError, UserId};

/// `GET /users/{id}.json` -> `{"user": {...}}`
///
/// The service answers `{"user": null}` for ids it does not know.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserEnvelope {
    pub user: Option<UserRecord>,
}

/// A user as it appears on the wire, either in a room roster or fetched on its own
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email_address: Option<String>,
    pub admin: Option<bool>,
    pub created_at: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub avatar_url: Option<String>,
}

/// A user with its creation time parsed
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email_address: Option<String>,
    pub admin: bool,
    pub kind: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

impl User {
    pub fn from_record(record: &UserRecord) -> Result<Self, ProtocolError> {
        let created_at = record
            .created_at
            .as_deref()
            .ok_or_else(|| ProtocolError::MissingField("created_at".to_string()))?;

        Ok(Self {
            id: record.id,
            name: record.name.clone(),
            email_address: record.email_address.clone(),
            admin: record.admin.unwrap_or(false),
            kind: record.kind.clone(),
            avatar_url: record.avatar_url.clone(),
            created_at: parse_timestamp(created_at)?,
        })
    }
}

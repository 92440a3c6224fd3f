use serde::{Deserialize, Serialize};

use crate::{RoomId, UploadId, UserId};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Upload {
    pub id: UploadId,
    pub name: String,
    pub full_url: String,
    pub content_type: Option<String>,
    pub byte_size: Option<u64>,
    pub room_id: Option<RoomId>,
    pub user_id: Option<UserId>,
    pub created_at: Option<String>,
}

/// `GET /room/{id}/uploads.json` -> `{"uploads": [...]}`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UploadsEnvelope {
    pub uploads: Vec<Upload>,
}

/// Echo of `POST /room/{id}/uploads.json`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UploadEnvelope {
    pub upload: Upload,
}

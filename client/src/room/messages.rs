use std::path::Path;

use anyhow::{Context, Result};
use campfire_protocol::client::recent_path;
use campfire_protocol::{
    Format, MessageKind, MessagesEnvelope, SpeakPayload, TranscriptEntry, Upload, UploadEnvelope,
    UploadsEnvelope,
};

use super::Room;
use crate::connection::{Connection, UploadBody, decode};

/// How many uploads callers usually ask [`Room::files`] for
pub const DEFAULT_FILES_COUNT: usize = 5;

const OCTET_STREAM: &str = "application/octet-stream";

impl<C: Connection> Room<C> {
    /// Post a plain text message
    pub async fn speak(&self, message: &str) -> Result<()> {
        self.send_message(message, MessageKind::Text).await
    }

    /// Post a multi-line block shown in fixed width
    pub async fn paste(&self, message: &str) -> Result<()> {
        self.send_message(message, MessageKind::Paste).await
    }

    /// Play a sound clip, by name, for everyone in the room
    pub async fn play(&self, sound: &str) -> Result<()> {
        self.send_message(sound, MessageKind::Sound).await
    }

    pub async fn tweet(&self, url: &str) -> Result<()> {
        self.send_message(url, MessageKind::Tweet).await
    }

    /// Post `body` tagged with `kind`. Whatever the service answers is ignored.
    pub async fn send_message(&self, body: &str, kind: MessageKind) -> Result<()> {
        let payload = serde_json::to_value(SpeakPayload::new(body, kind))?;
        self.post_action("speak", Format::Json, Some(payload))
            .await
            .map(|_| ())
    }

    /// Upload a file to the room.
    ///
    /// Without an explicit `content_type` it is guessed from `filename`, then
    /// from the file path, then falls back to `application/octet-stream`.
    pub async fn upload(
        &self,
        file: impl AsRef<Path>,
        content_type: Option<&str>,
        filename: Option<&str>,
    ) -> Result<Option<Upload>> {
        let file = file.as_ref();
        let bytes = tokio::fs::read(file)
            .await
            .with_context(|| format!("Failed to read {}", file.display()))?;

        let file_name = match filename {
            Some(name) => name.to_string(),
            None => file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .with_context(|| format!("{} has no file name", file.display()))?,
        };

        let content_type = match content_type {
            Some(content_type) => content_type.to_string(),
            None => guess_content_type(filename, file).to_string(),
        };

        let path = self.action_path("uploads");
        tracing::debug!(
            room_id = %self.id,
            file_name = %file_name,
            content_type = %content_type,
            size = bytes.len(),
            "Uploading file"
        );

        let response = self
            .connection
            .raw_post(
                &path,
                UploadBody {
                    file_name,
                    content_type,
                    bytes,
                },
            )
            .await?;

        response
            .map(|value| decode::<UploadEnvelope>(value, &path).map(|envelope| envelope.upload))
            .transpose()
    }

    /// Full URLs of the room's latest uploads, in the order the service lists them.
    ///
    /// `count` is not enforced here; the listing is returned as the service sends it.
    pub async fn files(&self, count: usize) -> Result<Vec<String>> {
        let path = self.action_path("uploads");
        tracing::debug!(room_id = %self.id, count, "Listing uploads");

        let envelope: UploadsEnvelope = decode(self.connection.get(&path).await?, &path)?;
        Ok(envelope.uploads.into_iter().map(|upload| upload.full_url).collect())
    }

    /// Latest messages in the room, oldest first
    pub async fn recent(&self, limit: Option<u32>) -> Result<Vec<TranscriptEntry>> {
        let path = recent_path(self.id, limit);
        tracing::debug!(room_id = %self.id, ?limit, "Fetching recent messages");

        let envelope: MessagesEnvelope = decode(self.connection.get(&path).await?, &path)?;
        Ok(envelope.into_entries()?)
    }
}

fn guess_content_type(filename: Option<&str>, file: &Path) -> &'static str {
    filename
        .and_then(|name| mime_guess::from_path(name).first_raw())
        .or_else(|| mime_guess::from_path(file).first_raw())
        .unwrap_or(OCTET_STREAM)
}

use anyhow::Result;
use campfire_protocol::client::transcript_path;
use campfire_protocol::{MessagesEnvelope, TranscriptEntry};
use chrono::NaiveDate;

use super::Room;
use crate::connection::{Connection, decode};

impl<C: Connection> Room<C> {
    /// Messages logged on `date`, in the order the service returns them.
    ///
    /// A date without a transcript is a transport error, not an empty list.
    pub async fn transcript(&self, date: NaiveDate) -> Result<Vec<TranscriptEntry>> {
        let path = transcript_path(self.id, date);
        tracing::debug!(room_id = %self.id, %date, "Fetching transcript");

        let envelope: MessagesEnvelope = decode(self.connection.get(&path).await?, &path)?;
        Ok(envelope.into_entries()?)
    }
}

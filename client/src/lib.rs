//! Async client for the Campfire group chat API.
//!
//! ```ignore
//! use campfire_client::{Campfire, ConnectionOptions, RoomId};
//!
//! let campfire = Campfire::connect(&ConnectionOptions::from_env()?)?;
//! let mut room = campfire.room(RoomId(80749));
//!
//! room.join().await?;
//! room.speak("Hello!").await?;
//! println!("topic: {:?}", room.topic().await?);
//! ```

pub mod connection;
pub mod room;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::{Context, Result};
use campfire_protocol::client::{me_path, presence_path, rooms_path};
use campfire_protocol::{RoomsEnvelope, UserEnvelope};

pub use campfire_protocol::{
    MessageKind, RoomId, RoomUpdate, TranscriptEntry, Upload, User, UserId, UserRecord,
};
pub use connection::{Connection, ConnectionOptions, HttpConnection, TransportError, UploadBody};
pub use room::{DEFAULT_FILES_COUNT, Room};

use connection::decode;

/// Entry point for one Campfire account
pub struct Campfire<C = HttpConnection> {
    connection: Arc<C>,
}

impl Campfire<HttpConnection> {
    /// Build an HTTP connection from `options`. Nothing is requested yet.
    pub fn connect(options: &ConnectionOptions) -> Result<Self> {
        let connection = HttpConnection::new(options)?;
        Ok(Self::with_connection(Arc::new(connection)))
    }
}

impl<C: Connection> Campfire<C> {
    pub fn with_connection(connection: Arc<C>) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &Arc<C> {
        &self.connection
    }

    /// An unloaded room handle, without any request
    pub fn room(&self, id: RoomId) -> Room<C> {
        Room::new(self.connection.clone(), id)
    }

    /// Every room visible to the account
    pub async fn rooms(&self) -> Result<Vec<Room<C>>> {
        self.list_rooms(rooms_path()).await
    }

    pub async fn find_room_by_id(&self, id: RoomId) -> Result<Option<Room<C>>> {
        Ok(self.rooms().await?.into_iter().find(|room| room.id() == id))
    }

    pub async fn find_room_by_name(&self, name: &str) -> Result<Option<Room<C>>> {
        Ok(self
            .rooms()
            .await?
            .into_iter()
            .find(|room| room.name() == Some(name)))
    }

    /// Rooms the authenticated user is currently in
    pub async fn presence(&self) -> Result<Vec<Room<C>>> {
        self.list_rooms(presence_path()).await
    }

    /// The user the API token belongs to
    pub async fn me(&self) -> Result<User> {
        let path = me_path();
        let envelope: UserEnvelope = decode(self.connection.get(path).await?, path)?;
        let record = envelope.user.context("Service returned no authenticated user")?;
        Ok(User::from_record(&record)?)
    }

    async fn list_rooms(&self, path: &str) -> Result<Vec<Room<C>>> {
        tracing::debug!(path, "Listing rooms");
        let envelope: RoomsEnvelope = decode(self.connection.get(path).await?, path)?;

        Ok(envelope
            .rooms
            .into_iter()
            .map(|summary| Room::with_name(self.connection.clone(), summary.id, summary.name))
            .collect())
    }
}

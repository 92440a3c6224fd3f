//! A single chat room and its lazily loaded attributes.
//!
//! Passive accessors ([`Room::topic`], [`Room::guest_access_enabled`],
//! [`Room::guest_invite_code`], [`Room::full`]) fetch the room at most once and
//! then keep answering from the cache, however stale it gets. [`Room::users`] is
//! the exception: occupancy changes constantly, so it reloads on every call.
//!
//! Setters only write through to the service. The cache keeps the old values
//! until the next [`Room::reload`].

mod messages;
mod transcript;
mod users;

use std::sync::Arc;

use anyhow::Result;
use campfire_protocol::client::{room_action_path, room_path};
use campfire_protocol::{Format, ProtocolError, RoomEnvelope, RoomId, RoomUpdate, UserRecord};
use serde_json::Value;

use crate::connection::{Connection, HttpConnection, decode};

pub use messages::DEFAULT_FILES_COUNT;

/// Everything a reload brings in besides id and name
#[derive(Debug, Clone)]
struct LoadedAttributes {
    topic: Option<String>,
    full: bool,
    open_to_guests: bool,
    active_token_value: Option<String>,
    users: Vec<UserRecord>,
}

/// Client-side handle on one remote room.
///
/// Not internally synchronized: the cache needs `&mut self`, so sharing a room
/// between tasks means wrapping it in a lock.
pub struct Room<C = HttpConnection> {
    connection: Arc<C>,
    id: RoomId,
    name: Option<String>,
    cache: Option<LoadedAttributes>,
}

impl<C: Connection> Room<C> {
    /// An unloaded room; nothing is fetched until an accessor needs it
    pub fn new(connection: Arc<C>, id: RoomId) -> Self {
        Self {
            connection,
            id,
            name: None,
            cache: None,
        }
    }

    pub fn with_name(connection: Arc<C>, id: RoomId, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(connection, id)
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    /// Name from construction or from the last reload
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.is_some()
    }

    /// Fetch the room unless it has been loaded before
    pub async fn load(&mut self) -> Result<()> {
        self.attributes().await.map(|_| ())
    }

    /// Fetch the room and replace every cached attribute.
    ///
    /// The response is decoded in full before anything is overwritten, so a
    /// failed reload leaves the previous state untouched.
    pub async fn reload(&mut self) -> Result<()> {
        self.refresh().await.map(|_| ())
    }

    async fn refresh(&mut self) -> Result<&LoadedAttributes> {
        let path = room_path(self.id);
        tracing::debug!(room_id = %self.id, "Loading room attributes");

        let envelope: RoomEnvelope = decode(self.connection.get(&path).await?, &path)?;
        let room = envelope.room;

        self.id = room.id;
        self.name = Some(room.name);

        Ok(&*self.cache.insert(LoadedAttributes {
            topic: room.topic,
            full: room.full,
            open_to_guests: room.open_to_guests.unwrap_or(false),
            active_token_value: room.active_token_value,
            users: room.users,
        }))
    }

    async fn attributes(&mut self) -> Result<&LoadedAttributes> {
        // Taken and put back so the cached branch can hand out a borrow
        if let Some(cached) = self.cache.take() {
            tracing::trace!(room_id = %self.id, "Using cached room attributes");
            return Ok(&*self.cache.insert(cached));
        }
        self.refresh().await
    }

    /// Current topic, loaded at most once
    pub async fn topic(&mut self) -> Result<Option<String>> {
        Ok(self.attributes().await?.topic.clone())
    }

    /// Whether the room is at capacity, loaded at most once
    pub async fn full(&mut self) -> Result<bool> {
        Ok(self.attributes().await?.full)
    }

    pub async fn guest_access_enabled(&mut self) -> Result<bool> {
        Ok(self.attributes().await?.open_to_guests)
    }

    /// Token that guest URLs are built from
    pub async fn guest_invite_code(&mut self) -> Result<Option<String>> {
        Ok(self.attributes().await?.active_token_value.clone())
    }

    /// `{base_uri}/{invite_code}`, or `None` while guest access is off.
    ///
    /// Guest access switched on without an invite token is an error.
    pub async fn guest_url(&mut self) -> Result<Option<String>> {
        if !self.guest_access_enabled().await? {
            return Ok(None);
        }

        let code = self
            .guest_invite_code()
            .await?
            .ok_or_else(|| ProtocolError::MissingField("active_token_value".to_string()))?;

        let base = self.connection.base_uri().trim_end_matches('/');
        Ok(Some(format!("{}/{}", base, code)))
    }

    /// Users in the room right now. Always reloads the room first.
    pub async fn users(&mut self) -> Result<&[UserRecord]> {
        Ok(self.refresh().await?.users.as_slice())
    }

    /// Rename the room. The cached name changes only on the next reload.
    pub async fn set_name(&self, name: impl Into<String>) -> Result<()> {
        self.update(RoomUpdate::name(name)).await
    }

    /// Same as [`Room::set_name`]
    pub async fn rename(&self, name: impl Into<String>) -> Result<()> {
        self.set_name(name).await
    }

    /// Change the topic. The cached topic changes only on the next reload.
    pub async fn set_topic(&self, topic: impl Into<String>) -> Result<()> {
        self.update(RoomUpdate::topic(topic)).await
    }

    /// Merge `update` into the remote room. An empty update sends nothing.
    pub async fn update(&self, update: RoomUpdate) -> Result<()> {
        if update.is_empty() {
            return Ok(());
        }

        let path = room_path(self.id);
        tracing::debug!(room_id = %self.id, ?update, "Updating room");

        self.connection
            .put(&path, serde_json::to_value(&update)?)
            .await?;
        Ok(())
    }

    /// Join the room. The service only offers this endpoint as XML.
    pub async fn join(&self) -> Result<()> {
        self.post_action("join", Format::Xml, None).await.map(|_| ())
    }

    pub async fn leave(&self) -> Result<()> {
        self.post_action("leave", Format::Xml, None).await.map(|_| ())
    }

    /// Lock the room against new entrants; also stops logging
    pub async fn lock(&self) -> Result<()> {
        self.post_action("lock", Format::Json, None).await.map(|_| ())
    }

    pub async fn unlock(&self) -> Result<()> {
        self.post_action("unlock", Format::Json, None).await.map(|_| ())
    }

    async fn post_action(
        &self,
        action: &str,
        format: Format,
        body: Option<Value>,
    ) -> Result<Option<Value>> {
        let path = room_action_path(self.id, action, format);
        tracing::debug!(room_id = %self.id, action, "Posting room action");

        self.connection.post(&path, body).await
    }

    fn action_path(&self, action: &str) -> String {
        room_action_path(self.id, action, Format::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::TransportError;
    use crate::testing::{Method, MockConnection, room_fixture};
    use serde_json::json;

    const ROOM_PATH: &str = "/room/80749.json";

    fn test_room() -> (Arc<MockConnection>, Room<MockConnection>) {
        let connection = Arc::new(MockConnection::new());
        connection.stub(Method::Get, ROOM_PATH, room_fixture());
        let room = Room::new(connection.clone(), RoomId(80749));
        (connection, room)
    }

    #[tokio::test]
    async fn test_new_room_is_unloaded() {
        let (connection, room) = test_room();

        assert!(!room.is_loaded());
        assert_eq!(room.name(), None);
        assert!(connection.calls().is_empty());
    }

    #[tokio::test]
    async fn test_guest_invite_code() {
        let (_, mut room) = test_room();
        assert_eq!(room.guest_invite_code().await.unwrap().as_deref(), Some("90cf7"));
    }

    #[tokio::test]
    async fn test_guest_access_enabled() {
        let (_, mut room) = test_room();
        assert!(room.guest_access_enabled().await.unwrap());
    }

    #[tokio::test]
    async fn test_guest_access_absent_is_disabled() {
        let (connection, mut room) = test_room();
        let mut fixture = room_fixture();
        fixture["room"].as_object_mut().unwrap().remove("open_to_guests");
        connection.stub(Method::Get, ROOM_PATH, fixture);

        assert!(!room.guest_access_enabled().await.unwrap());
        assert_eq!(room.guest_url().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_passive_accessors_load_once() {
        let (connection, mut room) = test_room();

        room.topic().await.unwrap();
        room.guest_access_enabled().await.unwrap();
        room.guest_invite_code().await.unwrap();
        room.full().await.unwrap();
        room.topic().await.unwrap();

        assert_eq!(connection.count(Method::Get, ROOM_PATH), 1);
        assert!(room.is_loaded());
        assert_eq!(room.name(), Some("Danger"));
    }

    #[tokio::test]
    async fn test_passive_accessors_keep_stale_values() {
        let (connection, mut room) = test_room();
        room.load().await.unwrap();

        let mut fixture = room_fixture();
        fixture["room"]["topic"] = json!("Changed elsewhere");
        connection.stub(Method::Get, ROOM_PATH, fixture);

        assert_eq!(
            room.topic().await.unwrap().as_deref(),
            Some("No Topic! You should set one!")
        );

        room.reload().await.unwrap();
        assert_eq!(room.topic().await.unwrap().as_deref(), Some("Changed elsewhere"));
        assert_eq!(connection.count(Method::Get, ROOM_PATH), 2);
    }

    #[tokio::test]
    async fn test_users_reload_every_time() {
        let (connection, mut room) = test_room();

        assert_eq!(room.users().await.unwrap().len(), 2);
        assert_eq!(room.users().await.unwrap().len(), 2);
        room.topic().await.unwrap();

        assert_eq!(connection.count(Method::Get, ROOM_PATH), 2);
    }

    #[tokio::test]
    async fn test_users_keep_service_order() {
        let (_, mut room) = test_room();

        let names: Vec<String> = room
            .users()
            .await
            .unwrap()
            .iter()
            .map(|u| u.name.clone())
            .collect();
        assert_eq!(names, vec!["Jane Doe", "John Doe"]);
    }

    #[tokio::test]
    async fn test_guest_url() {
        let (_, mut room) = test_room();
        assert_eq!(
            room.guest_url().await.unwrap().as_deref(),
            Some("https://test.campfirenow.com/90cf7")
        );
    }

    #[tokio::test]
    async fn test_guest_url_follows_reload() {
        let (connection, mut room) = test_room();
        room.guest_url().await.unwrap();

        let mut fixture = room_fixture();
        fixture["room"]["open_to_guests"] = json!(false);
        connection.stub(Method::Get, ROOM_PATH, fixture);
        room.reload().await.unwrap();

        assert_eq!(room.guest_url().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_guest_url_without_token_is_an_error() {
        let (connection, mut room) = test_room();
        let mut fixture = room_fixture();
        fixture["room"]["active_token_value"] = json!(null);
        connection.stub(Method::Get, ROOM_PATH, fixture);

        assert!(room.guest_access_enabled().await.unwrap());
        let err = room.guest_url().await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ProtocolError>(),
            Some(&ProtocolError::MissingField("active_token_value".to_string()))
        );
    }

    #[tokio::test]
    async fn test_empty_update_sends_nothing() {
        let (connection, room) = test_room();

        room.update(RoomUpdate::default()).await.unwrap();

        assert!(connection.calls().is_empty());
    }

    #[tokio::test]
    async fn test_join_and_leave_use_xml_endpoints() {
        let (connection, room) = test_room();

        room.join().await.unwrap();
        room.leave().await.unwrap();

        assert_eq!(connection.count(Method::Post, "/room/80749/join.xml"), 1);
        assert_eq!(connection.count(Method::Post, "/room/80749/leave.xml"), 1);
        assert_eq!(connection.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_lock_and_unlock() {
        let (connection, room) = test_room();

        room.lock().await.unwrap();
        room.unlock().await.unwrap();

        assert_eq!(connection.count(Method::Post, "/room/80749/lock.json"), 1);
        assert_eq!(connection.count(Method::Post, "/room/80749/unlock.json"), 1);
        assert!(connection.calls().iter().all(|c| c.body.is_none()));
    }

    #[tokio::test]
    async fn test_action_failure_propagates() {
        let (connection, room) = test_room();
        connection.fail(Method::Post, "/room/80749/lock.json", 403);

        let err = room.lock().await.unwrap_err();
        match err.downcast_ref::<TransportError>() {
            Some(TransportError::Status { status, .. }) => assert_eq!(*status, 403),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_set_name_writes_through_only() {
        let (connection, mut room) = test_room();
        room.load().await.unwrap();

        room.set_name("Foo").await.unwrap();

        let puts: Vec<_> = connection
            .calls()
            .into_iter()
            .filter(|c| c.method == Method::Put)
            .collect();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].path, ROOM_PATH);
        assert_eq!(puts[0].body, Some(json!({ "room": { "name": "Foo" } })));
        assert_eq!(room.name(), Some("Danger"));
    }

    #[tokio::test]
    async fn test_rename_and_set_topic() {
        let (connection, room) = test_room();

        room.rename("Bar").await.unwrap();
        room.set_topic("Release day").await.unwrap();

        let bodies: Vec<_> = connection.calls().into_iter().map(|c| c.body).collect();
        assert_eq!(
            bodies,
            vec![
                Some(json!({ "room": { "name": "Bar" } })),
                Some(json!({ "room": { "topic": "Release day" } })),
            ]
        );
        assert!(!room.is_loaded());
    }

    #[tokio::test]
    async fn test_reload_overwrites_id_and_name() {
        let connection = Arc::new(MockConnection::new());
        connection.stub(Method::Get, ROOM_PATH, room_fixture());
        let mut room = Room::with_name(connection, RoomId(80749), "Old name");

        room.reload().await.unwrap();

        assert_eq!(room.id(), RoomId(80749));
        assert_eq!(room.name(), Some("Danger"));
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_cache() {
        let (connection, mut room) = test_room();
        room.load().await.unwrap();

        connection.stub(Method::Get, ROOM_PATH, json!({ "room": { "id": 80749 } }));
        assert!(room.reload().await.is_err());

        assert!(room.is_loaded());
        assert_eq!(room.name(), Some("Danger"));
        assert_eq!(room.guest_invite_code().await.unwrap().as_deref(), Some("90cf7"));
    }

    #[tokio::test]
    async fn test_failed_first_load_stays_unloaded() {
        let connection = Arc::new(MockConnection::new());
        let mut room = Room::new(connection.clone(), RoomId(80749));

        assert!(room.topic().await.is_err());
        assert!(!room.is_loaded());

        connection.stub(Method::Get, ROOM_PATH, room_fixture());
        assert!(room.topic().await.unwrap().is_some());
        assert_eq!(connection.count(Method::Get, ROOM_PATH), 2);
    }
}

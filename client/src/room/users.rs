use anyhow::Result;
use campfire_protocol::client::user_path;
use campfire_protocol::{User, UserEnvelope, UserId};

use super::Room;
use crate::connection::{Connection, decode};

impl<C: Connection> Room<C> {
    /// Look up a user, preferring the room's freshly loaded roster.
    ///
    /// `None` in gives `None` out without any request. A user missing from the
    /// roster is fetched directly; `Ok(None)` means the service does not know
    /// the id. Failed requests and records without `created_at` are errors.
    pub async fn user(&mut self, id: Option<UserId>) -> Result<Option<User>> {
        let Some(id) = id else {
            return Ok(None);
        };

        let in_roster = self.users().await?.iter().find(|user| user.id == id).cloned();

        let record = match in_roster {
            Some(record) => record,
            None => {
                let path = user_path(id);
                tracing::debug!(room_id = %self.id, user_id = %id, "User not in roster, fetching");

                let envelope: UserEnvelope = decode(self.connection.get(&path).await?, &path)?;
                match envelope.user {
                    Some(record) => record,
                    None => return Ok(None),
                }
            }
        };

        Ok(Some(User::from_record(&record)?))
    }
}

//! Recording connection used by the room and entry point tests

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Value, json};

use crate::connection::{Connection, TransportError, UploadBody};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    RawPost,
}

impl Method {
    fn name(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post | Self::RawPost => "POST",
            Self::Put => "PUT",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Answers from canned responses and remembers every request.
///
/// An unstubbed GET fails with a 404 `TransportError`; unstubbed writes
/// succeed with an empty body.
pub struct MockConnection {
    base_uri: String,
    responses: Mutex<HashMap<(Method, String), Value>>,
    failures: Mutex<HashMap<(Method, String), u16>>,
    calls: Mutex<Vec<Call>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self {
            base_uri: "https://test.campfirenow.com".to_string(),
            responses: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn stub(&self, method: Method, path: &str, response: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert((method, path.to_string()), response);
    }

    pub fn fail(&self, method: Method, path: &str, status: u16) {
        self.failures
            .lock()
            .unwrap()
            .insert((method, path.to_string()), status);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    fn record(&self, method: Method, path: &str, body: Option<Value>) -> Result<Option<Value>> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body,
        });

        let key = (method, path.to_string());
        if let Some(status) = self.failures.lock().unwrap().get(&key) {
            return Err(TransportError::Status {
                method: method.name(),
                path: path.to_string(),
                status: *status,
            }
            .into());
        }

        Ok(self.responses.lock().unwrap().get(&key).cloned())
    }
}

#[async_trait]
impl Connection for MockConnection {
    fn base_uri(&self) -> &str {
        &self.base_uri
    }

    async fn get(&self, path: &str) -> Result<Value> {
        self.record(Method::Get, path, None)?.ok_or_else(|| {
            TransportError::Status {
                method: "GET",
                path: path.to_string(),
                status: 404,
            }
            .into()
        })
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Option<Value>> {
        self.record(Method::Post, path, body)
    }

    async fn put(&self, path: &str, body: Value) -> Result<Option<Value>> {
        self.record(Method::Put, path, Some(body))
    }

    async fn raw_post(&self, path: &str, upload: UploadBody) -> Result<Option<Value>> {
        let summary = json!({
            "file_name": upload.file_name,
            "content_type": upload.content_type,
            "size": upload.bytes.len(),
        });
        self.record(Method::RawPost, path, Some(summary))
    }
}

/// `GET /room/80749.json` as the service returns it
pub fn room_fixture() -> Value {
    json!({
        "room": {
            "id": 80749,
            "name": "Danger",
            "topic": "No Topic! You should set one!",
            "membership_limit": 60,
            "full": false,
            "open_to_guests": true,
            "active_token_value": "90cf7",
            "updated_at": "2009/12/15 00:49:31 -0800",
            "created_at": "2009/11/19 22:09:53 -0800",
            "users": [
                {
                    "id": 1158837,
                    "name": "Jane Doe",
                    "email_address": "jane@example.com",
                    "admin": true,
                    "created_at": "2009/11/20 16:41:39 -0800",
                    "type": "Member",
                    "avatar_url": "http://asset0.37img.com/global/missing/avatar.png"
                },
                {
                    "id": 1158839,
                    "name": "John Doe",
                    "email_address": "john@example.com",
                    "admin": false,
                    "created_at": "2009/11/20 16:41:39 -0800",
                    "type": "Member"
                }
            ]
        }
    })
}

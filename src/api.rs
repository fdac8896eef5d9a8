//! Remote task collection.
//!
//! The collection is an opaque REST resource:
//!
//! | Operation | Method | Path |
//! |---|---|---|
//! | list | GET | `{collection}` |
//! | get one | GET | `{collection}/{id}` |
//! | create | POST | `{collection}` |
//! | update | PUT | `{collection}/{id}` |
//! | delete | DELETE | `{collection}/{id}` |
//!
//! Read operations return raw JSON; callers normalize it. Writes send
//! [`TaskFields`] as the JSON body.

use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::task::{TaskFields, TaskId};

/// Operations on the remote task collection.
pub trait TaskStore {
    /// Read the whole collection as raw records.
    fn list(&self) -> Result<Vec<Value>, ApiError>;

    /// Read a single raw record.
    fn get(&self, id: &TaskId) -> Result<Value, ApiError>;

    /// Insert a record; the store assigns the id.
    fn create(&self, fields: &TaskFields) -> Result<Value, ApiError>;

    /// Replace the record keyed by `id`.
    fn update(&self, id: &TaskId, fields: &TaskFields) -> Result<Value, ApiError>;

    /// Remove the record keyed by `id`.
    fn delete(&self, id: &TaskId) -> Result<(), ApiError>;
}

/// [`TaskStore`] over HTTP.
pub struct HttpTaskStore {
    agent: ureq::Agent,
    collection_url: String,
}

impl HttpTaskStore {
    pub fn new(config: &ApiConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new().user_agent(concat!("tasklist/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Self {
            agent: builder.build(),
            collection_url: config.collection_url(),
        }
    }

    /// URL of one record, with `id` encoded as a single path segment.
    fn record_url(&self, method: &'static str, id: &TaskId) -> Result<String, ApiError> {
        let invalid = |message: String| ApiError::Transport {
            method,
            url: self.collection_url.clone(),
            message,
        };
        let mut url = Url::parse(&self.collection_url).map_err(|e| invalid(format!("invalid collection URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| invalid("collection URL cannot hold a record path".to_string()))?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url.to_string())
    }

    fn send(&self, method: &'static str, url: &str, body: Option<&TaskFields>) -> Result<String, ApiError> {
        tracing::debug!(method, url, "sending request");
        let request = self.agent.request(method, url).set("Accept", "application/json");
        let result = match body {
            Some(fields) => {
                let payload = serde_json::to_string(fields).map_err(|e| ApiError::Decode {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
                request.set("Content-Type", "application/json").send_string(&payload)
            }
            None => request.call(),
        };

        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                tracing::warn!(method, url, status, "request rejected");
                return Err(ApiError::Status {
                    method,
                    url: url.to_string(),
                    status,
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                tracing::warn!(method, url, "request failed: {transport}");
                return Err(ApiError::Transport {
                    method,
                    url: url.to_string(),
                    message: transport.to_string(),
                });
            }
        };

        tracing::debug!(method, url, status = response.status(), "request completed");
        response.into_string().map_err(|e| ApiError::Transport {
            method,
            url: url.to_string(),
            message: format!("failed to read body: {e}"),
        })
    }

    fn send_json(&self, method: &'static str, url: &str, body: Option<&TaskFields>) -> Result<Value, ApiError> {
        let text = self.send(method, url, body)?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

impl TaskStore for HttpTaskStore {
    fn list(&self) -> Result<Vec<Value>, ApiError> {
        match self.send_json("GET", &self.collection_url, None)? {
            Value::Array(items) => Ok(items),
            other => Err(ApiError::Decode {
                url: self.collection_url.clone(),
                message: format!("expected a JSON array, got {}", json_kind(&other)),
            }),
        }
    }

    fn get(&self, id: &TaskId) -> Result<Value, ApiError> {
        self.send_json("GET", &self.record_url("GET", id)?, None)
    }

    fn create(&self, fields: &TaskFields) -> Result<Value, ApiError> {
        self.send_json("POST", &self.collection_url, Some(fields))
    }

    fn update(&self, id: &TaskId, fields: &TaskFields) -> Result<Value, ApiError> {
        self.send_json("PUT", &self.record_url("PUT", id)?, Some(fields))
    }

    fn delete(&self, id: &TaskId) -> Result<(), ApiError> {
        self.send("DELETE", &self.record_url("DELETE", id)?, None).map(|_| ())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

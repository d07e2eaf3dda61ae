//! Action API response envelope
//!
//! Every action answers `{"success": bool, "result": ..., "error": ...}`,
//! whatever the HTTP status. Lookups that fail come back as `success: false`
//! with a 404, so the body is decoded before the status is considered. A body
//! without a `success` flag is not an envelope, whatever else it holds.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::ports::{CatalogError, CatalogResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Option<Value>,
    /// HTTP status the envelope arrived with
    #[serde(skip)]
    pub status: u16,
}

impl ApiResponse {
    /// Parse a response body; anything that is not an envelope is an error
    pub fn parse(action: &'static str, status: u16, body: &str) -> CatalogResult<Self> {
        let mut response: Self =
            serde_json::from_str(body).map_err(|_| CatalogError::Status { action, status })?;
        response.status = status;
        Ok(response)
    }

    /// The typed `result` of a successful call
    pub fn into_result<T: DeserializeOwned>(self, action: &'static str) -> CatalogResult<T> {
        if !self.success {
            return Err(self.rejection(action));
        }
        decode(action, self.result)
    }

    /// Like `into_result`, but `success: false` means "not found".
    ///
    /// A server error is never a miss, even when it carries an envelope.
    pub fn into_lookup<T: DeserializeOwned>(
        self,
        action: &'static str,
    ) -> CatalogResult<Option<T>> {
        if !self.success && self.status >= 500 {
            return Err(self.rejection(action));
        }
        if !self.success {
            tracing::debug!(action, error = %self.error_text(), "lookup reported not found");
            return Ok(None);
        }
        decode(action, self.result).map(Some)
    }

    /// Success check for calls whose result is not used
    pub fn into_ack(self, action: &'static str) -> CatalogResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(self.rejection(action))
        }
    }

    fn rejection(&self, action: &'static str) -> CatalogError {
        CatalogError::Rejected {
            action,
            error: self.error_text(),
        }
    }

    fn error_text(&self) -> String {
        match &self.error {
            Some(Value::Object(map)) => {
                let message = map.get("message").and_then(Value::as_str);
                let kind = map.get("__type").and_then(Value::as_str);
                match (kind, message) {
                    (Some(kind), Some(message)) => format!("{}: {}", kind, message),
                    _ => Value::Object(map.clone()).to_string(),
                }
            }
            Some(other) => other.to_string(),
            None => "no error details".to_string(),
        }
    }
}

fn decode<T: DeserializeOwned>(action: &'static str, result: Value) -> CatalogResult<T> {
    serde_json::from_value(result).map_err(|e| CatalogError::Decode {
        action,
        message: e.to_string(),
    })
}

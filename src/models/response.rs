use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// Proxy integration response returned to API Gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub is_base64_encoded: bool,
    pub body: String,
}

impl FileResponse {
    /// Builds a response whose only header is `Content-Type`.
    #[must_use]
    pub fn new(status_code: u16, content_type: &str, body: String, is_base64_encoded: bool) -> Self {
        let headers = HashMap::from([(CONTENT_TYPE_HEADER.to_string(), content_type.to_string())]);
        Self {
            status_code,
            headers,
            is_base64_encoded,
            body,
        }
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE_HEADER).map(String::as_str)
    }
}

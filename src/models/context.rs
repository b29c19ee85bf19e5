//! Per-invocation side channel carrying view data for templated responses.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Key of the Lambda client context `custom` entry holding the handler's settings.
pub const CLIENT_CONTEXT_KEY: &str = "staticFileHandler";

/// Values substituted into the placeholders of textual responses.
pub type ViewData = Map<String, Value>;

/// Caller-supplied context for a single request, shaped like
/// `{"staticFileHandler": {"viewData": {...}}}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationContext {
    #[serde(default)]
    pub static_file_handler: Option<StaticFileHandlerContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticFileHandlerContext {
    /// `Some` whenever the key is present, including an explicit `null`.
    #[serde(default, deserialize_with = "present")]
    pub view_data: Option<Value>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl InvocationContext {
    #[must_use]
    pub fn with_view_data(view_data: ViewData) -> Self {
        Self {
            static_file_handler: Some(StaticFileHandlerContext {
                view_data: Some(Value::Object(view_data)),
            }),
        }
    }

    #[must_use]
    pub fn view_data(&self) -> Option<&Value> {
        self.static_file_handler
            .as_ref()
            .and_then(|ctx| ctx.view_data.as_ref())
    }

    /// Reads the context from a Lambda client context `custom` map, where the
    /// [`CLIENT_CONTEXT_KEY`] entry holds `{"viewData": {...}}` as JSON.
    ///
    /// Returns an empty context when the entry is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is present but is not valid JSON of that shape.
    #[allow(clippy::implicit_hasher)]
    pub fn from_client_context_custom(
        custom: &HashMap<String, String>,
    ) -> Result<Self, serde_json::Error> {
        custom.get(CLIENT_CONTEXT_KEY).map_or_else(
            || Ok(Self::default()),
            |raw| {
                let static_file_handler: StaticFileHandlerContext = serde_json::from_str(raw)?;
                Ok(Self {
                    static_file_handler: Some(static_file_handler),
                })
            },
        )
    }
}

//! API Gateway proxy integration event models.
//!
//! Two incompatible payload formats reach the handler: the REST API "v1" proxy
//! format and the HTTP API "v2" format. [`EventShape::detect`] tells them apart
//! once, and both are translated into the v1-style [`ProxyRequest`].

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Top-level field set by serverless-offline on the events it emulates.
pub const LOCAL_DEV_MARKER: &str = "isOffline";

/// Properties of a v1 Lambda proxy integration event.
/// See <https://docs.aws.amazon.com/apigateway/latest/developerguide/set-up-lambda-proxy-integrations.html>
pub const V1_PROXY_PROPERTIES: [&str; 12] = [
    "resource",
    "path",
    "httpMethod",
    "headers",
    "multiValueHeaders",
    "queryStringParameters",
    "multiValueQueryStringParameters",
    "pathParameters",
    "stageVariables",
    "requestContext",
    "body",
    "isBase64Encoded",
];

/// The one property serverless-offline is known to leave out.
const LOCAL_DEV_MISSING_PROPERTY: &str = "isBase64Encoded";

/// Which proxy integration payload format an event uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventShape {
    /// REST API payload: `requestContext.httpMethod` is a string.
    V1,
    /// HTTP API payload: `version` is `"2.0"` and `requestContext.http.method` is a string.
    V2,
    /// A serverless-offline event missing only `isBase64Encoded`.
    LocalDev,
    /// Not a proxy integration event.
    Unrecognized,
}

impl EventShape {
    /// Classifies `event`, checking the v1 predicate first.
    #[must_use]
    pub fn detect(event: &Value) -> Self {
        if is_string_at(event, "/requestContext/httpMethod") {
            Self::V1
        } else if event.get("version").and_then(Value::as_str) == Some("2.0")
            && is_string_at(event, "/requestContext/http/method")
        {
            Self::V2
        } else if event.get(LOCAL_DEV_MARKER).is_some()
            && missing_v1_properties(event) == [LOCAL_DEV_MISSING_PROPERTY]
        {
            Self::LocalDev
        } else {
            Self::Unrecognized
        }
    }
}

fn is_string_at(event: &Value, pointer: &str) -> bool {
    event.pointer(pointer).is_some_and(Value::is_string)
}

/// Lists the v1 proxy properties absent from `event`, in declaration order.
#[must_use]
pub fn missing_v1_properties(event: &Value) -> Vec<&'static str> {
    V1_PROXY_PROPERTIES
        .into_iter()
        .filter(|name| event.get(name).is_none())
        .collect()
}

/// REST API (v1) proxy event. Only the fields the handler reads are modelled.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V1ProxyEvent {
    /// Kept untyped: a greedy path parameter makes the type of `path` irrelevant.
    #[serde(default)]
    pub path: Value,
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub path_parameters: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub request_context: Option<V1RequestContext>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V1RequestContext {
    #[serde(default)]
    pub http_method: Option<String>,
}

/// HTTP API (v2) proxy event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V2ProxyEvent {
    pub raw_path: String,
    #[serde(default)]
    pub path_parameters: Option<BTreeMap<String, String>>,
    pub request_context: V2RequestContext,
}

#[derive(Debug, Deserialize)]
pub struct V2RequestContext {
    pub http: V2Http,
}

#[derive(Debug, Deserialize)]
pub struct V2Http {
    pub method: String,
}

/// Canonical, v1-style view of a proxy request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRequest {
    pub http_method: String,
    /// `None` when the event's `path` is not a string.
    pub path: Option<String>,
    pub path_parameters: Option<BTreeMap<String, String>>,
}

impl From<V1ProxyEvent> for ProxyRequest {
    fn from(event: V1ProxyEvent) -> Self {
        let http_method = event
            .request_context
            .and_then(|context| context.http_method)
            .or(event.http_method)
            .unwrap_or_default();
        let path = match event.path {
            Value::String(path) => Some(path),
            _ => None,
        };
        Self {
            http_method,
            path,
            path_parameters: event.path_parameters,
        }
    }
}

impl From<V2ProxyEvent> for ProxyRequest {
    fn from(event: V2ProxyEvent) -> Self {
        // rawPath arrives percent-encoded; v1 paths are already decoded.
        let path = urlencoding::decode(&event.raw_path)
            .map_or_else(|_| event.raw_path.clone(), |decoded| decoded.into_owned());
        Self {
            http_method: event.request_context.http.method,
            path: Some(path),
            path_parameters: event.path_parameters,
        }
    }
}

/// Shape-independent description of a request, as consumed by the resolution pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub http_method: String,
    pub path: Option<String>,
    pub path_parameters: Option<BTreeMap<String, String>>,
    lookup_path: String,
}

impl RequestDescriptor {
    pub(crate) fn new(request: ProxyRequest, lookup_path: String) -> Self {
        Self {
            http_method: request.http_method,
            path: request.path,
            path_parameters: request.path_parameters,
            lookup_path,
        }
    }

    /// Path looked up beneath the root directory: either `path` verbatim or
    /// `/` followed by the single greedy path parameter.
    #[must_use]
    pub fn lookup_path(&self) -> &str {
        &self.lookup_path
    }
}

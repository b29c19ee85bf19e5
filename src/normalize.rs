//! Event normalization: turns a raw proxy integration event into a [`RequestDescriptor`].

use crate::models::event::{ProxyRequest, V1ProxyEvent, V2ProxyEvent};
use crate::models::{EventShape, HandlerError, RequestDescriptor};
use lambda_runtime::tracing::debug;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Validates `event` and derives the canonical request descriptor.
///
/// A `null` event is treated as absent. v2 events are translated into the v1 field
/// set before any further checks.
///
/// # Errors
///
/// - `MissingEvent` when the event is absent.
/// - `EmptyPath` when the event carries no usable path.
/// - `ProxyIntegration` when the event matches neither proxy integration shape.
/// - `PathNotString` / `MalformedEvent` when a recognized event has mistyped fields.
/// - `PathParameter` when `pathParameters` is present without exactly one entry.
pub fn normalize(event: &Value) -> Result<RequestDescriptor, HandlerError> {
    if event.is_null() {
        return Err(HandlerError::MissingEvent);
    }

    let shape = EventShape::detect(event);
    debug!(?shape, "Detected proxy event shape");

    let raw_path = event.get("rawPath").or_else(|| event.get("path"));
    if raw_path.is_none_or(is_falsy) {
        return Err(HandlerError::EmptyPath);
    }

    let request = match shape {
        EventShape::V1 | EventShape::LocalDev => ProxyRequest::from(
            V1ProxyEvent::deserialize(event).map_err(HandlerError::MalformedEvent)?,
        ),
        EventShape::V2 => ProxyRequest::from(
            V2ProxyEvent::deserialize(event).map_err(HandlerError::MalformedEvent)?,
        ),
        EventShape::Unrecognized => return Err(proxy_integration_error(event)),
    };

    let lookup_path = match (&request.path_parameters, &request.path) {
        (Some(path_parameters), _) => greedy_path(path_parameters)?,
        (None, Some(path)) => path.clone(),
        (None, None) => return Err(HandlerError::PathNotString),
    };
    Ok(RequestDescriptor::new(request, lookup_path))
}

/// Path captured by a greedy path parameter such as `/binary/{pathvar+}`.
fn greedy_path(path_parameters: &BTreeMap<String, String>) -> Result<String, HandlerError> {
    let mut values = path_parameters.values();
    match (values.next(), values.next()) {
        (Some(value), None) => Ok(format!("/{value}")),
        (None, _) => Err(HandlerError::PathParameter(
            "The event.pathParameters is an object but there are no properties. Check serverless.yml."
                .to_string(),
        )),
        (Some(_), Some(_)) => Err(HandlerError::PathParameter(format!(
            "Expected exactly one property name, but found: {:?}. Check that you configured the pathParameter in serverless.yml with a plus sign like `path/{{pathparam+}}`.",
            path_parameters.keys().collect::<Vec<_>>()
        ))),
    }
}

fn proxy_integration_error(event: &Value) -> HandlerError {
    let inspected = [
        ("requestContext.httpMethod", "/requestContext/httpMethod"),
        ("version", "/version"),
        ("requestContext.http.method", "/requestContext/http/method"),
    ]
    .into_iter()
    .map(|(name, pointer)| {
        let actual = event
            .pointer(pointer)
            .map_or_else(|| "<missing>".to_string(), Value::to_string);
        format!("{name}={actual}")
    })
    .collect::<Vec<_>>()
    .join(", ");

    HandlerError::ProxyIntegration(format!(
        "API Gateway method does not appear to be setup for Lambda Proxy Integration. Please confirm that `integration` property of the http event is not specified or set to `integration: proxy`. Inspected {inspected}."
    ))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v1_event(path: &str, path_parameters: Value) -> Value {
        json!({
            "resource": "/{proxy+}",
            "path": path,
            "httpMethod": "GET",
            "headers": {},
            "multiValueHeaders": {},
            "queryStringParameters": null,
            "multiValueQueryStringParameters": null,
            "pathParameters": path_parameters,
            "stageVariables": null,
            "requestContext": {"httpMethod": "GET"},
            "body": null,
            "isBase64Encoded": false
        })
    }

    #[test]
    fn test_null_event() {
        assert!(matches!(normalize(&Value::Null), Err(HandlerError::MissingEvent)));
    }

    #[test]
    fn test_empty_path() {
        assert!(matches!(
            normalize(&v1_event("", Value::Null)),
            Err(HandlerError::EmptyPath)
        ));
        let no_path = json!({"requestContext": {"httpMethod": "GET"}});
        assert!(matches!(normalize(&no_path), Err(HandlerError::EmptyPath)));
    }

    #[test]
    fn test_empty_path_checked_before_shape() {
        let event = json!({"path": ""});
        assert!(matches!(normalize(&event), Err(HandlerError::EmptyPath)));
    }

    #[test]
    fn test_path_must_be_string() {
        let mut event = v1_event("x", Value::Null);
        event["path"] = json!({"fonts": "glyphicons.woff2"});
        assert!(matches!(normalize(&event), Err(HandlerError::PathNotString)));
    }

    #[test]
    fn test_path_parameter_ignores_path_type() {
        let mut event = v1_event("x", json!({"pathvar": "index.html"}));
        event["path"] = json!({"fonts": "glyphicons.woff2"});
        let descriptor = normalize(&event).unwrap();
        assert_eq!(descriptor.lookup_path(), "/index.html");
        assert_eq!(descriptor.path, None);
    }

    #[test]
    fn test_v1_path_verbatim() {
        let descriptor = normalize(&v1_event("index.html", Value::Null)).unwrap();
        assert_eq!(descriptor.lookup_path(), "index.html");
        assert_eq!(descriptor.http_method, "GET");
    }

    #[test]
    fn test_single_path_parameter_overrides_path() {
        let event = v1_event(
            "/binary/vendor/bootstrap.min.css.map",
            json!({"pathvar": "vendor/bootstrap.min.css.map"}),
        );
        let descriptor = normalize(&event).unwrap();
        assert_eq!(descriptor.lookup_path(), "/vendor/bootstrap.min.css.map");
        assert_eq!(
            descriptor.path.as_deref(),
            Some("/binary/vendor/bootstrap.min.css.map")
        );
    }

    #[test]
    fn test_v2_path_parameter_overrides_raw_path() {
        let event = json!({
            "version": "2.0",
            "rawPath": "/binary/x",
            "pathParameters": {"pathvar": "x"},
            "headers": {},
            "requestContext": {"http": {"method": "GET", "path": "/binary/x"}},
            "isBase64Encoded": false
        });
        let descriptor = normalize(&event).unwrap();
        assert_eq!(descriptor.lookup_path(), "/x");
        assert_eq!(descriptor.path.as_deref(), Some("/binary/x"));
    }

    #[test]
    fn test_zero_path_parameters() {
        let err = normalize(&v1_event("/binary/x", json!({}))).unwrap_err();
        assert!(matches!(err, HandlerError::PathParameter(_)));
        assert!(err.to_string().contains("no properties"));
    }

    #[test]
    fn test_too_many_path_parameters() {
        let err = normalize(&v1_event("/a/b", json!({"first": "a", "second": "b"}))).unwrap_err();
        assert!(matches!(err, HandlerError::PathParameter(_)));
        assert!(err.to_string().contains(r#"["first", "second"]"#));
    }

    #[test]
    fn test_unrecognized_shape_reports_inspected_fields() {
        let event = json!({"path": "/index.html", "version": "1.0", "requestContext": {}});
        let err = normalize(&event).unwrap_err();
        assert!(matches!(err, HandlerError::ProxyIntegration(_)));
        let message = err.to_string();
        assert!(message.contains("requestContext.httpMethod=<missing>"));
        assert!(message.contains(r#"version="1.0""#));
        assert!(message.contains("requestContext.http.method=<missing>"));
    }

    #[test]
    fn test_local_dev_event_without_base64_flag() {
        let mut event = v1_event("/index.html", Value::Null);
        let object = event.as_object_mut().unwrap();
        object.remove("isBase64Encoded");
        object.insert("requestContext".to_string(), json!({}));
        object.insert("isOffline".to_string(), json!(true));
        let descriptor = normalize(&event).unwrap();
        assert_eq!(descriptor.lookup_path(), "/index.html");
    }

    #[test]
    fn test_mistyped_path_parameters() {
        let event = v1_event("/binary/x", json!({"pathvar": 42}));
        assert!(matches!(normalize(&event), Err(HandlerError::MalformedEvent(_))));
    }

    #[test]
    fn test_is_falsy() {
        assert!(is_falsy(&json!(null)));
        assert!(is_falsy(&json!("")));
        assert!(is_falsy(&json!(false)));
        assert!(is_falsy(&json!(0)));
        assert!(!is_falsy(&json!("/")));
        assert!(!is_falsy(&json!({})));
    }
}

//! Packaging-time registration of binary media types on the generated API Gateway REST API.
//!
//! API Gateway only hands base64 bodies back as binary for media types listed in
//! the REST API's `BinaryMediaTypes`. The types come from the service config at
//! `custom.apiGateway.binaryMediaTypes`.

use anyhow::{Context, Result, bail};
use lambda_runtime::tracing::{info, warn};
use serde_json::Value;

/// CloudFormation resource type of the REST API.
pub const REST_API_RESOURCE_TYPE: &str = "AWS::ApiGateway::RestApi";

const BINARY_MEDIA_TYPES_PROPERTY: &str = "BinaryMediaTypes";

/// Reads the binary media types configured for the service.
///
/// # Errors
///
/// Fails if `custom.apiGateway.binaryMediaTypes` is missing, is not a list, is
/// empty, or holds anything other than strings.
pub fn configured_binary_media_types(service_config: &Value) -> Result<Vec<String>> {
    let configured = service_config
        .pointer("/custom/apiGateway/binaryMediaTypes")
        .context("custom.apiGateway.binaryMediaTypes is not configured")?
        .as_array()
        .context("custom.apiGateway.binaryMediaTypes must be a list of media types")?;

    if configured.is_empty() {
        bail!("custom.apiGateway.binaryMediaTypes must list at least one media type");
    }

    configured
        .iter()
        .map(|media_type| {
            media_type
                .as_str()
                .map(str::to_string)
                .with_context(|| format!("media type {media_type} is not a string"))
        })
        .collect()
}

/// Appends `media_types` to the `BinaryMediaTypes` of the template's REST API.
///
/// Existing entries are kept and nothing is de-duplicated. Returns `false`
/// without touching the template when it defines no REST API.
///
/// # Errors
///
/// Fails if the REST API resource has no `Properties` object, or if its
/// `BinaryMediaTypes` is present but not a list.
pub fn add_binary_media_types(template: &mut Value, media_types: &[String]) -> Result<bool> {
    let Some(rest_api) = template
        .get_mut("Resources")
        .and_then(Value::as_object_mut)
        .and_then(|resources| {
            resources.values_mut().find(|resource| {
                resource.get("Type").and_then(Value::as_str) == Some(REST_API_RESOURCE_TYPE)
            })
        })
    else {
        warn!(
            resource_type = REST_API_RESOURCE_TYPE,
            "No REST API resource in template; binary media types not added"
        );
        return Ok(false);
    };

    let properties = rest_api
        .get_mut("Properties")
        .and_then(Value::as_object_mut)
        .context("RestApi Properties property does not exist!")?;

    info!(?media_types, "Adding BinaryMediaTypes to RestApi");

    let combined = properties
        .entry(BINARY_MEDIA_TYPES_PROPERTY)
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .context("RestApi BinaryMediaTypes must be a list")?;
    combined.extend(media_types.iter().cloned().map(Value::String));

    info!(binary_media_types = ?combined, "RestApi BinaryMediaTypes updated");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn template_with(properties: Value) -> Value {
        json!({
            "Resources": {
                "ServerlessDeploymentBucket": {"Type": "AWS::S3::Bucket"},
                "ApiGatewayRestApi": {"Type": "AWS::ApiGateway::RestApi", "Properties": properties}
            }
        })
    }

    #[test]
    fn test_reads_configured_types() {
        let config = json!({"custom": {"apiGateway": {"binaryMediaTypes": ["image/png", "*/*"]}}});
        assert_eq!(
            configured_binary_media_types(&config).unwrap(),
            vec!["image/png".to_string(), "*/*".to_string()]
        );
    }

    #[test]
    fn test_missing_or_empty_config_fails() {
        assert!(configured_binary_media_types(&json!({"custom": {}})).is_err());
        assert!(
            configured_binary_media_types(&json!({"custom": {"apiGateway": {"binaryMediaTypes": []}}}))
                .is_err()
        );
        assert!(
            configured_binary_media_types(&json!({"custom": {"apiGateway": {"binaryMediaTypes": [1]}}}))
                .is_err()
        );
    }

    #[test]
    fn test_appends_without_overwriting() {
        let mut template = template_with(json!({"Name": "dev-site", "BinaryMediaTypes": ["image/png"]}));
        let added =
            add_binary_media_types(&mut template, &["image/png".to_string(), "font/woff2".to_string()])
                .unwrap();
        assert!(added);
        assert_eq!(
            template["Resources"]["ApiGatewayRestApi"]["Properties"]["BinaryMediaTypes"],
            json!(["image/png", "image/png", "font/woff2"])
        );
        assert_eq!(template["Resources"]["ApiGatewayRestApi"]["Properties"]["Name"], "dev-site");
    }

    #[test]
    fn test_creates_list_when_absent() {
        let mut template = template_with(json!({"Name": "dev-site"}));
        add_binary_media_types(&mut template, &["*/*".to_string()]).unwrap();
        assert_eq!(
            template["Resources"]["ApiGatewayRestApi"]["Properties"]["BinaryMediaTypes"],
            json!(["*/*"])
        );
    }

    #[test]
    fn test_no_rest_api_is_a_no_op() {
        let mut template = json!({"Resources": {"Bucket": {"Type": "AWS::S3::Bucket"}}});
        let before = template.clone();
        assert!(!add_binary_media_types(&mut template, &["*/*".to_string()]).unwrap());
        assert_eq!(template, before);
    }

    #[test]
    fn test_rest_api_without_properties_fails() {
        let mut template = json!({"Resources": {"Api": {"Type": "AWS::ApiGateway::RestApi"}}});
        let err = add_binary_media_types(&mut template, &["*/*".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Properties"));
    }
}

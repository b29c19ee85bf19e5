use anyhow::{Context, Result};
use aws_static_file_handler::deploy::{add_binary_media_types, configured_binary_media_types};
use lambda_runtime::tracing::info;
use serde_json::Value;
use std::fs;

/// Registers the service's binary media types on a compiled CloudFormation template.
///
/// Usage: `binary-media-types <serverless.yml> <cloudformation-template.json>`
///
/// The template is rewritten in place.
fn main() -> Result<()> {
    lambda_runtime::tracing::init_default_subscriber();

    let mut args = std::env::args().skip(1);
    let (Some(config_path), Some(template_path)) = (args.next(), args.next()) else {
        anyhow::bail!("usage: binary-media-types <serverless.yml> <cloudformation-template.json>");
    };

    let service_config: Value = serde_yaml::from_str(
        &fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read service config {config_path}"))?,
    )
    .with_context(|| format!("Failed to parse service config {config_path}"))?;

    let mut template: Value = serde_json::from_str(
        &fs::read_to_string(&template_path)
            .with_context(|| format!("Failed to read template {template_path}"))?,
    )
    .with_context(|| format!("Failed to parse template {template_path}"))?;

    let media_types = configured_binary_media_types(&service_config)?;
    if add_binary_media_types(&mut template, &media_types)? {
        fs::write(&template_path, serde_json::to_string_pretty(&template)?)
            .with_context(|| format!("Failed to write template {template_path}"))?;
        info!(template = %template_path, "Template updated");
    }

    Ok(())
}

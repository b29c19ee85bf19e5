//! Template rendering for textual responses.

use crate::models::{HandlerError, ViewData};
use serde_json::{Map, Value};

/// View data key holding the message shown on error pages.
pub const ERROR_TEXT_KEY: &str = "errorText";

/// Built-in error page, used when no custom page is configured or readable.
pub const DEFAULT_ERROR_PAGE: &str = include_str!("templates/error.html");

/// Renders `text` as a Mustache template against `view_data`. Without view
/// data the text is returned untouched.
///
/// A `null` view data still renders, with every placeholder resolving to nothing.
///
/// # Errors
///
/// Returns `HandlerError::Render` if `text` is not a valid template.
pub fn render(text: String, view_data: Option<&Value>) -> Result<String, HandlerError> {
    let Some(data) = view_data else {
        return Ok(text);
    };
    let template = mustache::compile_str(&text)?;
    let rendered = match data {
        Value::Null => template.render_to_string(&Map::new())?,
        data => template.render_to_string(data)?,
    };
    Ok(rendered)
}

/// View data for an error page showing `error_text`.
#[must_use]
pub fn error_view_data(error_text: &str) -> ViewData {
    let mut data = ViewData::new();
    data.insert(ERROR_TEXT_KEY.to_string(), Value::String(error_text.to_string()));
    data
}

/// Renders the built-in error page.
///
/// # Errors
///
/// Returns `HandlerError::Render` if rendering fails.
pub fn default_error_page(error_text: &str) -> Result<String, HandlerError> {
    render(
        DEFAULT_ERROR_PAGE.to_string(),
        Some(&Value::Object(error_view_data(error_text))),
    )
}

//! Construction-time configuration, read from the Lambda environment.

use crate::models::HandlerError;
use std::path::PathBuf;

/// Directory whose files are served. Relative paths resolve beneath `LAMBDA_TASK_ROOT`.
pub const ROOT_DIRECTORY_VAR: &str = "STATIC_FILES_ROOT";
/// Optional error page, relative to the root directory.
pub const CUSTOM_ERROR_PAGE_VAR: &str = "CUSTOM_ERROR_PAGE_PATH";
/// Set by the Lambda runtime to the directory the function package is extracted to.
pub const TASK_ROOT_VAR: &str = "LAMBDA_TASK_ROOT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub root_directory: PathBuf,
    pub custom_error_page_path: Option<PathBuf>,
}

impl HandlerConfig {
    /// Loads the configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `HandlerError::Configuration` if `STATIC_FILES_ROOT` is unset or empty.
    pub fn from_env() -> Result<Self, HandlerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `HandlerError::Configuration` if the root directory is unset or empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HandlerError> {
        let root = lookup(ROOT_DIRECTORY_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| {
                HandlerError::Configuration(format!("{ROOT_DIRECTORY_VAR} must be specified"))
            })?;

        let root_directory = match lookup(TASK_ROOT_VAR).filter(|value| !value.is_empty()) {
            Some(task_root) if root.is_relative() => PathBuf::from(task_root).join(root),
            _ => root,
        };

        let custom_error_page_path = lookup(CUSTOM_ERROR_PAGE_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            root_directory,
            custom_error_page_path,
        })
    }
}

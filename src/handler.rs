use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::StatusCode;
use lambda_runtime::tracing::{debug, error, info, warn};
use lambda_runtime::{Context, Diagnostic, LambdaEvent};
use serde_json::Value;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::config::HandlerConfig;
use crate::files::{FileSource, LocalFileSource};
use crate::mime;
use crate::models::{FileResponse, HandlerError, InvocationContext};
use crate::normalize::normalize;
use crate::render::{self, error_view_data};
use crate::utils::sanitize_for_logging;

/// Status used for error pages when the caller has no more specific one.
pub const DEFAULT_ERROR_STATUS: StatusCode = StatusCode::BAD_REQUEST;

/// Content-Type of the built-in error page.
const DEFAULT_ERROR_PAGE_CONTENT_TYPE: &str = "text/html";

/// Serves files beneath a root directory as API Gateway proxy responses.
///
/// The root directory and the optional custom error page are fixed at
/// construction; each call to [`get`](Self::get) is independent.
pub struct StaticFileHandler {
    root_directory: PathBuf,
    custom_error_page_path: Option<PathBuf>,
    files: Arc<dyn FileSource>,
}

impl StaticFileHandler {
    /// Creates a handler serving files beneath `root_directory` from the local file system.
    ///
    /// # Errors
    ///
    /// Returns `HandlerError::Configuration` if `root_directory` is empty.
    pub fn new(root_directory: impl Into<PathBuf>) -> Result<Self, HandlerError> {
        let root_directory = root_directory.into();
        if root_directory.as_os_str().is_empty() {
            return Err(HandlerError::Configuration(
                "root directory must be specified".to_string(),
            ));
        }
        Ok(Self {
            root_directory,
            custom_error_page_path: None,
            files: Arc::new(LocalFileSource),
        })
    }

    /// Creates a handler from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `HandlerError::Configuration` if the configured root directory is empty.
    pub fn from_config(config: &HandlerConfig) -> Result<Self, HandlerError> {
        let mut handler = Self::new(&config.root_directory)?;
        handler
            .custom_error_page_path
            .clone_from(&config.custom_error_page_path);
        Ok(handler)
    }

    /// Uses the page at `path`, relative to the root directory, for error responses.
    #[must_use]
    pub fn with_custom_error_page(mut self, path: impl Into<PathBuf>) -> Self {
        self.custom_error_page_path = Some(path.into());
        self
    }

    /// Replaces the source files are read from.
    #[must_use]
    pub fn with_file_source(mut self, files: Arc<dyn FileSource>) -> Self {
        self.files = files;
        self
    }

    #[must_use]
    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }

    #[must_use]
    pub fn custom_error_page_path(&self) -> Option<&Path> {
        self.custom_error_page_path.as_deref()
    }

    /// Resolves a proxy event to the file it addresses.
    ///
    /// A missing file is answered with a 404 error page. Text responses are
    /// rendered against the view data of `context`.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is invalid, the file cannot be read for any
    /// reason other than not existing, or a template fails to render.
    pub async fn get(
        &self,
        event: &Value,
        context: &InvocationContext,
    ) -> Result<FileResponse, HandlerError> {
        let request = normalize(event)?;
        info!(
            method = %request.http_method,
            path = ?request.path,
            lookup_path = %request.lookup_path(),
            "Serving static file"
        );

        let file_path = resolve_path(&self.root_directory, Path::new(request.lookup_path()));
        let result = self
            .read_file_as_response(
                &file_path,
                request.lookup_path(),
                context.view_data(),
                StatusCode::OK,
            )
            .await;

        match result {
            Ok(response) => Ok(response),
            Err(error) => match error.response_status() {
                Some(status) => {
                    debug!(error = %error, status = status.as_u16(), "Answering with error page");
                    self.error_response(&error.to_string(), status).await
                }
                None => Err(error),
            },
        }
    }

    /// Builds an HTML error page showing `error_text` with the given status.
    ///
    /// The custom error page is used when it is configured and readable; otherwise
    /// the built-in page is rendered.
    ///
    /// # Errors
    ///
    /// Returns `HandlerError::Render` if the error page fails to render.
    pub async fn error_response(
        &self,
        error_text: &str,
        status: StatusCode,
    ) -> Result<FileResponse, HandlerError> {
        let view_data = Value::Object(error_view_data(error_text));

        if let Some(custom_page) = &self.custom_error_page_path {
            let page_path = resolve_path(&self.root_directory, custom_page);
            match self.files.read(&page_path).await {
                Ok(bytes) => return bytes_as_response(&page_path, &bytes, Some(&view_data), status),
                Err(e) => warn!(
                    error = %e,
                    page = %custom_page.display(),
                    "Custom error page is not readable, falling back to the default page"
                ),
            }
        }

        let body = render::default_error_page(error_text)?;
        Ok(FileResponse::new(
            status.as_u16(),
            DEFAULT_ERROR_PAGE_CONTENT_TYPE,
            body,
            false,
        ))
    }

    /// Builds an error page with [`DEFAULT_ERROR_STATUS`].
    ///
    /// # Errors
    ///
    /// Returns `HandlerError::Render` if the error page fails to render.
    pub async fn bad_request(&self, error_text: &str) -> Result<FileResponse, HandlerError> {
        self.error_response(error_text, DEFAULT_ERROR_STATUS).await
    }

    async fn read_file_as_response(
        &self,
        file_path: &Path,
        request_path: &str,
        view_data: Option<&Value>,
        status: StatusCode,
    ) -> Result<FileResponse, HandlerError> {
        let bytes = self
            .files
            .read(file_path)
            .await
            .map_err(|source| load_error(file_path, request_path, source))?;
        bytes_as_response(file_path, &bytes, view_data, status)
    }
}

fn bytes_as_response(
    file_path: &Path,
    bytes: &[u8],
    view_data: Option<&Value>,
    status: StatusCode,
) -> Result<FileResponse, HandlerError> {
    let content_type = mime::content_type(file_path);
    let is_base64_encoded = mime::is_binary(content_type);
    let body = if is_base64_encoded {
        STANDARD.encode(bytes)
    } else {
        render::render(String::from_utf8_lossy(bytes).into_owned(), view_data)?
    };
    Ok(FileResponse::new(
        status.as_u16(),
        content_type,
        body,
        is_base64_encoded,
    ))
}

fn load_error(file_path: &Path, request_path: &str, source: io::Error) -> HandlerError {
    if source.kind() == io::ErrorKind::NotFound {
        // Only the base name: the resolved path would leak the local layout.
        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        HandlerError::NotFound { file_name }
    } else {
        error!(error = %source, request_path = %request_path, "Failed to read client file");
        HandlerError::Io {
            request_path: request_path.to_string(),
            source,
        }
    }
}

/// Joins `request_path` onto `root` lexically.
///
/// Leading separators of `request_path` do not reset the root, `.` segments are
/// dropped and `..` segments remove the preceding segment. The result is not
/// checked to stay beneath `root`.
#[must_use]
pub fn resolve_path(root: &Path, request_path: &Path) -> PathBuf {
    let mut resolved = root.to_path_buf();
    for component in request_path.components() {
        match component {
            Component::Normal(segment) => resolved.push(segment),
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    resolved
}

fn invocation_context(context: &Context) -> Result<InvocationContext, Diagnostic> {
    context.client_context.as_ref().map_or_else(
        || Ok(InvocationContext::default()),
        |client_context| {
            InvocationContext::from_client_context_custom(&client_context.custom).map_err(|e| {
                error!(error = %e, "Invalid static file handler client context");
                Diagnostic {
                    error_type: "ValidationError".to_string(),
                    error_message: format!("Invalid staticFileHandler client context: {e}"),
                }
            })
        },
    )
}

/// Lambda event handler serving the file addressed by an API Gateway proxy event.
/// Logs the sanitized event when `RUST_LOG=debug/trace`.
///
/// # Errors
///
/// Returns a `Diagnostic` whose `error_type` is the failing error's kind, e.g.
/// `ValidationError`, `PathParameterError`, `ProxyIntegrationError`,
/// `UnderlyingIOError` or `RenderError`. Missing files are not errors; they are
/// answered with a 404 page.
pub async fn function_handler(
    event: LambdaEvent<Value>,
    handler: &StaticFileHandler,
) -> Result<FileResponse, Diagnostic> {
    let (payload, context) = event.into_parts();
    debug!(event = %sanitize_for_logging(&payload), "Received event");

    let invocation = invocation_context(&context)?;

    handler.get(&payload, &invocation).await.map_err(|e| {
        error!(error_type = e.name(), error = %e, "Request failed");
        Diagnostic::from(e)
    })
}

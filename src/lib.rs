//! Serves static files from AWS Lambda behind API Gateway proxy integrations.
//!
//! [`StaticFileHandler`] resolves v1 and v2 proxy events to files beneath a root
//! directory, base64-encodes binary content, renders text content against
//! caller-supplied view data and answers missing files with an error page.

pub mod config;
pub mod deploy;
pub mod files;
pub mod handler;
pub mod mime;
pub mod models;
pub mod normalize;
pub mod render;
pub mod utils;

pub use config::HandlerConfig;
pub use files::{FileSource, LocalFileSource};
pub use handler::{StaticFileHandler, function_handler};
pub use models::{FileResponse, HandlerError, InvocationContext, ViewData};

pub mod context;
pub mod error;
pub mod event;
pub mod response;

pub use context::{InvocationContext, ViewData};
pub use error::HandlerError;
pub use event::{EventShape, ProxyRequest, RequestDescriptor};
pub use response::FileResponse;

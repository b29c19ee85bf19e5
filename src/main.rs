use aws_static_file_handler::{HandlerConfig, StaticFileHandler, function_handler};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Use Lambda runtime's built-in tracing subscriber for CloudWatch Logs
    lambda_runtime::tracing::init_default_subscriber();

    let config = HandlerConfig::from_env()?;
    let handler = StaticFileHandler::from_config(&config)?;
    let handler = &handler;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(event, handler).await
    }))
    .await
}

#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use latest_videos::adapters::gateway::{self, GatewayRequest, GatewayResponse};
#[cfg(feature = "lambda")]
use latest_videos::utils::logger;
#[cfg(feature = "lambda")]
use latest_videos::LambdaConfig;

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<GatewayRequest>) -> Result<GatewayResponse, Error> {
    tracing::debug!(request_id = %event.context.request_id, "latest-videos invocation");

    // Failures always come back as an HTTP response, never as an invocation error.
    Ok(gateway::handle_event(&event.payload, LambdaConfig::from_env()).await)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}

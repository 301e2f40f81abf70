//! API Gateway to DynamoDB handler - Lambda entry point
//!
//! Loads configuration, sets up logging, builds the record store once per
//! process and then serves invocations until the runtime shuts down.

mod config;
mod gateway;
mod handler;
mod services;

use lambda_http::{run, service_fn, Error};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AppConfig, LogFormat};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = AppConfig::from_env()?;
    init_tracing(&config);

    tracing::info!(
        table_name = %config.table_name,
        storage = ?config.storage,
        "Starting API Gateway to DynamoDB handler"
    );

    let store = services::connect(&config).await;
    let store = store.as_ref();

    run(service_fn(move |event| handler::function_handler(store, event))).await
}

/// Initialize tracing. CloudWatch stamps ingestion time, so timestamps are omitted.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(false)
                    .without_time(),
            )
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).without_time())
            .init(),
    }
}

//! The request handler
//!
//! Each invocation writes exactly one record: the one described by the JSON
//! body, or the default record when the body is empty. Malformed payloads are
//! rejected with 400 before the store is touched; store failures become 500.

use apigw_dynamodb_sdk::prelude::*;
use lambda_http::{Body, Error};
use tracing::Instrument;

use crate::gateway;

/// Body message returned after a successful write
pub const SUCCESS_MESSAGE: &str = "Successfully inserted data!";

/// Lambda entry point: convert the event, handle it, convert the response back.
pub async fn function_handler(
    store: &dyn RecordStore,
    event: lambda_http::Request,
) -> Result<lambda_http::Response<Body>, Error> {
    let mut req = gateway::request_metadata(&event);

    let response = match gateway::decode_body(event.body()) {
        Ok(body) => {
            req.body = body;
            handle(store, req).await
        }
        Err(err) => {
            let span = invocation_span(store, &req);
            span.in_scope(|| failure(err))
        }
    };

    gateway::into_lambda(response)
}

/// Handle one request against the given store.
pub async fn handle(store: &dyn RecordStore, req: Request) -> Response {
    let span = invocation_span(store, &req);

    async move {
        match insert_record(store, &req).await {
            Ok(response) => response,
            Err(err) => failure(err),
        }
    }
    .instrument(span)
    .await
}

async fn insert_record(store: &dyn RecordStore, req: &Request) -> Result<Response, HandlerError> {
    tracing::info!(event = "request_received", has_body = req.has_body(), "Request received");

    match req.body.as_deref().filter(|body| !body.is_empty()) {
        Some(body) => {
            let record = Record::from_body(body)?;
            tracing::info!(event = "processing_payload", item_id = %record.id, "Processing payload");

            store.put(&record).await?;
            tracing::info!(event = "data_inserted", item_id = %record.id, "Data inserted");
        }
        None => {
            tracing::info!(event = "no_payload_received", "No payload received, inserting default record");

            let record = Record::with_generated_id();
            store.put(&record).await?;
            tracing::info!(event = "default_data_inserted", item_id = %record.id, "Default data inserted");
        }
    }

    Ok(Response::message(SUCCESS_MESSAGE))
}

fn invocation_span(store: &dyn RecordStore, req: &Request) -> tracing::Span {
    tracing::info_span!(
        "invocation",
        request_id = %req.request_id,
        source_ip = %req.source_ip(),
        user_agent = %req.user_agent(),
        table_name = %store.table_name(),
    )
}

fn failure(err: HandlerError) -> Response {
    let status = err.status_code();
    if err.is_client_error() {
        tracing::warn!(event = "request_failed", status, error = %err, "Rejected request");
    } else {
        tracing::error!(event = "request_failed", status, error = %err, "Request failed");
    }
    err.to_response()
}

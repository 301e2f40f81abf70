//! Conversion between `lambda_http` events and handler types

use std::collections::HashMap;

use apigw_dynamodb_sdk::prelude::*;
use lambda_http::request::RequestContext;
use lambda_http::{Body, Error, RequestExt};

/// Build a [`Request`] from an API Gateway event, without its body.
///
/// Client IP and user agent come from the API Gateway request context when
/// present, falling back to the `X-Forwarded-For` and `User-Agent` headers.
pub fn request_metadata(event: &lambda_http::Request) -> Request {
    let headers: HashMap<String, String> = event
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    let mut req = Request {
        method: event.method().to_string(),
        path: event.uri().path().to_string(),
        headers,
        request_id: event
            .lambda_context_ref()
            .map(|ctx| ctx.request_id.clone())
            .unwrap_or_default(),
        ..Request::default()
    };

    let (context_ip, context_agent) = match event.request_context_ref() {
        Some(RequestContext::ApiGatewayV1(ctx)) => {
            (ctx.identity.source_ip.clone(), ctx.identity.user_agent.clone())
        }
        Some(RequestContext::ApiGatewayV2(ctx)) => {
            (ctx.http.source_ip.clone(), ctx.http.user_agent.clone())
        }
        _ => (None, None),
    };

    req.client_ip = context_ip.or_else(|| forwarded_for(&req));
    req.user_agent = context_agent.or_else(|| non_empty_header(&req, "user-agent"));
    req
}

/// Decode the event body as text. An empty event body yields `None`.
pub fn decode_body(body: &Body) -> Result<Option<String>, HandlerError> {
    match body {
        Body::Empty => Ok(None),
        Body::Text(text) => Ok(Some(text.clone())),
        Body::Binary(bytes) => String::from_utf8(bytes.clone())
            .map(Some)
            .map_err(|e| HandlerError::MalformedPayload(format!("body is not valid UTF-8: {}", e))),
    }
}

/// Turn a handler [`Response`] into the `lambda_http` response type.
pub fn into_lambda(response: Response) -> Result<lambda_http::Response<Body>, Error> {
    let mut builder = lambda_http::Response::builder().status(response.status);
    for (name, value) in &response.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let body = response.body.map(Body::Text).unwrap_or(Body::Empty);
    let response = builder.body(body).map_err(Box::new)?;

    Ok(response)
}

fn non_empty_header(req: &Request, name: &str) -> Option<String> {
    req.header(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// First hop of `X-Forwarded-For`, which is the original client
fn forwarded_for(req: &Request) -> Option<String> {
    non_empty_header(req, "x-forwarded-for")
        .and_then(|v| v.split(',').next().map(|ip| ip.trim().to_string()))
        .filter(|ip| !ip.is_empty())
}

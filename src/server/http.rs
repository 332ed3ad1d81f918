//! HTTP transport: a single batched-method endpoint.
//!
//! One route, `POST /jmap`. Non-POST requests get a 405 from axum's method
//! routing; the CORS preflight and response headers are handled by
//! `tower-http`'s [`CorsLayer`]. A malformed body is a 400; a
//! batch-aborting fault is a 500 with no `methodResponses` body.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::Json,
    routing::post,
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::server::dispatch::Dispatcher;
use crate::types::{RequestEnvelope, ResponseEnvelope};

/// Builds the application router.
///
/// `allow_origin` is the single origin permitted to make cross-origin
/// requests (the original deployment serves a browser app on another
/// port).
pub fn router(dispatcher: Arc<Dispatcher>, allow_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/jmap", post(handle_batch))
        .layer(cors)
        .with_state(dispatcher)
}

/// `POST /jmap`: resolve one batch and assemble the response envelope.
async fn handle_batch(
    State(dispatcher): State<Arc<Dispatcher>>,
    payload: Result<Json<RequestEnvelope>, JsonRejection>,
) -> Result<Json<ResponseEnvelope>, (StatusCode, String)> {
    let Json(envelope) = payload
        .map_err(|rejection| (StatusCode::BAD_REQUEST, format!("invalid request body: {rejection}")))?;

    let responses = dispatcher
        .run_batch(envelope.method_calls)
        .await
        .map_err(|err| {
            error!(error = %err, "batch aborted");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        })?;

    Ok(Json(ResponseEnvelope::assemble(responses)))
}

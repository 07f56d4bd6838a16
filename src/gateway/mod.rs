//! Gateway: validates requests in front of the backend and forwards the
//! valid ones. Invalid requests are answered with 400 without contacting
//! the backend.

pub mod client;
pub mod routes;

use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tower_http::trace::TraceLayer;

use crate::domain::{Clock, DomainError, SystemClock};
pub use client::BackendClient;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Rejected(#[from] DomainError),

    #[error("Backend request failed: {0}")]
    Backend(#[from] reqwest::Error),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::Rejected(e) => e.into_response(),
            GatewayError::Backend(e) => {
                tracing::error!("Backend unreachable: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({
                        "error": "BadGateway",
                        "message": "Backend server is unreachable",
                    })),
                )
                    .into_response()
            }
        }
    }
}

/// State shared by the gateway handlers
#[derive(Clone)]
pub struct Gateway {
    pub client: BackendClient,
    pub clock: Arc<dyn Clock>,
}

impl Gateway {
    pub fn new(client: BackendClient) -> Self {
        Self::with_clock(client, Arc::new(SystemClock))
    }

    pub fn with_clock(client: BackendClient, clock: Arc<dyn Clock>) -> Self {
        Self { client, clock }
    }
}

pub fn gateway_router(gateway: Gateway) -> Router {
    routes::routes(gateway).layer(TraceLayer::new_for_http())
}

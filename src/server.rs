// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! HTTPS endpoints of the webhook

use crate::admission::AdmissionHandler;
use crate::config::Config;
use crate::constants::server::{
    ADMISSION_ROUTE, HEADER_READ_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS, STATUS_ROUTE,
};
use crate::error::{InjectorError, Result};
use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use hyper_util::rt::TokioTimer;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

impl IntoResponse for InjectorError {
    fn into_response(self) -> Response {
        let status = match &self {
            InjectorError::InvalidReview(_) => StatusCode::BAD_REQUEST,
            InjectorError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

#[derive(Clone)]
struct WebhookState {
    handler: Arc<AdmissionHandler>,
    request_timeout: Duration,
}

/// Build the router serving `POST /admission` and `GET /status`
pub fn router(handler: Arc<AdmissionHandler>) -> Router {
    router_with_timeout(handler, Duration::from_secs(REQUEST_TIMEOUT_SECS))
}

/// [`router`] with admission requests cut off after `request_timeout`
pub fn router_with_timeout(handler: Arc<AdmissionHandler>, request_timeout: Duration) -> Router {
    Router::new()
        .route(ADMISSION_ROUTE, post(admission))
        .route(STATUS_ROUTE, get(status))
        .layer(middleware::from_fn(log_request))
        .with_state(WebhookState {
            handler,
            request_timeout,
        })
}

async fn admission(State(state): State<WebhookState>, body: Bytes) -> Response {
    let result = tokio::time::timeout(state.request_timeout, state.handler.review(&body)).await;
    let review = match result {
        Ok(Ok(review)) => review,
        Ok(Err(e)) => return e.into_response(),
        Err(_) => {
            warn!(
                timeout_ms = state.request_timeout.as_millis() as u64,
                "Admission request timed out"
            );
            return InjectorError::Timeout(format!(
                "admission not completed within {:?}",
                state.request_timeout
            ))
            .into_response();
        }
    };

    match serde_json::to_vec(&review) {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            bytes,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to serialize admission review: {}", e);
            InjectorError::from(e).into_response()
        }
    }
}

async fn status() -> StatusCode {
    StatusCode::OK
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    info!(
        %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Handled request"
    );
    response
}

/// Serve the webhook over TLS until the listener fails
pub async fn serve(config: &Config, handler: AdmissionHandler) -> Result<()> {
    let tls_config = RustlsConfig::from_pem_file(&config.tls_cert_path, &config.tls_key_path)
        .await
        .map_err(|e| {
            InjectorError::TlsError(format!(
                "Failed to load key pair from {} and {}: {}",
                config.tls_cert_path.display(),
                config.tls_key_path.display(),
                e
            ))
        })?;

    info!(
        addr = %config.bind_address,
        server_name = %config.server_name,
        "Starting admission webhook server"
    );

    let mut server = axum_server::bind_rustls(config.bind_address, tls_config);
    // Slow clients may not hold a connection open without sending headers
    server
        .http_builder()
        .http1()
        .timer(TokioTimer::new())
        .header_read_timeout(Duration::from_secs(HEADER_READ_TIMEOUT_SECS));

    server
        .serve(router(Arc::new(handler)).into_make_service())
        .await?;

    Ok(())
}

use crate::core::forms::descriptor;
use crate::core::relay::FormRelay;
use crate::core::{Destination, FormKind, SubmissionRequest};
use crate::utils::error::{RelayError, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match self.field() {
            Some(field) => json!({ "message": self.user_friendly_message(), "field": field }),
            None => json!({ "message": self.user_friendly_message() }),
        };

        (status, Json(body)).into_response()
    }
}

/// 每種表單一條 POST 路由，外加健康檢查
pub fn router<D: Destination + 'static>(relay: Arc<FormRelay<D>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let mut app = Router::new().route("/healthz", get(health_handler));

    for kind in FormKind::ALL {
        app = app.route(
            descriptor(kind).route,
            post(
                move |State(relay): State<Arc<FormRelay<D>>>, body: Bytes| {
                    submit_handler(relay, kind, body)
                },
            ),
        );
    }

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(relay)
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn submit_handler<D: Destination>(
    relay: Arc<FormRelay<D>>,
    kind: FormKind,
    body: Bytes,
) -> std::result::Result<Json<Value>, RelayError> {
    let request = SubmissionRequest::from_body(kind, &body);
    let response = relay.relay_request(&request).await?;
    Ok(Json(descriptor(kind).success_body(response.body)))
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    if let Ok(address) = listener.local_addr() {
        tracing::info!("🚀 Listening on {}", address);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn response_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_response() {
        let response = RelayError::validation("city", "City").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response_json(response).await,
            json!({"message": "City is required.", "field": "city"})
        );
    }

    #[tokio::test]
    async fn test_upstream_error_response() {
        let response = RelayError::UpstreamError {
            message: "Upstream error (status 503)".to_string(),
            status: Some(503),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // 上游錯誤沒有 field
        assert_eq!(
            response_json(response).await,
            json!({"message": "Upstream error (status 503)"})
        );
    }

    #[tokio::test]
    async fn test_transport_error_response_is_generic() {
        let response = RelayError::UpstreamError {
            message: "error sending request: connection refused".to_string(),
            status: None,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response_json(response).await,
            json!({"message": "Something went wrong"})
        );
    }
}

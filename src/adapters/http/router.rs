//! Top-level router.

use std::time::Duration;

use axum::http::HeaderValue;
use axum::{routing::get, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::charges::charge_routes;
use super::state::AppState;
use super::webhooks::webhook_routes;

/// GET /health - liveness check
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Builds the full router:
/// - `/charges` - caller identity required
/// - `/webhooks` - provider authenticated
/// - `/health`
pub fn app_router(state: AppState, request_timeout: Duration, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/charges", charge_routes())
        .nest("/webhooks", webhook_routes())
        .with_state(state)
        .layer(cors_layer(cors_origins))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryAthleteDirectory, InMemoryAuthorizationRepository, InMemoryChargeRepository,
        InMemoryCompetitionEventReader, InMemoryInscriptionRepository,
        InMemoryMembershipRepository, InMemoryProviderCatalog,
    };
    use crate::domain::webhook::{CoraBasicAuthVerifier, PagBankSignatureVerifier};
    use crate::ports::GatewayRegistry;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState {
            charges: Arc::new(InMemoryChargeRepository::new()),
            memberships: Arc::new(InMemoryMembershipRepository::new()),
            inscriptions: Arc::new(InMemoryInscriptionRepository::new()),
            events: Arc::new(InMemoryCompetitionEventReader::new()),
            providers: Arc::new(InMemoryProviderCatalog::new()),
            athletes: Arc::new(InMemoryAthleteDirectory::new()),
            authorizations: Arc::new(InMemoryAuthorizationRepository::new()),
            gateways: GatewayRegistry::new(),
            cora_verifier: CoraBasicAuthVerifier::new(None, None),
            pagbank_verifier: PagBankSignatureVerifier::new(None),
        }
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = app_router(state(), Duration::from_secs(5), &[]);
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn charges_require_caller() {
        let app = app_router(state(), Duration::from_secs(5), &[]);
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/charges/{}", uuid::Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unconfigured_pagbank_webhook_fails_closed() {
        let app = app_router(state(), Duration::from_secs(5), &[]);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/webhooks/gateway-b")
                    .body(Body::from(r#"{"id":"ORDE_1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

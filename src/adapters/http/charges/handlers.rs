//! HTTP handlers for charge endpoints.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireCaller;
use crate::adapters::http::state::AppState;
use crate::application::handlers::charge::{CreateChargeCommand, GetChargeQuery};
use crate::domain::charge::ChargeError;
use crate::domain::foundation::{ChargeId, ProviderId};

use super::dto::{ChargeCreatedResponse, ChargeView, CreateChargeRequest};

/// POST /charges/:target_id - Create or reuse a charge for a membership or
/// inscription.
///
/// 201 for a new charge, 200 when an existing pending charge is returned.
pub async fn create_charge(
    State(state): State<AppState>,
    RequireCaller(requester): RequireCaller,
    Path(target_id): Path<Uuid>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request = parse_body(&body)?;

    let cmd = CreateChargeCommand {
        target_id,
        requester,
        provider_id: request.provider_id.map(ProviderId::from_uuid),
        force_new: request.force_new,
    };

    let result = state.create_charge_handler().handle(cmd).await?;

    let status = if result.reused {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(ChargeCreatedResponse::from(result))))
}

/// GET /charges/:charge_id - Fetch a charge the caller may see.
pub async fn get_charge(
    State(state): State<AppState>,
    RequireCaller(requester): RequireCaller,
    Path(charge_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetChargeQuery {
        charge_id: ChargeId::from_uuid(charge_id),
        requester,
    };

    let charge = state.get_charge_handler().handle(query).await?;

    Ok(Json(ChargeView::from(charge)))
}

fn parse_body(body: &[u8]) -> Result<CreateChargeRequest, ChargeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreateChargeRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ChargeError::validation(format!("Invalid request body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_uses_defaults() {
        let request = parse_body(b"").unwrap();
        assert!(!request.force_new);
        assert!(request.provider_id.is_none());
    }

    #[test]
    fn malformed_body_is_a_validation_error() {
        assert!(matches!(parse_body(b"{force"), Err(ChargeError::Validation(_))));
    }

    #[test]
    fn provider_id_is_parsed() {
        let id = Uuid::new_v4();
        let body = format!(r#"{{"providerId":"{}"}}"#, id);
        assert_eq!(parse_body(body.as_bytes()).unwrap().provider_id, Some(id));
    }
}

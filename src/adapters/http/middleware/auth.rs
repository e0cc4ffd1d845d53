//! Caller identity extractor.
//!
//! Authentication happens upstream. The gateway in front of this service
//! forwards the authenticated user as headers:
//!
//! ```text
//! X-User-Id:   <opaque user id>      (required)
//! X-User-Role: admin | <anything>    (optional, defaults to member)
//! ```
//!
//! Webhook routes do not use this extractor; providers authenticate with
//! their own mechanisms.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{Requester, Role, UserId};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Extractor that requires a caller identity.
///
/// ```ignore
/// async fn handler(RequireCaller(requester): RequireCaller) -> impl IntoResponse {
///     requester.id.to_string()
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireCaller(pub Requester);

impl<S> axum::extract::FromRequestParts<S> for RequireCaller
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let id = parts
                .headers
                .get(USER_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| UserId::new(s.trim()).ok())
                .ok_or(AuthRejection::Unauthenticated)?;

            let role = parts
                .headers
                .get(USER_ROLE_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(Role::from_label)
                .unwrap_or(Role::Member);

            Ok(RequireCaller(Requester { id, role }))
        })
    }
}

#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No usable `X-User-Id` header.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthRejection::Unauthenticated => (StatusCode::UNAUTHORIZED, "Authentication required"),
        };

        (
            status,
            Json(serde_json::json!({
                "code": "UNAUTHENTICATED",
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    async fn extract(headers: &[(&str, &str)]) -> Result<RequireCaller, AuthRejection> {
        let mut builder = Request::builder().uri("/charges/x");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let (mut parts, _body) = builder.body(()).unwrap().into_parts();
        RequireCaller::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn member_by_default() {
        let RequireCaller(requester) = extract(&[("X-User-Id", "user-1")]).await.unwrap();
        assert_eq!(requester.id.as_str(), "user-1");
        assert!(!requester.is_admin());
    }

    #[tokio::test]
    async fn admin_role_header() {
        let RequireCaller(requester) = extract(&[("X-User-Id", "root"), ("X-User-Role", "Admin")])
            .await
            .unwrap();
        assert!(requester.is_admin());
    }

    #[tokio::test]
    async fn missing_user_is_rejected() {
        let result = extract(&[("X-User-Role", "admin")]).await;
        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    #[tokio::test]
    async fn rejection_is_401() {
        let response = AuthRejection::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

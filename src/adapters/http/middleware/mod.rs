//! HTTP middleware and extractors for axum.
//!
//! - `auth` - Caller identity forwarded by the upstream auth layer

pub mod auth;

pub use auth::{AuthRejection, RequireCaller, USER_ID_HEADER, USER_ROLE_HEADER};

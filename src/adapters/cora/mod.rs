//! Cora (Gateway-A) adapter: mTLS + OAuth invoice API.

mod cora_adapter;
mod extraction;
mod token_cache;
mod types;

pub use cora_adapter::{CoraConfig, CoraPaymentAdapter, CORA_PRODUCTION_URL, CORA_STAGING_URL};
pub use extraction::extract_invoice;
pub use token_cache::{TokenCache, TokenGrant, EXPIRY_SAFETY_MARGIN};

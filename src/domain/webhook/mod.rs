//! Webhook domain - provider notification authenticity and vocabulary.

mod errors;
mod notification;
mod status_mapping;
mod verifier;

pub use errors::WebhookError;
pub use notification::{parse_cora_notification, parse_pagbank_notification, GatewayNotification};
pub use status_mapping::{map_cora_status, map_pagbank_status, NormalizedStatus};
pub use verifier::{
    compute_pagbank_token, BasicAuthOutcome, CoraBasicAuthVerifier, PagBankSignatureVerifier,
};

#[cfg(test)]
pub use verifier::basic_auth_header;

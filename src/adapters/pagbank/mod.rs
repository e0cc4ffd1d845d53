//! PagBank (Gateway-B) adapter: bearer-token PIX orders.

mod pagbank_adapter;
mod types;

pub use pagbank_adapter::{
    extract_order, PagBankConfig, PagBankPaymentAdapter, PAGBANK_PRODUCTION_URL,
    PAGBANK_SANDBOX_URL,
};

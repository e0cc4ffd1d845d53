//! Charge repository port.
//!
//! # Design
//!
//! - **Conditional transitions**: `transition_if_pending` is a compare-and-set
//!   on `status = pending`, so concurrent or repeated notifications settle a
//!   charge exactly once
//! - **Rollback by delete**: a charge whose provider call failed is removed

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::charge::{Charge, ChargeTarget, ChargeTransition, GatewayKind, PaymentDetails};
use crate::domain::foundation::{ChargeId, DomainError};

#[async_trait]
pub trait ChargeRepository: Send + Sync {
    async fn insert(&self, charge: &Charge) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ChargeId) -> Result<Option<Charge>, DomainError>;

    /// Most recent pending charge for the target that already carries a PIX
    /// payload, boleto line or provider transaction id.
    async fn find_reusable_pending(
        &self,
        target: &ChargeTarget,
    ) -> Result<Option<Charge>, DomainError>;

    async fn find_by_provider_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Charge>, DomainError>;

    /// Stores what the provider returned for a creation call.
    async fn record_payment_details(
        &self,
        id: &ChargeId,
        details: &PaymentDetails,
    ) -> Result<(), DomainError>;

    /// Moves a pending charge to another provider and fee.
    async fn reassign_provider(
        &self,
        id: &ChargeId,
        provider: &str,
        gateway: GatewayKind,
        amount: Decimal,
    ) -> Result<(), DomainError>;

    /// Applies `transition` only if the charge is still pending.
    ///
    /// Returns the updated charge, or `None` when nothing changed.
    async fn transition_if_pending(
        &self,
        id: &ChargeId,
        transition: &ChargeTransition,
    ) -> Result<Option<Charge>, DomainError>;

    async fn delete(&self, id: &ChargeId) -> Result<(), DomainError>;
}

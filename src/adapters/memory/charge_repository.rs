//! In-memory charge repository.
//!
//! Keeps charges in insertion order so "most recent" is well defined even
//! when two charges share a timestamp. Conditional transitions run under a
//! single write lock.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::charge::{Charge, ChargeTarget, ChargeTransition, GatewayKind, PaymentDetails};
use crate::domain::foundation::{ChargeId, DomainError, ErrorCode};
use crate::ports::ChargeRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryChargeRepository {
    charges: Arc<RwLock<Vec<Charge>>>,
}

impl InMemoryChargeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored charge, oldest first.
    pub async fn all(&self) -> Vec<Charge> {
        self.charges.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.charges.read().await.len()
    }
}

fn not_found(id: &ChargeId) -> DomainError {
    DomainError::new(ErrorCode::NotFound, format!("Charge not found: {}", id))
}

#[async_trait]
impl ChargeRepository for InMemoryChargeRepository {
    async fn insert(&self, charge: &Charge) -> Result<(), DomainError> {
        let mut charges = self.charges.write().await;
        if charges.iter().any(|c| c.id == charge.id) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Charge already exists: {}", charge.id),
            ));
        }
        charges.push(charge.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ChargeId) -> Result<Option<Charge>, DomainError> {
        let charges = self.charges.read().await;
        Ok(charges.iter().find(|c| &c.id == id).cloned())
    }

    async fn find_reusable_pending(
        &self,
        target: &ChargeTarget,
    ) -> Result<Option<Charge>, DomainError> {
        let charges = self.charges.read().await;
        Ok(charges
            .iter()
            .rev()
            .find(|c| &c.target == target && c.is_reusable())
            .cloned())
    }

    async fn find_by_provider_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Charge>, DomainError> {
        let charges = self.charges.read().await;
        Ok(charges
            .iter()
            .rev()
            .find(|c| c.provider_transaction_id.as_deref() == Some(transaction_id))
            .cloned())
    }

    async fn record_payment_details(
        &self,
        id: &ChargeId,
        details: &PaymentDetails,
    ) -> Result<(), DomainError> {
        let mut charges = self.charges.write().await;
        let charge = charges
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| not_found(id))?;
        charge.record_payment_details(details.clone());
        Ok(())
    }

    async fn reassign_provider(
        &self,
        id: &ChargeId,
        provider: &str,
        gateway: GatewayKind,
        amount: Decimal,
    ) -> Result<(), DomainError> {
        let mut charges = self.charges.write().await;
        let charge = charges
            .iter_mut()
            .find(|c| &c.id == id && c.status.is_pending())
            .ok_or_else(|| not_found(id))?;
        charge.reassign(provider, gateway, amount);
        Ok(())
    }

    async fn transition_if_pending(
        &self,
        id: &ChargeId,
        transition: &ChargeTransition,
    ) -> Result<Option<Charge>, DomainError> {
        let mut charges = self.charges.write().await;
        let Some(charge) = charges.iter_mut().find(|c| &c.id == id) else {
            return Ok(None);
        };

        if !charge.status.is_pending() {
            return Ok(None);
        }

        charge.apply_transition(transition)?;
        Ok(Some(charge.clone()))
    }

    async fn delete(&self, id: &ChargeId) -> Result<(), DomainError> {
        self.charges.write().await.retain(|c| &c.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::charge::ChargeStatus;
    use crate::domain::foundation::{MembershipId, Timestamp};
    use rust_decimal_macros::dec;

    fn target() -> ChargeTarget {
        ChargeTarget::Membership(MembershipId::new())
    }

    fn with_pix(pix: &str) -> PaymentDetails {
        PaymentDetails {
            transaction_id: None,
            pix_payload: Some(pix.to_string()),
            boleto_line: None,
        }
    }

    #[tokio::test]
    async fn reusable_lookup_returns_most_recent_with_details() {
        let repo = InMemoryChargeRepository::new();
        let target = target();

        let mut older = Charge::new_pending(target, dec!(10), "Cora", GatewayKind::Cora);
        older.record_payment_details(with_pix("old"));
        let mut newer = Charge::new_pending(target, dec!(10), "Cora", GatewayKind::Cora);
        newer.record_payment_details(with_pix("new"));
        let bare = Charge::new_pending(target, dec!(10), "Cora", GatewayKind::Cora);

        repo.insert(&older).await.unwrap();
        repo.insert(&newer).await.unwrap();
        repo.insert(&bare).await.unwrap();

        let found = repo.find_reusable_pending(&target).await.unwrap().unwrap();
        assert_eq!(found.id, newer.id);
    }

    #[tokio::test]
    async fn transition_applies_once() {
        let repo = InMemoryChargeRepository::new();
        let charge = Charge::new_pending(target(), dec!(10), "Cora", GatewayKind::Cora);
        repo.insert(&charge).await.unwrap();

        let paid = ChargeTransition::Paid {
            paid_at: Timestamp::now(),
            details: PaymentDetails::default(),
        };

        let first = repo.transition_if_pending(&charge.id, &paid).await.unwrap();
        assert_eq!(first.map(|c| c.status), Some(ChargeStatus::Paid));

        let second = repo.transition_if_pending(&charge.id, &paid).await.unwrap();
        assert!(second.is_none());

        let failed = repo
            .transition_if_pending(&charge.id, &ChargeTransition::Failed)
            .await
            .unwrap();
        assert!(failed.is_none());
        let stored = repo.find_by_id(&charge.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ChargeStatus::Paid);
    }

    #[tokio::test]
    async fn unknown_charge_transition_is_none() {
        let repo = InMemoryChargeRepository::new();
        let result = repo
            .transition_if_pending(&ChargeId::new(), &ChargeTransition::Failed)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn lookup_by_transaction_id() {
        let repo = InMemoryChargeRepository::new();
        let mut charge = Charge::new_pending(target(), dec!(10), "PagBank", GatewayKind::PagBank);
        charge.provider_transaction_id = Some("ORDE_1".to_string());
        repo.insert(&charge).await.unwrap();

        let found = repo.find_by_provider_transaction_id("ORDE_1").await.unwrap();
        assert_eq!(found.map(|c| c.id), Some(charge.id));
        assert!(repo.find_by_provider_transaction_id("ORDE_2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_charge() {
        let repo = InMemoryChargeRepository::new();
        let charge = Charge::new_pending(target(), dec!(10), "Cora", GatewayKind::Cora);
        repo.insert(&charge).await.unwrap();
        repo.delete(&charge.id).await.unwrap();
        assert_eq!(repo.count().await, 0);
    }
}

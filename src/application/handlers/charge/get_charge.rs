//! GetChargeHandler - Query handler for a single charge.

use std::sync::Arc;

use crate::domain::charge::{Charge, ChargeError};
use crate::domain::foundation::{ChargeId, Requester};
use crate::ports::{ChargeRepository, InscriptionRepository, MembershipRepository};

use super::target::target_owner;

#[derive(Debug, Clone)]
pub struct GetChargeQuery {
    pub charge_id: ChargeId,
    pub requester: Requester,
}

pub struct GetChargeHandler {
    charges: Arc<dyn ChargeRepository>,
    memberships: Arc<dyn MembershipRepository>,
    inscriptions: Arc<dyn InscriptionRepository>,
}

impl GetChargeHandler {
    pub fn new(
        charges: Arc<dyn ChargeRepository>,
        memberships: Arc<dyn MembershipRepository>,
        inscriptions: Arc<dyn InscriptionRepository>,
    ) -> Self {
        Self {
            charges,
            memberships,
            inscriptions,
        }
    }

    /// Returns the charge if the requester owns its target or is an
    /// administrator. A charge whose target is gone is visible to
    /// administrators only.
    pub async fn handle(&self, query: GetChargeQuery) -> Result<Charge, ChargeError> {
        let charge = self
            .charges
            .find_by_id(&query.charge_id)
            .await?
            .ok_or_else(|| ChargeError::not_found(format!("Charge {} not found", query.charge_id)))?;

        if query.requester.is_admin() {
            return Ok(charge);
        }

        let owner = target_owner(
            self.memberships.as_ref(),
            self.inscriptions.as_ref(),
            &charge.target,
        )
        .await?;

        match owner {
            Some(owner) if query.requester.can_act_for(&owner) => Ok(charge),
            _ => Err(ChargeError::forbidden("Charge belongs to another user")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryChargeRepository, InMemoryInscriptionRepository, InMemoryMembershipRepository,
    };
    use crate::domain::charge::{ChargeTarget, GatewayKind};
    use crate::domain::foundation::{AthleteId, MembershipId, UserId};
    use crate::domain::membership::{Membership, MembershipStatus};
    use rust_decimal_macros::dec;

    async fn setup() -> (GetChargeHandler, Charge) {
        let charges = InMemoryChargeRepository::new();
        let memberships = InMemoryMembershipRepository::new();
        let membership = Membership::new(
            MembershipId::new(),
            AthleteId::new(),
            UserId::new("owner").unwrap(),
            MembershipStatus::AguardandoPagamento,
        );
        memberships.insert(membership.clone()).await;

        let charge = Charge::new_pending(
            ChargeTarget::Membership(membership.id),
            dec!(100),
            "Cora",
            GatewayKind::Cora,
        );
        charges.insert(&charge).await.unwrap();

        let handler = GetChargeHandler::new(
            Arc::new(charges),
            Arc::new(memberships),
            Arc::new(InMemoryInscriptionRepository::new()),
        );
        (handler, charge)
    }

    #[tokio::test]
    async fn owner_sees_charge() {
        let (handler, charge) = setup().await;
        let found = handler
            .handle(GetChargeQuery {
                charge_id: charge.id,
                requester: Requester::member(UserId::new("owner").unwrap()),
            })
            .await
            .unwrap();
        assert_eq!(found.id, charge.id);
    }

    #[tokio::test]
    async fn stranger_is_forbidden() {
        let (handler, charge) = setup().await;
        let err = handler
            .handle(GetChargeQuery {
                charge_id: charge.id,
                requester: Requester::member(UserId::new("stranger").unwrap()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ChargeError::Forbidden(_)));
    }

    #[tokio::test]
    async fn unknown_charge_is_not_found() {
        let (handler, _) = setup().await;
        let err = handler
            .handle(GetChargeQuery {
                charge_id: ChargeId::new(),
                requester: Requester::admin(UserId::new("admin").unwrap()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ChargeError::NotFound(_)));
    }
}

//! Resolves a raw target id to the membership or inscription it names.

use uuid::Uuid;

use crate::domain::charge::{ChargeError, ChargeTarget};
use crate::domain::foundation::{AthleteId, InscriptionId, MembershipId, UserId};
use crate::ports::{InscriptionRepository, MembershipRepository};

/// A chargeable entity with the data charge creation needs from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub target: ChargeTarget,
    pub athlete_id: AthleteId,
    pub owner: UserId,
    /// Whether the entity is in its payable state.
    pub payable: bool,
    pub status_label: &'static str,
}

/// Looks the id up as both a membership and an inscription.
///
/// Exactly one must exist. Neither is `NotFound`; both is `InvalidState`.
pub async fn resolve_target(
    memberships: &dyn MembershipRepository,
    inscriptions: &dyn InscriptionRepository,
    target_id: Uuid,
) -> Result<ResolvedTarget, ChargeError> {
    let membership = memberships
        .find_by_id(&MembershipId::from_uuid(target_id))
        .await?;
    let inscription = inscriptions
        .find_by_id(&InscriptionId::from_uuid(target_id))
        .await?;

    match (membership, inscription) {
        (Some(membership), None) => Ok(ResolvedTarget {
            target: ChargeTarget::Membership(membership.id),
            athlete_id: membership.athlete_id,
            owner: membership.owner,
            payable: membership.status.is_payable(),
            status_label: membership.status.as_str(),
        }),
        (None, Some(inscription)) => Ok(ResolvedTarget {
            target: ChargeTarget::Inscription(inscription.id),
            athlete_id: inscription.athlete_id,
            owner: inscription.owner,
            payable: inscription.status.is_payable(),
            status_label: inscription.status.as_str(),
        }),
        (Some(_), Some(_)) => Err(ChargeError::invalid_state(format!(
            "Target {} matches both a membership and an inscription",
            target_id
        ))),
        (None, None) => Err(ChargeError::not_found(format!(
            "No membership or inscription with id {}",
            target_id
        ))),
    }
}

/// Owner of an existing charge's target, if the target still exists.
pub async fn target_owner(
    memberships: &dyn MembershipRepository,
    inscriptions: &dyn InscriptionRepository,
    target: &ChargeTarget,
) -> Result<Option<UserId>, ChargeError> {
    let owner = match target {
        ChargeTarget::Membership(id) => memberships.find_by_id(id).await?.map(|m| m.owner),
        ChargeTarget::Inscription(id) => inscriptions.find_by_id(id).await?.map(|i| i.owner),
    };
    Ok(owner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryInscriptionRepository, InMemoryMembershipRepository};
    use crate::domain::competition::{CompetitionInscription, InscriptionStatus};
    use crate::domain::foundation::EventId;
    use crate::domain::membership::{Membership, MembershipStatus};

    fn owner() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[tokio::test]
    async fn membership_awaiting_payment_is_payable() {
        let memberships = InMemoryMembershipRepository::new();
        let inscriptions = InMemoryInscriptionRepository::new();
        let membership = Membership::new(
            MembershipId::new(),
            AthleteId::new(),
            owner(),
            MembershipStatus::AguardandoPagamento,
        );
        memberships.insert(membership.clone()).await;

        let resolved = resolve_target(&memberships, &inscriptions, *membership.id.as_uuid())
            .await
            .unwrap();
        assert_eq!(resolved.target, ChargeTarget::Membership(membership.id));
        assert!(resolved.payable);
    }

    #[tokio::test]
    async fn confirmed_inscription_is_not_payable() {
        let memberships = InMemoryMembershipRepository::new();
        let inscriptions = InMemoryInscriptionRepository::new();
        let inscription = CompetitionInscription {
            id: InscriptionId::new(),
            event_id: EventId::new(),
            athlete_id: AthleteId::new(),
            owner: owner(),
            status: InscriptionStatus::Confirmada,
        };
        inscriptions.insert(inscription.clone()).await;

        let resolved = resolve_target(&memberships, &inscriptions, *inscription.id.as_uuid())
            .await
            .unwrap();
        assert!(!resolved.payable);
        assert_eq!(resolved.status_label, "CONFIRMADA");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let err = resolve_target(
            &InMemoryMembershipRepository::new(),
            &InMemoryInscriptionRepository::new(),
            Uuid::new_v4(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ChargeError::NotFound(_)));
    }

    #[tokio::test]
    async fn id_matching_both_kinds_is_ambiguous() {
        let memberships = InMemoryMembershipRepository::new();
        let inscriptions = InMemoryInscriptionRepository::new();
        let shared = Uuid::new_v4();
        memberships
            .insert(Membership::new(
                MembershipId::from_uuid(shared),
                AthleteId::new(),
                owner(),
                MembershipStatus::AguardandoPagamento,
            ))
            .await;
        inscriptions
            .insert(CompetitionInscription {
                id: InscriptionId::from_uuid(shared),
                event_id: EventId::new(),
                athlete_id: AthleteId::new(),
                owner: owner(),
                status: InscriptionStatus::PendentePagamento,
            })
            .await;

        let err = resolve_target(&memberships, &inscriptions, shared)
            .await
            .unwrap_err();
        assert!(matches!(err, ChargeError::InvalidState(_)));
    }
}

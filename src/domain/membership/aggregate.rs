//! Membership entity as seen by the payments core.
//!
//! Memberships are owned by the registration subsystem. This core reads them
//! to validate charges and activates them once paid.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AthleteId, MembershipId, StateMachine, UserId, ValidationError};

use super::MembershipStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: MembershipId,
    pub athlete_id: AthleteId,

    /// Account that submitted the registration and pays for it.
    pub owner: UserId,

    pub status: MembershipStatus,
}

impl Membership {
    pub fn new(
        id: MembershipId,
        athlete_id: AthleteId,
        owner: UserId,
        status: MembershipStatus,
    ) -> Self {
        Self {
            id,
            athlete_id,
            owner,
            status,
        }
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }

    /// Activates after payment. Fails unless the membership awaits payment.
    pub fn activate(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(MembershipStatus::Ativa)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn membership(status: MembershipStatus) -> Membership {
        Membership::new(
            MembershipId::new(),
            AthleteId::new(),
            UserId::new("user-1").unwrap(),
            status,
        )
    }

    #[test]
    fn activate_from_awaiting_payment() {
        let mut m = membership(MembershipStatus::AguardandoPagamento);
        m.activate().unwrap();
        assert_eq!(m.status, MembershipStatus::Ativa);
    }

    #[test]
    fn activate_twice_fails_and_keeps_status() {
        let mut m = membership(MembershipStatus::Ativa);
        assert!(m.activate().is_err());
        assert_eq!(m.status, MembershipStatus::Ativa);
    }

    #[test]
    fn ownership_is_by_user_id() {
        let m = membership(MembershipStatus::AguardandoPagamento);
        assert!(m.is_owned_by(&UserId::new("user-1").unwrap()));
        assert!(!m.is_owned_by(&UserId::new("user-2").unwrap()));
    }
}

//! Caller identity as seen by the domain.
//!
//! The external auth layer authenticates users; this crate only receives
//! the resulting user id and role and decides ownership from them.

use super::UserId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Member,
    Admin,
}

impl Role {
    /// `admin` (any case) is an administrator; anything else is a member.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::Member
        }
    }
}

/// The user on whose behalf an operation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub id: UserId,
    pub role: Role,
}

impl Requester {
    pub fn member(id: UserId) -> Self {
        Self {
            id,
            role: Role::Member,
        }
    }

    pub fn admin(id: UserId) -> Self {
        Self {
            id,
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Administrators may act on anything; members only on what they own.
    pub fn can_act_for(&self, owner: &UserId) -> bool {
        self.is_admin() || &self.id == owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn member_acts_only_for_self() {
        let requester = Requester::member(user("ana"));
        assert!(requester.can_act_for(&user("ana")));
        assert!(!requester.can_act_for(&user("bruno")));
    }

    #[test]
    fn admin_acts_for_anyone() {
        assert!(Requester::admin(user("root")).can_act_for(&user("bruno")));
    }

    #[test]
    fn role_label_is_case_insensitive() {
        assert_eq!(Role::from_label(" ADMIN "), Role::Admin);
        assert_eq!(Role::from_label("athlete"), Role::Member);
        assert_eq!(Role::from_label(""), Role::Member);
    }
}

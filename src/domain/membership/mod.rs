//! Membership domain module.
//!
//! - `aggregate` - Membership entity
//! - `status` - MembershipStatus state machine

mod aggregate;
mod status;

pub use aggregate::Membership;
pub use status::MembershipStatus;

//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `eligibility` - Age, weight, modality and authorization rules
//! - `charge` - Charge aggregate and its status machine
//! - `membership` - Membership status as seen by payments
//! - `competition` - Events, inscriptions and authorization requests
//! - `athlete` - Athlete profile used for payer details
//! - `extraction` - Ordered field rules for provider payloads
//! - `webhook` - Notification authenticity and status vocabularies

pub mod athlete;
pub mod charge;
pub mod competition;
pub mod eligibility;
pub mod extraction;
pub mod foundation;
pub mod membership;
pub mod webhook;

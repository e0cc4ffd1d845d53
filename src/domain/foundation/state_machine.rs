//! State machine trait for lifecycle status enums.
//!
//! Charges, inscriptions and memberships all move through a closed set of
//! states. Implementors declare the legal edges once and get checked
//! transitions for free.
//!
//! ```ignore
//! let next = ChargeStatus::Pending.transition_to(ChargeStatus::Paid)?;
//! assert!(next.is_terminal() == false); // paid may still be refunded
//! ```

use super::ValidationError;

/// Trait for status enums that represent state machines.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

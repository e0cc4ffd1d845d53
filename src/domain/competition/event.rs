use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::eligibility::{Authority, EventScope};
use crate::domain::foundation::EventId;

/// A competition event, read-only from the payments core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionEvent {
    pub id: EventId,
    pub name: String,
    pub scope: EventScope,
    pub event_date: NaiveDate,
}

impl CompetitionEvent {
    /// Authority that approves older competitors for this event.
    pub fn authority(&self) -> Authority {
        self.scope.authority()
    }
}

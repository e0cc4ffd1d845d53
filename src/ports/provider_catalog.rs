//! Configured payment providers and their fees.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::charge::ChargeKind;
use crate::domain::foundation::{DomainError, ProviderId};

use super::GatewayKind;

/// A provider as configured by federation administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredProvider {
    pub id: ProviderId,
    pub name: String,

    /// Explicit gateway tag. When absent the name is used.
    pub gateway_tag: Option<String>,

    pub active: bool,
    pub membership_fee: Option<Decimal>,
    pub competition_fee: Option<Decimal>,
}

impl ConfiguredProvider {
    pub fn gateway(&self) -> Option<GatewayKind> {
        GatewayKind::resolve(self.gateway_tag.as_deref(), &self.name)
    }

    /// Fee charged for `kind`, if configured.
    pub fn fee_for(&self, kind: ChargeKind) -> Option<Decimal> {
        match kind {
            ChargeKind::Membership => self.membership_fee,
            ChargeKind::Competition => self.competition_fee,
        }
    }

    /// Active, priced for `kind`, and backed by a known gateway.
    pub fn is_usable_for(&self, kind: ChargeKind) -> bool {
        self.active && self.fee_for(kind).is_some() && self.gateway().is_some()
    }
}

#[async_trait]
pub trait ProviderCatalog: Send + Sync {
    async fn find_by_id(&self, id: &ProviderId) -> Result<Option<ConfiguredProvider>, DomainError>;

    /// Active providers in administrator-defined order.
    async fn list_active(&self) -> Result<Vec<ConfiguredProvider>, DomainError>;
}

//! Chooses which configured provider collects a charge.
//!
//! Preference without an explicit choice: Cora, then PagBank, then any other
//! usable provider. "Usable" means active, priced for the charge kind, mapped
//! to a known gateway, and that gateway has an adapter registered.

use rust_decimal::Decimal;

use crate::domain::charge::{ChargeError, ChargeKind};
use crate::domain::foundation::ProviderId;
use crate::ports::{ConfiguredProvider, GatewayKind, GatewayRegistry, ProviderCatalog};

/// A provider paired with its gateway and the fee for one charge kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedProvider {
    pub provider: ConfiguredProvider,
    pub gateway: GatewayKind,
    pub fee: Decimal,
}

impl SelectedProvider {
    fn from_provider(
        provider: ConfiguredProvider,
        kind: ChargeKind,
        registry: &GatewayRegistry,
    ) -> Option<Self> {
        if !provider.is_usable_for(kind) {
            return None;
        }
        let gateway = provider.gateway()?;
        let fee = provider.fee_for(kind)?;
        registry.supports(gateway).then_some(Self {
            provider,
            gateway,
            fee,
        })
    }

    pub fn name(&self) -> &str {
        &self.provider.name
    }
}

const PREFERENCE: [GatewayKind; 2] = [GatewayKind::Cora, GatewayKind::PagBank];

/// Resolves the provider for a new charge.
pub async fn select_provider(
    catalog: &dyn ProviderCatalog,
    registry: &GatewayRegistry,
    kind: ChargeKind,
    requested: Option<ProviderId>,
) -> Result<SelectedProvider, ChargeError> {
    if let Some(id) = requested {
        let provider = catalog
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ChargeError::invalid_provider(format!("Unknown provider {}", id)))?;
        let name = provider.name.clone();
        return SelectedProvider::from_provider(provider, kind, registry).ok_or_else(|| {
            ChargeError::invalid_provider(format!(
                "Provider {} is inactive, has no {} fee or no supported gateway",
                name, kind
            ))
        });
    }

    let usable: Vec<SelectedProvider> = catalog
        .list_active()
        .await?
        .into_iter()
        .filter_map(|p| SelectedProvider::from_provider(p, kind, registry))
        .collect();

    for preferred in PREFERENCE {
        if let Some(selected) = usable.iter().find(|s| s.gateway == preferred) {
            return Ok(selected.clone());
        }
    }

    usable.into_iter().next().ok_or_else(|| {
        ChargeError::invalid_provider(format!("No active payment provider configured for {}", kind))
    })
}

/// First usable PagBank-class provider other than `exclude`.
pub async fn find_fallback(
    catalog: &dyn ProviderCatalog,
    registry: &GatewayRegistry,
    kind: ChargeKind,
    exclude: &ProviderId,
) -> Result<Option<SelectedProvider>, ChargeError> {
    Ok(catalog
        .list_active()
        .await?
        .into_iter()
        .filter(|p| &p.id != exclude)
        .filter_map(|p| SelectedProvider::from_provider(p, kind, registry))
        .find(|s| s.gateway == GatewayKind::PagBank))
}

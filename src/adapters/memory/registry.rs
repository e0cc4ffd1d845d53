//! In-memory collaborators: memberships, inscriptions, events, providers,
//! athletes and authorization requests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::athlete::AthleteProfile;
use crate::domain::competition::{
    AuthorizationKey, AuthorizationRequest, CompetitionEvent, CompetitionInscription,
    InscriptionStatus,
};
use crate::domain::foundation::{
    AthleteId, DomainError, EventId, InscriptionId, MembershipId, ProviderId,
};
use crate::domain::membership::{Membership, MembershipStatus};
use crate::ports::{
    AthleteDirectory, AuthorizationRepository, CompetitionEventReader, ConfiguredProvider,
    InscriptionRepository, MembershipRepository, ProviderCatalog,
};

// ════════════════════════════════════════════════════════════════════════════════
// Memberships
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipRepository {
    memberships: Arc<RwLock<HashMap<MembershipId, Membership>>>,
    activations: Arc<RwLock<usize>>,
}

impl InMemoryMembershipRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, membership: Membership) {
        self.memberships
            .write()
            .await
            .insert(membership.id, membership);
    }

    /// Number of successful activations so far.
    pub async fn activation_count(&self) -> usize {
        *self.activations.read().await
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
        Ok(self.memberships.read().await.get(id).cloned())
    }

    async fn activate_if_awaiting_payment(&self, id: &MembershipId) -> Result<bool, DomainError> {
        let mut memberships = self.memberships.write().await;
        let Some(membership) = memberships.get_mut(id) else {
            return Ok(false);
        };

        if membership.status != MembershipStatus::AguardandoPagamento {
            return Ok(false);
        }

        membership.activate()?;
        *self.activations.write().await += 1;
        Ok(true)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Inscriptions and events
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct InMemoryInscriptionRepository {
    inscriptions: Arc<RwLock<HashMap<InscriptionId, CompetitionInscription>>>,
}

impl InMemoryInscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, inscription: CompetitionInscription) {
        self.inscriptions
            .write()
            .await
            .insert(inscription.id, inscription);
    }
}

#[async_trait]
impl InscriptionRepository for InMemoryInscriptionRepository {
    async fn find_by_id(
        &self,
        id: &InscriptionId,
    ) -> Result<Option<CompetitionInscription>, DomainError> {
        Ok(self.inscriptions.read().await.get(id).cloned())
    }

    async fn update_status_if(
        &self,
        id: &InscriptionId,
        from: InscriptionStatus,
        to: InscriptionStatus,
    ) -> Result<bool, DomainError> {
        let mut inscriptions = self.inscriptions.write().await;
        match inscriptions.get_mut(id) {
            Some(inscription) if inscription.status == from => {
                inscription.status = to;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCompetitionEventReader {
    events: Arc<RwLock<HashMap<EventId, CompetitionEvent>>>,
}

impl InMemoryCompetitionEventReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, event: CompetitionEvent) {
        self.events.write().await.insert(event.id, event);
    }
}

#[async_trait]
impl CompetitionEventReader for InMemoryCompetitionEventReader {
    async fn find_by_id(&self, id: &EventId) -> Result<Option<CompetitionEvent>, DomainError> {
        Ok(self.events.read().await.get(id).cloned())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Providers and athletes
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct InMemoryProviderCatalog {
    providers: Arc<RwLock<Vec<ConfiguredProvider>>>,
}

impl InMemoryProviderCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, provider: ConfiguredProvider) {
        self.providers.write().await.push(provider);
    }

    pub async fn set_active(&self, id: &ProviderId, active: bool) {
        let mut providers = self.providers.write().await;
        if let Some(provider) = providers.iter_mut().find(|p| &p.id == id) {
            provider.active = active;
        }
    }
}

#[async_trait]
impl ProviderCatalog for InMemoryProviderCatalog {
    async fn find_by_id(&self, id: &ProviderId) -> Result<Option<ConfiguredProvider>, DomainError> {
        let providers = self.providers.read().await;
        Ok(providers.iter().find(|p| &p.id == id).cloned())
    }

    async fn list_active(&self) -> Result<Vec<ConfiguredProvider>, DomainError> {
        let providers = self.providers.read().await;
        Ok(providers.iter().filter(|p| p.active).cloned().collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryAthleteDirectory {
    athletes: Arc<RwLock<HashMap<AthleteId, AthleteProfile>>>,
}

impl InMemoryAthleteDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, athlete: AthleteProfile) {
        self.athletes.write().await.insert(athlete.id, athlete);
    }
}

#[async_trait]
impl AthleteDirectory for InMemoryAthleteDirectory {
    async fn find_by_id(&self, id: &AthleteId) -> Result<Option<AthleteProfile>, DomainError> {
        Ok(self.athletes.read().await.get(id).cloned())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Authorization requests
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct InMemoryAuthorizationRepository {
    requests: Arc<RwLock<HashMap<AuthorizationKey, AuthorizationRequest>>>,
}

impl InMemoryAuthorizationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<AuthorizationRequest> {
        self.requests.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl AuthorizationRepository for InMemoryAuthorizationRepository {
    async fn find_or_create(
        &self,
        key: AuthorizationKey,
    ) -> Result<(AuthorizationRequest, bool), DomainError> {
        let mut requests = self.requests.write().await;
        if let Some(existing) = requests.get(&key) {
            return Ok((existing.clone(), false));
        }

        let request = AuthorizationRequest::new_pending(key);
        requests.insert(key, request.clone());
        Ok((request, true))
    }

    async fn find_by_key(
        &self,
        key: &AuthorizationKey,
    ) -> Result<Option<AuthorizationRequest>, DomainError> {
        Ok(self.requests.read().await.get(key).cloned())
    }
}

use std::sync::Arc;

use models::member::{seed_members, Member, MemberPatch, MemberStatus};
use models::Record;

use crate::entity_store::EntityStore;
use crate::errors::ServiceError;
use crate::ids::IdGenerator;
use crate::latency::Latency;
use crate::storage::SlotStorage;

/// Member directory backed by the `members` slot.
#[derive(Clone)]
pub struct MemberService {
    store: EntityStore<Member>,
}

impl MemberService {
    /// Bind to the `members` slot and seed it with the default directory if empty.
    pub async fn new(
        storage: Arc<dyn SlotStorage>,
        latency: Latency,
        ids: Arc<dyn IdGenerator>,
    ) -> Result<Self, ServiceError> {
        let store = EntityStore::for_entity(storage)?.with_latency(latency).with_ids(ids);
        Self::from_store(store).await
    }

    /// Wrap an already configured store, seeding it if empty.
    pub async fn from_store(store: EntityStore<Member>) -> Result<Self, ServiceError> {
        store.seed(seed_members()).await?;
        Ok(Self { store })
    }

    pub fn store(&self) -> &EntityStore<Member> {
        &self.store
    }

    pub async fn list(&self) -> Result<Vec<Record<Member>>, ServiceError> {
        self.store.get_all().await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Record<Member>>, ServiceError> {
        self.store.get_by_id(id).await
    }

    pub async fn create(&self, member: Member) -> Result<Record<Member>, ServiceError> {
        self.store.create(member).await
    }

    pub async fn update(&self, id: &str, patch: &MemberPatch) -> Result<Option<Record<Member>>, ServiceError> {
        self.store.update(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        self.store.delete(id).await
    }

    pub async fn count(&self) -> Result<usize, ServiceError> {
        self.store.count().await
    }

    /// Members matching `status` (when given) and whose first or last name
    /// contains `name` case-insensitively (when given and non-blank).
    pub async fn search(&self, status: Option<MemberStatus>, name: Option<&str>) -> Result<Vec<Record<Member>>, ServiceError> {
        let needle = name.unwrap_or_default().trim().to_lowercase();
        self.store
            .search(|m| {
                status.map_or(true, |s| m.member_status == s)
                    && (needle.is_empty()
                        || m.first_name.to_lowercase().contains(&needle)
                        || m.last_name.to_lowercase().contains(&needle))
            })
            .await
    }

    pub async fn search_by_status(&self, status: MemberStatus) -> Result<Vec<Record<Member>>, ServiceError> {
        self.search(Some(status), None).await
    }

    pub async fn search_by_name(&self, query: &str) -> Result<Vec<Record<Member>>, ServiceError> {
        self.search(None, Some(query)).await
    }

    /// Drop all members and restore the default directory.
    pub async fn reset(&self) -> Result<(), ServiceError> {
        self.store.clear().await?;
        self.store.seed(seed_members()).await?;
        Ok(())
    }
}

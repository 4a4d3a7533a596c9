use std::sync::Arc;

use models::{Association, AssociationDraft};
use tokio::sync::Mutex;

use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};
use crate::storage::{self, SnapshotStore};

/// Single authority for all reads and writes across the registry and the
/// pending queue. Every operation is a full load-mutate-store cycle against
/// the snapshot store, serialized by one exclusive lock per collection so
/// concurrent writers cannot overwrite each other's snapshot.
pub struct RegistryService {
    store: Arc<dyn SnapshotStore>,
    registry_lock: Mutex<()>,
    pending_lock: Mutex<()>,
}

impl RegistryService {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Arc<Self> {
        Arc::new(Self {
            store,
            registry_lock: Mutex::new(()),
            pending_lock: Mutex::new(()),
        })
    }

    /// List approved associations, optionally filtered by a case-insensitive
    /// substring match on `name`. Pagination applies after filtering; an
    /// empty search string means no filtering.
    pub async fn list_registry(
        &self,
        search: Option<&str>,
        pagination: Pagination,
    ) -> Result<Page<Association>, ServiceError> {
        let _guard = self.registry_lock.lock().await;
        let registry = self.store.load(storage::REGISTRY).await?;
        let filtered = match search {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                registry
                    .into_iter()
                    .filter(|a| a.name.to_lowercase().contains(&needle))
                    .collect()
            }
            _ => registry,
        };
        Ok(Page::from_vec(filtered, pagination))
    }

    pub async fn get_registry(&self, id: u64) -> Result<Association, ServiceError> {
        let _guard = self.registry_lock.lock().await;
        let registry = self.store.load(storage::REGISTRY).await?;
        registry
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| ServiceError::not_found("association"))
    }

    /// Submit a new registration request. The draft is validated first, then
    /// checked against existing requests: no two pending entries may share a
    /// name under case-insensitive compare.
    pub async fn create_request(
        &self,
        draft: AssociationDraft,
    ) -> Result<Association, ServiceError> {
        draft.validate()?;
        let _guard = self.pending_lock.lock().await;
        let mut pending = self.store.load(storage::PENDING).await?;
        let lowered = draft.name.to_lowercase();
        if pending.iter().any(|r| r.name.to_lowercase() == lowered) {
            return Err(ServiceError::Conflict(format!(
                "pending request named \"{}\" already exists",
                draft.name
            )));
        }
        let record = draft.into_association(next_id(&pending));
        pending.push(record.clone());
        self.store.save(storage::PENDING, &pending).await?;
        Ok(record)
    }

    /// Full pending queue in insertion order, no pagination.
    pub async fn list_requests(&self) -> Result<Vec<Association>, ServiceError> {
        let _guard = self.pending_lock.lock().await;
        self.store.load(storage::PENDING).await
    }

    /// Promote a pending request into the registry under a freshly assigned
    /// registry id; the pending id is discarded. Lock order is fixed
    /// pending-then-registry for every operation touching both collections.
    pub async fn approve_request(&self, request_id: u64) -> Result<Association, ServiceError> {
        let _pending = self.pending_lock.lock().await;
        let _registry = self.registry_lock.lock().await;
        let mut pending = self.store.load(storage::PENDING).await?;
        let position = pending
            .iter()
            .position(|r| r.id == request_id)
            .ok_or_else(|| ServiceError::not_found("request"))?;
        let mut registry = self.store.load(storage::REGISTRY).await?;
        let request = pending.remove(position);
        let approved = Association { id: next_id(&registry), ..request };
        registry.push(approved.clone());
        self.store.save(storage::REGISTRY, &registry).await?;
        self.store.save(storage::PENDING, &pending).await?;
        Ok(approved)
    }

    /// Overwrite all four mutable fields of a registry record; the id never
    /// changes. Full replace, not a partial merge.
    pub async fn update_registry(
        &self,
        id: u64,
        fields: AssociationDraft,
    ) -> Result<Association, ServiceError> {
        fields.validate()?;
        let _guard = self.registry_lock.lock().await;
        let mut registry = self.store.load(storage::REGISTRY).await?;
        let slot = registry
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ServiceError::not_found("association"))?;
        *slot = fields.into_association(id);
        let updated = slot.clone();
        self.store.save(storage::REGISTRY, &registry).await?;
        Ok(updated)
    }

    /// Remove a registry record permanently. A second delete of the same id
    /// reports NotFound.
    pub async fn delete_registry(&self, id: u64) -> Result<(), ServiceError> {
        let _guard = self.registry_lock.lock().await;
        let mut registry = self.store.load(storage::REGISTRY).await?;
        let before = registry.len();
        registry.retain(|a| a.id != id);
        if registry.len() == before {
            return Err(ServiceError::not_found("association"));
        }
        self.store.save(storage::REGISTRY, &registry).await?;
        Ok(())
    }
}

fn next_id(items: &[Association]) -> u64 {
    items.iter().map(|a| a.id).max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonSnapshotStore;

    async fn setup() -> Arc<RegistryService> {
        let dir = std::env::temp_dir().join(format!("registry_{}", uuid::Uuid::new_v4()));
        let store = JsonSnapshotStore::new(dir).await.expect("store init");
        RegistryService::new(store)
    }

    fn draft(name: &str) -> AssociationDraft {
        AssociationDraft {
            name: name.into(),
            contact: "info@klub.cz".into(),
            address: "Praha 1, Dlouhá 3".into(),
            breed: "Kolie".into(),
        }
    }

    #[tokio::test]
    async fn pending_ids_increase_from_one() {
        let svc = setup().await;
        let a = svc.create_request(draft("Klub A")).await.unwrap();
        let b = svc.create_request(draft("Klub B")).await.unwrap();
        let c = svc.create_request(draft("Klub C")).await.unwrap();
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));
    }

    #[tokio::test]
    async fn duplicate_pending_name_differs_only_by_case() {
        let svc = setup().await;
        svc.create_request(draft("Klub Praha")).await.unwrap();
        let err = svc.create_request(draft("KLUB PRAHA")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn approval_moves_request_with_new_registry_id() {
        let svc = setup().await;
        // occupy registry ids 1..=2 so the promoted record gets 3
        for name in ["Klub A", "Klub B"] {
            let req = svc.create_request(draft(name)).await.unwrap();
            svc.approve_request(req.id).await.unwrap();
        }
        let req = svc.create_request(draft("Klub C")).await.unwrap();
        let approved = svc.approve_request(req.id).await.unwrap();

        assert_eq!(approved.id, 3);
        assert_eq!(approved.name, "Klub C");
        assert_eq!(approved.contact, req.contact);
        assert_eq!(approved.address, req.address);
        assert_eq!(approved.breed, req.breed);
        assert!(svc.list_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn approving_unknown_request_is_not_found() {
        let svc = setup().await;
        let err = svc.approve_request(42).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_replaces_all_fields_and_keeps_id() {
        let svc = setup().await;
        let req = svc.create_request(draft("Klub A")).await.unwrap();
        let created = svc.approve_request(req.id).await.unwrap();

        let replacement = AssociationDraft {
            name: "Klub Ostrava".into(),
            contact: "+420 777 123 456".into(),
            address: "Ostrava, Nádražní 8".into(),
            breed: "Pudl".into(),
        };
        svc.update_registry(created.id, replacement.clone()).await.unwrap();

        let fetched = svc.get_registry(created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched, replacement.into_association(created.id));
    }

    #[tokio::test]
    async fn update_validates_before_existence_check() {
        let svc = setup().await;
        let bad = AssociationDraft { name: "xy".into(), ..draft("ignored") };
        // id 99 does not exist, but the validation error wins
        let err = svc.update_registry(99, bad).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));
    }

    #[tokio::test]
    async fn deleted_record_is_gone() {
        let svc = setup().await;
        let req = svc.create_request(draft("Klub A")).await.unwrap();
        let created = svc.approve_request(req.id).await.unwrap();

        svc.delete_registry(created.id).await.unwrap();
        assert!(matches!(
            svc.get_registry(created.id).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
        assert!(matches!(
            svc.delete_registry(created.id).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn pagination_slices_after_insertion_order() {
        let svc = setup().await;
        for i in 0..25 {
            let req = svc.create_request(draft(&format!("Klub číslo {i}"))).await.unwrap();
            svc.approve_request(req.id).await.unwrap();
        }
        let page = svc
            .list_registry(None, Pagination { page: 2, per_page: 10 })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total, 25);
        assert_eq!(page.items[0].name, "Klub číslo 10");
        assert_eq!(page.items[9].name, "Klub číslo 19");
    }

    #[tokio::test]
    async fn search_filters_case_insensitively() {
        let svc = setup().await;
        for name in ["Klub Praha", "Klub Brno", "Spolek PRAHA jih"] {
            let req = svc.create_request(draft(name)).await.unwrap();
            svc.approve_request(req.id).await.unwrap();
        }
        let page = svc
            .list_registry(Some("praha"), Pagination::default())
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert!(page.items.iter().all(|a| a.name.to_lowercase().contains("praha")));

        // empty search string filters nothing
        let all = svc.list_registry(Some(""), Pagination::default()).await.unwrap();
        assert_eq!(all.total, 3);
    }

    #[tokio::test]
    async fn create_then_approve_scenario() {
        let svc = setup().await;
        let req = svc
            .create_request(AssociationDraft {
                name: "Klub X".into(),
                contact: "a@b.cz".into(),
                address: "Praha".into(),
                breed: "Kolie".into(),
            })
            .await
            .unwrap();
        assert_eq!(req.id, 1);

        let approved = svc.approve_request(1).await.unwrap();
        assert_eq!(approved.id, 1);
        assert_eq!(approved.name, "Klub X");

        assert!(svc.list_requests().await.unwrap().is_empty());
        let page = svc.list_registry(None, Pagination::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0], approved);
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected_before_conflict_check() {
        let svc = setup().await;
        let err = svc
            .create_request(AssociationDraft { contact: "a".into(), ..draft("Klub A") })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));
        assert!(svc.list_requests().await.unwrap().is_empty());
    }
}

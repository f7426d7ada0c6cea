//! 检测结果门面（只追加）
//!
//! 列表按过滤条件分别缓存，任何创建/删除都会失效全部过滤列表。

use super::observe;
use crate::cache::ListingCache;
use crate::error::StorageError;
use crate::traits::DetectionStore;
use api_contract::{Detection, DetectionCreate, DetectionFilter, DetectionId, EntityKind};
use std::sync::Arc;
use tracing::debug;

const KIND: EntityKind = EntityKind::Detection;

pub struct DetectionFacade {
    store: Arc<dyn DetectionStore>,
    cache: ListingCache<Detection, DetectionFilter>,
}

impl DetectionFacade {
    pub fn new(store: Arc<dyn DetectionStore>) -> Self {
        Self {
            store,
            cache: ListingCache::new(KIND),
        }
    }

    pub async fn list_all(&self, filter: DetectionFilter) -> Result<Vec<Detection>, StorageError> {
        let result = self
            .cache
            .get_or_fetch(filter, || self.store.list_detections(filter))
            .await;
        observe(KIND, "list", result)
    }

    pub fn cached(&self, filter: DetectionFilter) -> Option<Vec<Detection>> {
        self.cache.peek(&filter)
    }

    pub async fn create(&self, record: DetectionCreate) -> Result<Detection, StorageError> {
        if !record.confidence.is_finite() {
            return Err(StorageError::invalid("confidence must be finite"));
        }
        let detection = observe(KIND, "create", self.store.create_detection(record).await)?;
        self.cache.invalidate();
        debug!(target: "nvc.storage", kind = %KIND, detection_id = detection.id, "entity_created");
        Ok(detection)
    }

    pub async fn delete(&self, detection_id: DetectionId) -> Result<(), StorageError> {
        let deleted = observe(
            KIND,
            "delete",
            self.store.delete_detection(detection_id).await,
        )?;
        if !deleted {
            return Err(StorageError::not_found(KIND, detection_id));
        }
        self.cache.invalidate();
        debug!(target: "nvc.storage", kind = %KIND, detection_id, "entity_deleted");
        Ok(())
    }

    pub fn invalidate(&self) {
        self.cache.invalidate();
    }
}

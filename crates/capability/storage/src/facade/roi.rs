//! 命名区域门面
//!
//! 列表按摄像头过滤条件分别缓存，任何写操作都会失效全部过滤列表。
//! 创建时校验 camera_id 存在于当前摄像头列表。

use super::{CameraFacade, observe};
use crate::cache::ListingCache;
use crate::error::StorageError;
use crate::traits::RoiStore;
use crate::validation::{ensure_name, ensure_polygon};
use api_contract::{EntityKind, RegionOfInterest, RoiCreate, RoiFilter, RoiId, RoiUpdate};
use std::sync::Arc;
use tracing::info;

const KIND: EntityKind = EntityKind::Roi;

pub struct RoiFacade {
    store: Arc<dyn RoiStore>,
    cameras: Arc<CameraFacade>,
    cache: ListingCache<RegionOfInterest, RoiFilter>,
}

impl RoiFacade {
    pub fn new(store: Arc<dyn RoiStore>, cameras: Arc<CameraFacade>) -> Self {
        Self {
            store,
            cameras,
            cache: ListingCache::new(KIND),
        }
    }

    pub async fn list_all(&self, filter: RoiFilter) -> Result<Vec<RegionOfInterest>, StorageError> {
        let result = self
            .cache
            .get_or_fetch(filter, || self.store.list_rois(filter))
            .await;
        observe(KIND, "list", result)
    }

    pub fn cached(&self, filter: RoiFilter) -> Option<Vec<RegionOfInterest>> {
        self.cache.peek(&filter)
    }

    pub async fn get_one(&self, roi_id: RoiId) -> Result<RegionOfInterest, StorageError> {
        observe(KIND, "get", self.store.find_roi(roi_id).await)?
            .ok_or_else(|| StorageError::not_found(KIND, roi_id))
    }

    pub async fn create(&self, record: RoiCreate) -> Result<RegionOfInterest, StorageError> {
        ensure_name("name", &record.name)?;
        ensure_polygon(&record.points)?;
        let cameras = self.cameras.list_all().await?;
        if !cameras.iter().any(|camera| camera.id == record.camera_id) {
            return Err(StorageError::invalid(format!(
                "camera_id {} does not reference an existing camera",
                record.camera_id
            )));
        }
        let roi = observe(KIND, "create", self.store.create_roi(record).await)?;
        self.cache.invalidate();
        info!(
            target: "nvc.storage",
            kind = %KIND,
            roi_id = roi.id,
            camera_id = roi.camera_id,
            "entity_created"
        );
        Ok(roi)
    }

    pub async fn update(
        &self,
        roi_id: RoiId,
        update: RoiUpdate,
    ) -> Result<RegionOfInterest, StorageError> {
        if let Some(name) = update.name.as_deref() {
            ensure_name("name", name)?;
        }
        if let Some(points) = update.points.as_deref() {
            ensure_polygon(points)?;
        }
        let roi = observe(KIND, "update", self.store.update_roi(roi_id, update).await)?
            .ok_or_else(|| StorageError::not_found(KIND, roi_id))?;
        self.cache.invalidate();
        info!(target: "nvc.storage", kind = %KIND, roi_id, "entity_updated");
        Ok(roi)
    }

    pub async fn delete(&self, roi_id: RoiId) -> Result<(), StorageError> {
        let deleted = observe(KIND, "delete", self.store.delete_roi(roi_id).await)?;
        if !deleted {
            return Err(StorageError::not_found(KIND, roi_id));
        }
        self.cache.invalidate();
        info!(target: "nvc.storage", kind = %KIND, roi_id, "entity_deleted");
        Ok(())
    }

    pub fn invalidate(&self) {
        self.cache.invalidate();
    }
}

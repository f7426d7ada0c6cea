//! 摄像头门面（含本地设备扫描）

use super::observe;
use crate::cache::ListingCache;
use crate::error::StorageError;
use crate::traits::CameraStore;
use crate::validation::{ensure_name, ensure_resolution};
use api_contract::{
    Camera, CameraCreate, CameraId, CameraInfo, CameraType, CameraUpdate, EntityKind,
};
use std::sync::Arc;
use tracing::info;

/// 扫描默认探测的设备数量
pub const DEFAULT_SCAN_DEVICES: u32 = 10;

const KIND: EntityKind = EntityKind::Camera;

pub struct CameraFacade {
    store: Arc<dyn CameraStore>,
    cache: ListingCache<Camera>,
}

impl CameraFacade {
    pub fn new(store: Arc<dyn CameraStore>) -> Self {
        Self {
            store,
            cache: ListingCache::new(KIND),
        }
    }

    /// 摄像头列表（缓存）
    pub async fn list_all(&self) -> Result<Vec<Camera>, StorageError> {
        let result = self
            .cache
            .get_or_fetch((), || self.store.list_cameras())
            .await;
        observe(KIND, "list", result)
    }

    /// 当前缓存的列表，未缓存或已失效时为 `None`
    pub fn cached(&self) -> Option<Vec<Camera>> {
        self.cache.peek(&())
    }

    pub async fn get_one(&self, camera_id: CameraId) -> Result<Camera, StorageError> {
        observe(KIND, "get", self.store.find_camera(camera_id).await)?
            .ok_or_else(|| StorageError::not_found(KIND, camera_id))
    }

    pub async fn create(&self, record: CameraCreate) -> Result<Camera, StorageError> {
        ensure_name("name", &record.name)?;
        ensure_resolution(record.resolution)?;
        let missing_url = record
            .rtsp_url
            .as_deref()
            .is_none_or(|url| url.trim().is_empty());
        match record.camera_type {
            CameraType::Rtsp if missing_url => {
                return Err(StorageError::invalid("rtsp_url required for rtsp camera"));
            }
            CameraType::Local if record.device_id.is_none() => {
                return Err(StorageError::invalid("device_id required for local camera"));
            }
            _ => {}
        }
        let camera = observe(KIND, "create", self.store.create_camera(record).await)?;
        self.cache.invalidate();
        info!(target: "nvc.storage", kind = %KIND, camera_id = camera.id, "entity_created");
        Ok(camera)
    }

    pub async fn update(
        &self,
        camera_id: CameraId,
        update: CameraUpdate,
    ) -> Result<Camera, StorageError> {
        if let Some(name) = update.name.as_deref() {
            ensure_name("name", name)?;
        }
        ensure_resolution(update.resolution)?;
        let camera = observe(
            KIND,
            "update",
            self.store.update_camera(camera_id, update).await,
        )?
        .ok_or_else(|| StorageError::not_found(KIND, camera_id))?;
        self.cache.invalidate();
        info!(target: "nvc.storage", kind = %KIND, camera_id, "entity_updated");
        Ok(camera)
    }

    /// 删除摄像头；依赖它的视频流与告警不会被级联删除
    pub async fn delete(&self, camera_id: CameraId) -> Result<(), StorageError> {
        let deleted = observe(KIND, "delete", self.store.delete_camera(camera_id).await)?;
        if !deleted {
            return Err(StorageError::not_found(KIND, camera_id));
        }
        self.cache.invalidate();
        info!(target: "nvc.storage", kind = %KIND, camera_id, "entity_deleted");
        Ok(())
    }

    /// 强制下一次读取重新拉取
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    /// 扫描本地设备（结果不缓存、不持久化）
    pub async fn scan(&self, max_devices: u32) -> Result<Vec<CameraInfo>, StorageError> {
        let devices = observe(KIND, "scan", self.store.scan_cameras(max_devices).await)?;
        info!(target: "nvc.storage", found = devices.len(), "camera_scan_completed");
        Ok(devices)
    }

    /// 接受扫描结果，创建本地摄像头
    pub async fn add_scanned(&self, info: &CameraInfo) -> Result<Camera, StorageError> {
        self.create(info.to_camera_create()).await
    }
}

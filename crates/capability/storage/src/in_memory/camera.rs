//! 摄像头内存存储实现
//!
//! 功能：
//! - 摄像头 CRUD 操作
//! - 重复的网络地址 / 本地设备号拒绝创建（400）
//! - 预置设备列表模拟本地扫描

use super::{FaultSwitch, lock_failed, now};
use crate::error::StorageError;
use crate::traits::CameraStore;
use api_contract::{Camera, CameraCreate, CameraId, CameraInfo, CameraUpdate};
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Default)]
struct CameraTable {
    next_id: CameraId,
    records: BTreeMap<CameraId, Camera>,
}

/// 摄像头内存存储
///
/// 使用 RwLock + BTreeMap 保持按 id 排序的列表。
pub struct InMemoryCameraStore {
    table: RwLock<CameraTable>,
    devices: RwLock<Vec<CameraInfo>>,
    faults: FaultSwitch,
}

impl InMemoryCameraStore {
    /// 创建新的摄像头存储
    pub fn new() -> Self {
        Self::with_faults(FaultSwitch::new())
    }

    /// 创建与给定故障开关绑定的存储
    pub fn with_faults(faults: FaultSwitch) -> Self {
        Self {
            table: RwLock::new(CameraTable::default()),
            devices: RwLock::new(Vec::new()),
            faults,
        }
    }

    /// 预置扫描可见的本地设备
    pub fn with_devices(self, devices: Vec<CameraInfo>) -> Self {
        Self {
            devices: RwLock::new(devices),
            ..self
        }
    }
}

impl Default for InMemoryCameraStore {
    fn default() -> Self {
        Self::new()
    }
}

fn conflicts(existing: &Camera, record: &CameraCreate) -> bool {
    let same_url = record.rtsp_url.is_some() && existing.rtsp_url == record.rtsp_url;
    let same_device = record.device_id.is_some() && existing.device_id == record.device_id;
    same_url || same_device
}

#[async_trait::async_trait]
impl CameraStore for InMemoryCameraStore {
    async fn list_cameras(&self) -> Result<Vec<Camera>, StorageError> {
        self.faults.check()?;
        let table = self.table.read().map_err(lock_failed)?;
        Ok(table.records.values().cloned().collect())
    }

    async fn find_camera(&self, camera_id: CameraId) -> Result<Option<Camera>, StorageError> {
        self.faults.check()?;
        let table = self.table.read().map_err(lock_failed)?;
        Ok(table.records.get(&camera_id).cloned())
    }

    async fn create_camera(&self, record: CameraCreate) -> Result<Camera, StorageError> {
        self.faults.check()?;
        let mut table = self.table.write().map_err(lock_failed)?;
        if table
            .records
            .values()
            .any(|existing| conflicts(existing, &record))
        {
            return Err(StorageError::Status {
                status: 400,
                message: "camera with this source already exists".to_string(),
            });
        }
        table.next_id += 1;
        let timestamp = now();
        let camera = Camera {
            id: table.next_id,
            name: record.name,
            camera_type: record.camera_type,
            device_id: record.device_id,
            rtsp_url: record.rtsp_url,
            is_active: record.is_active,
            resolution: record.resolution,
            fps: record.fps,
            is_available: record.is_available,
            created_at: timestamp,
            updated_at: timestamp,
        };
        table.records.insert(camera.id, camera.clone());
        Ok(camera)
    }

    async fn update_camera(
        &self,
        camera_id: CameraId,
        update: CameraUpdate,
    ) -> Result<Option<Camera>, StorageError> {
        self.faults.check()?;
        let mut table = self.table.write().map_err(lock_failed)?;
        let camera = match table.records.get_mut(&camera_id) {
            Some(camera) => camera,
            None => return Ok(None),
        };
        if let Some(name) = update.name {
            camera.name = name;
        }
        if let Some(camera_type) = update.camera_type {
            camera.camera_type = camera_type;
        }
        if let Some(device_id) = update.device_id {
            camera.device_id = Some(device_id);
        }
        if let Some(rtsp_url) = update.rtsp_url {
            camera.rtsp_url = Some(rtsp_url);
        }
        if let Some(is_active) = update.is_active {
            camera.is_active = is_active;
        }
        if let Some(resolution) = update.resolution {
            camera.resolution = Some(resolution);
        }
        if let Some(fps) = update.fps {
            camera.fps = Some(fps);
        }
        if let Some(is_available) = update.is_available {
            camera.is_available = Some(is_available);
        }
        camera.updated_at = now();
        Ok(Some(camera.clone()))
    }

    async fn delete_camera(&self, camera_id: CameraId) -> Result<bool, StorageError> {
        self.faults.check()?;
        let mut table = self.table.write().map_err(lock_failed)?;
        Ok(table.records.remove(&camera_id).is_some())
    }

    async fn scan_cameras(&self, max_devices: u32) -> Result<Vec<CameraInfo>, StorageError> {
        self.faults.check()?;
        let devices = self.devices.read().map_err(lock_failed)?;
        Ok(devices.iter().take(max_devices as usize).cloned().collect())
    }
}

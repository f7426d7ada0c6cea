//! 存储接口 Trait 定义
//!
//! 定义各实体种类的后端访问接口：
//! - CameraStore：摄像头（含本地设备扫描）
//! - StreamStore：视频流
//! - ModelStore：检测模型（以 name 为键）
//! - AlarmStore：告警规则
//! - DetectionStore：检测结果（只追加）
//! - RoiStore：命名区域（按摄像头过滤）
//!
//! 设计原则：
//! - 服务端分配 id 与时间戳，创建接口接收请求体、返回完整记录
//! - 查找/更新不存在的资源返回 `None`，删除不存在的资源返回 `false`
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use api_contract::{
    Alarm, AlarmCreate, AlarmId, AlarmUpdate, Camera, CameraCreate, CameraId, CameraInfo,
    CameraUpdate, Detection, DetectionCreate, DetectionFilter, DetectionId, Model, ModelCreate,
    ModelUpdate, RegionOfInterest, RoiCreate, RoiFilter, RoiId, RoiUpdate, Stream, StreamCreate,
    StreamId, StreamUpdate,
};
use async_trait::async_trait;

/// 摄像头存储接口
#[async_trait]
pub trait CameraStore: Send + Sync {
    /// 列出所有摄像头
    async fn list_cameras(&self) -> Result<Vec<Camera>, StorageError>;

    /// 查找指定摄像头
    async fn find_camera(&self, camera_id: CameraId) -> Result<Option<Camera>, StorageError>;

    /// 创建摄像头
    async fn create_camera(&self, record: CameraCreate) -> Result<Camera, StorageError>;

    /// 更新摄像头
    async fn update_camera(
        &self,
        camera_id: CameraId,
        update: CameraUpdate,
    ) -> Result<Option<Camera>, StorageError>;

    /// 删除摄像头
    async fn delete_camera(&self, camera_id: CameraId) -> Result<bool, StorageError>;

    /// 扫描本地连接的摄像头设备（结果不持久化）
    async fn scan_cameras(&self, max_devices: u32) -> Result<Vec<CameraInfo>, StorageError>;
}

/// 视频流存储接口
#[async_trait]
pub trait StreamStore: Send + Sync {
    async fn list_streams(&self) -> Result<Vec<Stream>, StorageError>;

    async fn find_stream(&self, stream_id: StreamId) -> Result<Option<Stream>, StorageError>;

    async fn create_stream(&self, record: StreamCreate) -> Result<Stream, StorageError>;

    async fn update_stream(
        &self,
        stream_id: StreamId,
        update: StreamUpdate,
    ) -> Result<Option<Stream>, StorageError>;

    async fn delete_stream(&self, stream_id: StreamId) -> Result<bool, StorageError>;
}

/// 检测模型存储接口
#[async_trait]
pub trait ModelStore: Send + Sync {
    async fn list_models(&self) -> Result<Vec<Model>, StorageError>;

    async fn find_model(&self, name: &str) -> Result<Option<Model>, StorageError>;

    async fn create_model(&self, record: ModelCreate) -> Result<Model, StorageError>;

    async fn update_model(
        &self,
        name: &str,
        update: ModelUpdate,
    ) -> Result<Option<Model>, StorageError>;

    async fn delete_model(&self, name: &str) -> Result<bool, StorageError>;
}

/// 告警规则存储接口
#[async_trait]
pub trait AlarmStore: Send + Sync {
    async fn list_alarms(&self) -> Result<Vec<Alarm>, StorageError>;

    async fn find_alarm(&self, alarm_id: AlarmId) -> Result<Option<Alarm>, StorageError>;

    async fn create_alarm(&self, record: AlarmCreate) -> Result<Alarm, StorageError>;

    async fn update_alarm(
        &self,
        alarm_id: AlarmId,
        update: AlarmUpdate,
    ) -> Result<Option<Alarm>, StorageError>;

    async fn delete_alarm(&self, alarm_id: AlarmId) -> Result<bool, StorageError>;
}

/// 检测结果存储接口（只追加，无更新）
#[async_trait]
pub trait DetectionStore: Send + Sync {
    async fn list_detections(
        &self,
        filter: DetectionFilter,
    ) -> Result<Vec<Detection>, StorageError>;

    async fn create_detection(&self, record: DetectionCreate) -> Result<Detection, StorageError>;

    async fn delete_detection(&self, detection_id: DetectionId) -> Result<bool, StorageError>;
}

/// 命名区域存储接口
#[async_trait]
pub trait RoiStore: Send + Sync {
    async fn list_rois(&self, filter: RoiFilter) -> Result<Vec<RegionOfInterest>, StorageError>;

    async fn find_roi(&self, roi_id: RoiId) -> Result<Option<RegionOfInterest>, StorageError>;

    async fn create_roi(&self, record: RoiCreate) -> Result<RegionOfInterest, StorageError>;

    async fn update_roi(
        &self,
        roi_id: RoiId,
        update: RoiUpdate,
    ) -> Result<Option<RegionOfInterest>, StorageError>;

    async fn delete_roi(&self, roi_id: RoiId) -> Result<bool, StorageError>;
}

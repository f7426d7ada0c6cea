//! 实体门面
//!
//! 每个实体种类一个门面对象，持有后端存储与列表缓存：
//! - 读：命中缓存或拉取并写回
//! - 写：先校验，再等待后端确认，确认后失效该种类缓存，最后返回调用方
//! - 失败：原样返回错误，不修改缓存，不自动重试

mod alarm;
mod camera;
mod detection;
mod model;
mod roi;
mod stream;

pub use alarm::AlarmFacade;
pub use camera::{CameraFacade, DEFAULT_SCAN_DEVICES};
pub use detection::DetectionFacade;
pub use model::ModelFacade;
pub use roi::RoiFacade;
pub use stream::StreamFacade;

use crate::error::StorageError;
use crate::in_memory::{
    FaultSwitch, InMemoryAlarmStore, InMemoryCameraStore, InMemoryDetectionStore,
    InMemoryModelStore, InMemoryRoiStore, InMemoryStreamStore, default_models,
};
use crate::traits::{AlarmStore, CameraStore, DetectionStore, ModelStore, RoiStore, StreamStore};
use api_contract::EntityKind;
use nvc_telemetry::record_transport_failure;
use std::sync::Arc;
use tracing::warn;

/// 各实体种类的后端存储
#[derive(Clone)]
pub struct EntityStores {
    pub camera_store: Arc<dyn CameraStore>,
    pub stream_store: Arc<dyn StreamStore>,
    pub model_store: Arc<dyn ModelStore>,
    pub alarm_store: Arc<dyn AlarmStore>,
    pub detection_store: Arc<dyn DetectionStore>,
    pub roi_store: Arc<dyn RoiStore>,
}

impl EntityStores {
    /// 单个后端同时承担全部实体种类（如 REST 后端）
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: CameraStore + StreamStore + ModelStore + AlarmStore + DetectionStore + RoiStore + 'static,
    {
        Self {
            camera_store: backend.clone(),
            stream_store: backend.clone(),
            model_store: backend.clone(),
            alarm_store: backend.clone(),
            detection_store: backend.clone(),
            roi_store: backend,
        }
    }

    /// 内存后端，所有存储共享同一个故障开关，模型表预置默认模型
    pub fn in_memory(faults: FaultSwitch) -> Self {
        Self {
            camera_store: Arc::new(InMemoryCameraStore::with_faults(faults.clone())),
            stream_store: Arc::new(InMemoryStreamStore::with_faults(faults.clone())),
            model_store: Arc::new(
                InMemoryModelStore::with_faults(faults.clone()).with_models(default_models()),
            ),
            alarm_store: Arc::new(InMemoryAlarmStore::with_faults(faults.clone())),
            detection_store: Arc::new(InMemoryDetectionStore::with_faults(faults.clone())),
            roi_store: Arc::new(InMemoryRoiStore::with_faults(faults)),
        }
    }
}

/// 门面集合，注入到每个读取或修改实体的组件
#[derive(Clone)]
pub struct EntityFacades {
    pub cameras: Arc<CameraFacade>,
    pub streams: Arc<StreamFacade>,
    pub models: Arc<ModelFacade>,
    pub alarms: Arc<AlarmFacade>,
    pub detections: Arc<DetectionFacade>,
    pub rois: Arc<RoiFacade>,
}

impl EntityFacades {
    pub fn new(stores: EntityStores) -> Self {
        let cameras = Arc::new(CameraFacade::new(stores.camera_store));
        Self {
            streams: Arc::new(StreamFacade::new(stores.stream_store, cameras.clone())),
            models: Arc::new(ModelFacade::new(stores.model_store)),
            alarms: Arc::new(AlarmFacade::new(stores.alarm_store)),
            detections: Arc::new(DetectionFacade::new(stores.detection_store)),
            rois: Arc::new(RoiFacade::new(stores.roi_store, cameras.clone())),
            cameras,
        }
    }
}

/// 记录后端调用失败（传输类错误计数并告警）
pub(crate) fn observe<T>(
    kind: EntityKind,
    operation: &'static str,
    result: Result<T, StorageError>,
) -> Result<T, StorageError> {
    if let Err(err) = &result {
        if err.is_transport() {
            record_transport_failure();
            warn!(
                target: "nvc.storage",
                kind = %kind,
                operation,
                error = %err,
                "backend_call_failed"
            );
        }
    }
    result
}

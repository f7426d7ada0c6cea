//! 检测结果内存存储实现（只追加）

use super::{FaultSwitch, lock_failed, now};
use crate::error::StorageError;
use crate::traits::DetectionStore;
use api_contract::{Detection, DetectionCreate, DetectionFilter, DetectionId};
use std::sync::RwLock;

#[derive(Default)]
struct DetectionLog {
    next_id: DetectionId,
    records: Vec<Detection>,
}

/// 检测结果内存存储
pub struct InMemoryDetectionStore {
    log: RwLock<DetectionLog>,
    faults: FaultSwitch,
}

impl InMemoryDetectionStore {
    pub fn new() -> Self {
        Self::with_faults(FaultSwitch::new())
    }

    pub fn with_faults(faults: FaultSwitch) -> Self {
        Self {
            log: RwLock::new(DetectionLog::default()),
            faults,
        }
    }
}

impl Default for InMemoryDetectionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DetectionStore for InMemoryDetectionStore {
    async fn list_detections(
        &self,
        filter: DetectionFilter,
    ) -> Result<Vec<Detection>, StorageError> {
        self.faults.check()?;
        let log = self.log.read().map_err(lock_failed)?;
        Ok(log
            .records
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect())
    }

    async fn create_detection(&self, record: DetectionCreate) -> Result<Detection, StorageError> {
        self.faults.check()?;
        let mut log = self.log.write().map_err(lock_failed)?;
        log.next_id += 1;
        let detection = Detection {
            id: log.next_id,
            camera_id: record.camera_id,
            stream_id: record.stream_id,
            frame_number: record.frame_number,
            timestamp: now(),
            model_name: record.model_name,
            confidence: record.confidence,
            class_name: record.class_name,
            bbox: record.bbox,
            metadata: record.metadata,
        };
        log.records.push(detection.clone());
        Ok(detection)
    }

    async fn delete_detection(&self, detection_id: DetectionId) -> Result<bool, StorageError> {
        self.faults.check()?;
        let mut log = self.log.write().map_err(lock_failed)?;
        let before = log.records.len();
        log.records.retain(|item| item.id != detection_id);
        Ok(log.records.len() != before)
    }
}

//! 命名区域内存存储实现

use super::{FaultSwitch, lock_failed, now};
use crate::error::StorageError;
use crate::traits::RoiStore;
use api_contract::{RegionOfInterest, RoiCreate, RoiFilter, RoiId, RoiUpdate};
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Default)]
struct RoiTable {
    next_id: RoiId,
    records: BTreeMap<RoiId, RegionOfInterest>,
}

/// 命名区域内存存储
pub struct InMemoryRoiStore {
    table: RwLock<RoiTable>,
    faults: FaultSwitch,
}

impl InMemoryRoiStore {
    pub fn new() -> Self {
        Self::with_faults(FaultSwitch::new())
    }

    pub fn with_faults(faults: FaultSwitch) -> Self {
        Self {
            table: RwLock::new(RoiTable::default()),
            faults,
        }
    }
}

impl Default for InMemoryRoiStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RoiStore for InMemoryRoiStore {
    async fn list_rois(&self, filter: RoiFilter) -> Result<Vec<RegionOfInterest>, StorageError> {
        self.faults.check()?;
        let table = self.table.read().map_err(lock_failed)?;
        Ok(table
            .records
            .values()
            .filter(|roi| filter.matches(roi))
            .cloned()
            .collect())
    }

    async fn find_roi(&self, roi_id: RoiId) -> Result<Option<RegionOfInterest>, StorageError> {
        self.faults.check()?;
        let table = self.table.read().map_err(lock_failed)?;
        Ok(table.records.get(&roi_id).cloned())
    }

    async fn create_roi(&self, record: RoiCreate) -> Result<RegionOfInterest, StorageError> {
        self.faults.check()?;
        let mut table = self.table.write().map_err(lock_failed)?;
        table.next_id += 1;
        let timestamp = now();
        let roi = RegionOfInterest {
            id: table.next_id,
            camera_id: record.camera_id,
            name: record.name,
            points: record.points,
            is_active: record.is_active,
            created_at: timestamp,
            updated_at: timestamp,
        };
        table.records.insert(roi.id, roi.clone());
        Ok(roi)
    }

    async fn update_roi(
        &self,
        roi_id: RoiId,
        update: RoiUpdate,
    ) -> Result<Option<RegionOfInterest>, StorageError> {
        self.faults.check()?;
        let mut table = self.table.write().map_err(lock_failed)?;
        let Some(roi) = table.records.get_mut(&roi_id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            roi.name = name;
        }
        if let Some(points) = update.points {
            roi.points = points;
        }
        if let Some(is_active) = update.is_active {
            roi.is_active = is_active;
        }
        roi.updated_at = now();
        Ok(Some(roi.clone()))
    }

    async fn delete_roi(&self, roi_id: RoiId) -> Result<bool, StorageError> {
        self.faults.check()?;
        let mut table = self.table.write().map_err(lock_failed)?;
        Ok(table.records.remove(&roi_id).is_some())
    }
}

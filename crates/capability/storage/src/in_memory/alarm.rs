//! 告警规则内存存储实现
//!
//! 不做版本检查，并发编辑以最后一次写入为准。

use super::{FaultSwitch, lock_failed, now};
use crate::error::StorageError;
use crate::traits::AlarmStore;
use api_contract::{Alarm, AlarmCreate, AlarmId, AlarmUpdate};
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Default)]
struct AlarmTable {
    next_id: AlarmId,
    records: BTreeMap<AlarmId, Alarm>,
}

/// 告警规则内存存储
pub struct InMemoryAlarmStore {
    table: RwLock<AlarmTable>,
    faults: FaultSwitch,
}

impl InMemoryAlarmStore {
    pub fn new() -> Self {
        Self::with_faults(FaultSwitch::new())
    }

    pub fn with_faults(faults: FaultSwitch) -> Self {
        Self {
            table: RwLock::new(AlarmTable::default()),
            faults,
        }
    }
}

impl Default for InMemoryAlarmStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AlarmStore for InMemoryAlarmStore {
    async fn list_alarms(&self) -> Result<Vec<Alarm>, StorageError> {
        self.faults.check()?;
        let table = self.table.read().map_err(lock_failed)?;
        Ok(table.records.values().cloned().collect())
    }

    async fn find_alarm(&self, alarm_id: AlarmId) -> Result<Option<Alarm>, StorageError> {
        self.faults.check()?;
        let table = self.table.read().map_err(lock_failed)?;
        Ok(table.records.get(&alarm_id).cloned())
    }

    async fn create_alarm(&self, record: AlarmCreate) -> Result<Alarm, StorageError> {
        self.faults.check()?;
        let mut table = self.table.write().map_err(lock_failed)?;
        table.next_id += 1;
        let timestamp = now();
        let alarm = Alarm {
            id: table.next_id,
            name: record.name,
            camera_id: record.camera_id,
            class_name: record.class_name,
            confidence_threshold: record.confidence_threshold,
            region_of_interest: record.region_of_interest,
            is_active: record.is_active,
            created_at: timestamp,
            updated_at: timestamp,
        };
        table.records.insert(alarm.id, alarm.clone());
        Ok(alarm)
    }

    async fn update_alarm(
        &self,
        alarm_id: AlarmId,
        update: AlarmUpdate,
    ) -> Result<Option<Alarm>, StorageError> {
        self.faults.check()?;
        let mut table = self.table.write().map_err(lock_failed)?;
        let alarm = match table.records.get_mut(&alarm_id) {
            Some(alarm) => alarm,
            None => return Ok(None),
        };
        if let Some(name) = update.name {
            alarm.name = name;
        }
        if let Some(camera_id) = update.camera_id {
            alarm.camera_id = camera_id;
        }
        if let Some(class_name) = update.class_name {
            alarm.class_name = class_name;
        }
        if let Some(threshold) = update.confidence_threshold {
            alarm.confidence_threshold = threshold;
        }
        if let Some(region) = update.region_of_interest {
            alarm.region_of_interest = region;
        }
        if let Some(is_active) = update.is_active {
            alarm.is_active = is_active;
        }
        alarm.updated_at = now();
        Ok(Some(alarm.clone()))
    }

    async fn delete_alarm(&self, alarm_id: AlarmId) -> Result<bool, StorageError> {
        self.faults.check()?;
        let mut table = self.table.write().map_err(lock_failed)?;
        Ok(table.records.remove(&alarm_id).is_some())
    }
}

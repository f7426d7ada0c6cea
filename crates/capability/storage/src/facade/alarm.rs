//! 告警规则门面
//!
//! 引用完整性（摄像头、类别）由告警编辑器在提交前基于当前列表校验，
//! 门面只校验请求体自身的取值范围。

use super::observe;
use crate::cache::ListingCache;
use crate::error::StorageError;
use crate::traits::AlarmStore;
use crate::validation::{ensure_name, ensure_region, ensure_threshold};
use api_contract::{Alarm, AlarmCreate, AlarmId, AlarmUpdate, EntityKind};
use std::sync::Arc;
use tracing::info;

const KIND: EntityKind = EntityKind::Alarm;

pub struct AlarmFacade {
    store: Arc<dyn AlarmStore>,
    cache: ListingCache<Alarm>,
}

impl AlarmFacade {
    pub fn new(store: Arc<dyn AlarmStore>) -> Self {
        Self {
            store,
            cache: ListingCache::new(KIND),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Alarm>, StorageError> {
        let result = self
            .cache
            .get_or_fetch((), || self.store.list_alarms())
            .await;
        observe(KIND, "list", result)
    }

    pub fn cached(&self) -> Option<Vec<Alarm>> {
        self.cache.peek(&())
    }

    pub async fn get_one(&self, alarm_id: AlarmId) -> Result<Alarm, StorageError> {
        observe(KIND, "get", self.store.find_alarm(alarm_id).await)?
            .ok_or_else(|| StorageError::not_found(KIND, alarm_id))
    }

    pub async fn create(&self, record: AlarmCreate) -> Result<Alarm, StorageError> {
        ensure_name("name", &record.name)?;
        ensure_name("class_name", &record.class_name)?;
        ensure_threshold(record.confidence_threshold)?;
        ensure_region(record.region_of_interest)?;
        let alarm = observe(KIND, "create", self.store.create_alarm(record).await)?;
        self.cache.invalidate();
        info!(target: "nvc.storage", kind = %KIND, alarm_id = alarm.id, "entity_created");
        Ok(alarm)
    }

    /// 部分更新；并发编辑以最后一次写入为准
    pub async fn update(
        &self,
        alarm_id: AlarmId,
        update: AlarmUpdate,
    ) -> Result<Alarm, StorageError> {
        if let Some(name) = update.name.as_deref() {
            ensure_name("name", name)?;
        }
        if let Some(class_name) = update.class_name.as_deref() {
            ensure_name("class_name", class_name)?;
        }
        if let Some(threshold) = update.confidence_threshold {
            ensure_threshold(threshold)?;
        }
        if let Some(region) = update.region_of_interest {
            ensure_region(region)?;
        }
        let alarm = observe(
            KIND,
            "update",
            self.store.update_alarm(alarm_id, update).await,
        )?
        .ok_or_else(|| StorageError::not_found(KIND, alarm_id))?;
        self.cache.invalidate();
        info!(target: "nvc.storage", kind = %KIND, alarm_id, "entity_updated");
        Ok(alarm)
    }

    pub async fn delete(&self, alarm_id: AlarmId) -> Result<(), StorageError> {
        let deleted = observe(KIND, "delete", self.store.delete_alarm(alarm_id).await)?;
        if !deleted {
            return Err(StorageError::not_found(KIND, alarm_id));
        }
        self.cache.invalidate();
        info!(target: "nvc.storage", kind = %KIND, alarm_id, "entity_deleted");
        Ok(())
    }

    pub fn invalidate(&self) {
        self.cache.invalidate();
    }
}

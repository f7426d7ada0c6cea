//! 检测模型门面
//!
//! 模型以 name 为键；模型名同时构成告警规则的类别词表。

use super::observe;
use crate::cache::ListingCache;
use crate::error::StorageError;
use crate::traits::ModelStore;
use crate::validation::{ensure_name, ensure_threshold};
use api_contract::{EntityKind, Model, ModelCreate, ModelUpdate};
use std::sync::Arc;
use tracing::info;

const KIND: EntityKind = EntityKind::Model;

pub struct ModelFacade {
    store: Arc<dyn ModelStore>,
    cache: ListingCache<Model>,
}

impl ModelFacade {
    pub fn new(store: Arc<dyn ModelStore>) -> Self {
        Self {
            store,
            cache: ListingCache::new(KIND),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Model>, StorageError> {
        let result = self
            .cache
            .get_or_fetch((), || self.store.list_models())
            .await;
        observe(KIND, "list", result)
    }

    pub fn cached(&self) -> Option<Vec<Model>> {
        self.cache.peek(&())
    }

    /// 类别词表（模型名列表）
    pub async fn class_names(&self) -> Result<Vec<String>, StorageError> {
        let models = self.list_all().await?;
        Ok(models.into_iter().map(|model| model.name).collect())
    }

    pub async fn get_one(&self, name: &str) -> Result<Model, StorageError> {
        observe(KIND, "get", self.store.find_model(name).await)?
            .ok_or_else(|| StorageError::not_found(KIND, name))
    }

    pub async fn create(&self, record: ModelCreate) -> Result<Model, StorageError> {
        ensure_name("name", &record.name)?;
        let model = observe(KIND, "create", self.store.create_model(record).await)?;
        self.cache.invalidate();
        info!(target: "nvc.storage", kind = %KIND, name = %model.name, "entity_created");
        Ok(model)
    }

    pub async fn update(&self, name: &str, update: ModelUpdate) -> Result<Model, StorageError> {
        if let Some(threshold) = update.confidence_threshold {
            ensure_threshold(threshold)?;
        }
        let model = observe(KIND, "update", self.store.update_model(name, update).await)?
            .ok_or_else(|| StorageError::not_found(KIND, name))?;
        self.cache.invalidate();
        info!(target: "nvc.storage", kind = %KIND, name, "entity_updated");
        Ok(model)
    }

    pub async fn delete(&self, name: &str) -> Result<(), StorageError> {
        let deleted = observe(KIND, "delete", self.store.delete_model(name).await)?;
        if !deleted {
            return Err(StorageError::not_found(KIND, name));
        }
        self.cache.invalidate();
        info!(target: "nvc.storage", kind = %KIND, name, "entity_deleted");
        Ok(())
    }

    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    /// 设置模型默认阈值，输入先钳制到 [0,1]；非有限值拒绝
    pub async fn set_threshold(&self, name: &str, threshold: f64) -> Result<Model, StorageError> {
        if !threshold.is_finite() {
            return Err(StorageError::invalid("confidence_threshold must be finite"));
        }
        let update = ModelUpdate {
            confidence_threshold: Some(threshold.clamp(0.0, 1.0)),
            ..ModelUpdate::default()
        };
        self.update(name, update).await
    }
}

//! 检测模型内存存储实现
//!
//! 模型以 name 为键；`with_default_models` 预置常用检测模型。

use super::{FaultSwitch, lock_failed};
use crate::error::StorageError;
use crate::traits::ModelStore;
use api_contract::{Model, ModelCreate, ModelUpdate};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// 检测模型内存存储
pub struct InMemoryModelStore {
    models: RwLock<BTreeMap<String, Model>>,
    faults: FaultSwitch,
}

impl InMemoryModelStore {
    pub fn new() -> Self {
        Self::with_faults(FaultSwitch::new())
    }

    pub fn with_faults(faults: FaultSwitch) -> Self {
        Self {
            models: RwLock::new(BTreeMap::new()),
            faults,
        }
    }

    /// 创建包含默认模型的存储
    pub fn with_default_models() -> Self {
        Self::new().with_models(default_models())
    }

    /// 预置模型列表（同名覆盖）
    pub fn with_models(self, models: Vec<Model>) -> Self {
        let models = models
            .into_iter()
            .map(|model| (model.name.clone(), model))
            .collect();
        Self {
            models: RwLock::new(models),
            ..self
        }
    }
}

/// 默认检测模型
pub fn default_models() -> Vec<Model> {
    [
        ("yolov5s", "YOLOv5 small", true),
        ("yolov5m", "YOLOv5 medium", true),
        ("yolov5l", "YOLOv5 large", true),
        ("yolov5x", "YOLOv5 extra large", false),
    ]
    .into_iter()
    .map(|(name, description, is_available)| Model {
        name: name.to_string(),
        description: description.to_string(),
        is_available,
        confidence_threshold: None,
    })
    .collect()
}

impl Default for InMemoryModelStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ModelStore for InMemoryModelStore {
    async fn list_models(&self) -> Result<Vec<Model>, StorageError> {
        self.faults.check()?;
        let models = self.models.read().map_err(lock_failed)?;
        Ok(models.values().cloned().collect())
    }

    async fn find_model(&self, name: &str) -> Result<Option<Model>, StorageError> {
        self.faults.check()?;
        let models = self.models.read().map_err(lock_failed)?;
        Ok(models.get(name).cloned())
    }

    async fn create_model(&self, record: ModelCreate) -> Result<Model, StorageError> {
        self.faults.check()?;
        let mut models = self.models.write().map_err(lock_failed)?;
        if models.contains_key(&record.name) {
            return Err(StorageError::Status {
                status: 400,
                message: "model exists".to_string(),
            });
        }
        let model = Model {
            name: record.name,
            description: record.description,
            is_available: record.is_available,
            confidence_threshold: None,
        };
        models.insert(model.name.clone(), model.clone());
        Ok(model)
    }

    async fn update_model(
        &self,
        name: &str,
        update: ModelUpdate,
    ) -> Result<Option<Model>, StorageError> {
        self.faults.check()?;
        let mut models = self.models.write().map_err(lock_failed)?;
        let model = match models.get_mut(name) {
            Some(model) => model,
            None => return Ok(None),
        };
        if let Some(description) = update.description {
            model.description = description;
        }
        if let Some(is_available) = update.is_available {
            model.is_available = is_available;
        }
        if let Some(threshold) = update.confidence_threshold {
            model.confidence_threshold = Some(threshold);
        }
        Ok(Some(model.clone()))
    }

    async fn delete_model(&self, name: &str) -> Result<bool, StorageError> {
        self.faults.check()?;
        let mut models = self.models.write().map_err(lock_failed)?;
        Ok(models.remove(name).is_some())
    }
}

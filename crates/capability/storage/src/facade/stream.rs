//! 视频流门面
//!
//! 创建时校验 camera_id 存在于当前摄像头列表；状态只提交期望值，
//! 帧计数由后端推进。

use super::{CameraFacade, observe};
use crate::cache::ListingCache;
use crate::error::StorageError;
use crate::traits::StreamStore;
use api_contract::{EntityKind, Stream, StreamCreate, StreamId, StreamStatus, StreamUpdate};
use std::sync::Arc;
use tracing::info;

const KIND: EntityKind = EntityKind::Stream;

pub struct StreamFacade {
    store: Arc<dyn StreamStore>,
    cameras: Arc<CameraFacade>,
    cache: ListingCache<Stream>,
}

impl StreamFacade {
    pub fn new(store: Arc<dyn StreamStore>, cameras: Arc<CameraFacade>) -> Self {
        Self {
            store,
            cameras,
            cache: ListingCache::new(KIND),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Stream>, StorageError> {
        let result = self
            .cache
            .get_or_fetch((), || self.store.list_streams())
            .await;
        observe(KIND, "list", result)
    }

    pub fn cached(&self) -> Option<Vec<Stream>> {
        self.cache.peek(&())
    }

    pub async fn get_one(&self, stream_id: StreamId) -> Result<Stream, StorageError> {
        observe(KIND, "get", self.store.find_stream(stream_id).await)?
            .ok_or_else(|| StorageError::not_found(KIND, stream_id))
    }

    pub async fn create(&self, record: StreamCreate) -> Result<Stream, StorageError> {
        let cameras = self.cameras.list_all().await?;
        if !cameras.iter().any(|camera| camera.id == record.camera_id) {
            return Err(StorageError::invalid(format!(
                "camera_id {} does not reference an existing camera",
                record.camera_id
            )));
        }
        let stream = observe(KIND, "create", self.store.create_stream(record).await)?;
        self.cache.invalidate();
        info!(
            target: "nvc.storage",
            kind = %KIND,
            stream_id = stream.id,
            camera_id = stream.camera_id,
            "entity_created"
        );
        Ok(stream)
    }

    pub async fn update(
        &self,
        stream_id: StreamId,
        update: StreamUpdate,
    ) -> Result<Stream, StorageError> {
        let stream = observe(
            KIND,
            "update",
            self.store.update_stream(stream_id, update).await,
        )?
        .ok_or_else(|| StorageError::not_found(KIND, stream_id))?;
        self.cache.invalidate();
        info!(
            target: "nvc.storage",
            kind = %KIND,
            stream_id,
            status = %stream.status,
            "entity_updated"
        );
        Ok(stream)
    }

    pub async fn delete(&self, stream_id: StreamId) -> Result<(), StorageError> {
        let deleted = observe(KIND, "delete", self.store.delete_stream(stream_id).await)?;
        if !deleted {
            return Err(StorageError::not_found(KIND, stream_id));
        }
        self.cache.invalidate();
        info!(target: "nvc.storage", kind = %KIND, stream_id, "entity_deleted");
        Ok(())
    }

    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    /// 请求启动视频流
    pub async fn start(&self, stream_id: StreamId) -> Result<Stream, StorageError> {
        self.request_status(stream_id, StreamStatus::Running).await
    }

    /// 请求停止视频流
    pub async fn stop(&self, stream_id: StreamId) -> Result<Stream, StorageError> {
        self.request_status(stream_id, StreamStatus::Stopped).await
    }

    async fn request_status(
        &self,
        stream_id: StreamId,
        status: StreamStatus,
    ) -> Result<Stream, StorageError> {
        let update = StreamUpdate {
            status: Some(status),
            metadata: None,
        };
        self.update(stream_id, update).await
    }
}

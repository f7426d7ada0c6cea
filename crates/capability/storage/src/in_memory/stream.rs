//! 视频流内存存储实现
//!
//! 状态与帧计数由“后端”推进：`advance_frame` 模拟采集端上报。

use super::{FaultSwitch, lock_failed, now};
use crate::error::StorageError;
use crate::traits::StreamStore;
use api_contract::{Stream, StreamCreate, StreamId, StreamUpdate};
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Default)]
struct StreamTable {
    next_id: StreamId,
    records: BTreeMap<StreamId, Stream>,
}

/// 视频流内存存储
pub struct InMemoryStreamStore {
    table: RwLock<StreamTable>,
    faults: FaultSwitch,
}

impl InMemoryStreamStore {
    pub fn new() -> Self {
        Self::with_faults(FaultSwitch::new())
    }

    pub fn with_faults(faults: FaultSwitch) -> Self {
        Self {
            table: RwLock::new(StreamTable::default()),
            faults,
        }
    }

    /// 推进帧计数（模拟采集端上报），返回新的帧号
    pub fn advance_frame(
        &self,
        stream_id: StreamId,
        frames: u64,
    ) -> Result<Option<u64>, StorageError> {
        let mut table = self.table.write().map_err(lock_failed)?;
        Ok(table.records.get_mut(&stream_id).map(|stream| {
            stream.current_frame = stream.current_frame.saturating_add(frames);
            stream.updated_at = now();
            stream.current_frame
        }))
    }
}

impl Default for InMemoryStreamStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl StreamStore for InMemoryStreamStore {
    async fn list_streams(&self) -> Result<Vec<Stream>, StorageError> {
        self.faults.check()?;
        let table = self.table.read().map_err(lock_failed)?;
        Ok(table.records.values().cloned().collect())
    }

    async fn find_stream(&self, stream_id: StreamId) -> Result<Option<Stream>, StorageError> {
        self.faults.check()?;
        let table = self.table.read().map_err(lock_failed)?;
        Ok(table.records.get(&stream_id).cloned())
    }

    async fn create_stream(&self, record: StreamCreate) -> Result<Stream, StorageError> {
        self.faults.check()?;
        let mut table = self.table.write().map_err(lock_failed)?;
        table.next_id += 1;
        let timestamp = now();
        let stream = Stream {
            id: table.next_id,
            camera_id: record.camera_id,
            status: Default::default(),
            current_frame: 0,
            metadata: record.metadata.unwrap_or_default(),
            created_at: timestamp,
            updated_at: timestamp,
        };
        table.records.insert(stream.id, stream.clone());
        Ok(stream)
    }

    async fn update_stream(
        &self,
        stream_id: StreamId,
        update: StreamUpdate,
    ) -> Result<Option<Stream>, StorageError> {
        self.faults.check()?;
        let mut table = self.table.write().map_err(lock_failed)?;
        let stream = match table.records.get_mut(&stream_id) {
            Some(stream) => stream,
            None => return Ok(None),
        };
        if let Some(status) = update.status {
            stream.status = status;
        }
        if let Some(metadata) = update.metadata {
            stream.metadata = metadata;
        }
        stream.updated_at = now();
        Ok(Some(stream.clone()))
    }

    async fn delete_stream(&self, stream_id: StreamId) -> Result<bool, StorageError> {
        self.faults.check()?;
        let mut table = self.table.write().map_err(lock_failed)?;
        Ok(table.records.remove(&stream_id).is_some())
    }
}

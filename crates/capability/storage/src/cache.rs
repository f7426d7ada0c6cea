//! 列表缓存
//!
//! 每个实体种类一个显式的缓存对象，失效通过方法调用完成。
//!
//! 顺序保证：写操作在后端确认之后、返回调用方之前调用 `invalidate`，
//! 因此在写操作完成之后发起的任何读取都会重新拉取。
//! 失效会推进 generation；拉取开始时记录 generation，若拉取期间发生失效，
//! 则拉取结果只返回给本次调用方，不写回缓存。

use crate::error::StorageError;
use api_contract::EntityKind;
use nvc_telemetry::{record_cache_hit, record_cache_invalidation, record_cache_miss};
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

struct CacheState<K, T> {
    generation: u64,
    entries: HashMap<K, Vec<T>>,
}

/// 按实体种类划分的列表缓存，`K` 为列表键（无过滤条件时为 `()`）。
pub struct ListingCache<T, K = ()> {
    kind: EntityKind,
    state: RwLock<CacheState<K, T>>,
}

impl<T, K> ListingCache<T, K>
where
    T: Clone,
    K: Eq + Hash,
{
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            state: RwLock::new(CacheState {
                generation: 0,
                entries: HashMap::new(),
            }),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// 当前失效代数。
    pub fn generation(&self) -> u64 {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generation
    }

    /// 读取缓存中的列表（不触发拉取）。
    pub fn peek(&self, key: &K) -> Option<Vec<T>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .get(key)
            .cloned()
    }

    pub fn is_cached(&self, key: &K) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .contains_key(key)
    }

    /// 写回拉取结果；若拉取期间发生过失效则丢弃并返回 false。
    pub fn store(&self, key: K, fetched_at: u64, items: Vec<T>) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.generation != fetched_at {
            debug!(target: "nvc.storage", kind = %self.kind, "listing_store_skipped_stale");
            return false;
        }
        state.entries.insert(key, items);
        true
    }

    /// 标记该种类全部列表为过期，下一次读取强制重新拉取。
    pub fn invalidate(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.generation += 1;
        state.entries.clear();
        record_cache_invalidation();
        debug!(
            target: "nvc.storage",
            kind = %self.kind,
            generation = state.generation,
            "listing_invalidated"
        );
    }

    /// 命中缓存直接返回，否则调用 `fetch` 拉取并写回。
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> Result<Vec<T>, StorageError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, StorageError>>,
    {
        if let Some(items) = self.peek(&key) {
            record_cache_hit();
            return Ok(items);
        }
        record_cache_miss();
        let fetched_at = self.generation();
        let items = fetch().await?;
        self.store(key, fetched_at, items.clone());
        Ok(items)
    }
}

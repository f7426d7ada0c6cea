//! 内存存储实现模块
//!
//! 用于本地演示、测试以及 REST 模拟服务端。
//!
//! 包含以下实现：
//! - CameraStore: InMemoryCameraStore
//! - StreamStore: InMemoryStreamStore
//! - ModelStore: InMemoryModelStore
//! - AlarmStore: InMemoryAlarmStore
//! - DetectionStore: InMemoryDetectionStore
//! - RoiStore: InMemoryRoiStore
//!
//! 所有存储共享同一套约定：服务端分配自增 id 与 created/updated 时间戳，
//! 更新请求只覆盖提供的字段；`FaultSwitch` 打开时每次调用都返回传输错误。

pub mod alarm;
pub mod camera;
pub mod detection;
pub mod fault;
pub mod model;
pub mod roi;
pub mod stream;

pub use alarm::*;
pub use camera::*;
pub use detection::*;
pub use fault::*;
pub use model::*;
pub use roi::*;
pub use stream::*;

use crate::error::StorageError;
use chrono::{NaiveDateTime, Utc};

/// 服务端时间戳（UTC，无时区）
pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

pub(crate) fn lock_failed<T>(_: T) -> StorageError {
    StorageError::invalid("lock failed")
}

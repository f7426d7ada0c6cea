//! 故障注入开关
//!
//! 模拟后端不可达，用于验证传输失败路径。

use crate::error::StorageError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 可在多个存储之间共享的故障开关
#[derive(Debug, Clone, Default)]
pub struct FaultSwitch {
    failing: Arc<AtomicBool>,
}

impl FaultSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn is_failing(&self) -> bool {
        self.failing.load(Ordering::SeqCst)
    }

    /// 开关打开时返回传输错误
    pub fn check(&self) -> Result<(), StorageError> {
        if self.is_failing() {
            return Err(StorageError::Transport("backend unreachable".to_string()));
        }
        Ok(())
    }
}

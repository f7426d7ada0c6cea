//! 存储层错误类型
//!
//! 统一封装实体门面可能遇到的错误：
//! - 资源不存在（NotFound）
//! - 客户端校验失败（Invalid），发生在任何网络调用之前
//! - 传输失败（Transport / Status / Decode），可由用户重试

use api_contract::EntityKind;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: EntityKind, key: String },

    #[error("invalid request: {0}")]
    Invalid(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("server error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("decode error: {0}")]
    Decode(String),
}

impl StorageError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn not_found(kind: EntityKind, key: impl ToString) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    /// 传输类错误：操作可重试，本地表单状态需保留。
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Status { .. } | Self::Decode(_)
        )
    }
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

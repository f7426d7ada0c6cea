//! 告警编辑错误类型

use nvc_storage::StorageError;

/// 表单校验错误，发生在任何后端调用之前，显示在对应字段旁
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("alarm name is required")]
    MissingName,

    #[error("camera selection is required")]
    MissingCamera,

    #[error("camera {0} does not exist")]
    UnknownCamera(i64),

    #[error("object class selection is required")]
    MissingClass,

    #[error("object class {0} is not available")]
    UnknownClass(String),

    #[error("confidence threshold must be a finite number")]
    ThresholdNotFinite,

    #[error("region of interest has zero area")]
    DegenerateRegion,

    #[error("region of interest starts outside the frame origin")]
    NegativeRegion,

    #[error("region of interest exceeds the {width}x{height} frame")]
    RegionOutOfBounds { width: f64, height: f64 },
}

impl ValidationError {
    /// 出错的表单字段名
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingName => "name",
            ValidationError::MissingCamera | ValidationError::UnknownCamera(_) => "camera_id",
            ValidationError::MissingClass | ValidationError::UnknownClass(_) => "class_name",
            ValidationError::ThresholdNotFinite => "confidence_threshold",
            ValidationError::DegenerateRegion
            | ValidationError::NegativeRegion
            | ValidationError::RegionOutOfBounds { .. } => "region_of_interest",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("no alarm editing session is open")]
    NotOpen,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ComposeError {
    /// 可由用户重新提交的失败（传输类）
    pub fn is_retryable(&self) -> bool {
        matches!(self, ComposeError::Storage(err) if err.is_transport())
    }
}

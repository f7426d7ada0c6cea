//! 告警编辑表单与会话状态

use crate::error::ValidationError;
use api_contract::{Alarm, AlarmCreate, AlarmId, Camera, CameraId, Model};
use domain::{Rect, Size};

/// 编辑会话
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Closed,
    OpenCreate,
    OpenEdit { alarm_id: AlarmId },
}

impl Session {
    pub fn is_open(&self) -> bool {
        !matches!(self, Session::Closed)
    }
}

/// 告警编辑表单的瞬态字段
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmForm {
    pub name: String,
    pub camera_id: Option<CameraId>,
    pub class_name: Option<String>,
    /// 始终位于 [0,1]
    pub confidence_threshold: f64,
    /// 图像空间；`None` 表示未框选，提交时使用整帧
    pub region: Option<Rect>,
    pub is_active: bool,
}

impl AlarmForm {
    pub fn with_defaults(default_confidence: f64) -> Self {
        Self {
            name: String::new(),
            camera_id: None,
            class_name: None,
            confidence_threshold: clamp_threshold(default_confidence),
            region: None,
            is_active: true,
        }
    }

    /// 以现有告警填充（编辑流程）
    pub fn from_alarm(alarm: &Alarm) -> Self {
        Self {
            name: alarm.name.clone(),
            camera_id: Some(alarm.camera_id),
            class_name: Some(alarm.class_name.clone()),
            confidence_threshold: clamp_threshold(alarm.confidence_threshold),
            region: Some(alarm.roi()),
            is_active: alarm.is_active,
        }
    }

    /// 基于当前摄像头与模型列表校验并组装请求体。
    ///
    /// 帧尺寸优先取 `loaded_frame`，其次取所选摄像头的分辨率，最后取 `fallback_frame`。
    /// 左上角不得为负；右下角边界只有在前两者之一已知时才检查。
    pub fn validate(
        &self,
        cameras: &[Camera],
        models: &[Model],
        loaded_frame: Option<Size>,
        fallback_frame: Size,
    ) -> Result<AlarmCreate, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let camera_id = self.camera_id.ok_or(ValidationError::MissingCamera)?;
        let camera = cameras
            .iter()
            .find(|camera| camera.id == camera_id)
            .ok_or(ValidationError::UnknownCamera(camera_id))?;
        let class_name = self
            .class_name
            .as_deref()
            .map(str::trim)
            .filter(|class_name| !class_name.is_empty())
            .ok_or(ValidationError::MissingClass)?;
        if !models.iter().any(|model| model.name == class_name) {
            return Err(ValidationError::UnknownClass(class_name.to_string()));
        }
        if !self.confidence_threshold.is_finite() {
            return Err(ValidationError::ThresholdNotFinite);
        }

        let known_frame = loaded_frame.or_else(|| camera.frame_size());
        let frame = known_frame.unwrap_or(fallback_frame);
        let region = self.region.unwrap_or_else(|| Rect::full_frame(frame));
        if region.is_degenerate() {
            return Err(ValidationError::DegenerateRegion);
        }
        if region.x_min < 0.0 || region.y_min < 0.0 {
            return Err(ValidationError::NegativeRegion);
        }
        if let Some(frame) = known_frame {
            if !region.is_within(frame) {
                return Err(ValidationError::RegionOutOfBounds {
                    width: frame.width,
                    height: frame.height,
                });
            }
        }

        Ok(AlarmCreate {
            name: name.to_string(),
            camera_id,
            class_name: class_name.to_string(),
            confidence_threshold: clamp_threshold(self.confidence_threshold),
            region_of_interest: region.to_array(),
            is_active: self.is_active,
        })
    }
}

pub(crate) fn clamp_threshold(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        value
    }
}

//! 告警规则编辑器
//!
//! 会话状态机：
//!
//! ```text
//! Closed ──open_create──▶ OpenCreate ──submit 成功──▶ Closed
//! Closed ──open_edit────▶ OpenEdit   ──submit 成功──▶ Closed
//! Open* ──submit 失败──▶ Open*（表单保持原值）
//! Open* ──cancel──▶ Closed（丢弃编辑）
//! ```

use crate::error::{ComposeError, ValidationError};
use crate::form::{AlarmForm, Session, clamp_threshold};
use api_contract::{Alarm, AlarmCreate, AlarmUpdate, CameraId};
use domain::{Rect, Size};
use nvc_roi::CaptureController;
use nvc_storage::{AlarmFacade, CameraFacade, EntityFacades, ModelFacade};
use std::sync::Arc;
use tracing::{info, warn};

/// 编辑器默认值
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposerDefaults {
    /// 新建告警的默认置信度阈值
    pub confidence: f64,
    /// 既无已加载帧也无摄像头分辨率时的整帧尺寸
    pub frame_size: Size,
}

impl Default for ComposerDefaults {
    fn default() -> Self {
        Self {
            confidence: 0.5,
            frame_size: Size::new(640.0, 480.0),
        }
    }
}

pub struct AlarmComposer {
    alarms: Arc<AlarmFacade>,
    cameras: Arc<CameraFacade>,
    models: Arc<ModelFacade>,
    defaults: ComposerDefaults,
    session: Session,
    form: AlarmForm,
    loaded_frame: Option<Size>,
}

impl AlarmComposer {
    pub fn new(
        alarms: Arc<AlarmFacade>,
        cameras: Arc<CameraFacade>,
        models: Arc<ModelFacade>,
        defaults: ComposerDefaults,
    ) -> Self {
        Self {
            alarms,
            cameras,
            models,
            defaults,
            session: Session::Closed,
            form: AlarmForm::with_defaults(defaults.confidence),
            loaded_frame: None,
        }
    }

    pub fn from_facades(facades: &EntityFacades, defaults: ComposerDefaults) -> Self {
        Self::new(
            facades.alarms.clone(),
            facades.cameras.clone(),
            facades.models.clone(),
            defaults,
        )
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn form(&self) -> &AlarmForm {
        &self.form
    }

    pub fn open_create(&mut self) {
        self.reset();
        self.session = Session::OpenCreate;
    }

    pub fn open_edit(&mut self, alarm: &Alarm) {
        self.reset();
        self.form = AlarmForm::from_alarm(alarm);
        self.session = Session::OpenEdit { alarm_id: alarm.id };
    }

    /// 关闭会话并丢弃全部编辑
    pub fn cancel(&mut self) {
        self.reset();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.name = name.into();
    }

    pub fn select_camera(&mut self, camera_id: CameraId) {
        self.form.camera_id = Some(camera_id);
    }

    pub fn select_class(&mut self, class_name: impl Into<String>) {
        self.form.class_name = Some(class_name.into());
    }

    /// 输入阈值钳制到 [0,1]；非有限值拒绝且保持原值
    pub fn set_threshold(&mut self, value: f64) -> Result<f64, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::ThresholdNotFinite);
        }
        self.form.confidence_threshold = clamp_threshold(value);
        Ok(self.form.confidence_threshold)
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.form.is_active = is_active;
    }

    /// 采用一次已提交的框选结果（图像空间）
    pub fn apply_region(&mut self, region: Rect) {
        self.form.region = Some(Rect::from_array(region.to_array()));
    }

    /// 从框选控制器读取最近一次提交；没有提交时返回 false。
    ///
    /// 源帧尚未加载（图像尺寸为零）时不覆盖已知的帧尺寸。
    pub fn apply_capture(&mut self, controller: &CaptureController) -> bool {
        let image_size = controller.image_size();
        if image_size.is_positive() {
            self.loaded_frame = Some(image_size);
        }
        match controller.committed() {
            Some(region) => {
                self.apply_region(region);
                true
            }
            None => false,
        }
    }

    /// 清除框选，提交时回退为整帧
    pub fn clear_region(&mut self) {
        self.form.region = None;
    }

    /// 记录已加载帧的原生尺寸
    pub fn set_frame_size(&mut self, size: Size) {
        self.loaded_frame = size.is_positive().then_some(size);
    }

    /// 基于当前摄像头与模型列表校验表单
    pub async fn validate(&self) -> Result<AlarmCreate, ComposeError> {
        let cameras = self.cameras.list_all().await?;
        let models = self.models.list_all().await?;
        let record = self.form.validate(
            &cameras,
            &models,
            self.loaded_frame,
            self.defaults.frame_size,
        )?;
        Ok(record)
    }

    /// 提交：编辑中调用 update，否则调用 create。
    ///
    /// 成功后关闭会话并重置表单；失败时会话与表单保持不变。
    pub async fn submit(&mut self) -> Result<Alarm, ComposeError> {
        if !self.session.is_open() {
            return Err(ComposeError::NotOpen);
        }
        let record = match self.validate().await {
            Ok(record) => record,
            Err(err) => {
                warn!(target: "nvc.alarm", error = %err, "alarm_validation_failed");
                return Err(err);
            }
        };
        let result = match self.session {
            Session::OpenEdit { alarm_id } => {
                self.alarms
                    .update(alarm_id, AlarmUpdate::from(record))
                    .await
            }
            _ => self.alarms.create(record).await,
        };
        match result {
            Ok(alarm) => {
                info!(
                    target: "nvc.alarm",
                    alarm_id = alarm.id,
                    camera_id = alarm.camera_id,
                    class_name = %alarm.class_name,
                    "alarm_saved"
                );
                self.reset();
                Ok(alarm)
            }
            Err(err) => {
                warn!(target: "nvc.alarm", error = %err, "alarm_submit_failed");
                Err(err.into())
            }
        }
    }

    fn reset(&mut self) {
        self.session = Session::Closed;
        self.form = AlarmForm::with_defaults(self.defaults.confidence);
        self.loaded_frame = None;
    }
}

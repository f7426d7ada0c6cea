//! 告警规则求值
//!
//! 检测器是外部服务，契约为：给定帧、摄像头、模型名与阈值，
//! 返回零个或多个 (类别, 置信度, 边框)。

use api_contract::{Alarm, AlarmId, CameraId};
use async_trait::async_trait;
use domain::Rect;
use std::collections::BTreeMap;
use tracing::debug;

/// 检测器返回的单个目标（边框为图像空间）
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedObject {
    pub class_name: String,
    pub confidence: f64,
    pub bbox: Rect,
}

#[derive(Debug, thiserror::Error)]
#[error("detector failed: {0}")]
pub struct DetectorError(pub String);

#[async_trait]
pub trait Detector: Send + Sync {
    async fn detect(
        &self,
        frame: &[u8],
        camera_id: CameraId,
        model_name: &str,
        threshold: f64,
    ) -> Result<Vec<DetectedObject>, DetectorError>;
}

/// 可求值的告警条件
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmRule {
    pub alarm_id: AlarmId,
    pub camera_id: CameraId,
    pub class_name: String,
    pub confidence_threshold: f64,
    pub region: Rect,
    pub is_active: bool,
}

impl From<&Alarm> for AlarmRule {
    fn from(alarm: &Alarm) -> Self {
        Self {
            alarm_id: alarm.id,
            camera_id: alarm.camera_id,
            class_name: alarm.class_name.clone(),
            confidence_threshold: alarm.confidence_threshold,
            region: alarm.roi(),
            is_active: alarm.is_active,
        }
    }
}

impl AlarmRule {
    /// 规则启用、摄像头与类别一致、置信度不低于阈值，且边框中心落在 ROI 内（含边界）
    pub fn triggered_by(&self, camera_id: CameraId, object: &DetectedObject) -> bool {
        self.is_active
            && self.camera_id == camera_id
            && self.class_name == object.class_name
            && object.confidence >= self.confidence_threshold
            && self.region.contains(object.bbox.center())
    }
}

/// 一次触发
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    pub alarm_id: AlarmId,
    pub object: DetectedObject,
}

/// 对一帧求值：同一 (摄像头, 模型) 只调用一次检测器，阈值取该组最小值
pub async fn evaluate_frame(
    detector: &dyn Detector,
    frame: &[u8],
    camera_id: CameraId,
    alarms: &[Alarm],
) -> Result<Vec<Trigger>, DetectorError> {
    let mut groups: BTreeMap<&str, Vec<AlarmRule>> = BTreeMap::new();
    for alarm in alarms
        .iter()
        .filter(|alarm| alarm.is_active && alarm.camera_id == camera_id)
    {
        groups
            .entry(alarm.class_name.as_str())
            .or_default()
            .push(AlarmRule::from(alarm));
    }

    let mut triggers = Vec::new();
    for (model_name, rules) in groups {
        let threshold = rules
            .iter()
            .map(|rule| rule.confidence_threshold)
            .fold(1.0, f64::min);
        let objects = detector
            .detect(frame, camera_id, model_name, threshold)
            .await?;
        debug!(
            target: "nvc.alarm",
            camera_id,
            model_name,
            objects = objects.len(),
            "frame_evaluated"
        );
        for rule in &rules {
            for object in objects.iter().filter(|object| rule.triggered_by(camera_id, object)) {
                triggers.push(Trigger {
                    alarm_id: rule.alarm_id,
                    object: object.clone(),
                });
            }
        }
    }
    Ok(triggers)
}

//! 告警卡片（列表展示）

use api_contract::{Alarm, AlarmId, Camera};
use nvc_storage::camera_label;

#[derive(Debug, Clone, PartialEq)]
pub struct AlarmCard {
    pub alarm_id: AlarmId,
    pub name: String,
    /// 摄像头已删除时为占位符
    pub camera_name: String,
    pub class_name: String,
    pub confidence_threshold: f64,
    pub is_active: bool,
}

impl AlarmCard {
    pub fn status_label(&self) -> &'static str {
        if self.is_active { "Active" } else { "Inactive" }
    }
}

pub fn alarm_cards(alarms: &[Alarm], cameras: &[Camera]) -> Vec<AlarmCard> {
    alarms
        .iter()
        .map(|alarm| AlarmCard {
            alarm_id: alarm.id,
            name: alarm.name.clone(),
            camera_name: camera_label(cameras, alarm.camera_id),
            class_name: alarm.class_name.clone(),
            confidence_threshold: alarm.confidence_threshold,
            is_active: alarm.is_active,
        })
        .collect()
}

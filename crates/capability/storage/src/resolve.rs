//! 跨实体展示名解析（降级模式）
//!
//! 被引用的实体可能已被删除，解析失败时回退为占位符而不是报错。

use api_contract::{Camera, CameraId, Model, Stream, StreamId, StreamStatus};

/// 引用悬空时的占位展示名
pub const UNKNOWN_LABEL: &str = "Unknown";

/// 解析摄像头展示名
pub fn camera_label(cameras: &[Camera], camera_id: CameraId) -> String {
    cameras
        .iter()
        .find(|camera| camera.id == camera_id)
        .map(|camera| camera.name.clone())
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

/// 解析模型展示名（模型以 name 为键，仅在模型仍存在时原样返回）
pub fn model_label(models: &[Model], name: &str) -> String {
    models
        .iter()
        .find(|model| model.name == name)
        .map(|model| model.name.clone())
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

/// 视频流卡片
#[derive(Debug, Clone, PartialEq)]
pub struct StreamCard {
    pub stream_id: StreamId,
    pub camera_id: CameraId,
    pub camera_name: String,
    pub status: StreamStatus,
    pub current_frame: u64,
}

/// 按当前摄像头列表生成视频流卡片
pub fn stream_cards(streams: &[Stream], cameras: &[Camera]) -> Vec<StreamCard> {
    streams
        .iter()
        .map(|stream| StreamCard {
            stream_id: stream.id,
            camera_id: stream.camera_id,
            camera_name: camera_label(cameras, stream.camera_id),
            status: stream.status,
            current_frame: stream.current_frame,
        })
        .collect()
}

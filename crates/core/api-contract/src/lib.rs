//! 稳定的后端 REST 契约（实体记录、创建/更新请求体、扫描描述）。
//!
//! 字段名与后端 JSON 保持一致（snake_case），服务端负责分配 id 与时间戳。

use chrono::NaiveDateTime;
use domain::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

pub type CameraId = i64;
pub type StreamId = i64;
pub type AlarmId = i64;
pub type DetectionId = i64;
pub type RoiId = i64;

/// 自由键值元数据（Stream / Detection）。
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// 实体种类，同时决定 REST 路径 `/{kind}/`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Camera,
    Stream,
    Model,
    Alarm,
    Detection,
    Roi,
}

impl EntityKind {
    /// REST 集合路径段。
    pub fn path(&self) -> &'static str {
        match self {
            EntityKind::Camera => "cameras",
            EntityKind::Stream => "streams",
            EntityKind::Model => "models",
            EntityKind::Alarm => "alarms",
            EntityKind::Detection => "detections",
            EntityKind::Roi => "roi",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Camera => "camera",
            EntityKind::Stream => "stream",
            EntityKind::Model => "model",
            EntityKind::Alarm => "alarm",
            EntityKind::Detection => "detection",
            EntityKind::Roi => "roi",
        };
        write!(f, "{name}")
    }
}

// ============================================================================
// 摄像头
// ============================================================================

/// 摄像头来源类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraType {
    /// 网络摄像头（rtsp_url）
    #[default]
    Rtsp,
    /// 本地设备（device_id）
    Local,
}

/// 摄像头记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub id: CameraId,
    pub name: String,
    #[serde(default)]
    pub camera_type: CameraType,
    #[serde(default)]
    pub device_id: Option<i64>,
    #[serde(default)]
    pub rtsp_url: Option<String>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<[u32; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Camera {
    /// 来源定位描述：网络地址或本地设备号。
    pub fn locator(&self) -> String {
        match (self.camera_type, &self.rtsp_url, self.device_id) {
            (CameraType::Rtsp, Some(url), _) => url.clone(),
            (_, _, Some(device_id)) => format!("device:{device_id}"),
            (_, Some(url), None) => url.clone(),
            _ => "-".to_string(),
        }
    }

    /// 采集分辨率对应的图像原生尺寸。
    pub fn frame_size(&self) -> Option<Size> {
        self.resolution
            .filter(|[w, h]| *w > 0 && *h > 0)
            .map(|[w, h]| Size::new(f64::from(w), f64::from(h)))
    }
}

/// 摄像头创建请求体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraCreate {
    pub name: String,
    #[serde(default)]
    pub camera_type: CameraType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtsp_url: Option<String>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<[u32; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

impl CameraCreate {
    /// 网络摄像头创建请求。
    pub fn rtsp(name: impl Into<String>, rtsp_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            camera_type: CameraType::Rtsp,
            device_id: None,
            rtsp_url: Some(rtsp_url.into()),
            is_active: true,
            resolution: None,
            fps: None,
            is_available: None,
        }
    }
}

/// 摄像头更新请求体（部分更新）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_type: Option<CameraType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtsp_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<[u32; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

/// 扫描得到的本地设备描述（瞬态，不持久化）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraInfo {
    pub device_id: i64,
    #[serde(default)]
    pub physical_address: Option<String>,
    #[serde(default)]
    pub usb_id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub resolution: [u32; 2],
    pub fps: f64,
    #[serde(default)]
    pub supported_resolutions: Vec<[u32; 2]>,
    pub is_available: bool,
}

impl CameraInfo {
    /// 展示名，为空时回退为 `Camera {device_id}`。
    pub fn display_name(&self) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            format!("Camera {}", self.device_id)
        } else {
            name.to_string()
        }
    }

    /// 接受扫描结果：转换为本地摄像头创建请求。
    pub fn to_camera_create(&self) -> CameraCreate {
        CameraCreate {
            name: self.display_name(),
            camera_type: CameraType::Local,
            device_id: Some(self.device_id),
            rtsp_url: None,
            is_active: true,
            resolution: Some(self.resolution),
            fps: Some(self.fps),
            is_available: Some(self.is_available),
        }
    }
}

// ============================================================================
// 视频流
// ============================================================================

/// 视频流状态（由后端驱动，客户端只提交期望状态）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    #[default]
    Stopped,
    Running,
    Error,
}

impl std::fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            StreamStatus::Stopped => "stopped",
            StreamStatus::Running => "running",
            StreamStatus::Error => "error",
        };
        write!(f, "{value}")
    }
}

/// 视频流记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    pub id: StreamId,
    pub camera_id: CameraId,
    #[serde(default)]
    pub status: StreamStatus,
    #[serde(default)]
    pub current_frame: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub metadata: Metadata,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// 视频流创建请求体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamCreate {
    pub camera_id: CameraId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// 视频流更新请求体。`current_frame` 只由后端推进，不在此出现。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StreamStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

// ============================================================================
// 检测模型
// ============================================================================

/// 检测模型（以 name 为键，无数字 id）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_threshold: Option<f64>,
}

/// 模型创建请求体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_available: bool,
}

/// 模型更新请求体（阈值类元数据）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_threshold: Option<f64>,
}

// ============================================================================
// 告警规则
// ============================================================================

/// 告警规则记录。
///
/// `region_of_interest` 为图像原生像素坐标 `[x_min, y_min, x_max, y_max]`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: AlarmId,
    pub name: String,
    pub camera_id: CameraId,
    pub class_name: String,
    pub confidence_threshold: f64,
    pub region_of_interest: [f64; 4],
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Alarm {
    pub fn roi(&self) -> Rect {
        Rect::from_array(self.region_of_interest)
    }
}

/// 告警规则创建请求体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmCreate {
    pub name: String,
    pub camera_id: CameraId,
    pub class_name: String,
    pub confidence_threshold: f64,
    pub region_of_interest: [f64; 4],
    pub is_active: bool,
}

/// 告警规则更新请求体（部分更新）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlarmUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_id: Option<CameraId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_of_interest: Option<[f64; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<AlarmCreate> for AlarmUpdate {
    /// 编辑流程提交完整表单。
    fn from(value: AlarmCreate) -> Self {
        Self {
            name: Some(value.name),
            camera_id: Some(value.camera_id),
            class_name: Some(value.class_name),
            confidence_threshold: Some(value.confidence_threshold),
            region_of_interest: Some(value.region_of_interest),
            is_active: Some(value.is_active),
        }
    }
}

// ============================================================================
// 检测结果（只追加）
// ============================================================================

/// 检测结果记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub id: DetectionId,
    pub camera_id: CameraId,
    pub stream_id: StreamId,
    pub frame_number: u64,
    pub timestamp: NaiveDateTime,
    #[serde(alias = "detection_model_name")]
    pub model_name: String,
    pub confidence: f64,
    pub class_name: String,
    pub bbox: [f64; 4],
    #[serde(default, deserialize_with = "null_as_empty")]
    pub metadata: Metadata,
}

/// 检测结果创建请求体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionCreate {
    pub camera_id: CameraId,
    pub stream_id: StreamId,
    pub frame_number: u64,
    pub model_name: String,
    pub confidence: f64,
    pub class_name: String,
    pub bbox: [f64; 4],
    #[serde(default)]
    pub metadata: Metadata,
}

/// 检测结果列表过滤条件（查询参数）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetectionFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_id: Option<CameraId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<StreamId>,
}

impl DetectionFilter {
    pub fn matches(&self, detection: &Detection) -> bool {
        self.camera_id.is_none_or(|id| id == detection.camera_id)
            && self.stream_id.is_none_or(|id| id == detection.stream_id)
    }
}

// ============================================================================
// 命名区域（摄像头作用域）
// ============================================================================

/// 命名区域记录。
///
/// `points` 为图像原生像素坐标的扁平多边形顶点序列 `[x1, y1, x2, y2, ...]`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionOfInterest {
    pub id: RoiId,
    pub camera_id: CameraId,
    pub name: String,
    pub points: Vec<f64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl RegionOfInterest {
    /// 多边形顶点；末尾落单的坐标被忽略。
    pub fn vertices(&self) -> Vec<Point> {
        self.points
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect()
    }

    /// 多边形的外接矩形，没有顶点时为 `None`。
    pub fn bounding_rect(&self) -> Option<Rect> {
        let vertices = self.vertices();
        let first = vertices.first()?;
        let mut rect = Rect {
            x_min: first.x,
            y_min: first.y,
            x_max: first.x,
            y_max: first.y,
        };
        for vertex in &vertices[1..] {
            rect.x_min = rect.x_min.min(vertex.x);
            rect.y_min = rect.y_min.min(vertex.y);
            rect.x_max = rect.x_max.max(vertex.x);
            rect.y_max = rect.y_max.max(vertex.y);
        }
        Some(rect)
    }
}

/// 命名区域创建请求体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiCreate {
    pub camera_id: CameraId,
    pub name: String,
    pub points: Vec<f64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// 命名区域更新请求体（部分更新）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoiUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// 命名区域列表过滤条件（查询参数）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoiFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_id: Option<CameraId>,
}

impl RoiFilter {
    pub fn camera(camera_id: CameraId) -> Self {
        Self {
            camera_id: Some(camera_id),
        }
    }

    pub fn matches(&self, roi: &RegionOfInterest) -> bool {
        self.camera_id.is_none_or(|id| id == roi.camera_id)
    }
}

fn default_active() -> bool {
    true
}

// ============================================================================
// 通用响应
// ============================================================================

/// 删除确认。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteAck {
    #[serde(default)]
    pub message: String,
}

/// 后端错误体 `{"detail": ...}`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: serde_json::Value::String(detail.into()),
        }
    }

    /// 错误描述文本。
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Metadata, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Metadata>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

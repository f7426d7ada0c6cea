//! 命令行参数定义

use clap::{Parser, Subcommand};
use domain::Rect;
use nvc_storage::DEFAULT_SCAN_DEVICES;

/// 监控控制台：摄像头、视频流、检测模型与告警规则管理
#[derive(Parser, Debug)]
#[command(name = "nvc-console")]
#[command(version)]
pub struct Args {
    /// 后端 REST 基地址，覆盖 NVC_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 摄像头管理
    #[command(subcommand)]
    Cameras(CameraCommand),

    /// 视频流控制
    #[command(subcommand)]
    Streams(StreamCommand),

    /// 检测模型设置
    #[command(subcommand)]
    Models(ModelCommand),

    /// 告警规则管理
    #[command(subcommand)]
    Alarms(AlarmCommand),

    /// 检测结果查询
    #[command(subcommand)]
    Detections(DetectionCommand),

    /// 命名区域管理
    #[command(subcommand)]
    Rois(RoiCommand),
}

#[derive(Subcommand, Debug)]
pub enum CameraCommand {
    List,

    /// 扫描本地连接的摄像头
    Scan {
        #[arg(long, default_value_t = DEFAULT_SCAN_DEVICES)]
        max_devices: u32,
    },

    /// 扫描并添加指定设备号的本地摄像头
    AddScanned {
        device_id: i64,

        #[arg(long, default_value_t = DEFAULT_SCAN_DEVICES)]
        max_devices: u32,
    },

    Delete { camera_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum StreamCommand {
    List,
    Start { stream_id: i64 },
    Stop { stream_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum ModelCommand {
    List,

    /// 设置模型默认阈值（钳制到 [0,1]）
    SetThreshold { name: String, threshold: f64 },
}

#[derive(Subcommand, Debug)]
pub enum AlarmCommand {
    List,

    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        camera: i64,

        /// 目标类别（模型名）
        #[arg(long = "class")]
        class_name: String,

        /// 置信度阈值，缺省使用 NVC_DEFAULT_CONFIDENCE
        #[arg(long)]
        threshold: Option<f64>,

        /// 图像空间 ROI：x1,y1,x2,y2；缺省为整帧
        #[arg(long, value_parser = parse_roi)]
        roi: Option<Rect>,

        /// 创建为停用状态
        #[arg(long)]
        inactive: bool,
    },

    /// 编辑已有告警，未给出的字段保持原值
    Update {
        alarm_id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        camera: Option<i64>,

        #[arg(long = "class")]
        class_name: Option<String>,

        #[arg(long)]
        threshold: Option<f64>,

        /// 图像空间 ROI：x1,y1,x2,y2
        #[arg(long, value_parser = parse_roi, conflicts_with = "full_frame")]
        roi: Option<Rect>,

        /// 清除 ROI，改为整帧
        #[arg(long)]
        full_frame: bool,

        /// 启用或停用（true / false）
        #[arg(long)]
        active: Option<bool>,
    },

    Delete { alarm_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum RoiCommand {
    List {
        #[arg(long)]
        camera: Option<i64>,
    },

    Create {
        #[arg(long)]
        camera: i64,

        #[arg(long)]
        name: String,

        /// 多边形顶点：x1,y1,x2,y2,...（图像空间，至少三个顶点）
        #[arg(
            long,
            value_delimiter = ',',
            num_args = 1..,
            required = true,
            allow_negative_numbers = true
        )]
        points: Vec<f64>,

        #[arg(long)]
        inactive: bool,
    },

    Delete { roi_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum DetectionCommand {
    List {
        #[arg(long)]
        camera: Option<i64>,

        #[arg(long)]
        stream: Option<i64>,
    },
}

/// 解析 `x1,y1,x2,y2`，角点顺序任意
pub fn parse_roi(value: &str) -> Result<Rect, String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("invalid roi {value}: {err}"))?;
    let coords: [f64; 4] = parts
        .try_into()
        .map_err(|_| format!("roi needs exactly 4 numbers, got {value}"))?;
    if coords.iter().any(|coord| !coord.is_finite()) {
        return Err(format!("roi must be finite: {value}"));
    }
    Ok(Rect::from_array(coords))
}

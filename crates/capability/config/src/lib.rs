//! 控制台运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 控制台运行配置。
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// 后端 REST 基地址（含版本前缀）
    pub api_url: String,
    /// 告警表单默认置信度阈值，位于 [0,1]
    pub default_confidence: f64,
    /// 整帧回退尺寸（既无已加载帧也无摄像头分辨率时使用）
    pub default_frame_width: u32,
    pub default_frame_height: u32,
    /// 传输层超时，未设置时由 HTTP 客户端自行决定
    pub http_timeout_seconds: Option<u64>,
}

impl ConsoleConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = env::var("NVC_API_URL")
            .ok()
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "http://localhost:8000/api/v1".to_string());
        let default_confidence = read_f64_with_default("NVC_DEFAULT_CONFIDENCE", 0.5)?;
        if !(0.0..=1.0).contains(&default_confidence) {
            return Err(ConfigError::Invalid(
                "NVC_DEFAULT_CONFIDENCE".to_string(),
                default_confidence.to_string(),
            ));
        }
        let default_frame_width = read_positive_u32_with_default("NVC_DEFAULT_FRAME_WIDTH", 640)?;
        let default_frame_height =
            read_positive_u32_with_default("NVC_DEFAULT_FRAME_HEIGHT", 480)?;
        let http_timeout_seconds =
            read_optional_u64("NVC_HTTP_TIMEOUT_SECONDS")?.filter(|value| *value > 0);

        Ok(Self {
            api_url,
            default_confidence,
            default_frame_width,
            default_frame_height,
            http_timeout_seconds,
        })
    }
}

fn read_f64_with_default(key: &str, default: f64) -> Result<f64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => return Ok(default),
    };
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}

fn read_positive_u32_with_default(key: &str, default: u32) -> Result<u32, ConfigError> {
    let value = match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => return Ok(default),
    };
    match value.trim().parse::<u32>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}

fn read_optional_u64(key: &str) -> Result<Option<u64>, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(key.to_string(), value)),
        Err(_) => Ok(None),
    }
}

//! 验证辅助函数
//!
//! 门面在发起任何后端调用之前执行的请求体校验：
//! - ensure_name：名称非空
//! - ensure_resolution：分辨率宽高均为正
//! - ensure_threshold：阈值为有限值且位于 [0,1]
//! - ensure_region：ROI 四元组有序、非负且为有限值
//! - ensure_polygon：命名区域至少三个顶点，坐标有限且非负

use crate::error::StorageError;
use domain::Rect;

/// 验证名称非空
pub fn ensure_name(field: &str, value: &str) -> Result<(), StorageError> {
    if value.trim().is_empty() {
        return Err(StorageError::invalid(format!("{field} required")));
    }
    Ok(())
}

/// 验证分辨率（若提供）为正的宽×高
pub fn ensure_resolution(resolution: Option<[u32; 2]>) -> Result<(), StorageError> {
    match resolution {
        Some([width, height]) if width == 0 || height == 0 => Err(StorageError::invalid(
            format!("resolution must be positive, got {width}x{height}"),
        )),
        _ => Ok(()),
    }
}

/// 验证置信度阈值
pub fn ensure_threshold(value: f64) -> Result<(), StorageError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(StorageError::invalid(format!(
            "confidence_threshold must be within [0, 1], got {value}"
        )));
    }
    Ok(())
}

/// 验证 ROI：x_min ≤ x_max，y_min ≤ y_max，且左上角不越出帧原点
pub fn ensure_region(region: [f64; 4]) -> Result<(), StorageError> {
    if region.iter().any(|value| !value.is_finite()) {
        return Err(StorageError::invalid("region_of_interest must be finite"));
    }
    let [x_min, y_min, x_max, y_max] = region;
    let rect = Rect {
        x_min,
        y_min,
        x_max,
        y_max,
    };
    if !rect.is_ordered() {
        return Err(StorageError::invalid(
            "region_of_interest must satisfy x_min <= x_max and y_min <= y_max",
        ));
    }
    if x_min < 0.0 || y_min < 0.0 {
        return Err(StorageError::invalid(
            "region_of_interest must not have negative coordinates",
        ));
    }
    Ok(())
}

/// 验证多边形顶点序列 `[x1, y1, x2, y2, ...]`
pub fn ensure_polygon(points: &[f64]) -> Result<(), StorageError> {
    if !points.len().is_multiple_of(2) {
        return Err(StorageError::invalid(format!(
            "points must hold x,y pairs, got {} values",
            points.len()
        )));
    }
    if points.len() < 6 {
        return Err(StorageError::invalid("points must describe at least 3 vertices"));
    }
    if points.iter().any(|value| !value.is_finite() || *value < 0.0) {
        return Err(StorageError::invalid(
            "points must be finite and non-negative",
        ));
    }
    Ok(())
}

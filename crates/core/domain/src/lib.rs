//! 几何引擎：显示坐标与图像原生像素坐标之间的纯函数映射。
//!
//! 画布可以以任意缩放比例显示，但存储的 ROI 始终位于图像原生像素空间。
//! 两个空间之间的换算只允许经由本模块完成，禁止在调用方内联计算。

pub mod geometry;

pub use geometry::{
    Point, Rect, Size, normalize_rect, rect_to_display_space, rect_to_image_space,
    to_display_space, to_image_space,
};

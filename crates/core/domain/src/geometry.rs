//! 坐标与矩形
//!
//! - Point / Size / Rect：基础几何类型
//! - to_image_space / to_display_space：显示空间 ⇄ 图像空间（x、y 独立缩放）
//! - normalize_rect：任意两个角点 → 规范矩形（min ≤ max）
//!
//! 所有输入假定为有限数值，函数无副作用、无错误分支。

/// 二维点。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 将点限制在 `[0, size]` 范围内。
    pub fn clamp_to(self, size: Size) -> Self {
        Self {
            x: self.x.clamp(0.0, size.width.max(0.0)),
            y: self.y.clamp(0.0, size.height.max(0.0)),
        }
    }
}

/// 宽高尺寸（显示尺寸或图像原生尺寸）。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// 宽高均为正数。
    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// 按因子等比缩放。
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// 轴对齐矩形，约定 `x_min ≤ x_max`、`y_min ≤ y_max`。
///
/// 线上格式为 `[x_min, y_min, x_max, y_max]`。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    /// 覆盖整帧的矩形 `[0, 0, w, h]`。
    pub fn full_frame(size: Size) -> Self {
        Self {
            x_min: 0.0,
            y_min: 0.0,
            x_max: size.width,
            y_max: size.height,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// 面积为零（点或线段），不可作为已提交的 ROI。
    pub fn is_degenerate(&self) -> bool {
        self.area() == 0.0
    }

    /// 满足 min ≤ max。
    pub fn is_ordered(&self) -> bool {
        self.x_min <= self.x_max && self.y_min <= self.y_max
    }

    /// 四个分量均位于 `[0, size]` 内。
    pub fn is_within(&self, size: Size) -> bool {
        self.is_ordered()
            && self.x_min >= 0.0
            && self.y_min >= 0.0
            && self.x_max <= size.width
            && self.y_max <= size.height
    }

    pub fn center(&self) -> Point {
        Point {
            x: (self.x_min + self.x_max) / 2.0,
            y: (self.y_min + self.y_max) / 2.0,
        }
    }

    /// 点位于矩形内（含边界）。
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x_min
            && point.x <= self.x_max
            && point.y >= self.y_min
            && point.y <= self.y_max
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.x_min, self.y_min, self.x_max, self.y_max]
    }

    /// 从线上格式构造，角点顺序不作假设。
    pub fn from_array(values: [f64; 4]) -> Self {
        normalize_rect(
            Point::new(values[0], values[1]),
            Point::new(values[2], values[3]),
        )
    }
}

/// 显示空间 → 图像原生空间。
///
/// x、y 使用独立缩放因子 `image.w / display.w`、`image.h / display.h`。
pub fn to_image_space(display_point: Point, display_size: Size, image_size: Size) -> Point {
    Point {
        x: display_point.x * (image_size.width / display_size.width),
        y: display_point.y * (image_size.height / display_size.height),
    }
}

/// 图像原生空间 → 显示空间（`to_image_space` 的逆映射）。
pub fn to_display_space(image_point: Point, display_size: Size, image_size: Size) -> Point {
    Point {
        x: image_point.x * (display_size.width / image_size.width),
        y: image_point.y * (display_size.height / image_size.height),
    }
}

/// 两个任意角点 → 规范矩形。`p1 == p2` 时得到零面积矩形。
pub fn normalize_rect(p1: Point, p2: Point) -> Rect {
    Rect {
        x_min: p1.x.min(p2.x),
        y_min: p1.y.min(p2.y),
        x_max: p1.x.max(p2.x),
        y_max: p1.y.max(p2.y),
    }
}

/// 显示空间矩形 → 图像空间矩形。缩放因子为正，映射保持 min/max 顺序。
pub fn rect_to_image_space(rect: Rect, display_size: Size, image_size: Size) -> Rect {
    normalize_rect(
        to_image_space(Point::new(rect.x_min, rect.y_min), display_size, image_size),
        to_image_space(Point::new(rect.x_max, rect.y_max), display_size, image_size),
    )
}

/// 图像空间矩形 → 显示空间矩形（用于把已有 ROI 画回画布）。
pub fn rect_to_display_space(rect: Rect, display_size: Size, image_size: Size) -> Rect {
    normalize_rect(
        to_display_space(Point::new(rect.x_min, rect.y_min), display_size, image_size),
        to_display_space(Point::new(rect.x_max, rect.y_max), display_size, image_size),
    )
}

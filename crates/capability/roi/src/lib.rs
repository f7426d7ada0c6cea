//! ROI 框选交互
//!
//! 把画布上的指针手势转换为图像原生像素空间中的矩形：
//!
//! ```text
//! Idle ──down──▶ Dragging ──move──▶ Dragging
//!                   │  ├──up（面积为零）──▶ Idle（丢弃，不提交）
//!                   │  └──up──▶ Committed（提交一次）
//!                   └──leave / cancel──▶ Idle（丢弃）
//! Committed ──down──▶ Dragging（全新一次框选）
//! ```
//!
//! 指针坐标位于画布显示空间；覆盖框在显示空间绘制，提交结果经
//! [`domain::to_image_space`] 映射到图像空间。

mod surface;

pub use surface::RoiSurface;

use domain::{Point, Rect, Size, normalize_rect, rect_to_display_space, to_image_space};
use nvc_telemetry::{record_roi_commit, record_roi_discard};
use tracing::debug;

/// 画布指针事件（显示空间坐标）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    /// 指针离开画布
    Leave,
    /// 显式取消（如按下 Esc）
    Cancel,
}

/// 框选状态。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptureState {
    Idle,
    /// `start` 与 `draft` 均为显示空间
    Dragging { start: Point, draft: Rect },
    /// `region` 为图像空间
    Committed { region: Rect },
}

/// 单次框选会话的控制器。草稿只属于当前会话，不与其他会话共享。
#[derive(Debug, Clone)]
pub struct CaptureController {
    display_size: Size,
    image_size: Size,
    state: CaptureState,
}

impl CaptureController {
    pub fn new(display_size: Size, image_size: Size) -> Self {
        Self {
            display_size,
            image_size,
            state: CaptureState::Idle,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn display_size(&self) -> Size {
        self.display_size
    }

    pub fn image_size(&self) -> Size {
        self.image_size
    }

    /// 拖拽中的草稿（图像空间）。
    pub fn draft(&self) -> Option<Rect> {
        match self.state {
            CaptureState::Dragging { draft, .. } => {
                Some(self.display_rect_to_image(draft))
            }
            _ => None,
        }
    }

    /// 最近一次提交的矩形（图像空间）。
    pub fn committed(&self) -> Option<Rect> {
        match self.state {
            CaptureState::Committed { region } => Some(region),
            _ => None,
        }
    }

    /// 画布显示尺寸变化。已提交的结果在图像空间，不受影响。
    pub fn resize_display(&mut self, display_size: Size) {
        self.display_size = display_size;
    }

    /// 源帧加载完成后更新图像原生尺寸。
    pub fn set_image_size(&mut self, image_size: Size) {
        self.image_size = image_size;
    }

    /// 处理一个指针事件；仅在手势成功结束时返回提交的矩形。
    pub fn handle(&mut self, event: PointerEvent, surface: &mut dyn RoiSurface) -> Option<Rect> {
        match (self.state, event) {
            (_, PointerEvent::Down(point)) => {
                let start = point.clamp_to(self.display_size);
                self.state = CaptureState::Dragging {
                    start,
                    draft: normalize_rect(start, start),
                };
                repaint(surface, None);
                None
            }
            (CaptureState::Dragging { start, .. }, PointerEvent::Move(point)) => {
                let draft = normalize_rect(start, point.clamp_to(self.display_size));
                self.state = CaptureState::Dragging { start, draft };
                repaint(surface, Some(draft));
                None
            }
            (CaptureState::Dragging { start, .. }, PointerEvent::Up(point)) => {
                let draft = normalize_rect(start, point.clamp_to(self.display_size));
                let region = self.display_rect_to_image(draft);
                if region.is_degenerate() {
                    debug!(target: "nvc.roi", "roi_discard_degenerate");
                    record_roi_discard();
                    self.state = CaptureState::Idle;
                    repaint(surface, None);
                    return None;
                }
                debug!(
                    target: "nvc.roi",
                    x_min = region.x_min,
                    y_min = region.y_min,
                    x_max = region.x_max,
                    y_max = region.y_max,
                    "roi_commit"
                );
                record_roi_commit();
                self.state = CaptureState::Committed { region };
                repaint(surface, Some(draft));
                Some(region)
            }
            (CaptureState::Dragging { .. }, PointerEvent::Leave | PointerEvent::Cancel) => {
                self.cancel(surface);
                None
            }
            _ => None,
        }
    }

    /// 取消进行中的拖拽并丢弃草稿；非拖拽状态下无效果。
    pub fn cancel(&mut self, surface: &mut dyn RoiSurface) {
        if let CaptureState::Dragging { .. } = self.state {
            debug!(target: "nvc.roi", "roi_cancel");
            record_roi_discard();
            self.state = CaptureState::Idle;
            repaint(surface, None);
        }
    }

    /// 把一个已有的图像空间 ROI 画回画布（编辑流程展示用）。
    pub fn present(&self, region: Option<Rect>, surface: &mut dyn RoiSurface) {
        let overlay =
            region.map(|rect| rect_to_display_space(rect, self.display_size, self.image_size));
        repaint(surface, overlay);
    }

    fn display_rect_to_image(&self, rect: Rect) -> Rect {
        let min = to_image_space(
            Point::new(rect.x_min, rect.y_min),
            self.display_size,
            self.image_size,
        )
        .clamp_to(self.image_size);
        let max = to_image_space(
            Point::new(rect.x_max, rect.y_max),
            self.display_size,
            self.image_size,
        )
        .clamp_to(self.image_size);
        normalize_rect(min, max)
    }
}

/// 每次重绘先清空，再画源帧，最后描边覆盖框，避免残留上一帧的轨迹。
fn repaint(surface: &mut dyn RoiSurface, overlay: Option<Rect>) {
    surface.clear();
    surface.draw_frame();
    if let Some(rect) = overlay {
        surface.stroke_rect(rect);
    }
}

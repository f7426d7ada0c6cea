use domain::{Point, Rect, Size};
use nvc_roi::{CaptureController, CaptureState, PointerEvent, RoiSurface};

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Clear,
    Frame,
    Stroke(Rect),
}

#[derive(Default)]
struct RecordingSurface {
    ops: Vec<Op>,
}

impl RecordingSurface {
    fn take(&mut self) -> Vec<Op> {
        std::mem::take(&mut self.ops)
    }
}

impl RoiSurface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn draw_frame(&mut self) {
        self.ops.push(Op::Frame);
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.ops.push(Op::Stroke(rect));
    }
}

fn same_size_controller() -> CaptureController {
    CaptureController::new(Size::new(640.0, 480.0), Size::new(640.0, 480.0))
}

fn drag(
    controller: &mut CaptureController,
    surface: &mut RecordingSurface,
    from: (f64, f64),
    to: (f64, f64),
) -> Option<Rect> {
    controller.handle(PointerEvent::Down(Point::new(from.0, from.1)), surface);
    controller.handle(PointerEvent::Move(Point::new(to.0, to.1)), surface);
    controller.handle(PointerEvent::Up(Point::new(to.0, to.1)), surface)
}

#[test]
fn drag_commits_normalized_rect() {
    let mut controller = same_size_controller();
    let mut surface = RecordingSurface::default();
    let committed = drag(&mut controller, &mut surface, (200.0, 150.0), (10.0, 10.0));
    assert_eq!(committed, Some(Rect::from_array([10.0, 10.0, 200.0, 150.0])));
    assert_eq!(controller.committed(), committed);
    assert!(matches!(controller.state(), CaptureState::Committed { .. }));
}

#[test]
fn click_without_drag_is_discarded() {
    let mut controller = same_size_controller();
    let mut surface = RecordingSurface::default();
    controller.handle(PointerEvent::Down(Point::new(50.0, 50.0)), &mut surface);
    let committed = controller.handle(PointerEvent::Up(Point::new(50.0, 50.0)), &mut surface);
    assert!(committed.is_none());
    assert_eq!(controller.state(), CaptureState::Idle);
    assert!(controller.committed().is_none());
}

#[test]
fn flat_drag_is_discarded() {
    let mut controller = same_size_controller();
    let mut surface = RecordingSurface::default();
    let committed = drag(&mut controller, &mut surface, (10.0, 40.0), (300.0, 40.0));
    assert!(committed.is_none());
    assert_eq!(controller.state(), CaptureState::Idle);
}

#[test]
fn every_move_repaints_from_a_cleared_surface() {
    let mut controller = same_size_controller();
    let mut surface = RecordingSurface::default();
    controller.handle(PointerEvent::Down(Point::new(10.0, 10.0)), &mut surface);
    surface.take();

    controller.handle(PointerEvent::Move(Point::new(20.0, 30.0)), &mut surface);
    controller.handle(PointerEvent::Move(Point::new(40.0, 60.0)), &mut surface);
    assert_eq!(
        surface.take(),
        vec![
            Op::Clear,
            Op::Frame,
            Op::Stroke(Rect::from_array([10.0, 10.0, 20.0, 30.0])),
            Op::Clear,
            Op::Frame,
            Op::Stroke(Rect::from_array([10.0, 10.0, 40.0, 60.0])),
        ]
    );
}

#[test]
fn moves_outside_a_drag_are_ignored() {
    let mut controller = same_size_controller();
    let mut surface = RecordingSurface::default();
    assert!(
        controller
            .handle(PointerEvent::Move(Point::new(5.0, 5.0)), &mut surface)
            .is_none()
    );
    assert!(
        controller
            .handle(PointerEvent::Up(Point::new(5.0, 5.0)), &mut surface)
            .is_none()
    );
    assert!(surface.take().is_empty());
    assert_eq!(controller.state(), CaptureState::Idle);
}

#[test]
fn leave_and_cancel_discard_the_draft() {
    let mut controller = same_size_controller();
    let mut surface = RecordingSurface::default();
    controller.handle(PointerEvent::Down(Point::new(10.0, 10.0)), &mut surface);
    controller.handle(PointerEvent::Move(Point::new(90.0, 90.0)), &mut surface);
    assert!(controller.draft().is_some());
    surface.take();

    assert!(controller.handle(PointerEvent::Leave, &mut surface).is_none());
    assert_eq!(controller.state(), CaptureState::Idle);
    assert!(controller.draft().is_none());
    assert_eq!(surface.take(), vec![Op::Clear, Op::Frame]);

    controller.handle(PointerEvent::Down(Point::new(10.0, 10.0)), &mut surface);
    controller.handle(PointerEvent::Move(Point::new(90.0, 90.0)), &mut surface);
    assert!(controller.handle(PointerEvent::Cancel, &mut surface).is_none());
    assert_eq!(controller.state(), CaptureState::Idle);
    assert!(
        controller
            .handle(PointerEvent::Up(Point::new(90.0, 90.0)), &mut surface)
            .is_none()
    );
}

#[test]
fn consecutive_gestures_are_independent() {
    let mut controller = same_size_controller();
    let mut surface = RecordingSurface::default();
    let first = drag(&mut controller, &mut surface, (10.0, 10.0), (100.0, 100.0));
    let second = drag(&mut controller, &mut surface, (300.0, 200.0), (350.0, 260.0));
    assert_eq!(first, Some(Rect::from_array([10.0, 10.0, 100.0, 100.0])));
    assert_eq!(second, Some(Rect::from_array([300.0, 200.0, 350.0, 260.0])));
    assert_eq!(controller.committed(), second);
}

#[test]
fn new_press_after_commit_clears_previous_overlay() {
    let mut controller = same_size_controller();
    let mut surface = RecordingSurface::default();
    drag(&mut controller, &mut surface, (10.0, 10.0), (100.0, 100.0));
    surface.take();
    controller.handle(PointerEvent::Down(Point::new(5.0, 5.0)), &mut surface);
    assert_eq!(surface.take(), vec![Op::Clear, Op::Frame]);
    assert!(controller.committed().is_none());
}

#[test]
fn committed_rect_is_in_image_space() {
    let mut controller =
        CaptureController::new(Size::new(320.0, 180.0), Size::new(1280.0, 720.0));
    let mut surface = RecordingSurface::default();
    let committed = drag(&mut controller, &mut surface, (10.0, 10.0), (160.0, 90.0));
    assert_eq!(committed, Some(Rect::from_array([40.0, 40.0, 640.0, 360.0])));

    // 覆盖框仍按显示空间绘制
    assert_eq!(
        surface.ops.last(),
        Some(&Op::Stroke(Rect::from_array([10.0, 10.0, 160.0, 90.0])))
    );
}

#[test]
fn pointer_outside_canvas_is_clamped_to_frame() {
    let mut controller =
        CaptureController::new(Size::new(320.0, 180.0), Size::new(1280.0, 720.0));
    let mut surface = RecordingSurface::default();
    let committed = drag(&mut controller, &mut surface, (-20.0, 90.0), (400.0, 500.0))
        .expect("commit");
    assert_eq!(committed.to_array(), [0.0, 360.0, 1280.0, 720.0]);
    assert!(committed.is_within(controller.image_size()));
}

#[test]
fn resizing_display_keeps_image_coordinates_consistent() {
    let image = Size::new(1280.0, 720.0);
    let mut controller = CaptureController::new(Size::new(640.0, 360.0), image);
    let mut surface = RecordingSurface::default();
    let small = drag(&mut controller, &mut surface, (64.0, 36.0), (320.0, 180.0));

    controller.resize_display(Size::new(1280.0, 720.0));
    let large = drag(&mut controller, &mut surface, (128.0, 72.0), (640.0, 360.0));
    assert_eq!(small, large);
}

#[test]
fn present_draws_existing_region_in_display_space() {
    let controller = CaptureController::new(Size::new(320.0, 180.0), Size::new(1280.0, 720.0));
    let mut surface = RecordingSurface::default();
    controller.present(
        Some(Rect::from_array([40.0, 40.0, 640.0, 360.0])),
        &mut surface,
    );
    assert_eq!(
        surface.take(),
        vec![
            Op::Clear,
            Op::Frame,
            Op::Stroke(Rect::from_array([10.0, 10.0, 160.0, 90.0])),
        ]
    );
    controller.present(None, &mut surface);
    assert_eq!(surface.take(), vec![Op::Clear, Op::Frame]);
}

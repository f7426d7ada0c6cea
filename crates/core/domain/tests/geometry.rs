use domain::{
    Point, Rect, Size, normalize_rect, rect_to_display_space, rect_to_image_space,
    to_display_space, to_image_space,
};

fn sample_points() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 250.5),
        Point::new(640.0, 480.0),
        Point::new(-5.0, 12.0),
        Point::new(300.25, -40.0),
        Point::new(99.0, 99.0),
    ]
}

#[test]
fn normalize_rect_is_order_independent() {
    let points = sample_points();
    for p in &points {
        for q in &points {
            let forward = normalize_rect(*p, *q);
            let backward = normalize_rect(*q, *p);
            assert_eq!(forward, backward);
            assert!(forward.x_min <= forward.x_max);
            assert!(forward.y_min <= forward.y_max);
        }
    }
}

#[test]
fn normalize_rect_same_point_has_zero_area() {
    for p in sample_points() {
        let rect = normalize_rect(p, p);
        assert_eq!(rect.area(), 0.0);
        assert!(rect.is_degenerate());
    }
}

#[test]
fn normalize_rect_flat_drag_is_degenerate() {
    let rect = normalize_rect(Point::new(10.0, 20.0), Point::new(200.0, 20.0));
    assert_eq!(rect.width(), 190.0);
    assert!(rect.is_degenerate());
}

#[test]
fn to_image_space_uses_independent_axes() {
    let display = Size::new(320.0, 240.0);
    let image = Size::new(1280.0, 720.0);
    let mapped = to_image_space(Point::new(160.0, 120.0), display, image);
    assert_eq!(mapped, Point::new(640.0, 360.0));

    let corner = to_image_space(Point::new(320.0, 240.0), display, image);
    assert_eq!(corner, Point::new(1280.0, 720.0));
}

#[test]
fn to_image_space_is_scale_invariant() {
    let image = Size::new(1920.0, 1080.0);
    let base = Size::new(400.0, 300.0);
    let fraction = (0.25, 0.6);
    let expected = to_image_space(
        Point::new(base.width * fraction.0, base.height * fraction.1),
        base,
        image,
    );
    for k in [0.5, 2.0, 3.0, 4.0] {
        let display = base.scaled(k);
        let point = Point::new(display.width * fraction.0, display.height * fraction.1);
        let mapped = to_image_space(point, display, image);
        assert!((mapped.x - expected.x).abs() < 1e-9);
        assert!((mapped.y - expected.y).abs() < 1e-9);
    }
}

#[test]
fn display_space_round_trip() {
    let display = Size::new(500.0, 250.0);
    let image = Size::new(1280.0, 720.0);
    let point = Point::new(123.0, 77.0);
    let back = to_display_space(to_image_space(point, display, image), display, image);
    assert!((back.x - point.x).abs() < 1e-9);
    assert!((back.y - point.y).abs() < 1e-9);

    let rect = Rect::from_array([10.0, 10.0, 200.0, 150.0]);
    let image_rect = rect_to_image_space(rect, display, image);
    let display_rect = rect_to_display_space(image_rect, display, image);
    assert!((display_rect.x_max - rect.x_max).abs() < 1e-9);
    assert!((display_rect.y_max - rect.y_max).abs() < 1e-9);
}

#[test]
fn rect_bounds_and_containment() {
    let frame = Size::new(640.0, 480.0);
    assert!(Rect::full_frame(frame).is_within(frame));
    assert!(!Rect::from_array([0.0, 0.0, 641.0, 10.0]).is_within(frame));

    let roi = Rect::from_array([200.0, 150.0, 10.0, 10.0]);
    assert_eq!(roi.to_array(), [10.0, 10.0, 200.0, 150.0]);
    assert!(roi.contains(Point::new(10.0, 150.0)));
    assert!(!roi.contains(Point::new(9.9, 50.0)));
    assert_eq!(roi.center(), Point::new(105.0, 80.0));
}

#[test]
fn point_clamp_to_frame() {
    let frame = Size::new(100.0, 50.0);
    assert_eq!(Point::new(-3.0, 70.0).clamp_to(frame), Point::new(0.0, 50.0));
    assert_eq!(Point::new(40.0, 20.0).clamp_to(frame), Point::new(40.0, 20.0));
}

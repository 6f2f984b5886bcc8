use path_utility::{
    ControlPointType, CubicCurve, EllipticalArc, Line, PathError, Point, QuadraticCurve, Segment, SegmentKind, Spline,
};
use serde_json::json;
use std::f64::consts::PI;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn close(a: Point, b: Point, eps: f64) -> bool {
    (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps
}

#[test]
fn line_length_and_midpoint() {
    let seg = Segment::new(Line::new(p(0.0, 0.0), p(3.0, 4.0)));
    assert_eq!(seg.length(), 5.0);
    assert_eq!(seg.point_at_length(2.5), p(1.5, 2.0));
}

#[test]
fn queries_clamp_to_endpoints() {
    let segs = [
        Segment::new(Line::new(p(0.0, 0.0), p(10.0, 0.0))),
        Segment::new(QuadraticCurve::new(p(0.0, 0.0), p(5.0, 10.0), p(10.0, 0.0))),
        Segment::new(CubicCurve::new(p(0.0, 0.0), p(0.0, 10.0), p(10.0, 10.0), p(10.0, 0.0))),
        Segment::new(EllipticalArc::new(p(10.0, 0.0), 10.0, 10.0, 0.0, false, true, p(0.0, 10.0))),
        Segment::new(Spline::from_points(vec![p(0.0, 0.0), p(5.0, 5.0), p(10.0, 0.0)], 0.5, false).unwrap()),
    ];
    for seg in &segs {
        assert_eq!(seg.point_at_length(-5.0), seg.start_point(), "{}", seg.type_name());
        assert_eq!(seg.point_at_length(seg.length() + 5.0), seg.end_point(), "{}", seg.type_name());
        assert!(seg.length() >= 0.0);
    }
}

#[test]
fn quarter_circle_arc_length() {
    let arc = EllipticalArc::new(p(10.0, 0.0), 10.0, 10.0, 0.0, false, true, p(0.0, 10.0));
    assert!((arc.length() - PI * 10.0 / 2.0).abs() < 1e-9);
    let mid = arc.point_at_length(arc.length() / 2.0);
    let h = 10.0 / 2f64.sqrt();
    assert!(close(mid, p(h, h), 1e-9));
}

#[test]
fn straight_cubic_locates_distance() {
    let c = CubicCurve::new(p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0));
    assert!((c.length() - 3.0).abs() < 1e-9);
    let q = c.point_at_length(1.5);
    assert!((q.x - 1.5).abs() < 0.01 && q.y.abs() < 1e-12);
}

#[test]
fn svg_fragments() {
    let q = Segment::new(QuadraticCurve::new(p(0.0, 0.0), p(5.0, 10.0), p(10.0, 0.0)));
    assert_eq!(q.to_svg_string(), "M 0 0 Q 5 10 10 0");
    assert_eq!(q.to_svg_command(false), "Q 5 10 10 0");
    let a = Segment::new(EllipticalArc::new(p(0.0, 0.0), 5.0, 5.0, 0.0, false, true, p(10.0, 0.0)));
    assert_eq!(a.to_svg_command(false), "A 5 5 0 0 1 10 0");
}

#[test]
fn two_point_spline_renders_as_line() {
    let s = Segment::new(Spline::from_points(vec![p(0.0, 0.0), p(4.0, 3.0)], 0.5, false).unwrap());
    assert_eq!(s.to_svg_string(), "M 0 0 L 4 3");
    assert!((s.length() - 5.0).abs() < 1e-9);
}

#[test]
fn json_round_trip_is_lossless() {
    let segs = [
        Segment::new(Line::new(p(0.5, 1.5), p(2.0, 3.0))),
        Segment::new(QuadraticCurve::new(p(0.0, 0.0), p(5.0, 10.0), p(10.0, 0.0))),
        Segment::new(CubicCurve::new(p(0.0, 0.0), p(1.0, 2.0), p(3.0, 4.0), p(5.0, 6.0))),
        Segment::new(EllipticalArc::new(p(0.0, 0.0), 5.0, 3.0, 30.0, true, false, p(10.0, 0.0))),
        Segment::new(
            Spline::new(
                vec![p(0.0, 0.0), p(1.0, 2.0), p(3.0, 1.0), p(4.0, 4.0)],
                3,
                Some(vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]),
                Some(vec![1.0, 2.0, 2.0, 1.0]),
                false,
                0.3,
            )
            .unwrap(),
        ),
    ];
    for seg in &segs {
        let back = Segment::from_json(&seg.to_json()).unwrap();
        assert_eq!(&back, seg);
    }
}

#[test]
fn spline_json_carries_nulls_for_missing_knots() {
    let s = Segment::new(Spline::from_points(vec![p(0.0, 0.0), p(1.0, 1.0)], 0.5, true).unwrap());
    let v = s.to_json();
    assert_eq!(v["type"], "spline");
    assert_eq!(v["data"]["knots"], serde_json::Value::Null);
    assert_eq!(v["data"]["closed"], true);
    assert_eq!(v["data"]["tension"], 0.5);
}

#[test]
fn unknown_segment_type_is_rejected() {
    let err = Segment::from_json(&json!({"type": "bogus", "data": {}})).unwrap_err();
    assert!(matches!(err, PathError::Json(_)));
}

#[test]
fn override_is_authoritative_but_intrinsic_is_kept() {
    let seg = Segment::new(CubicCurve::new(p(0.0, 0.0), p(0.0, 10.0), p(10.0, 10.0), p(10.0, 0.0)))
        .with_end_override(Some(p(20.0, 0.0)));
    assert_eq!(seg.end_point(), p(20.0, 0.0));
    assert_eq!(seg.point_at_length(1e9), p(20.0, 0.0));
    assert_eq!(seg.kind().end_point(), p(10.0, 0.0));
    assert_eq!(seg.to_json()["data"]["endPoint"], json!({"x": 20.0, "y": 0.0}));
    let handles = seg.control_points(0);
    assert_eq!(handles.last().map(|cp| cp.point), Some(p(20.0, 0.0)));
}

#[test]
fn control_point_counts_per_variant() {
    let line = Segment::new(Line::new(p(0.0, 0.0), p(1.0, 0.0)));
    let cubic = Segment::new(CubicCurve::new(p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)));
    let arc = Segment::new(EllipticalArc::new(p(0.0, 0.0), 1.0, 1.0, 0.0, false, true, p(2.0, 0.0)));
    let spline = Segment::new(Spline::from_points(vec![p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0)], 0.5, false).unwrap());
    assert_eq!(line.control_points(0).len(), 2);
    assert_eq!(cubic.control_points(0).len(), 4);
    assert_eq!(arc.control_points(0).len(), 3);
    let ids: Vec<String> = spline.control_points(4).into_iter().map(|cp| cp.id).collect();
    assert_eq!(ids, ["cp-4-spline-point-0", "cp-4-spline-point-1", "cp-4-spline-point-2"]);
}

#[test]
fn update_returns_new_segment_and_leaves_original() {
    let cubic = Segment::new(CubicCurve::new(p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)));
    let moved = cubic
        .update_control_point(ControlPointType::Control2, None, p(7.0, 7.0))
        .unwrap();
    match (moved.kind(), cubic.kind()) {
        (SegmentKind::CubicCurve(m), SegmentKind::CubicCurve(o)) => {
            assert_eq!(m.control_point2(), p(7.0, 7.0));
            assert_eq!(o.control_point2(), p(1.0, 1.0));
            assert_eq!(m.control_point1(), o.control_point1());
        }
        _ => panic!("variant changed"),
    }
}

#[test]
fn unsupported_handle_is_an_error() {
    let line = Segment::new(Line::new(p(0.0, 0.0), p(1.0, 0.0)));
    let err = line
        .update_control_point(ControlPointType::Control1, None, p(0.0, 0.0))
        .unwrap_err();
    assert!(matches!(err, PathError::UnsupportedControlPoint { segment: "Line", kind: ControlPointType::Control1 }));
    assert_eq!(err.to_string(), "Line segments do not support control point type: control1");
}

#[test]
fn moving_last_spline_point_clears_end_override() {
    let spline = Segment::new(Spline::from_points(vec![p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0)], 0.5, false).unwrap())
        .with_end_override(Some(p(9.0, 9.0)));
    assert_eq!(spline.end_point(), p(9.0, 9.0));
    let moved = spline
        .update_control_point(ControlPointType::SplinePoint, Some(2), p(3.0, 3.0))
        .unwrap();
    assert_eq!(moved.end_override(), None);
    assert_eq!(moved.end_point(), p(3.0, 3.0));
}

#[test]
fn center_form_arc_matches_endpoint_form() {
    let from_center = EllipticalArc::from_center(p(0.0, 0.0), 10.0, 0.0, PI / 2.0, true);
    assert!(close(from_center.start_point(), p(10.0, 0.0), 1e-9));
    assert!(close(from_center.end_point(), p(0.0, 10.0), 1e-9));
    assert!((from_center.length() - 5.0 * PI).abs() < 1e-9);
    let c = from_center.center_parameterization().unwrap();
    assert!(close(c.center, p(0.0, 0.0), 1e-9));
}

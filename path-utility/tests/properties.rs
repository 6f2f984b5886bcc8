use std::sync::Arc;

use path_utility::{ControlPointManager, CubicCurve, Line, Path, Point, QuadraticCurve, Segment, Spline};
use proptest::prelude::*;

fn point() -> impl Strategy<Value = Point> {
    (-500i32..500, -500i32..500).prop_map(|(x, y)| Point::new(x as f64, y as f64))
}

fn segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        (point(), point()).prop_map(|(a, b)| Segment::new(Line::new(a, b))),
        (point(), point(), point()).prop_map(|(a, c, b)| Segment::new(QuadraticCurve::new(a, c, b))),
        (point(), point(), point(), point())
            .prop_map(|(a, c1, c2, b)| Segment::new(CubicCurve::new(a, c1, c2, b))),
        prop::collection::vec(point(), 2..8)
            .prop_map(|pts| Segment::new(Spline::from_points(pts, 0.5, false).unwrap())),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn lengths_are_non_negative_and_queries_clamp(seg in segment(), overshoot in 0.0f64..1000.0) {
        let len = seg.length();
        prop_assert!(len >= 0.0);
        prop_assert_eq!(seg.point_at_length(-overshoot), seg.start_point());
        prop_assert_eq!(seg.point_at_length(len + overshoot), seg.end_point());
    }

    #[test]
    fn json_round_trip(seg in segment()) {
        let back = Segment::from_json(&seg.to_json()).unwrap();
        prop_assert_eq!(back, seg);
    }

    #[test]
    fn path_point_at_length_stays_on_path_ends(points in prop::collection::vec(point(), 2..12)) {
        let path = Path::from_points(&points, None);
        let total = path.total_length();
        prop_assert_eq!(path.point_at_length(total + 1.0).unwrap(), *points.last().unwrap());
        prop_assert_eq!(path.point_at_length(-1.0).unwrap(), points[0]);
    }

    #[test]
    fn moves_only_touch_the_owning_segment(
        points in prop::collection::vec(point(), 3..12),
        pick in any::<prop::sample::Index>(),
        target in point(),
    ) {
        let path = Path::from_points(&points, Some(1));
        let mut manager = ControlPointManager::new(path.clone());
        let handles = manager.control_points();
        let cp = handles[pick.index(handles.len())].clone();

        prop_assert!(manager.move_control_point(&cp.id, target));
        let after = manager.path();
        for i in 0..path.len() {
            let shared = Arc::ptr_eq(&path.segments()[i], &after.segments()[i]);
            prop_assert_eq!(shared, i != cp.segment_index);
        }
        // The original is never mutated
        prop_assert_eq!(path.segments()[cp.segment_index].start_point(), points[cp.segment_index]);
        prop_assert_eq!(path.segments()[cp.segment_index].end_point(), points[cp.segment_index + 1]);
    }

    #[test]
    fn svg_output_parses_to_equal_path(points in prop::collection::vec(point(), 2..12)) {
        let path = Path::from_points(&points, None);
        let reparsed = Path::from_svg_string(&path.to_svg_string());
        // Zero-length lines survive as lines, so the count matches too
        prop_assert_eq!(reparsed, path);
    }
}

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use path_utility::{
    CallbackError, ControlPointConfig, ControlPointManager, ControlPointType, ControlPointUpdate, CubicCurve, Line,
    Path, Point, Segment, SegmentKind,
};
use serde_json::json;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn zigzag() -> Path {
    Path::from_points(&[p(0.0, 0.0), p(10.0, 0.0), p(20.0, 10.0), p(30.0, 0.0)], Some(42))
}

#[test]
fn ids_follow_segment_order() {
    let manager = ControlPointManager::new(zigzag());
    let ids: Vec<String> = manager.control_points().into_iter().map(|cp| cp.id).collect();
    assert_eq!(ids, ["cp-0-start", "cp-0-end", "cp-1-start", "cp-1-end", "cp-2-start", "cp-2-end"]);
    assert_eq!(manager.control_points_for_segment(1).len(), 2);
    assert_eq!(manager.control_point("cp-2-end").map(|cp| cp.point), Some(p(30.0, 0.0)));
}

#[test]
fn hit_test_picks_the_nearest_within_tolerance() {
    let manager = ControlPointManager::new(zigzag());
    assert_eq!(manager.control_point_at(p(19.0, 9.0), 5.0).map(|cp| cp.id.as_str()), Some("cp-1-end"));
    assert!(manager.control_point_at(p(5.0, 5.0), 3.0).is_none());
    // Exactly at the tolerance is a miss
    assert!(manager.control_point_at(p(0.0, 3.0), 3.0).is_none());
}

#[test]
fn near_lists_are_sorted() {
    let manager = ControlPointManager::new(zigzag());
    let near = manager.control_points_near(p(9.0, 0.0), 2.0);
    let ids: Vec<&str> = near.iter().map(|cp| cp.id.as_str()).collect();
    assert_eq!(ids, ["cp-0-end", "cp-1-start"]);
}

#[test]
fn move_replaces_only_the_owning_segment() {
    let path = zigzag();
    let mut manager = ControlPointManager::new(path.clone());
    assert!(manager.move_control_point("cp-1-end", p(25.0, 25.0)));

    let after = manager.path();
    assert_eq!(after.id(), Some(42));
    assert!(Arc::ptr_eq(&path.segments()[0], &after.segments()[0]));
    assert!(!Arc::ptr_eq(&path.segments()[1], &after.segments()[1]));
    assert!(Arc::ptr_eq(&path.segments()[2], &after.segments()[2]));
    assert_eq!(after.segments()[1].end_point(), p(25.0, 25.0));
    assert_eq!(path.segments()[1].end_point(), p(20.0, 10.0));
    assert_eq!(manager.control_point("cp-1-end").map(|cp| cp.point), Some(p(25.0, 25.0)));
}

#[test]
fn unknown_id_is_a_quiet_no_op() {
    let mut manager = ControlPointManager::new(zigzag());
    let before = manager.path().clone();
    assert!(!manager.move_control_point("cp-9-start", p(1.0, 1.0)));
    assert_eq!(manager.path(), &before);
}

#[test]
fn callbacks_see_every_move_and_failures_are_contained() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut manager = ControlPointManager::new(zigzag());
    manager.add_move_callback(Box::new(|_: &str, _: Point| Err(CallbackError::new("boom"))));
    manager.add_move_callback(Box::new(|_: &str, _: Point| panic!("observer bug")));
    let sink = Rc::clone(&seen);
    manager.add_move_callback(Box::new(move |id: &str, point: Point| {
        sink.borrow_mut().push((id.to_string(), point));
        Ok(())
    }));

    assert!(manager.move_control_point("cp-0-start", p(-1.0, -1.0)));
    assert_eq!(seen.borrow().as_slice(), [("cp-0-start".to_string(), p(-1.0, -1.0))]);
}

#[test]
fn removed_callbacks_stop_firing() {
    let count = Rc::new(RefCell::new(0));
    let mut manager = ControlPointManager::new(zigzag());
    let c = Rc::clone(&count);
    let id = manager.add_move_callback(Box::new(move |_: &str, _: Point| {
        *c.borrow_mut() += 1;
        Ok(())
    }));
    manager.move_control_point("cp-0-start", p(1.0, 0.0));
    assert!(manager.remove_move_callback(id));
    assert!(!manager.remove_move_callback(id));
    manager.move_control_point("cp-0-start", p(2.0, 0.0));
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn batch_move_updates_each_segment_once() {
    let cubic = CubicCurve::new(p(0.0, 0.0), p(0.0, 10.0), p(10.0, 10.0), p(10.0, 0.0));
    let path = Path::new(
        vec![Segment::new(cubic), Segment::new(Line::new(p(10.0, 0.0), p(20.0, 0.0)))],
        None,
    );
    let mut manager = ControlPointManager::new(path.clone());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    manager.add_move_callback(Box::new(move |id: &str, _: Point| {
        sink.borrow_mut().push(id.to_string());
        Ok(())
    }));

    let ok = manager.move_control_points(&[
        ControlPointUpdate { id: "cp-0-control1".into(), point: p(1.0, 1.0) },
        ControlPointUpdate { id: "nope".into(), point: p(0.0, 0.0) },
        ControlPointUpdate { id: "cp-0-control2".into(), point: p(9.0, 9.0) },
    ]);
    assert!(ok);
    match manager.path().segments()[0].kind() {
        SegmentKind::CubicCurve(c) => {
            assert_eq!(c.control_point1(), p(1.0, 1.0));
            assert_eq!(c.control_point2(), p(9.0, 9.0));
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(Arc::ptr_eq(&path.segments()[1], &manager.path().segments()[1]));
    assert_eq!(seen.borrow().as_slice(), ["cp-0-control1", "cp-0-control2"]);
}

#[test]
fn structural_edits_rebuild_ids() {
    let mut manager = ControlPointManager::new(zigzag());
    assert!(manager.remove_segment(0));
    assert!(!manager.remove_segment(10));
    assert_eq!(manager.control_point("cp-0-start").map(|cp| cp.point), Some(p(10.0, 0.0)));
    assert!(manager.control_point("cp-2-end").is_none());

    manager.add_segment(Segment::new(Line::new(p(30.0, 0.0), p(40.0, 0.0))));
    assert_eq!(manager.control_point("cp-2-end").map(|cp| cp.point), Some(p(40.0, 0.0)));

    manager.clear();
    assert!(manager.control_points().is_empty());
    assert!(manager.path().is_empty());
}

#[test]
fn first_and_last_handles_can_be_excluded() {
    let manager = ControlPointManager::new(zigzag());
    assert_eq!(manager.first_control_point().map(|cp| cp.id.as_str()), Some("cp-0-start"));
    assert_eq!(manager.last_control_point().map(|cp| cp.id.as_str()), Some("cp-2-end"));
    let inner: Vec<String> = manager
        .control_points_excluding(true, true)
        .into_iter()
        .map(|cp| cp.id)
        .collect();
    assert_eq!(inner, ["cp-0-end", "cp-1-start", "cp-1-end", "cp-2-start"]);
    assert_eq!(manager.control_points_excluding(false, false).len(), 6);
}

#[test]
fn endpoint_overrides_show_up_as_handles() {
    let mut manager = ControlPointManager::new(zigzag());
    manager.set_end_point(p(35.0, 5.0)).unwrap();
    assert_eq!(manager.control_point("cp-2-end").map(|cp| cp.point), Some(p(35.0, 5.0)));
    assert!(manager.move_control_point("cp-2-end", p(31.0, 1.0)));
    assert_eq!(manager.path().segments()[2].end_override(), None);
    assert_eq!(manager.path().last_point(), Some(p(31.0, 1.0)));
}

#[test]
fn arc_center_handle_moves_radius() {
    let path = Path::from_svg_string("M 0 0 A 5 5 0 0 1 10 0");
    let mut manager = ControlPointManager::new(path);
    assert!(manager.control_point("cp-0-center").is_some());
    assert!(manager.move_control_point("cp-0-center", p(5.0, 8.0)));
    match manager.path().segments()[0].kind() {
        SegmentKind::Arc(a) => assert_eq!(a.ry(), 8.0),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn spline_handles_are_indexed() {
    let path = Path::from_json(
        &json!({"segments": [{"type": "spline", "data": {
            "controlPoints": [{"x": 0, "y": 0}, {"x": 5, "y": 5}, {"x": 10, "y": 0}]
        }}]})
        .to_string(),
        None,
        None,
        None,
    )
    .unwrap();
    let mut manager = ControlPointManager::new(path);
    let cp = manager.control_point("cp-0-spline-point-1").cloned().unwrap();
    assert_eq!(cp.kind, ControlPointType::SplinePoint);
    assert_eq!(cp.point_index, Some(1));
    assert!(manager.move_control_point("cp-0-spline-point-1", p(5.0, 9.0)));
    assert_eq!(manager.control_point("cp-0-spline-point-1").map(|cp| cp.point), Some(p(5.0, 9.0)));
}

#[test]
fn partial_config_merges_over_defaults() {
    let mut manager = ControlPointManager::new(zigzag());
    assert_eq!(manager.config(), &ControlPointConfig::default());
    manager.update_config(&json!({"handleRadius": 9, "visible": false})).unwrap();
    assert_eq!(manager.config().handle_radius, 9.0);
    assert!(!manager.config().visible);
    assert_eq!(manager.config().handle_color, "#4A90E2");

    let cfg: ControlPointConfig = serde_json::from_value(json!({"selectedColor": "#000"})).unwrap();
    assert_eq!(cfg.selected_color, "#000");
    assert!(cfg.show_control_lines);
}

#[test]
fn joint_move_drags_both_neighbours() {
    let mut manager = ControlPointManager::new(zigzag());
    let untouched = manager.path().segments()[2].clone();
    assert!(manager.move_joint("cp-0-end", p(10.0, 5.0)));
    assert_eq!(manager.path().to_svg_string(), "M 0 0 L 10 5 L 20 10 L 30 0");
    assert_eq!(manager.control_point("cp-1-start").map(|cp| cp.point), Some(p(10.0, 5.0)));
    assert!(Arc::ptr_eq(&untouched, &manager.path().segments()[2]));
    assert!(!manager.move_joint("cp-9-end", p(0.0, 0.0)));

    // A plain move splits the joint
    assert!(manager.move_control_point("cp-1-end", p(20.0, 20.0)));
    assert_eq!(manager.control_point("cp-2-start").map(|cp| cp.point), Some(p(20.0, 10.0)));
}

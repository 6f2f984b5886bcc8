use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Which handle of a segment a control point drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlPointType {
    Start,
    End,
    Control1,
    Control2,
    Center,
    SplinePoint,
}

impl ControlPointType {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlPointType::Start => "start",
            ControlPointType::End => "end",
            ControlPointType::Control1 => "control1",
            ControlPointType::Control2 => "control2",
            ControlPointType::Center => "center",
            ControlPointType::SplinePoint => "spline-point",
        }
    }
}

impl fmt::Display for ControlPointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A derived, editable handle. Never authoritative: always regenerated from
/// the segments it was read from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPoint {
    pub id: String,
    pub point: Point,
    pub segment_index: usize,
    #[serde(rename = "type")]
    pub kind: ControlPointType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_index: Option<usize>,
}

impl ControlPoint {
    pub fn new(
        segment_index: usize,
        kind: ControlPointType,
        point_index: Option<usize>,
        point: Point,
    ) -> Self {
        Self {
            id: control_point_id(segment_index, kind, point_index),
            point,
            segment_index,
            kind,
            point_index,
        }
    }
}

/// `cp-{segmentIndex}-{type}[-{pointIndex}]`
pub fn control_point_id(
    segment_index: usize,
    kind: ControlPointType,
    point_index: Option<usize>,
) -> String {
    match point_index {
        Some(i) => format!("cp-{}-{}-{}", segment_index, kind, i),
        None => format!("cp-{}-{}", segment_index, kind),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPointUpdate {
    pub id: String,
    pub point: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub(crate) fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Option<Bounds> {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if !min_x.is_finite() || !min_y.is_finite() || !max_x.is_finite() || !max_y.is_finite() {
            return None;
        }
        Some(Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }
}

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{PathError, Result};
use crate::geometry::cubic::CubicBezier;
use crate::model::{ControlPoint, ControlPointType, Point};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CubicCurve {
    start_point: Point,
    control_point1: Point,
    control_point2: Point,
    end_point: Point,
    #[serde(skip)]
    length: OnceLock<f64>,
}

impl PartialEq for CubicCurve {
    fn eq(&self, other: &Self) -> bool {
        self.start_point == other.start_point
            && self.control_point1 == other.control_point1
            && self.control_point2 == other.control_point2
            && self.end_point == other.end_point
    }
}

impl CubicCurve {
    pub fn new(start_point: Point, control_point1: Point, control_point2: Point, end_point: Point) -> Self {
        Self {
            start_point,
            control_point1,
            control_point2,
            end_point,
            length: OnceLock::new(),
        }
    }

    pub fn start_point(&self) -> Point {
        self.start_point
    }

    pub fn control_point1(&self) -> Point {
        self.control_point1
    }

    pub fn control_point2(&self) -> Point {
        self.control_point2
    }

    pub fn end_point(&self) -> Point {
        self.end_point
    }

    pub fn bezier(&self) -> CubicBezier {
        CubicBezier::new(self.start_point, self.control_point1, self.control_point2, self.end_point)
    }

    pub fn length(&self) -> f64 {
        *self.length.get_or_init(|| self.bezier().arc_length())
    }

    pub fn point_at_length(&self, dist: f64) -> Point {
        let total = self.length();
        if dist <= 0.0 {
            return self.start_point;
        }
        if dist >= total {
            return self.end_point;
        }
        let bezier = self.bezier();
        bezier.eval(bezier.parameter_at_length(dist, total))
    }

    pub(crate) fn svg_body(&self) -> String {
        format!(
            "C {} {} {} {} {} {}",
            self.control_point1.x,
            self.control_point1.y,
            self.control_point2.x,
            self.control_point2.y,
            self.end_point.x,
            self.end_point.y
        )
    }

    pub(crate) fn with_endpoints(&self, start: Point, end: Point) -> Self {
        Self::new(start, self.control_point1, self.control_point2, end)
    }

    pub fn control_points(&self, segment_index: usize) -> Vec<ControlPoint> {
        vec![
            ControlPoint::new(segment_index, ControlPointType::Start, None, self.start_point),
            ControlPoint::new(segment_index, ControlPointType::Control1, None, self.control_point1),
            ControlPoint::new(segment_index, ControlPointType::Control2, None, self.control_point2),
            ControlPoint::new(segment_index, ControlPointType::End, None, self.end_point),
        ]
    }

    pub fn update_control_point(&self, kind: ControlPointType, new_point: Point) -> Result<Self> {
        let (mut s, mut c1, mut c2, mut e) =
            (self.start_point, self.control_point1, self.control_point2, self.end_point);
        match kind {
            ControlPointType::Start => s = new_point,
            ControlPointType::Control1 => c1 = new_point,
            ControlPointType::Control2 => c2 = new_point,
            ControlPointType::End => e = new_point,
            _ => return Err(PathError::UnsupportedControlPoint { segment: "CubicCurve", kind }),
        }
        Ok(Self::new(s, c1, c2, e))
    }
}

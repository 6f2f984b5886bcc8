use serde::{Deserialize, Serialize};

use crate::error::{PathError, Result};
use crate::geometry::math::{distance, point_on_line};
use crate::model::{ControlPoint, ControlPointType, Point};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    start_point: Point,
    end_point: Point,
}

impl Line {
    pub fn new(start_point: Point, end_point: Point) -> Self {
        Self { start_point, end_point }
    }

    pub fn start_point(&self) -> Point {
        self.start_point
    }

    pub fn end_point(&self) -> Point {
        self.end_point
    }

    pub fn length(&self) -> f64 {
        distance(self.start_point, self.end_point)
    }

    pub fn point_at_length(&self, dist: f64) -> Point {
        let length = self.length();
        if dist <= 0.0 || length <= 0.0 {
            return self.start_point;
        }
        if dist >= length {
            return self.end_point;
        }
        point_on_line(self.start_point, self.end_point, dist / length)
    }

    pub(crate) fn svg_body(&self) -> String {
        format!("L {} {}", self.end_point.x, self.end_point.y)
    }

    pub(crate) fn with_endpoints(&self, start: Point, end: Point) -> Self {
        Self::new(start, end)
    }

    pub fn control_points(&self, segment_index: usize) -> Vec<ControlPoint> {
        vec![
            ControlPoint::new(segment_index, ControlPointType::Start, None, self.start_point),
            ControlPoint::new(segment_index, ControlPointType::End, None, self.end_point),
        ]
    }

    pub fn update_control_point(&self, kind: ControlPointType, new_point: Point) -> Result<Self> {
        match kind {
            ControlPointType::Start => Ok(Self::new(new_point, self.end_point)),
            ControlPointType::End => Ok(Self::new(self.start_point, new_point)),
            _ => Err(PathError::UnsupportedControlPoint { segment: "Line", kind }),
        }
    }
}

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{PathError, Result};
use crate::geometry::quadratic::FlattenedQuadratic;
use crate::model::{ControlPoint, ControlPointType, Point};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadraticCurve {
    start_point: Point,
    control_point: Point,
    end_point: Point,
    #[serde(skip)]
    flattened: OnceLock<FlattenedQuadratic>,
}

impl PartialEq for QuadraticCurve {
    fn eq(&self, other: &Self) -> bool {
        self.start_point == other.start_point
            && self.control_point == other.control_point
            && self.end_point == other.end_point
    }
}

impl QuadraticCurve {
    pub fn new(start_point: Point, control_point: Point, end_point: Point) -> Self {
        Self {
            start_point,
            control_point,
            end_point,
            flattened: OnceLock::new(),
        }
    }

    pub fn start_point(&self) -> Point {
        self.start_point
    }

    pub fn control_point(&self) -> Point {
        self.control_point
    }

    pub fn end_point(&self) -> Point {
        self.end_point
    }

    fn flattened(&self) -> &FlattenedQuadratic {
        self.flattened.get_or_init(|| {
            FlattenedQuadratic::new(self.start_point, self.control_point, self.end_point)
        })
    }

    pub fn length(&self) -> f64 {
        self.flattened().length()
    }

    pub fn point_at_length(&self, dist: f64) -> Point {
        if dist <= 0.0 {
            return self.start_point;
        }
        if dist >= self.length() {
            return self.end_point;
        }
        self.flattened().point_at_length(dist)
    }

    pub(crate) fn svg_body(&self) -> String {
        format!(
            "Q {} {} {} {}",
            self.control_point.x, self.control_point.y, self.end_point.x, self.end_point.y
        )
    }

    pub(crate) fn with_endpoints(&self, start: Point, end: Point) -> Self {
        Self::new(start, self.control_point, end)
    }

    pub fn control_points(&self, segment_index: usize) -> Vec<ControlPoint> {
        vec![
            ControlPoint::new(segment_index, ControlPointType::Start, None, self.start_point),
            ControlPoint::new(segment_index, ControlPointType::Control1, None, self.control_point),
            ControlPoint::new(segment_index, ControlPointType::End, None, self.end_point),
        ]
    }

    pub fn update_control_point(&self, kind: ControlPointType, new_point: Point) -> Result<Self> {
        match kind {
            ControlPointType::Start => Ok(Self::new(new_point, self.control_point, self.end_point)),
            ControlPointType::Control1 => Ok(Self::new(self.start_point, new_point, self.end_point)),
            ControlPointType::End => Ok(Self::new(self.start_point, self.control_point, new_point)),
            _ => Err(PathError::UnsupportedControlPoint { segment: "QuadraticCurve", kind }),
        }
    }
}

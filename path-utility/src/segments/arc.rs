use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{PathError, Result};
use crate::geometry::arc::{center_to_endpoint, endpoint_to_center, CenterArc};
use crate::geometry::math::{distance, midpoint, point_on_line};
use crate::geometry::tolerance::{safe_div, ARC_LENGTH_SAMPLES};
use crate::json::{flag, ArcData};
use crate::model::{ControlPoint, ControlPointType, Point};

/// SVG elliptical arc in endpoint parameterization.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ArcData")]
pub struct EllipticalArc {
    start_point: Point,
    rx: f64,
    ry: f64,
    x_axis_rotation: f64,
    #[serde(serialize_with = "flag::serialize")]
    large_arc_flag: bool,
    #[serde(serialize_with = "flag::serialize")]
    sweep_flag: bool,
    end_point: Point,
    #[serde(skip)]
    resolved: OnceLock<Option<CenterArc>>,
    #[serde(skip)]
    length: OnceLock<f64>,
}

impl PartialEq for EllipticalArc {
    fn eq(&self, other: &Self) -> bool {
        self.start_point == other.start_point
            && self.rx == other.rx
            && self.ry == other.ry
            && self.x_axis_rotation == other.x_axis_rotation
            && self.large_arc_flag == other.large_arc_flag
            && self.sweep_flag == other.sweep_flag
            && self.end_point == other.end_point
    }
}

impl EllipticalArc {
    pub fn new(
        start_point: Point,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc_flag: bool,
        sweep_flag: bool,
        end_point: Point,
    ) -> Self {
        Self {
            start_point,
            rx,
            ry,
            x_axis_rotation,
            large_arc_flag,
            sweep_flag,
            end_point,
            resolved: OnceLock::new(),
            length: OnceLock::new(),
        }
    }

    /// Circular arc from its center form. Angles are radians; a full circle
    /// (equal start and end angle) has coincident endpoints and so no extent.
    pub fn from_center(center: Point, radius: f64, start_angle: f64, end_angle: f64, clockwise: bool) -> Self {
        let (start, end, large, sweep) = center_to_endpoint(center, radius, start_angle, end_angle, clockwise);
        Self::new(start, radius, radius, 0.0, large, sweep, end)
    }

    pub fn start_point(&self) -> Point {
        self.start_point
    }

    pub fn end_point(&self) -> Point {
        self.end_point
    }

    pub fn rx(&self) -> f64 {
        self.rx
    }

    pub fn ry(&self) -> f64 {
        self.ry
    }

    pub fn x_axis_rotation(&self) -> f64 {
        self.x_axis_rotation
    }

    pub fn large_arc_flag(&self) -> bool {
        self.large_arc_flag
    }

    pub fn sweep_flag(&self) -> bool {
        self.sweep_flag
    }

    /// Center form, or `None` when the arc degenerates (zero radius or
    /// coincident endpoints).
    pub fn center_parameterization(&self) -> Option<CenterArc> {
        *self.resolved.get_or_init(|| {
            endpoint_to_center(
                self.start_point,
                self.end_point,
                self.rx,
                self.ry,
                self.x_axis_rotation,
                self.large_arc_flag,
                self.sweep_flag,
            )
        })
    }

    pub fn length(&self) -> f64 {
        *self.length.get_or_init(|| match self.center_parameterization() {
            Some(c) => c.length(ARC_LENGTH_SAMPLES),
            // Zero radius draws a straight line
            None => distance(self.start_point, self.end_point),
        })
    }

    pub fn point_at_length(&self, dist: f64) -> Point {
        let length = self.length();
        if dist <= 0.0 {
            return self.start_point;
        }
        if dist >= length {
            return self.end_point;
        }
        let t = safe_div(dist, length, 0.0);
        match self.center_parameterization() {
            Some(c) => c.point_at_angle(c.theta1 + c.delta_theta * t),
            None => point_on_line(self.start_point, self.end_point, t),
        }
    }

    pub(crate) fn svg_body(&self) -> String {
        format!(
            "A {} {} {} {} {} {} {}",
            self.rx,
            self.ry,
            self.x_axis_rotation,
            u8::from(self.large_arc_flag),
            u8::from(self.sweep_flag),
            self.end_point.x,
            self.end_point.y
        )
    }

    pub(crate) fn with_endpoints(&self, start: Point, end: Point) -> Self {
        Self::new(start, self.rx, self.ry, self.x_axis_rotation, self.large_arc_flag, self.sweep_flag, end)
    }

    /// Handle for the minor radius, offset from the chord midpoint by `ry`.
    fn center_handle(&self) -> Point {
        let mid = midpoint(self.start_point, self.end_point);
        let angle = (self.end_point.y - self.start_point.y).atan2(self.end_point.x - self.start_point.x);
        Point {
            x: mid.x - self.ry * angle.sin(),
            y: mid.y - self.ry * angle.cos(),
        }
    }

    pub fn control_points(&self, segment_index: usize) -> Vec<ControlPoint> {
        vec![
            ControlPoint::new(segment_index, ControlPointType::Start, None, self.start_point),
            ControlPoint::new(segment_index, ControlPointType::End, None, self.end_point),
            ControlPoint::new(segment_index, ControlPointType::Center, None, self.center_handle()),
        ]
    }

    pub fn update_control_point(&self, kind: ControlPointType, new_point: Point) -> Result<Self> {
        match kind {
            ControlPointType::Start => Ok(self.with_endpoints(new_point, self.end_point)),
            ControlPointType::End => Ok(self.with_endpoints(self.start_point, new_point)),
            ControlPointType::Center => {
                // Only the vertical offset from the chord midpoint is honoured
                let mid = midpoint(self.start_point, self.end_point);
                let constrained = Point { x: mid.x, y: new_point.y };
                let rx = distance(self.start_point, self.end_point) / 2.0;
                let ry = distance(constrained, mid);
                Ok(Self::new(
                    self.start_point,
                    rx,
                    ry,
                    self.x_axis_rotation,
                    self.large_arc_flag,
                    self.sweep_flag,
                    self.end_point,
                ))
            }
            _ => Err(PathError::UnsupportedControlPoint { segment: "Arc", kind }),
        }
    }
}

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{PathError, Result};
use crate::geometry::limits::{MAX_SPLINE_DEGREE, MAX_SPLINE_POINTS};
use crate::geometry::math::polyline_length;
use crate::geometry::spline::{
    cardinal_point, cardinal_point_closed, cardinal_span_to_bezier, de_boor_point, knots_are_valid,
    uniform_knots,
};
use crate::geometry::tolerance::{safe_div, SPLINE_MIN_SAMPLES, SPLINE_SAMPLES_PER_POINT};
use crate::json::SplineData;
use crate::model::{ControlPoint, ControlPointType, Point};

pub const DEFAULT_DEGREE: usize = 3;
pub const DEFAULT_TENSION: f64 = 0.5;

/// Interpolating spline through its control points (cardinal, the default)
/// or a rational B-spline when a usable knot vector is present.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SplineData")]
pub struct Spline {
    control_points: Vec<Point>,
    degree: usize,
    knots: Option<Vec<f64>>,
    weights: Option<Vec<f64>>,
    closed: bool,
    tension: f64,
    #[serde(skip)]
    basis: OnceLock<Option<Vec<f64>>>,
    #[serde(skip)]
    length: OnceLock<f64>,
}

impl PartialEq for Spline {
    fn eq(&self, other: &Self) -> bool {
        self.control_points == other.control_points
            && self.degree == other.degree
            && self.knots == other.knots
            && self.weights == other.weights
            && self.closed == other.closed
            && self.tension == other.tension
    }
}

impl Spline {
    pub fn new(
        control_points: Vec<Point>,
        degree: usize,
        knots: Option<Vec<f64>>,
        weights: Option<Vec<f64>>,
        closed: bool,
        tension: f64,
    ) -> Result<Self> {
        if control_points.len() < 2 {
            return Err(PathError::TooFewSplinePoints { got: control_points.len() });
        }
        if control_points.len() > MAX_SPLINE_POINTS {
            return Err(PathError::LimitExceeded { what: "spline control points", limit: MAX_SPLINE_POINTS });
        }
        if degree > MAX_SPLINE_DEGREE {
            return Err(PathError::LimitExceeded { what: "spline degree", limit: MAX_SPLINE_DEGREE });
        }
        Ok(Self {
            control_points,
            degree,
            knots,
            weights,
            closed,
            tension,
            basis: OnceLock::new(),
            length: OnceLock::new(),
        })
    }

    /// Catmull-Rom style spline through `points`.
    pub fn from_points(points: Vec<Point>, tension: f64, closed: bool) -> Result<Self> {
        Self::new(points, DEFAULT_DEGREE, None, None, closed, tension)
    }

    pub fn b_spline(control_points: Vec<Point>, degree: usize, knots: Vec<f64>, weights: Option<Vec<f64>>) -> Result<Self> {
        Self::new(control_points, degree, Some(knots), weights, false, DEFAULT_TENSION)
    }

    pub fn control_point_positions(&self) -> &[Point] {
        &self.control_points
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn knots(&self) -> Option<&[f64]> {
        self.knots.as_deref()
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    pub fn closed(&self) -> bool {
        self.closed
    }

    pub fn tension(&self) -> f64 {
        self.tension
    }

    /// Knot vector driving de Boor evaluation, or `None` for cardinal.
    fn basis(&self) -> Option<&[f64]> {
        self.basis
            .get_or_init(|| {
                let n = self.control_points.len();
                match &self.knots {
                    Some(k) if knots_are_valid(k, n, self.degree) => Some(k.clone()),
                    Some(_) => None,
                    None if self.degree == DEFAULT_DEGREE || self.degree >= n => None,
                    None => {
                        let k = uniform_knots(n, self.degree);
                        knots_are_valid(&k, n, self.degree).then_some(k)
                    }
                }
            })
            .as_deref()
    }

    /// Closed cardinal spline whose last span joins back to the first point.
    pub(crate) fn wraps(&self) -> bool {
        self.closed && self.control_points.len() >= 3 && self.basis().is_none()
    }

    /// Curve point at global parameter `t ∈ [0, 1]`.
    pub fn point_at(&self, t: f64) -> Point {
        match self.basis() {
            Some(knots) => de_boor_point(&self.control_points, self.degree, knots, self.weights.as_deref(), t),
            None if self.wraps() => cardinal_point_closed(&self.control_points, self.tension, t),
            None => cardinal_point(&self.control_points, self.tension, t),
        }
    }

    pub fn start_point(&self) -> Point {
        self.control_points[0]
    }

    /// A wrapping spline ends back at its first point.
    pub fn end_point(&self) -> Point {
        if self.wraps() {
            self.control_points[0]
        } else {
            self.control_points[self.control_points.len() - 1]
        }
    }

    pub fn length(&self) -> f64 {
        *self.length.get_or_init(|| {
            let samples = SPLINE_MIN_SAMPLES.max(self.control_points.len() * SPLINE_SAMPLES_PER_POINT);
            let pts: Vec<Point> = (0..=samples)
                .map(|i| self.point_at(i as f64 / samples as f64))
                .collect();
            polyline_length(&pts)
        })
    }

    pub fn point_at_length(&self, dist: f64) -> Point {
        let length = self.length();
        if dist <= 0.0 {
            return self.start_point();
        }
        if dist >= length {
            return self.end_point();
        }
        self.point_at(safe_div(dist, length, 0.0))
    }

    /// Wrapping splines close their own subpath and need their own `M`.
    pub(crate) fn needs_move_to(&self) -> bool {
        self.wraps()
    }

    pub(crate) fn svg_body(&self) -> String {
        let pts = &self.control_points;
        let n = pts.len();
        if n == 2 {
            return format!("L {} {}", pts[1].x, pts[1].y);
        }
        let mut cmds = Vec::new();
        let spans = if self.wraps() { n } else { n - 1 };
        for i in 0..spans {
            let (p0, p1, p2, p3) = if self.wraps() {
                (pts[(i + n - 1) % n], pts[i], pts[(i + 1) % n], pts[(i + 2) % n])
            } else {
                (pts[i.saturating_sub(1)], pts[i], pts[i + 1], pts[(i + 2).min(n - 1)])
            };
            let (c1, c2) = cardinal_span_to_bezier(p0, p1, p2, p3, self.tension);
            cmds.push(format!("C {} {} {} {} {} {}", c1.x, c1.y, c2.x, c2.y, p2.x, p2.y));
        }
        if self.wraps() {
            cmds.push("Z".to_string());
        }
        cmds.join(" ")
    }

    pub(crate) fn with_endpoints(&self, start: Point, end: Point) -> Self {
        let mut points = self.control_points.clone();
        if self.wraps() {
            // Start and end are the same joint; an explicit start wins
            points[0] = if start != self.start_point() { start } else { end };
        } else {
            let last = points.len() - 1;
            points[0] = start;
            points[last] = end;
        }
        self.with_points(points)
    }

    fn with_points(&self, control_points: Vec<Point>) -> Self {
        Self {
            control_points,
            degree: self.degree,
            knots: self.knots.clone(),
            weights: self.weights.clone(),
            closed: self.closed,
            tension: self.tension,
            basis: OnceLock::new(),
            length: OnceLock::new(),
        }
    }

    pub fn control_points(&self, segment_index: usize) -> Vec<ControlPoint> {
        self.control_points
            .iter()
            .enumerate()
            .map(|(i, p)| ControlPoint::new(segment_index, ControlPointType::SplinePoint, Some(i), *p))
            .collect()
    }

    pub fn update_control_point(
        &self,
        kind: ControlPointType,
        point_index: Option<usize>,
        new_point: Point,
    ) -> Result<Self> {
        if kind != ControlPointType::SplinePoint {
            return Err(PathError::UnsupportedControlPoint { segment: "Spline", kind });
        }
        let len = self.control_points.len();
        match point_index {
            Some(i) if i < len => {
                let mut points = self.control_points.clone();
                points[i] = new_point;
                Ok(self.with_points(points))
            }
            index => Err(PathError::InvalidPointIndex { segment: "Spline", index, len }),
        }
    }
}

//! Conversions between the SVG endpoint arc parameterization and the center
//! parameterization (SVG implementation notes, appendix F.6.5/F.6.6).

use std::f64::consts::{PI, TAU};

use crate::geometry::math::distance;
use crate::geometry::tolerance::{approx_eq, EPS_LEN, EPS_RADIUS};
use crate::model::Point;

/// Center form of an elliptical arc. Angles are radians; `delta_theta` is
/// signed and positive sweeps toward increasing angle (clockwise on a y-down
/// canvas).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenterArc {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
    pub phi: f64,
    pub theta1: f64,
    pub delta_theta: f64,
}

impl CenterArc {
    pub fn is_circular(&self) -> bool {
        approx_eq(self.rx, self.ry, EPS_RADIUS * self.rx.max(1.0))
    }

    /// Point on the ellipse at angle `theta`.
    pub fn point_at_angle(&self, theta: f64) -> Point {
        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        Point {
            x: self.center.x + self.rx * cos_t * cos_phi - self.ry * sin_t * sin_phi,
            y: self.center.y + self.rx * cos_t * sin_phi + self.ry * sin_t * cos_phi,
        }
    }

    /// Arc length: closed form on circles, chord sampling on ellipses.
    pub fn length(&self, samples: usize) -> f64 {
        if self.is_circular() {
            return self.delta_theta.abs() * self.rx;
        }
        let samples = samples.max(1);
        let mut length = 0.0;
        let mut prev = self.point_at_angle(self.theta1);
        for i in 1..=samples {
            let theta = self.theta1 + self.delta_theta * (i as f64 / samples as f64);
            let cur = self.point_at_angle(theta);
            length += distance(prev, cur);
            prev = cur;
        }
        length
    }
}

/// Resolve endpoint parameters to center form. Returns `None` for the
/// degenerate cases SVG renderers treat as a straight line or nothing
/// (zero radius, coincident endpoints).
pub fn endpoint_to_center(
    start: Point,
    end: Point,
    rx: f64,
    ry: f64,
    x_axis_rotation_deg: f64,
    large_arc: bool,
    sweep: bool,
) -> Option<CenterArc> {
    let mut rx = rx.abs();
    let mut ry = ry.abs();
    if rx <= EPS_LEN || ry <= EPS_LEN || distance(start, end) <= EPS_LEN {
        return None;
    }
    let phi = x_axis_rotation_deg.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Step 1: Compute (x1', y1')
    let hx = (start.x - end.x) / 2.0;
    let hy = (start.y - end.y) / 2.0;
    let x1p = cos_phi * hx + sin_phi * hy;
    let y1p = -sin_phi * hx + cos_phi * hy;

    // Out-of-range radii are scaled up just enough to reach
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    // Step 2: Compute (cx', cy')
    let sign = if large_arc != sweep { 1.0 } else { -1.0 };
    let num = (rx * ry).powi(2) - (rx * y1p).powi(2) - (ry * x1p).powi(2);
    let den = (rx * y1p).powi(2) + (ry * x1p).powi(2);
    let coeff = sign * (num / den).max(0.0).sqrt();
    let cxp = coeff * (rx * y1p) / ry;
    let cyp = coeff * -(ry * x1p) / rx;

    // Step 3: Compute (cx, cy) from (cx', cy')
    let center = Point {
        x: cos_phi * cxp - sin_phi * cyp + (start.x + end.x) / 2.0,
        y: sin_phi * cxp + cos_phi * cyp + (start.y + end.y) / 2.0,
    };

    // Step 4: Compute theta1 and delta_theta
    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;
    let theta1 = angle_between(1.0, 0.0, ux, uy);
    let mut delta_theta = angle_between(ux, uy, vx, vy) % TAU;
    if sweep && delta_theta < 0.0 {
        delta_theta += TAU;
    } else if !sweep && delta_theta > 0.0 {
        delta_theta -= TAU;
    }

    Some(CenterArc { center, rx, ry, phi, theta1, delta_theta })
}

/// Endpoint parameters `(start, end, large_arc, sweep)` for a circular arc
/// given by center, radius and angles. `clockwise` sweeps toward
/// increasing angle, which is the SVG `sweep-flag = 1` direction.
pub fn center_to_endpoint(
    center: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    clockwise: bool,
) -> (Point, Point, bool, bool) {
    let at = |a: f64| Point {
        x: center.x + radius * a.cos(),
        y: center.y + radius * a.sin(),
    };
    let span = if clockwise {
        (end_angle - start_angle).rem_euclid(TAU)
    } else {
        (start_angle - end_angle).rem_euclid(TAU)
    };
    (at(start_angle), at(end_angle), span > PI, clockwise)
}

fn angle_between(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
    let dot = ux * vx + uy * vy;
    let det = ux * vy - uy * vx;
    det.atan2(dot)
}

//! Cubic Bézier arc-length parameterization.
//!
//! Length is integrated by summing chords over a uniform `t` sampling.
//! Locating a distance binary-searches `t` and re-integrates the prefix on
//! each search step, so a query costs `O(log(1/tol) * samples)`.

use crate::geometry::math::{distance, point_on_cubic_bezier};
use crate::geometry::tolerance::{CUBIC_LENGTH_SAMPLES, CUBIC_SEARCH_MAX_ITERS, CUBIC_SEARCH_TOL};
use crate::model::Point;

/// Control points of a cubic Bézier curve.
#[derive(Clone, Copy, Debug)]
pub struct CubicBezier {
    pub p0: Point, // Start point
    pub p1: Point, // First control point
    pub p2: Point, // Second control point
    pub p3: Point, // End point
}

impl CubicBezier {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluate the curve at parameter t ∈ [0, 1].
    pub fn eval(&self, t: f64) -> Point {
        point_on_cubic_bezier(self.p0, self.p1, self.p2, self.p3, t)
    }

    /// Total arc length over the full sampling resolution.
    pub fn arc_length(&self) -> f64 {
        self.length_at(1.0)
    }

    /// Arc length of the prefix `[0, t]`, integrated with the same chord
    /// density as the full curve.
    pub fn length_at(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let steps = ((CUBIC_LENGTH_SAMPLES as f64) * t.min(1.0)).ceil().max(1.0) as usize;
        let mut length = 0.0;
        let mut prev = self.p0;
        for i in 1..=steps {
            let cur = self.eval(t * i as f64 / steps as f64);
            length += distance(prev, cur);
            prev = cur;
        }
        length
    }

    /// Find parameter t whose prefix length matches `target_length`.
    /// Targets outside `[0, total]` clamp to the endpoints.
    pub fn parameter_at_length(&self, target_length: f64, total: f64) -> f64 {
        if target_length <= 0.0 {
            return 0.0;
        }
        if target_length >= total {
            return 1.0;
        }

        // Binary search for t
        let mut lo = 0.0f64;
        let mut hi = 1.0f64;

        for _ in 0..CUBIC_SEARCH_MAX_ITERS {
            let mid = (lo + hi) * 0.5;
            let len = self.length_at(mid);

            if (len - target_length).abs() < CUBIC_SEARCH_TOL {
                return mid;
            }

            if len < target_length {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        (lo + hi) * 0.5
    }
}

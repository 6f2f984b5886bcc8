use crate::geometry::math::{distance, point_on_line, point_on_quadratic_bezier};
use crate::geometry::tolerance::{safe_div, QUADRATIC_FLATTEN_STEPS};
use crate::model::Point;

/// Quadratic curve flattened into a fixed number of chords.
#[derive(Clone, Debug, PartialEq)]
pub struct FlattenedQuadratic {
    pub points: Vec<Point>,
    pub cumulative: Vec<f64>, // cumulative[i] = length up to points[i]
}

impl FlattenedQuadratic {
    pub fn new(p0: Point, p1: Point, p2: Point) -> Self {
        if p0 == p1 && p1 == p2 {
            // Bernstein weights do not sum to exactly one
            return Self {
                points: vec![p0; QUADRATIC_FLATTEN_STEPS + 1],
                cumulative: vec![0.0; QUADRATIC_FLATTEN_STEPS + 1],
            };
        }
        let mut points = Vec::with_capacity(QUADRATIC_FLATTEN_STEPS + 1);
        let mut cumulative = Vec::with_capacity(QUADRATIC_FLATTEN_STEPS + 1);
        points.push(p0);
        cumulative.push(0.0);
        for i in 1..=QUADRATIC_FLATTEN_STEPS {
            let t = i as f64 / QUADRATIC_FLATTEN_STEPS as f64;
            let p = point_on_quadratic_bezier(p0, p1, p2, t);
            let prev = points[i - 1];
            cumulative.push(cumulative[i - 1] + distance(prev, p));
            points.push(p);
        }
        Self { points, cumulative }
    }

    pub fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Walk the chords until `dist` is bracketed, then lerp inside the chord.
    pub fn point_at_length(&self, dist: f64) -> Point {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if dist <= 0.0 {
            return first;
        }
        if dist >= self.length() {
            return last;
        }
        for i in 1..self.points.len() {
            if self.cumulative[i] >= dist {
                let chord = self.cumulative[i] - self.cumulative[i - 1];
                let t = safe_div(dist - self.cumulative[i - 1], chord, 0.0);
                return point_on_line(self.points[i - 1], self.points[i], t);
            }
        }
        last
    }
}

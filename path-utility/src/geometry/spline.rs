//! Spline evaluation: cardinal (Catmull-Rom) interpolation through the
//! control points, and rational de Boor evaluation over a knot vector.

use crate::geometry::math::point_on_line;
use crate::geometry::tolerance::clamp01;
use crate::model::Point;

/// Cardinal spline through `points` at global parameter `t ∈ [0, 1]`.
///
/// Tangents are `tension * (p[i+1] - p[i-1])`; 0.5 is classic Catmull-Rom.
/// End tangents duplicate the end points.
pub fn cardinal_point(points: &[Point], tension: f64, t: f64) -> Point {
    let n = points.len();
    if n == 1 {
        return points[0];
    }
    if n == 2 {
        return point_on_line(points[0], points[1], t);
    }
    let num_segments = n - 1;
    let scaled = t * num_segments as f64;
    if scaled >= num_segments as f64 {
        return points[n - 1];
    }
    let idx = scaled.floor().max(0.0) as usize;
    let local = scaled - idx as f64;

    let p0 = points[idx.saturating_sub(1)];
    let p1 = points[idx];
    let p2 = points[idx + 1];
    let p3 = points[(idx + 2).min(n - 1)];
    hermite(p0, p1, p2, p3, tension, local)
}

/// Closed variant: wraps around so the last point joins the first.
pub fn cardinal_point_closed(points: &[Point], tension: f64, t: f64) -> Point {
    let n = points.len();
    if n < 3 {
        return cardinal_point(points, tension, t);
    }
    let scaled = clamp01(t) * n as f64;
    let idx = (scaled.floor() as usize).min(n - 1);
    let local = scaled - idx as f64;
    let p0 = points[(idx + n - 1) % n];
    let p1 = points[idx];
    let p2 = points[(idx + 1) % n];
    let p3 = points[(idx + 2) % n];
    hermite(p0, p1, p2, p3, tension, local)
}

fn hermite(p0: Point, p1: Point, p2: Point, p3: Point, tension: f64, s: f64) -> Point {
    let s2 = s * s;
    let s3 = s2 * s;
    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;
    let m1x = tension * (p2.x - p0.x);
    let m1y = tension * (p2.y - p0.y);
    let m2x = tension * (p3.x - p1.x);
    let m2y = tension * (p3.y - p1.y);
    Point {
        x: h00 * p1.x + h10 * m1x + h01 * p2.x + h11 * m2x,
        y: h00 * p1.y + h10 * m1y + h01 * p2.y + h11 * m2y,
    }
}

/// Bézier control points `(c1, c2)` of the cubic matching the cardinal
/// span `p1 -> p2`.
pub fn cardinal_span_to_bezier(p0: Point, p1: Point, p2: Point, p3: Point, tension: f64) -> (Point, Point) {
    let k = tension / 3.0;
    (
        Point { x: p1.x + (p2.x - p0.x) * k, y: p1.y + (p2.y - p0.y) * k },
        Point { x: p2.x - (p3.x - p1.x) * k, y: p2.y - (p3.y - p1.y) * k },
    )
}

/// Clamped uniform knot vector of length `n + degree + 1`.
pub fn uniform_knots(n: usize, degree: usize) -> Vec<f64> {
    let m = n + degree + 1;
    (0..m)
        .map(|i| {
            if i <= degree {
                0.0
            } else if i >= n {
                1.0
            } else {
                (i - degree) as f64 / (n - degree) as f64
            }
        })
        .collect()
}

/// Index `k` with `knots[k] <= u < knots[k+1]` restricted to the valid
/// domain `[degree, n-1]`, where `n` is the control point count.
pub fn find_knot_span(u: f64, n: usize, degree: usize, knots: &[f64]) -> usize {
    let last = n - 1;
    if u >= knots[last + 1] {
        return last;
    }
    if u <= knots[degree] {
        return degree;
    }
    let mut low = degree;
    let mut high = last + 1;
    let mut mid = (low + high) / 2;
    while u < knots[mid] || u >= knots[mid + 1] {
        if u < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

/// Whether `knots` can drive de Boor evaluation for `n` points of `degree`.
pub fn knots_are_valid(knots: &[f64], n: usize, degree: usize) -> bool {
    degree >= 1
        && n > degree
        && knots.len() == n + degree + 1
        && knots.iter().all(|k| k.is_finite())
        && knots.windows(2).all(|w| w[0] <= w[1])
        && knots[degree] < knots[n]
}

/// Rational de Boor evaluation at `t ∈ [0, 1]` mapped onto the knot domain.
/// `weights` of the wrong length are ignored (uniform weights).
pub fn de_boor_point(points: &[Point], degree: usize, knots: &[f64], weights: Option<&[f64]>, t: f64) -> Point {
    let n = points.len();
    let lo = knots[degree];
    let hi = knots[n];
    let u = lo + (hi - lo) * clamp01(t);
    let k = find_knot_span(u, n, degree, knots);
    let weights = weights.filter(|w| w.len() == n);

    // Homogeneous coordinates (w*x, w*y, w)
    let mut d: Vec<(f64, f64, f64)> = (0..=degree)
        .map(|j| {
            let p = points[j + k - degree];
            let w = weights.map_or(1.0, |w| w[j + k - degree]);
            (p.x * w, p.y * w, w)
        })
        .collect();

    for r in 1..=degree {
        for j in (r..=degree).rev() {
            let i = j + k - degree;
            let den = knots[i + 1 + degree - r] - knots[i];
            let alpha = if den.abs() > 0.0 { (u - knots[i]) / den } else { 0.0 };
            let (ax, ay, aw) = d[j - 1];
            let (bx, by, bw) = d[j];
            d[j] = (
                (1.0 - alpha) * ax + alpha * bx,
                (1.0 - alpha) * ay + alpha * by,
                (1.0 - alpha) * aw + alpha * bw,
            );
        }
    }
    let (x, y, w) = d[degree];
    if w.abs() > 0.0 {
        Point { x: x / w, y: y / w }
    } else {
        Point { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    #[test]
    fn cardinal_passes_through_control_points() {
        let pts = [p(0.0, 0.0), p(10.0, 20.0), p(30.0, 25.0), p(50.0, 10.0)];
        for (i, expected) in pts.iter().enumerate() {
            let t = i as f64 / 3.0;
            let q = cardinal_point(&pts, 0.5, t);
            assert!((q.x - expected.x).abs() < 1e-9 && (q.y - expected.y).abs() < 1e-9);
        }
    }

    #[test]
    fn two_points_are_linear() {
        let pts = [p(0.0, 0.0), p(10.0, 10.0)];
        assert_eq!(cardinal_point(&pts, 0.5, 0.5), p(5.0, 5.0));
    }

    #[test]
    fn uniform_knots_are_clamped() {
        assert_eq!(uniform_knots(4, 3), vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(uniform_knots(5, 3), vec![0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn knot_span_edges() {
        let knots = uniform_knots(5, 3);
        assert_eq!(find_knot_span(0.0, 5, 3, &knots), 3);
        assert_eq!(find_knot_span(0.25, 5, 3, &knots), 3);
        assert_eq!(find_knot_span(0.75, 5, 3, &knots), 4);
        assert_eq!(find_knot_span(1.0, 5, 3, &knots), 4);
    }

    #[test]
    fn clamped_bezier_knots_match_cubic_bezier() {
        let pts = [p(0.0, 0.0), p(10.0, 15.0), p(25.0, 20.0), p(40.0, 10.0)];
        let knots = uniform_knots(4, 3);
        let start = de_boor_point(&pts, 3, &knots, None, 0.0);
        let end = de_boor_point(&pts, 3, &knots, None, 1.0);
        assert!((start.x - 0.0).abs() < 1e-9 && (start.y - 0.0).abs() < 1e-9);
        assert!((end.x - 40.0).abs() < 1e-9 && (end.y - 10.0).abs() < 1e-9);
        let mid = de_boor_point(&pts, 3, &knots, None, 0.5);
        let bez = crate::geometry::math::point_on_cubic_bezier(pts[0], pts[1], pts[2], pts[3], 0.5);
        assert!((mid.x - bez.x).abs() < 1e-9 && (mid.y - bez.y).abs() < 1e-9);
    }

    #[test]
    fn invalid_knot_vectors_are_rejected() {
        assert!(!knots_are_valid(&[0.0, 1.0], 4, 3));
        assert!(!knots_are_valid(&[0.0, 0.0, 0.0, 0.0, 1.0, 0.5, 1.0, 1.0], 4, 3));
        assert!(knots_are_valid(&uniform_knots(4, 3), 4, 3));
    }
}

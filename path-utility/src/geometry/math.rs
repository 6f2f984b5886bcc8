// Stateless point arithmetic. NaN/Inf inputs propagate untouched.
use crate::model::Point;

pub fn distance(p1: Point, p2: Point) -> f64 {
    let dx = p2.x - p1.x; let dy = p2.y - p1.y;
    (dx*dx + dy*dy).sqrt()
}

/// Linear interpolation; `t` is not clamped.
pub fn point_on_line(p1: Point, p2: Point, t: f64) -> Point {
    Point { x: p1.x + (p2.x - p1.x) * t, y: p1.y + (p2.y - p1.y) * t }
}

pub fn point_on_quadratic_bezier(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let uu = u*u; let tt = t*t;
    Point {
        x: uu*p0.x + 2.0*u*t*p1.x + tt*p2.x,
        y: uu*p0.y + 2.0*u*t*p1.y + tt*p2.y,
    }
}

pub fn point_on_cubic_bezier(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let tt = t*t; let uu = u*u;
    let uuu = uu*u; let ttt = tt*t;
    Point {
        x: uuu*p0.x + 3.0*uu*t*p1.x + 3.0*u*tt*p2.x + ttt*p3.x,
        y: uuu*p0.y + 3.0*uu*t*p1.y + 3.0*u*tt*p2.y + ttt*p3.y,
    }
}

pub fn midpoint(p1: Point, p2: Point) -> Point {
    Point { x: 0.5*(p1.x + p2.x), y: 0.5*(p1.y + p2.y) }
}

/// Reflection of `p` through `about`.
pub fn reflect(p: Point, about: Point) -> Point {
    Point { x: 2.0*about.x - p.x, y: 2.0*about.y - p.y }
}

/// Sum of chord lengths over consecutive points.
pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

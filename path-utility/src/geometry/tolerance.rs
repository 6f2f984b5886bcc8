// Sampling resolutions and comparison slack for segment measurement

pub const QUADRATIC_FLATTEN_STEPS: usize = 20;    // chords per quadratic curve
pub const CUBIC_LENGTH_SAMPLES: usize = 1000;     // chords per cubic length integration
pub const CUBIC_SEARCH_TOL: f64 = 0.001;          // length slack for the t binary search
pub const CUBIC_SEARCH_MAX_ITERS: u32 = 100;
pub const ARC_LENGTH_SAMPLES: usize = 360;        // chords for non-circular ellipse arcs
pub const SPLINE_MIN_SAMPLES: usize = 50;
pub const SPLINE_SAMPLES_PER_POINT: usize = 10;

pub const EPS_LEN: f64 = 1e-12;                   // zero-length threshold
pub const EPS_RADIUS: f64 = 1e-9;                 // rx/ry equality for circular arcs

#[inline] pub fn clamp01(x: f64) -> f64 { x.max(0.0).min(1.0) }
#[inline] pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool { (a - b).abs() <= eps }

#[inline]
pub fn safe_div(num: f64, den: f64, fallback: f64) -> f64 {
    if den.abs() <= EPS_LEN { fallback } else { num / den }
}

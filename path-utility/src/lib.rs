pub mod model;
pub mod error;
pub mod geometry {
    pub mod arc;
    pub mod cubic;
    pub mod limits;
    pub mod math;
    pub mod quadratic;
    pub mod spline;
    pub mod tolerance;
}
pub mod segments {
    pub mod arc;
    pub mod cubic;
    pub mod line;
    pub mod quadratic;
    pub mod spline;
}
pub mod control_points;
pub mod path;
pub mod segment;
mod json;
mod svg;

pub use control_points::{CallbackError, CallbackId, ControlPointConfig, ControlPointManager, MoveCallback};
pub use error::{PathError, Result};
pub use model::{Bounds, ControlPoint, ControlPointType, ControlPointUpdate, Point};
pub use path::Path;
pub use segment::{Segment, SegmentKind};
pub use segments::{
    arc::EllipticalArc, cubic::CubicCurve, line::Line, quadratic::QuadraticCurve, spline::Spline,
};
pub use svg::parse_svg;

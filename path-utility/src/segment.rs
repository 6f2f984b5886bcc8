use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;
use crate::model::{ControlPoint, ControlPointType, Point};
use crate::segments::arc::EllipticalArc;
use crate::segments::cubic::CubicCurve;
use crate::segments::line::Line;
use crate::segments::quadratic::QuadraticCurve;
use crate::segments::spline::Spline;

/// The closed set of segment geometries. Serialized as
/// `{"type": "...", "data": {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum SegmentKind {
    Line(Line),
    QuadraticCurve(QuadraticCurve),
    CubicCurve(CubicCurve),
    Arc(EllipticalArc),
    Spline(Spline),
}

impl SegmentKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            SegmentKind::Line(_) => "line",
            SegmentKind::QuadraticCurve(_) => "quadratic-curve",
            SegmentKind::CubicCurve(_) => "cubic-curve",
            SegmentKind::Arc(_) => "arc",
            SegmentKind::Spline(_) => "spline",
        }
    }

    pub fn start_point(&self) -> Point {
        match self {
            SegmentKind::Line(s) => s.start_point(),
            SegmentKind::QuadraticCurve(s) => s.start_point(),
            SegmentKind::CubicCurve(s) => s.start_point(),
            SegmentKind::Arc(s) => s.start_point(),
            SegmentKind::Spline(s) => s.start_point(),
        }
    }

    pub fn end_point(&self) -> Point {
        match self {
            SegmentKind::Line(s) => s.end_point(),
            SegmentKind::QuadraticCurve(s) => s.end_point(),
            SegmentKind::CubicCurve(s) => s.end_point(),
            SegmentKind::Arc(s) => s.end_point(),
            SegmentKind::Spline(s) => s.end_point(),
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            SegmentKind::Line(s) => s.length(),
            SegmentKind::QuadraticCurve(s) => s.length(),
            SegmentKind::CubicCurve(s) => s.length(),
            SegmentKind::Arc(s) => s.length(),
            SegmentKind::Spline(s) => s.length(),
        }
    }

    pub fn point_at_length(&self, dist: f64) -> Point {
        match self {
            SegmentKind::Line(s) => s.point_at_length(dist),
            SegmentKind::QuadraticCurve(s) => s.point_at_length(dist),
            SegmentKind::CubicCurve(s) => s.point_at_length(dist),
            SegmentKind::Arc(s) => s.point_at_length(dist),
            SegmentKind::Spline(s) => s.point_at_length(dist),
        }
    }

    fn svg_body(&self) -> String {
        match self {
            SegmentKind::Line(s) => s.svg_body(),
            SegmentKind::QuadraticCurve(s) => s.svg_body(),
            SegmentKind::CubicCurve(s) => s.svg_body(),
            SegmentKind::Arc(s) => s.svg_body(),
            SegmentKind::Spline(s) => s.svg_body(),
        }
    }

    fn with_endpoints(&self, start: Point, end: Point) -> SegmentKind {
        match self {
            SegmentKind::Line(s) => SegmentKind::Line(s.with_endpoints(start, end)),
            SegmentKind::QuadraticCurve(s) => SegmentKind::QuadraticCurve(s.with_endpoints(start, end)),
            SegmentKind::CubicCurve(s) => SegmentKind::CubicCurve(s.with_endpoints(start, end)),
            SegmentKind::Arc(s) => SegmentKind::Arc(s.with_endpoints(start, end)),
            SegmentKind::Spline(s) => SegmentKind::Spline(s.with_endpoints(start, end)),
        }
    }

    pub fn control_points(&self, segment_index: usize) -> Vec<ControlPoint> {
        match self {
            SegmentKind::Line(s) => s.control_points(segment_index),
            SegmentKind::QuadraticCurve(s) => s.control_points(segment_index),
            SegmentKind::CubicCurve(s) => s.control_points(segment_index),
            SegmentKind::Arc(s) => s.control_points(segment_index),
            SegmentKind::Spline(s) => s.control_points(segment_index),
        }
    }

    pub fn update_control_point(
        &self,
        kind: ControlPointType,
        point_index: Option<usize>,
        new_point: Point,
    ) -> Result<SegmentKind> {
        Ok(match self {
            SegmentKind::Line(s) => SegmentKind::Line(s.update_control_point(kind, new_point)?),
            SegmentKind::QuadraticCurve(s) => {
                SegmentKind::QuadraticCurve(s.update_control_point(kind, new_point)?)
            }
            SegmentKind::CubicCurve(s) => SegmentKind::CubicCurve(s.update_control_point(kind, new_point)?),
            SegmentKind::Arc(s) => SegmentKind::Arc(s.update_control_point(kind, new_point)?),
            SegmentKind::Spline(s) => SegmentKind::Spline(s.update_control_point(kind, point_index, new_point)?),
        })
    }
}

impl From<Line> for SegmentKind {
    fn from(s: Line) -> Self {
        SegmentKind::Line(s)
    }
}

impl From<QuadraticCurve> for SegmentKind {
    fn from(s: QuadraticCurve) -> Self {
        SegmentKind::QuadraticCurve(s)
    }
}

impl From<CubicCurve> for SegmentKind {
    fn from(s: CubicCurve) -> Self {
        SegmentKind::CubicCurve(s)
    }
}

impl From<EllipticalArc> for SegmentKind {
    fn from(s: EllipticalArc) -> Self {
        SegmentKind::Arc(s)
    }
}

impl From<Spline> for SegmentKind {
    fn from(s: Spline) -> Self {
        SegmentKind::Spline(s)
    }
}

/// An immutable path segment: intrinsic geometry plus optional endpoint
/// overrides. When an override is present it wins everywhere the segment is
/// observed (measurement, SVG, JSON, control points); the intrinsic geometry
/// stays available through [`Segment::kind`].
#[derive(Clone, Debug)]
pub struct Segment {
    kind: SegmentKind,
    start_override: Option<Point>,
    end_override: Option<Point>,
    // `kind` with the overrides baked in, when there are any
    effective: Option<SegmentKind>,
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.start_override == other.start_override
            && self.end_override == other.end_override
    }
}

impl Segment {
    pub fn new(kind: impl Into<SegmentKind>) -> Self {
        Self::with_overrides(kind.into(), None, None)
    }

    pub fn with_overrides(kind: SegmentKind, start_override: Option<Point>, end_override: Option<Point>) -> Self {
        let effective = if start_override.is_some() || end_override.is_some() {
            let start = start_override.unwrap_or_else(|| kind.start_point());
            let end = end_override.unwrap_or_else(|| kind.end_point());
            Some(kind.with_endpoints(start, end))
        } else {
            None
        };
        Self { kind, start_override, end_override, effective }
    }

    /// Intrinsic geometry, overrides not applied.
    pub fn kind(&self) -> &SegmentKind {
        &self.kind
    }

    /// Observable geometry, overrides applied.
    pub fn geometry(&self) -> &SegmentKind {
        self.effective.as_ref().unwrap_or(&self.kind)
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn start_override(&self) -> Option<Point> {
        self.start_override
    }

    pub fn end_override(&self) -> Option<Point> {
        self.end_override
    }

    #[must_use]
    pub fn with_start_override(&self, point: Option<Point>) -> Segment {
        Segment::with_overrides(self.kind.clone(), point, self.end_override)
    }

    #[must_use]
    pub fn with_end_override(&self, point: Option<Point>) -> Segment {
        Segment::with_overrides(self.kind.clone(), self.start_override, point)
    }

    pub fn start_point(&self) -> Point {
        self.geometry().start_point()
    }

    pub fn end_point(&self) -> Point {
        self.geometry().end_point()
    }

    pub fn length(&self) -> f64 {
        self.geometry().length()
    }

    pub fn point_at_length(&self, dist: f64) -> Point {
        self.geometry().point_at_length(dist)
    }

    pub(crate) fn needs_move_to(&self) -> bool {
        matches!(self.geometry(), SegmentKind::Spline(s) if s.needs_move_to())
    }

    /// SVG path data for this segment alone. The `M` is emitted when asked
    /// for, and always for splines that close their own subpath.
    pub fn to_svg_command(&self, include_move_to: bool) -> String {
        let body = self.geometry().svg_body();
        if include_move_to || self.needs_move_to() {
            let start = self.start_point();
            format!("M {} {} {}", start.x, start.y, body)
        } else {
            body
        }
    }

    pub fn to_svg_string(&self) -> String {
        self.to_svg_command(true)
    }

    pub fn to_json(&self) -> serde_json::Value {
        // Every field is a plain number, bool or array
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn from_json(value: &serde_json::Value) -> Result<Segment> {
        Ok(Segment::deserialize(value)?)
    }

    pub fn control_points(&self, segment_index: usize) -> Vec<ControlPoint> {
        self.geometry().control_points(segment_index)
    }

    /// New segment with one handle moved. Moving an endpoint handle drops the
    /// override on that end; the other override is carried over.
    pub fn update_control_point(
        &self,
        kind: ControlPointType,
        point_index: Option<usize>,
        new_point: Point,
    ) -> Result<Segment> {
        let updated = self.kind.update_control_point(kind, point_index, new_point)?;
        let (moves_start, moves_end) = match (&self.kind, kind, point_index) {
            (SegmentKind::Spline(s), ControlPointType::SplinePoint, Some(i)) if s.wraps() => (i == 0, i == 0),
            (SegmentKind::Spline(s), ControlPointType::SplinePoint, Some(i)) => {
                (i == 0, i + 1 == s.control_point_positions().len())
            }
            (_, ControlPointType::Start, _) => (true, false),
            (_, ControlPointType::End, _) => (false, true),
            _ => (false, false),
        };
        let start_override = if moves_start { None } else { self.start_override };
        let end_override = if moves_end { None } else { self.end_override };
        Ok(Segment::with_overrides(updated, start_override, end_override))
    }
}

impl From<SegmentKind> for Segment {
    fn from(kind: SegmentKind) -> Self {
        Segment::new(kind)
    }
}

impl Serialize for Segment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.geometry().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Segment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        SegmentKind::deserialize(deserializer).map(Segment::new)
    }
}

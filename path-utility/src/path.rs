use std::sync::Arc;

use crate::error::{PathError, Result};
use crate::json;
use crate::model::{Bounds, Point};
use crate::segment::Segment;
use crate::segments::line::Line;
use crate::segments::spline::Spline;
use crate::svg::parse_svg;

/// An ordered sequence of immutable segments. Segments are shared by
/// reference count so an edit that replaces one segment reuses the rest.
#[derive(Clone, Debug, Default)]
pub struct Path {
    segments: Vec<Arc<Segment>>,
    id: Option<u32>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.segments.len() == other.segments.len()
            && self.segments.iter().zip(&other.segments).all(|(a, b)| a == b)
    }
}

impl Path {
    pub fn new(segments: Vec<Segment>, id: Option<u32>) -> Self {
        Self {
            segments: segments.into_iter().map(Arc::new).collect(),
            id,
        }
    }

    pub fn from_shared(segments: Vec<Arc<Segment>>, id: Option<u32>) -> Self {
        Self { segments, id }
    }

    pub fn from_svg_string(d: &str) -> Self {
        Self::new(parse_svg(d), None)
    }

    /// Polyline through `points`; empty for fewer than two points.
    pub fn from_points(points: &[Point], id: Option<u32>) -> Self {
        let segments = points
            .windows(2)
            .map(|w| Segment::new(Line::new(w[0], w[1])))
            .collect();
        Self::new(segments, id)
    }

    pub fn from_spline(spline: Spline) -> Self {
        Self::new(vec![Segment::new(spline)], None)
    }

    /// Load a saved document. `start`/`end` become overrides on the first and
    /// last segment; `id` replaces the stored id when given.
    pub fn from_json(json: &str, start: Option<Point>, end: Option<Point>, id: Option<u32>) -> Result<Self> {
        let (segments, stored_id) = json::read_document(json)?;
        let mut path = Self::new(segments, id.or(stored_id));
        if let Some(p) = start {
            if !path.is_empty() {
                path.set_start_point(p)?;
            }
        }
        if let Some(p) = end {
            if !path.is_empty() {
                path.set_end_point(p)?;
            }
        }
        Ok(path)
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        json::write_document(&self.segments, self.id)
    }

    pub fn to_json(&self) -> String {
        self.to_json_value().to_string()
    }

    pub fn id(&self) -> Option<u32> {
        self.id
    }

    pub fn set_id(&mut self, id: Option<u32>) {
        self.id = id;
    }

    pub fn segments(&self) -> &[Arc<Segment>] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&Arc<Segment>> {
        self.segments.get(index)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(|s| s.length()).sum()
    }

    /// Point at distance `dist` along the whole path, clamped to its ends.
    pub fn point_at_length(&self, dist: f64) -> Result<Point> {
        let last = self.segments.last().ok_or(PathError::EmptyPath)?;
        let mut walked = 0.0;
        for seg in &self.segments {
            let len = seg.length();
            if dist <= walked + len {
                return Ok(seg.point_at_length(dist - walked));
            }
            walked += len;
        }
        Ok(last.end_point())
    }

    /// `count` points spaced evenly by arc length, both ends included.
    pub fn equidistant_points(&self, count: usize) -> Vec<Point> {
        let Some(start) = self.start_point() else {
            return Vec::new();
        };
        match count {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let total = self.total_length();
                let step = total / (count - 1) as f64;
                (0..count)
                    .filter_map(|i| self.point_at_length(step * i as f64).ok())
                    .collect()
            }
        }
    }

    pub fn start_point(&self) -> Option<Point> {
        self.segments.first().map(|s| s.start_point())
    }

    pub fn last_point(&self) -> Option<Point> {
        self.segments.last().map(|s| s.end_point())
    }

    /// Box around every segment's handles, not the sampled curve.
    pub fn bounds_by_control_points(&self) -> Option<Bounds> {
        Bounds::from_points(
            self.segments
                .iter()
                .enumerate()
                .flat_map(|(i, s)| s.control_points(i))
                .map(|cp| cp.point),
        )
    }

    /// Path data with `M` only where the pen has to jump.
    pub fn to_svg_string(&self) -> String {
        let mut parts = Vec::with_capacity(self.segments.len());
        let mut pen: Option<Point> = None;
        for seg in &self.segments {
            let jump = pen != Some(seg.start_point());
            parts.push(seg.to_svg_command(jump));
            pen = Some(if seg.needs_move_to() { seg.start_point() } else { seg.end_point() });
        }
        parts.join(" ")
    }

    pub fn set_start_point(&mut self, point: Point) -> Result<()> {
        let first = self.segments.first_mut().ok_or(PathError::EmptyPath)?;
        *first = Arc::new(first.with_start_override(Some(point)));
        Ok(())
    }

    pub fn set_end_point(&mut self, point: Point) -> Result<()> {
        let last = self.segments.last_mut().ok_or(PathError::EmptyPath)?;
        *last = Arc::new(last.with_end_override(Some(point)));
        Ok(())
    }

    pub fn add_segment(&mut self, segment: Segment) {
        self.segments.push(Arc::new(segment));
    }

    pub fn remove_segment(&mut self, index: usize) -> Option<Arc<Segment>> {
        (index < self.segments.len()).then(|| self.segments.remove(index))
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Returns `false` when `index` is out of range.
    pub fn replace_segment(&mut self, index: usize, segment: Segment) -> bool {
        match self.segments.get_mut(index) {
            Some(slot) => {
                *slot = Arc::new(segment);
                true
            }
            None => false,
        }
    }

    /// Copy of this path with one segment swapped; the others are shared.
    pub fn with_segment_replaced(&self, index: usize, segment: Segment) -> Path {
        let mut next = self.clone();
        next.replace_segment(index, segment);
        next
    }
}

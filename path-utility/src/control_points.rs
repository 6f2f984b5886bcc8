//! Interactive editing: an id-addressed index of handles derived from a
//! [`Path`], plus move notifications for the drawing surface.

use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::math::distance;
use crate::geometry::tolerance::EPS_LEN;
use crate::model::{ControlPoint, ControlPointType, ControlPointUpdate, Point};
use crate::path::Path;
use crate::segment::{Segment, SegmentKind};

/// Error a move callback reports back to the manager.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct CallbackError(pub String);

impl CallbackError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub type MoveCallback = Box<dyn FnMut(&str, Point) -> std::result::Result<(), CallbackError>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

/// Handle styling for the editing surface. Missing fields take defaults, so a
/// partial object deserializes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControlPointConfig {
    pub visible: bool,
    pub handle_radius: f64,
    pub handle_color: String,
    pub selected_color: String,
    pub show_control_lines: bool,
    pub control_line_color: String,
}

impl Default for ControlPointConfig {
    fn default() -> Self {
        Self {
            visible: true,
            handle_radius: 6.0,
            handle_color: "#4A90E2".to_string(),
            selected_color: "#FF6B6B".to_string(),
            show_control_lines: true,
            control_line_color: "#CCCCCC".to_string(),
        }
    }
}

impl ControlPointConfig {
    /// Copy with the fields present in `patch` (a JSON object) replaced.
    pub fn merged(&self, patch: &serde_json::Value) -> Result<Self> {
        let mut base = serde_json::to_value(self)?;
        if let (Some(base), Some(patch)) = (base.as_object_mut(), patch.as_object()) {
            for (k, v) in patch {
                base.insert(k.clone(), v.clone());
            }
        }
        Ok(serde_json::from_value(base)?)
    }
}

pub struct ControlPointManager {
    path: Path,
    control_points: IndexMap<String, ControlPoint>,
    callbacks: Vec<(CallbackId, MoveCallback)>,
    next_callback_id: u64,
    config: ControlPointConfig,
}

impl ControlPointManager {
    pub fn new(path: Path) -> Self {
        Self::with_config(path, ControlPointConfig::default())
    }

    pub fn with_config(path: Path, config: ControlPointConfig) -> Self {
        let mut manager = Self {
            path,
            control_points: IndexMap::new(),
            callbacks: Vec::new(),
            next_callback_id: 0,
            config,
        };
        manager.rebuild();
        manager
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> Path {
        self.path
    }

    /// Swap in a new path and re-derive every handle.
    pub fn set_path(&mut self, path: Path) {
        self.path = path;
        self.rebuild();
    }

    pub fn config(&self) -> &ControlPointConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ControlPointConfig) {
        self.config = config;
    }

    pub fn update_config(&mut self, patch: &serde_json::Value) -> Result<()> {
        self.config = self.config.merged(patch)?;
        Ok(())
    }

    /// Re-derive the handle index from the current segments. Needed after any
    /// structural change since ids embed the segment index.
    pub fn rebuild(&mut self) {
        self.control_points.clear();
        for (i, seg) in self.path.segments().iter().enumerate() {
            for cp in seg.control_points(i) {
                self.control_points.insert(cp.id.clone(), cp);
            }
        }
    }

    pub fn control_points(&self) -> Vec<ControlPoint> {
        self.control_points.values().cloned().collect()
    }

    pub fn control_point(&self, id: &str) -> Option<&ControlPoint> {
        self.control_points.get(id)
    }

    pub fn control_points_for_segment(&self, segment_index: usize) -> Vec<ControlPoint> {
        self.control_points
            .values()
            .filter(|cp| cp.segment_index == segment_index)
            .cloned()
            .collect()
    }

    /// Handle on the start of the first segment.
    pub fn first_control_point(&self) -> Option<&ControlPoint> {
        self.control_points.values().find(|cp| {
            cp.segment_index == 0
                && match cp.kind {
                    ControlPointType::Start => true,
                    ControlPointType::SplinePoint => cp.point_index == Some(0),
                    _ => false,
                }
        })
    }

    /// Handle on the end of the last segment.
    pub fn last_control_point(&self) -> Option<&ControlPoint> {
        let last_index = self.path.len().checked_sub(1)?;
        self.control_points
            .values()
            .filter(|cp| cp.segment_index == last_index)
            .filter(|cp| matches!(cp.kind, ControlPointType::End | ControlPointType::SplinePoint))
            .last()
    }

    pub fn control_points_excluding(&self, exclude_first: bool, exclude_last: bool) -> Vec<ControlPoint> {
        let first = exclude_first.then(|| self.first_control_point()).flatten().map(|cp| cp.id.as_str());
        let last = exclude_last.then(|| self.last_control_point()).flatten().map(|cp| cp.id.as_str());
        self.control_points
            .values()
            .filter(|cp| Some(cp.id.as_str()) != first && Some(cp.id.as_str()) != last)
            .cloned()
            .collect()
    }

    /// Nearest handle strictly within `tolerance`; earlier handles win ties.
    pub fn control_point_at(&self, point: Point, tolerance: f64) -> Option<&ControlPoint> {
        let mut best: Option<(&ControlPoint, f64)> = None;
        for cp in self.control_points.values() {
            let d = distance(point, cp.point);
            if d < best.map_or(tolerance, |(_, bd)| bd) {
                best = Some((cp, d));
            }
        }
        best.map(|(cp, _)| cp)
    }

    /// Every handle within `tolerance`, nearest first.
    pub fn control_points_near(&self, point: Point, tolerance: f64) -> Vec<ControlPoint> {
        let mut near: Vec<(f64, &ControlPoint)> = self
            .control_points
            .values()
            .map(|cp| (distance(point, cp.point), cp))
            .filter(|(d, _)| *d <= tolerance)
            .collect();
        near.sort_by(|a, b| a.0.total_cmp(&b.0));
        near.into_iter().map(|(_, cp)| cp.clone()).collect()
    }

    /// Move one handle. Returns `false` for an unknown id or a move the
    /// segment refuses; the path is left untouched in both cases.
    pub fn move_control_point(&mut self, id: &str, new_point: Point) -> bool {
        let Some(cp) = self.control_points.get(id).cloned() else {
            return false;
        };
        let Some(segment) = self.path.segment(cp.segment_index) else {
            return false;
        };
        let updated = match segment.update_control_point(cp.kind, cp.point_index, new_point) {
            Ok(s) => s,
            Err(err) => {
                tracing::debug!(id, %err, "control point move rejected");
                return false;
            }
        };
        self.replace_segment(cp.segment_index, updated);
        self.notify(id, new_point);
        true
    }

    /// Move several handles, replacing each touched segment once. Either all
    /// segments update or none do. Unknown ids are skipped.
    pub fn move_control_points(&mut self, updates: &[ControlPointUpdate]) -> bool {
        let mut by_segment: BTreeMap<usize, Vec<(&ControlPoint, Point)>> = BTreeMap::new();
        for update in updates {
            match self.control_points.get(&update.id) {
                Some(cp) => by_segment.entry(cp.segment_index).or_default().push((cp, update.point)),
                None => tracing::warn!(id = %update.id, "unknown control point in batch move"),
            }
        }

        let mut replacements = Vec::with_capacity(by_segment.len());
        for (index, moves) in by_segment {
            let Some(segment) = self.path.segment(index) else {
                return false;
            };
            let mut next: Segment = (**segment).clone();
            for (cp, point) in moves {
                next = match next.update_control_point(cp.kind, cp.point_index, point) {
                    Ok(s) => s,
                    Err(err) => {
                        tracing::debug!(id = %cp.id, %err, "batch move rejected");
                        return false;
                    }
                };
            }
            replacements.push((index, next));
        }

        for (index, segment) in replacements {
            self.replace_segment(index, segment);
        }
        for update in updates {
            if self.control_points.contains_key(&update.id) {
                self.notify(&update.id, update.point);
            }
        }
        true
    }

    /// Move an endpoint handle together with every other endpoint handle at
    /// the same position, so neighbouring segments stay joined.
    pub fn move_joint(&mut self, id: &str, new_point: Point) -> bool {
        let Some(anchor) = self.control_points.get(id) else {
            return false;
        };
        let at = anchor.point;
        let updates: Vec<ControlPointUpdate> = self
            .control_points
            .values()
            .filter(|cp| cp.id == id || (self.is_joint_handle(cp) && distance(cp.point, at) <= EPS_LEN))
            .map(|cp| ControlPointUpdate { id: cp.id.clone(), point: new_point })
            .collect();
        self.move_control_points(&updates)
    }

    fn is_joint_handle(&self, cp: &ControlPoint) -> bool {
        match (cp.kind, cp.point_index) {
            (ControlPointType::Start | ControlPointType::End, _) => true,
            (ControlPointType::SplinePoint, Some(i)) => match self.path.segment(cp.segment_index).map(|s| s.geometry()) {
                Some(SegmentKind::Spline(s)) => i == 0 || i + 1 == s.control_point_positions().len(),
                _ => false,
            },
            _ => false,
        }
    }

    fn replace_segment(&mut self, index: usize, segment: Segment) {
        let fresh = segment.control_points(index);
        self.path = self.path.with_segment_replaced(index, segment);
        for cp in fresh {
            self.control_points.insert(cp.id.clone(), cp);
        }
    }

    fn notify(&mut self, id: &str, point: Point) {
        for (cb_id, callback) in self.callbacks.iter_mut() {
            match catch_unwind(AssertUnwindSafe(|| callback(id, point))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => tracing::error!(callback = ?cb_id, id, %err, "move callback failed"),
                Err(_) => tracing::error!(callback = ?cb_id, id, "move callback panicked"),
            }
        }
    }

    pub fn add_move_callback(&mut self, callback: MoveCallback) -> CallbackId {
        let id = CallbackId(self.next_callback_id);
        self.next_callback_id += 1;
        self.callbacks.push((id, callback));
        id
    }

    pub fn remove_move_callback(&mut self, id: CallbackId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(cb_id, _)| *cb_id != id);
        self.callbacks.len() != before
    }

    pub fn add_segment(&mut self, segment: Segment) {
        self.path.add_segment(segment);
        self.rebuild();
    }

    pub fn remove_segment(&mut self, index: usize) -> bool {
        let removed = self.path.remove_segment(index).is_some();
        if removed {
            self.rebuild();
        }
        removed
    }

    pub fn set_start_point(&mut self, point: Point) -> Result<()> {
        self.path.set_start_point(point)?;
        self.rebuild();
        Ok(())
    }

    pub fn set_end_point(&mut self, point: Point) -> Result<()> {
        self.path.set_end_point(point)?;
        self.rebuild();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.path.clear();
        self.control_points.clear();
    }
}

impl std::fmt::Debug for ControlPointManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlPointManager")
            .field("path", &self.path)
            .field("control_points", &self.control_points.len())
            .field("callbacks", &self.callbacks.len())
            .field("config", &self.config)
            .finish()
    }
}

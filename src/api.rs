use crate::PathEditor;
use path_utility::{ControlPointConfig, ControlPointUpdate, Path, Point, Segment};
use wasm_bindgen::prelude::*;
use crate::error;
use crate::interop;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn finite_point(x: f64, y: f64) -> Result<Point, JsValue> {
    if !x.is_finite() {
        return Err(error::non_finite("x"));
    }
    if !y.is_finite() {
        return Err(error::non_finite("y"));
    }
    Ok(Point::new(x, y))
}

fn optional_point(v: JsValue, param: &str) -> Result<Option<Point>, JsValue> {
    if v.is_null() || v.is_undefined() {
        return Ok(None);
    }
    let p: Point = interop::from_js(v).map_err(|m| error::err("invalid_json", format!("{}: {}", param, m), None))?;
    finite_point(p.x, p.y).map(Some)
}

#[wasm_bindgen]
impl PathEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PathEditor {
        PathEditor::rs_new(Path::default())
    }

    /// Editor over the segments of an SVG path `d` string.
    pub fn from_svg(d: &str) -> PathEditor {
        PathEditor::rs_new(Path::from_svg_string(d))
    }

    /// Editor over a saved path document. `start`/`end` are optional `{x, y}`
    /// overrides for the path ends; `id` replaces the stored id.
    pub fn from_json(json: &str, start: JsValue, end: JsValue, id: Option<u32>) -> Result<PathEditor, JsValue> {
        let start = optional_point(start, "start")?;
        let end = optional_point(end, "end")?;
        let path = Path::from_json(json, start, end, id).map_err(|e| error::path_error(&e))?;
        Ok(PathEditor::rs_new(path))
    }

    // Loading
    pub fn load_svg(&mut self, d: &str) {
        self.inner.set_path(Path::from_svg_string(d));
    }
    pub fn load_json_res(&mut self, json: &str) -> JsValue {
        match Path::from_json(json, None, None, None) {
            Ok(path) => {
                self.inner.set_path(path);
                error::ok(JsValue::from_f64(self.inner.path().len() as f64))
            }
            Err(e) => error::path_error(&e),
        }
    }

    // Queries
    pub fn id(&self) -> Option<u32> {
        self.rs_path().id()
    }
    pub fn segment_count(&self) -> u32 {
        self.rs_path().len() as u32
    }
    pub fn total_length(&self) -> f64 {
        self.rs_path().total_length()
    }
    pub fn point_at_length(&self, dist: f64) -> JsValue {
        match self.rs_path().point_at_length(dist) {
            Ok(p) => interop::point_js(p),
            Err(_) => JsValue::NULL,
        }
    }
    pub fn point_at_length_res(&self, dist: f64) -> JsValue {
        if dist.is_nan() {
            return error::non_finite("dist");
        }
        match self.rs_path().point_at_length(dist) {
            Ok(p) => error::ok(interop::point_js(p)),
            Err(e) => error::path_error(&e),
        }
    }
    /// Flat `[x0, y0, x1, y1, ...]` of `count` evenly spaced points.
    pub fn equidistant_points(&self, count: u32) -> js_sys::Float64Array {
        interop::points_flat(&self.rs_path().equidistant_points(count as usize))
    }
    pub fn to_svg(&self) -> String {
        self.rs_path().to_svg_string()
    }
    pub fn to_json(&self) -> String {
        self.rs_path().to_json()
    }
    pub fn bounds(&self) -> JsValue {
        match self.rs_path().bounds_by_control_points() {
            Some(b) => interop::to_js(&b),
            None => JsValue::NULL,
        }
    }

    // Control points
    pub fn control_points(&self) -> JsValue {
        interop::to_js(&self.inner.control_points())
    }
    pub fn control_points_excluding(&self, exclude_first: bool, exclude_last: bool) -> JsValue {
        interop::to_js(&self.inner.control_points_excluding(exclude_first, exclude_last))
    }
    pub fn control_points_for_segment(&self, segment_index: u32) -> JsValue {
        interop::to_js(&self.inner.control_points_for_segment(segment_index as usize))
    }
    pub fn control_point_at(&self, x: f64, y: f64, tolerance: f64) -> JsValue {
        match self.inner.control_point_at(Point::new(x, y), tolerance) {
            Some(cp) => interop::to_js(cp),
            None => JsValue::NULL,
        }
    }
    pub fn control_point_at_res(&self, x: f64, y: f64, tolerance: f64) -> JsValue {
        let p = match finite_point(x, y) {
            Ok(p) => p,
            Err(e) => return e,
        };
        if !tolerance.is_finite() {
            return error::non_finite("tolerance");
        }
        if tolerance < 0.0 {
            return error::out_of_range("tolerance", 0.0, f64::MAX, tolerance);
        }
        match self.inner.control_point_at(p, tolerance) {
            Some(cp) => error::ok(interop::to_js(cp)),
            None => error::ok(JsValue::NULL),
        }
    }
    pub fn control_points_near(&self, x: f64, y: f64, tolerance: f64) -> JsValue {
        interop::to_js(&self.inner.control_points_near(Point::new(x, y), tolerance))
    }

    // Editing
    pub fn move_control_point(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.inner.move_control_point(id, Point::new(x, y))
    }
    /// Move an endpoint handle and every endpoint handle sharing its position.
    pub fn move_joint(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.inner.move_joint(id, Point::new(x, y))
    }
    pub fn move_control_point_res(&mut self, id: &str, x: f64, y: f64) -> JsValue {
        let p = match finite_point(x, y) {
            Ok(p) => p,
            Err(e) => return e,
        };
        if self.inner.control_point(id).is_none() {
            return error::unknown_control_point(id);
        }
        if self.inner.move_control_point(id, p) {
            error::ok(JsValue::TRUE)
        } else {
            error::err("invalid_segment", "segment rejected the control point move", None)
        }
    }
    /// `updates` is an array of `{id, point: {x, y}}`.
    pub fn move_control_points(&mut self, updates: JsValue) -> bool {
        match interop::from_js::<Vec<ControlPointUpdate>>(updates) {
            Ok(updates) => self.inner.move_control_points(&updates),
            Err(_) => false,
        }
    }
    pub fn move_control_points_res(&mut self, updates: JsValue) -> JsValue {
        let updates: Vec<ControlPointUpdate> = match interop::from_js(updates) {
            Ok(u) => u,
            Err(m) => return error::invalid_json(m),
        };
        for u in &updates {
            if !u.point.x.is_finite() || !u.point.y.is_finite() {
                return error::non_finite("point");
            }
        }
        if self.inner.move_control_points(&updates) {
            error::ok(JsValue::TRUE)
        } else {
            error::err("invalid_segment", "segment rejected the batch move", None)
        }
    }
    pub fn set_start_point(&mut self, x: f64, y: f64) -> bool {
        self.inner.set_start_point(Point::new(x, y)).is_ok()
    }
    pub fn set_start_point_res(&mut self, x: f64, y: f64) -> JsValue {
        let p = match finite_point(x, y) {
            Ok(p) => p,
            Err(e) => return e,
        };
        match self.inner.set_start_point(p) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::path_error(&e),
        }
    }
    pub fn set_end_point(&mut self, x: f64, y: f64) -> bool {
        self.inner.set_end_point(Point::new(x, y)).is_ok()
    }
    pub fn set_end_point_res(&mut self, x: f64, y: f64) -> JsValue {
        let p = match finite_point(x, y) {
            Ok(p) => p,
            Err(e) => return e,
        };
        match self.inner.set_end_point(p) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::path_error(&e),
        }
    }
    /// Append a segment given as `{"type": .., "data": {..}}` JSON.
    pub fn add_segment_json(&mut self, json: &str) -> bool {
        matches!(self.add_segment_inner(json), Ok(()))
    }
    pub fn add_segment_json_res(&mut self, json: &str) -> JsValue {
        match self.add_segment_inner(json) {
            Ok(()) => error::ok(JsValue::from_f64(self.inner.path().len() as f64)),
            Err(m) => error::err("invalid_segment", m, None),
        }
    }
    pub fn remove_segment(&mut self, index: u32) -> bool {
        self.inner.remove_segment(index as usize)
    }
    pub fn remove_segment_res(&mut self, index: u32) -> JsValue {
        let len = self.inner.path().len();
        if index as usize >= len {
            return error::out_of_range("index", 0.0, len as f64 - 1.0, index as f64);
        }
        error::ok(JsValue::from_bool(self.inner.remove_segment(index as usize)))
    }
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    // Config
    pub fn config(&self) -> JsValue {
        interop::to_js(self.inner.config())
    }
    /// Merge a partial config object over the current one.
    pub fn update_config_res(&mut self, patch: JsValue) -> JsValue {
        let patch: serde_json::Value = match interop::from_js(patch) {
            Ok(v) => v,
            Err(m) => return error::invalid_json(m),
        };
        if !patch.is_object() {
            return error::invalid_json("config patch must be an object");
        }
        match self.inner.update_config(&patch) {
            Ok(()) => error::ok(interop::to_js(self.inner.config())),
            Err(e) => error::path_error(&e),
        }
    }
    pub fn reset_config(&mut self) {
        self.inner.set_config(ControlPointConfig::default());
    }

    // Callbacks
    /// Register `(id, {x, y}) => void`, called after every successful move.
    pub fn add_move_callback(&mut self, f: js_sys::Function) -> u32 {
        let core_id = self.inner.add_move_callback(interop::js_move_callback(f));
        let handle = self.next_callback;
        self.next_callback += 1;
        self.callbacks.push((handle, core_id));
        handle
    }
    pub fn remove_move_callback(&mut self, handle: u32) -> bool {
        let Some(pos) = self.callbacks.iter().position(|(h, _)| *h == handle) else {
            return false;
        };
        let (_, core_id) = self.callbacks.remove(pos);
        self.inner.remove_move_callback(core_id)
    }
}

impl PathEditor {
    fn add_segment_inner(&mut self, json: &str) -> Result<(), String> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let segment = Segment::from_json(&value).map_err(|e| e.to_string())?;
        self.inner.add_segment(segment);
        Ok(())
    }
}

impl Default for PathEditor {
    fn default() -> Self {
        Self::new()
    }
}

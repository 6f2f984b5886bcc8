use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

/// Browser handle on one editable path and its control points.
#[wasm_bindgen]
pub struct PathEditor {
    pub(crate) inner: path_utility::ControlPointManager,
    // JS-facing callback handles
    pub(crate) callbacks: Vec<(u32, path_utility::CallbackId)>,
    pub(crate) next_callback: u32,
}

impl PathEditor {
    pub fn rs_new(path: path_utility::Path) -> PathEditor {
        PathEditor {
            inner: path_utility::ControlPointManager::new(path),
            callbacks: Vec::new(),
            next_callback: 1,
        }
    }

    pub fn rs_path(&self) -> &path_utility::Path {
        self.inner.path()
    }
}

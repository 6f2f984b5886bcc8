use js_sys::{Float64Array, Function, Object, Reflect};
use path_utility::{CallbackError, MoveCallback, Point};
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::prelude::*;

pub fn new_obj() -> Object { Object::new() }

pub fn set_kv(obj: &Object, key: &str, val: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), val);
}

pub fn arr_f64(data: &[f64]) -> Float64Array { Float64Array::from(data) }

/// Plain JS object/array for `value`, `null` if it cannot be represented.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

pub fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, String> {
    serde_wasm_bindgen::from_value(value).map_err(|e| e.to_string())
}

pub fn point_js(p: Point) -> JsValue {
    let o = new_obj();
    set_kv(&o, "x", &JsValue::from_f64(p.x));
    set_kv(&o, "y", &JsValue::from_f64(p.y));
    o.into()
}

/// `[x0, y0, x1, y1, ...]`
pub fn points_flat(points: &[Point]) -> Float64Array {
    let flat: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    arr_f64(&flat)
}

/// Wrap a JS function `(id, {x, y}) => void` as a move callback. A throw is
/// reported to the console and handed back to the manager as an error.
pub fn js_move_callback(f: Function) -> MoveCallback {
    Box::new(move |id: &str, point: Point| {
        match f.call2(&JsValue::NULL, &JsValue::from_str(id), &point_js(point)) {
            Ok(_) => Ok(()),
            Err(e) => {
                web_sys::console::error_2(&JsValue::from_str("path editor move callback threw:"), &e);
                Err(CallbackError::new(e.as_string().unwrap_or_else(|| "JS exception".to_string())))
            }
        }
    })
}

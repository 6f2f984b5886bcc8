//! Persisted document format: `{"segments":[{"type":..,"data":{..}}],"id"?:n}`.
//! Saved shows depend on these field names, keep them stable.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PathError, Result};
use crate::geometry::limits::MAX_JSON_SEGMENTS;
use crate::model::Point;
use crate::segment::Segment;
use crate::segments::arc::EllipticalArc;
use crate::segments::spline::{Spline, DEFAULT_DEGREE, DEFAULT_TENSION};

/// Arc flags: written as 0/1, read from 0/1 or booleans.
pub(crate) mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Flag {
            Bool(bool),
            Num(f64),
        }
        Ok(match Flag::deserialize(d)? {
            Flag::Bool(b) => b,
            Flag::Num(n) => n != 0.0,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EndpointArcData {
    start_point: Point,
    rx: f64,
    ry: f64,
    #[serde(default)]
    x_axis_rotation: f64,
    #[serde(default, deserialize_with = "flag::deserialize")]
    large_arc_flag: bool,
    #[serde(default, deserialize_with = "flag::deserialize")]
    sweep_flag: bool,
    end_point: Point,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CenterArcData {
    center: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    #[serde(default)]
    clockwise: bool,
}

/// Both arc shapes found in saved data.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ArcData {
    Endpoint(EndpointArcData),
    Center(CenterArcData),
}

impl From<ArcData> for EllipticalArc {
    fn from(data: ArcData) -> Self {
        match data {
            ArcData::Endpoint(a) => EllipticalArc::new(
                a.start_point,
                a.rx,
                a.ry,
                a.x_axis_rotation,
                a.large_arc_flag,
                a.sweep_flag,
                a.end_point,
            ),
            ArcData::Center(c) => {
                EllipticalArc::from_center(c.center, c.radius, c.start_angle, c.end_angle, c.clockwise)
            }
        }
    }
}

fn default_degree() -> usize {
    DEFAULT_DEGREE
}

fn default_tension() -> f64 {
    DEFAULT_TENSION
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SplineData {
    control_points: Vec<Point>,
    #[serde(default = "default_degree")]
    degree: usize,
    #[serde(default)]
    knots: Option<Vec<f64>>,
    #[serde(default)]
    weights: Option<Vec<f64>>,
    #[serde(default)]
    closed: bool,
    #[serde(default = "default_tension")]
    tension: f64,
}

impl TryFrom<SplineData> for Spline {
    type Error = PathError;

    fn try_from(d: SplineData) -> Result<Self> {
        Spline::new(d.control_points, d.degree, d.knots, d.weights, d.closed, d.tension)
    }
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    segments: Vec<&'a Segment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u32>,
}

pub(crate) fn write_document(segments: &[Arc<Segment>], id: Option<u32>) -> Value {
    let doc = DocumentRef { segments: segments.iter().map(|s| s.as_ref()).collect(), id };
    // Every field is a plain number, bool, string or array
    serde_json::to_value(doc).unwrap_or(Value::Null)
}

/// Parsed segments and the document id, if any.
pub(crate) fn read_document(json: &str) -> Result<(Vec<Segment>, Option<u32>)> {
    let value: Value = serde_json::from_str(json)?;
    let raw = value
        .get("segments")
        .and_then(Value::as_array)
        .ok_or(PathError::MissingSegments)?;
    if raw.len() > MAX_JSON_SEGMENTS {
        return Err(PathError::LimitExceeded { what: "path segments", limit: MAX_JSON_SEGMENTS });
    }
    let segments = raw
        .iter()
        .map(|s| Segment::deserialize(s).map_err(PathError::from))
        .collect::<Result<Vec<_>>>()?;
    let id = value
        .get("id")
        .and_then(Value::as_u64)
        .and_then(|id| u32::try_from(id).ok());
    Ok((segments, id))
}

use crate::model::ControlPointType;

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("path has no segments")]
    EmptyPath,
    #[error("spline must have at least 2 control points, got {got}")]
    TooFewSplinePoints { got: usize },
    #[error("{segment} segments do not support control point type: {kind}")]
    UnsupportedControlPoint {
        segment: &'static str,
        kind: ControlPointType,
    },
    #[error("invalid point index {index:?} for {segment} with {len} control points")]
    InvalidPointIndex {
        segment: &'static str,
        index: Option<usize>,
        len: usize,
    },
    #[error("{what} exceeds the limit of {limit}")]
    LimitExceeded { what: &'static str, limit: usize },
    #[error("invalid path JSON: missing or invalid segments array")]
    MissingSegments,
    #[error("failed to parse path JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PathError>;

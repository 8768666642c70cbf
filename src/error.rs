use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while setting a sketch up.
///
/// Nothing in here is produced by the per-frame loop: once a sketch is
/// running it only ever draws.
#[derive(Debug, Error)]
pub enum Error {
    #[error("state sequence is empty")]
    EmptySequence,
    #[error("element count must be non-zero")]
    ZeroCount,
    #[error("{what}: expected {expected} values, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("tween of {seconds}s at {fps} fps has no frames")]
    ZeroFrames { fps: f64, seconds: f64 },
    #[error("grid of {cols}x{rows} cells has no points")]
    EmptyGrid { cols: u32, rows: u32 },
    #[error("{what} must be positive and finite, got {value}")]
    InvalidDimension { what: &'static str, value: f32 },
    #[error("{axis} cells span {span}, wider than the canvas ({extent})")]
    GridOverflow {
        axis: &'static str,
        span: f32,
        extent: f32,
    },
    #[error("palette has no colors")]
    EmptyPalette,
    #[error("scale range [{min}, {max}] is empty")]
    InvalidScaleRange { min: f32, max: f32 },
    #[error("WebGL2 not supported")]
    ContextUnavailable,
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: &'static str, log: String },
    #[error("program failed to link: {0}")]
    ProgramLink(String),
    #[error("program has no active attribute `{0}`")]
    MissingAttribute(&'static str),
    #[error("program has no active uniform `{0}`")]
    MissingUniform(&'static str),
    #[error("failed to create {0}")]
    ResourceCreation(&'static str),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<strum::ParseError> for Error {
    fn from(err: strum::ParseError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<Error> for wasm_bindgen::JsValue {
    fn from(err: Error) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

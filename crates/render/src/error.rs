use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid render config: {0}")]
    InvalidConfig(&'static str),
    #[error("invalid shading config: {0}")]
    InvalidShading(&'static str),
    #[error("unknown supersampling level '{0}' (expected off, 1, 2, 4 or 8)")]
    UnknownSsaa(String),
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

use thiserror::Error;

/// Any failure while turning a request into an image.
///
/// Rendering is all-or-nothing: a caller that gets this error never gets
/// partial image bytes.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("failed to parse generated svg: {0}")]
    Svg(#[from] usvg::Error),
    #[error("failed to allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },
    #[error("failed to encode png: {0}")]
    Encode(String),
    #[error("render worker failed: {0}")]
    Worker(String),
}

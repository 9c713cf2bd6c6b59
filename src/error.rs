use thiserror::Error;

pub type Result<T> = std::result::Result<T, TabulaError>;

#[derive(Debug, Error)]
pub enum TabulaError {
    /// The host environment could not allocate a drawing surface.
    #[error("failed to allocate a {width}x{height} drawing surface: {reason}")]
    SurfaceAllocation {
        width: u32,
        height: u32,
        reason: String,
    },

    /// An error reported by the rendering backend.
    #[error("backend error")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(feature = "cairo")]
impl From<cairo::Error> for TabulaError {
    fn from(err: cairo::Error) -> Self {
        TabulaError::Backend(Box::new(err))
    }
}

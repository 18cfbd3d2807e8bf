use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reason a frame couldn't be rendered.
///
/// None of these are retried - the frame is skipped, the sample counter stays
/// where it was and the surface stays allocated, so the next frame can simply
/// try again.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("render() called without set_parameters() for this frame")]
    ParametersNotSet,

    #[error("kernel dispatch failed")]
    KernelDispatchFailed(#[source] BackendError),

    #[error("composite failed")]
    CompositeFailed(#[source] BackendError),
}

/// Device-level failure reported by a [`crate::Backend`].
#[derive(Debug, Error)]
#[error("{0}")]
pub struct BackendError(pub String);

impl BackendError {
    pub fn new(msg: impl ToString) -> Self {
        Self(msg.to_string())
    }
}

impl From<wgpu::Error> for BackendError {
    fn from(err: wgpu::Error) -> Self {
        Self::new(err)
    }
}

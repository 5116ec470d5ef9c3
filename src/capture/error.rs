use thiserror::Error;

/// Failures of the screen region capturer.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Input shape or type was not recognised.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// More than two capture arguments were supplied.
    #[error("too many arguments: expected at most 2, got {0}")]
    TooManyArguments(usize),

    /// Reading a region's position failed. Surfaced unchanged, after the
    /// region's measurement unit has been restored.
    #[error(transparent)]
    PositionQuery(anyhow::Error),

    #[error("failed to query display layout: {0:#}")]
    Layout(anyhow::Error),

    /// The toolkit reported no monitors, so `max_height` is undefined.
    #[error("no displays connected")]
    NoDisplays,

    /// Bringing the owning window forward or flushing its redraw failed.
    #[error("failed to raise window: {0:#}")]
    Raise(anyhow::Error),

    /// The platform capture facility failed.
    #[error("screen capture failed: {0:#}")]
    Grab(anyhow::Error),
}

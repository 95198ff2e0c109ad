use thiserror::Error;

/// Per-frame failures raised by the capture engine.
///
/// Errors travel on the event channel, so the type is `Clone` and carries
/// only owned strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid frame geometry: effective size {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },
    #[error("unsupported frame rotation: {0} degrees")]
    InvalidRotation(u32),
    #[error("cannot run face detection: the engine is not attached")]
    EngineNotReady,
    #[error("face detection failed: {0}")]
    DetectionFailure(String),
    #[error("invalid liveness configuration: {0}")]
    InvalidConfig(String),
}

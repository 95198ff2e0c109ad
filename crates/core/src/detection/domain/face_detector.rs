use crate::detection::domain::detected_face::DetectedFace;
use crate::shared::frame::Frame;

/// Error returned by a detection backend. Boxed so any inference library's
/// error type fits, and `Send` so it can leave the worker thread.
pub type DetectError = Box<dyn std::error::Error + Send + Sync>;

/// Domain interface for face detection.
///
/// Implementations may be stateful (e.g., tracking ids across frames),
/// hence `&mut self`. The call may block; it always runs on the detection
/// worker thread.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<DetectedFace>, DetectError>;
}

use crate::shared::frame::Frame;

/// What happened to a submitted frame. Informational only: failures are
/// reported on the event channel, never to the submitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Handed to the detection worker.
    Accepted,
    /// A detection was already in flight; the frame was discarded.
    Dropped,
    /// The engine could not take the frame; an error event was emitted.
    Rejected,
}

/// Entry point for camera frames.
///
/// This is a port (application-layer interface). Infrastructure decides
/// how detection and post-processing are scheduled.
pub trait DetectionCoordinator: Send + Sync {
    /// Feeds one frame. Never blocks on detection.
    fn submit(&self, frame: Frame) -> Submission;
}

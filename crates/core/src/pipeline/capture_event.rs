use crate::detection::domain::detected_face::FaceBounds;
use crate::liveness::domain::liveness_tracker::Advisory;
use crate::shared::error::EngineError;
use crate::shared::geometry::Rect;

/// Everything the engine reports to its consumer, in frame order.
#[derive(Clone, Debug, PartialEq)]
pub enum CaptureEvent {
    /// Overlay-space bounds of every face in a successfully detected frame.
    /// Always the last event emitted for that frame.
    FacesUpdated(Vec<FaceBounds>),
    /// Containment changed: `true` once a face sits inside the outline.
    OutlineShown(bool),
    Advisory {
        tracking_id: i32,
        kind: Advisory,
    },
    /// Liveness confirmed; take the picture. `frame_box` is the detector's
    /// box in frame space, `overlay_box` the same face in overlay space.
    Capture {
        tracking_id: i32,
        frame_box: Rect,
        overlay_box: Rect,
    },
    Error(EngineError),
}

impl CaptureEvent {
    /// True for the events that close out one submitted frame.
    pub fn ends_frame(&self) -> bool {
        matches!(self, CaptureEvent::FacesUpdated(_) | CaptureEvent::Error(_))
    }
}

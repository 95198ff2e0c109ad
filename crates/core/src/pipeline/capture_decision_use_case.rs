use crate::detection::domain::detected_face::{DetectedFace, FaceBounds};
use crate::detection::domain::face_transformer::to_face_bounds;
use crate::liveness::domain::liveness_config::LivenessConfig;
use crate::liveness::domain::liveness_tracker::LivenessTracker;
use crate::outline::domain::containment_gate::{any_contained, is_contained};
use crate::outline::domain::outline_region::OutlineRegion;
use crate::pipeline::capture_event::CaptureEvent;
use crate::shared::frame::FrameGeometry;
use crate::shared::geometry::Rect;

/// Per-batch decision pipeline: transform → gate → track → events.
///
/// Owns all liveness state, so it must only ever be driven from one
/// thread at a time.
pub struct CaptureDecisionUseCase {
    outline: Box<dyn OutlineRegion>,
    tracker: LivenessTracker,
    outline_shown: bool,
    last_contained: usize,
}

impl CaptureDecisionUseCase {
    pub fn new(outline: Box<dyn OutlineRegion>, config: LivenessConfig) -> Self {
        Self {
            outline,
            tracker: LivenessTracker::new(config),
            outline_shown: false,
            last_contained: 0,
        }
    }

    /// Processes one detected batch and returns its events in emission order.
    ///
    /// Faces whose geometry cannot be mapped are logged and skipped; the
    /// rest of the batch is still processed.
    pub fn execute(&mut self, geometry: &FrameGeometry, faces: &[DetectedFace]) -> Vec<CaptureEvent> {
        let overlay = self.outline.size();
        let mut events = Vec::new();
        let mut bounds: Vec<FaceBounds> = Vec::with_capacity(faces.len());
        let mut contained: Vec<(&DetectedFace, Rect)> = Vec::new();

        for face in faces {
            match to_face_bounds(face, geometry, overlay) {
                Ok(face_bounds) => {
                    if is_contained(&face_bounds.bounds, self.outline.as_ref()) {
                        contained.push((face, face_bounds.bounds));
                    }
                    bounds.push(face_bounds);
                }
                Err(e) => log::warn!("Skipping face {:?}: {e}", face.tracking_id),
            }
        }

        self.last_contained = contained.len();
        let shown = any_contained(&bounds, self.outline.as_ref());
        if shown != self.outline_shown {
            self.outline_shown = shown;
            events.push(CaptureEvent::OutlineShown(shown));
        }

        if !shown {
            if let Some(id) = self.tracker.active_id() {
                log::debug!("Face {id} left the outline, resetting liveness state");
            }
            self.tracker.reset();
        }

        for (face, overlay_box) in contained {
            let observation = self.tracker.observe(face);
            let Some(tracking_id) = face.tracking_id else {
                continue;
            };
            events.extend(
                observation
                    .advisories
                    .into_iter()
                    .map(|kind| CaptureEvent::Advisory { tracking_id, kind }),
            );
            if observation.blink_confirmed {
                log::info!("Capture triggered for face {tracking_id}");
                events.push(CaptureEvent::Capture {
                    tracking_id,
                    frame_box: face.bounding_box,
                    overlay_box,
                });
            }
        }

        events.push(CaptureEvent::FacesUpdated(bounds));
        events
    }

    pub fn tracker(&self) -> &LivenessTracker {
        &self.tracker
    }

    /// Number of faces inside the outline in the last processed batch.
    pub fn contained_count(&self) -> usize {
        self.last_contained
    }
}

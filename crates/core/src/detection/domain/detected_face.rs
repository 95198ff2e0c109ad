use serde::{Deserialize, Serialize};

use crate::shared::geometry::Rect;

/// One face reported by the detector for a single frame, in frame space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedFace {
    /// Stable across frames for the same physical face; `None` if untracked.
    #[serde(default)]
    pub tracking_id: Option<i32>,
    pub bounding_box: Rect,
    #[serde(default)]
    pub left_eye_open_probability: Option<f32>,
    #[serde(default)]
    pub right_eye_open_probability: Option<f32>,
    #[serde(default)]
    pub smiling_probability: Option<f32>,
}

impl DetectedFace {
    pub fn new(tracking_id: Option<i32>, bounding_box: Rect) -> Self {
        Self {
            tracking_id,
            bounding_box,
            left_eye_open_probability: None,
            right_eye_open_probability: None,
            smiling_probability: None,
        }
    }

    pub fn with_eyes(mut self, left: f32, right: f32) -> Self {
        self.left_eye_open_probability = Some(left);
        self.right_eye_open_probability = Some(right);
        self
    }

    pub fn with_smile(mut self, probability: f32) -> Self {
        self.smiling_probability = Some(probability);
        self
    }
}

/// A face's bounds after mapping into overlay space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceBounds {
    pub tracking_id: Option<i32>,
    pub bounds: Rect,
}

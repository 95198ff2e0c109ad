use crate::detection::domain::detected_face::DetectedFace;
use crate::shared::constants::{EYE_CLOSED_SYMBOL, EYE_OPEN_SYMBOL};

use super::liveness_config::LivenessConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EyeState {
    Open,
    Closed,
}

impl EyeState {
    pub fn symbol(self) -> char {
        match self {
            EyeState::Open => EYE_OPEN_SYMBOL,
            EyeState::Closed => EYE_CLOSED_SYMBOL,
        }
    }
}

/// Result of latching one frame's eye probabilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EyeReading {
    pub state: EyeState,
    /// Both eyes confidently open (not just assumed open).
    pub confidently_open: bool,
    /// At least one eye is between the closed and open thresholds.
    pub closing: bool,
}

/// Latches a face's eye probabilities into a single symbol.
///
/// Both eyes must agree for a confident reading. Anything else, including
/// missing probabilities, is recorded as open.
pub fn read_eyes(face: &DetectedFace, config: &LivenessConfig) -> EyeReading {
    let (Some(left), Some(right)) = (
        face.left_eye_open_probability,
        face.right_eye_open_probability,
    ) else {
        return EyeReading {
            state: EyeState::Open,
            confidently_open: false,
            closing: false,
        };
    };

    let open = |p: f32| p >= config.eye_open_threshold;
    let closed = |p: f32| p <= config.eye_closed_threshold;

    if closed(left) && closed(right) {
        return EyeReading {
            state: EyeState::Closed,
            confidently_open: false,
            closing: false,
        };
    }

    let in_between = |p: f32| p > config.eye_closed_threshold && p < config.eye_open_threshold;
    EyeReading {
        state: EyeState::Open,
        confidently_open: open(left) && open(right),
        closing: in_between(left) || in_between(right),
    }
}

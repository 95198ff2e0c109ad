use crate::detection::domain::detected_face::DetectedFace;

use super::blink_pattern::BlinkPattern;
use super::eye_state::read_eyes;
use super::liveness_config::LivenessConfig;

/// User-facing prompts raised while a face is being tracked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advisory {
    /// An eye is half closed: the blink is too fast to register.
    BlinkSlowly,
    /// First sighting of a face: ask for a smile.
    Smile,
    /// Face seen again without a smile.
    NotSmiling,
    /// Smile registered; ask for the blink next.
    BlinkNow,
}

/// Rolling state for the face currently engaged with the outline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LivenessState {
    /// One symbol per observed frame, `'1'` open and `'0'` closed.
    pub eye_history: String,
    pub smiled: bool,
}

/// What a single observation of a face produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Observation {
    pub advisories: Vec<Advisory>,
    pub blink_confirmed: bool,
}

/// Tracks the eye-state history of the most recently engaged face and
/// confirms liveness when a blink shows up in it.
///
/// Only one face is tracked at a time: a new tracking id discards whatever
/// was recorded for the previous one. The history keeps only the most
/// recent samples a blink or the minimum length can span, so a blink that
/// has scrolled out of that window no longer counts.
pub struct LivenessTracker {
    config: LivenessConfig,
    pattern: BlinkPattern,
    window: usize,
    active: Option<(i32, LivenessState)>,
}

impl LivenessTracker {
    pub fn new(config: LivenessConfig) -> Self {
        let pattern = BlinkPattern::new(config.max_closed_run);
        let window = pattern.longest().max(config.min_history_len);
        Self {
            config,
            pattern,
            window,
            active: None,
        }
    }

    /// Records one frame of a face that is inside the outline.
    pub fn observe(&mut self, face: &DetectedFace) -> Observation {
        let mut observation = Observation::default();
        let Some(id) = face.tracking_id else {
            log::debug!("Skipping untracked face");
            return observation;
        };

        let reading = read_eyes(face, &self.config);
        if reading.closing {
            observation.advisories.push(Advisory::BlinkSlowly);
        }

        let is_new = self
            .active
            .as_ref()
            .map_or(true, |(active_id, _)| *active_id != id);
        if is_new {
            if let Some((previous, _)) = self.active.take() {
                log::debug!("Tracking switched from face {previous} to face {id}");
            }
        }
        let (_, state) = self
            .active
            .get_or_insert_with(|| (id, LivenessState::default()));

        if self.config.smile_prompts {
            let smiling = face
                .smiling_probability
                .is_some_and(|p| p >= self.config.smile_threshold);
            if is_new {
                observation.advisories.push(Advisory::Smile);
            } else if smiling {
                state.smiled = true;
                observation.advisories.push(Advisory::BlinkNow);
            } else {
                observation.advisories.push(Advisory::NotSmiling);
            }
        }

        state.eye_history.push(reading.state.symbol());
        if state.eye_history.len() > self.window {
            let excess = state.eye_history.len() - self.window;
            state.eye_history.drain(..excess);
        }
        log::debug!("Face {id} eye history: {}", state.eye_history);

        let eyes_ok = reading.confidently_open || !self.config.require_open_eyes_at_capture;
        if state.eye_history.len() >= self.config.min_history_len
            && eyes_ok
            && self.pattern.matches(&state.eye_history)
        {
            log::info!("Blink confirmed for face {id}");
            observation.blink_confirmed = true;
            self.reset();
        }

        observation
    }

    /// Forgets every tracked face.
    pub fn reset(&mut self) {
        self.active = None;
    }

    pub fn active_id(&self) -> Option<i32> {
        self.active.as_ref().map(|(id, _)| *id)
    }

    pub fn state(&self, id: i32) -> Option<&LivenessState> {
        match &self.active {
            Some((active_id, state)) if *active_id == id => Some(state),
            _ => None,
        }
    }

    pub fn history(&self, id: i32) -> Option<&str> {
        self.state(id).map(|s| s.eye_history.as_str())
    }
}

use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    CLOSED_RUN_LIMIT, EYE_CLOSED_THRESHOLD, EYE_OPEN_THRESHOLD, HISTORY_LEN_LIMIT, MAX_CLOSED_RUN,
    MIN_BLINK_HISTORY, SMILE_THRESHOLD,
};
use crate::shared::error::EngineError;

/// Tunables for the liveness tracker. Missing fields in a settings file
/// fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivenessConfig {
    pub eye_open_threshold: f32,
    pub eye_closed_threshold: f32,
    pub smile_threshold: f32,
    pub min_history_len: usize,
    pub max_closed_run: usize,
    /// Only fire a capture when the eyes in the matching frame are
    /// confidently open, not just assumed open.
    pub require_open_eyes_at_capture: bool,
    pub smile_prompts: bool,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            eye_open_threshold: EYE_OPEN_THRESHOLD,
            eye_closed_threshold: EYE_CLOSED_THRESHOLD,
            smile_threshold: SMILE_THRESHOLD,
            min_history_len: MIN_BLINK_HISTORY,
            max_closed_run: MAX_CLOSED_RUN,
            require_open_eyes_at_capture: true,
            smile_prompts: true,
        }
    }
}

impl LivenessConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        let unit = 0.0..=1.0;
        if !unit.contains(&self.eye_closed_threshold) || !unit.contains(&self.eye_open_threshold) {
            return Err(EngineError::InvalidConfig(
                "eye thresholds must lie in [0, 1]".into(),
            ));
        }
        if self.eye_closed_threshold >= self.eye_open_threshold {
            return Err(EngineError::InvalidConfig(format!(
                "eye_closed_threshold ({}) must be below eye_open_threshold ({})",
                self.eye_closed_threshold, self.eye_open_threshold
            )));
        }
        if !unit.contains(&self.smile_threshold) {
            return Err(EngineError::InvalidConfig(
                "smile_threshold must lie in [0, 1]".into(),
            ));
        }
        if !(1..=CLOSED_RUN_LIMIT).contains(&self.max_closed_run) {
            return Err(EngineError::InvalidConfig(format!(
                "max_closed_run ({}) must lie in [1, {CLOSED_RUN_LIMIT}]",
                self.max_closed_run
            )));
        }
        if self.min_history_len > HISTORY_LEN_LIMIT {
            return Err(EngineError::InvalidConfig(format!(
                "min_history_len ({}) must not exceed {HISTORY_LEN_LIMIT}",
                self.min_history_len
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let c = LivenessConfig::default();
        assert_relative_eq!(c.eye_open_threshold, 0.6);
        assert_relative_eq!(c.eye_closed_threshold, 0.1);
        assert_relative_eq!(c.smile_threshold, 0.7);
        assert_eq!(c.min_history_len, 6);
        assert_eq!(c.max_closed_run, 3);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let c: LivenessConfig = serde_json::from_str(r#"{"max_closed_run": 2}"#).unwrap();
        assert_eq!(c.max_closed_run, 2);
        assert_relative_eq!(c.eye_open_threshold, 0.6);
        assert!(c.smile_prompts);
    }

    #[test]
    fn test_rejects_inverted_eye_thresholds() {
        let c = LivenessConfig {
            eye_closed_threshold: 0.7,
            ..LivenessConfig::default()
        };
        assert!(matches!(c.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let c = LivenessConfig {
            smile_threshold: 1.5,
            ..LivenessConfig::default()
        };
        assert!(c.validate().is_err());

    }

    #[rstest]
    #[case::zero(0, true)]
    #[case::one(1, false)]
    #[case::at_limit(CLOSED_RUN_LIMIT, false)]
    #[case::above_limit(CLOSED_RUN_LIMIT + 1, true)]
    #[case::huge(1usize << 40, true)]
    fn test_max_closed_run_bounds(#[case] max_closed_run: usize, #[case] rejected: bool) {
        let c = LivenessConfig {
            max_closed_run,
            ..LivenessConfig::default()
        };
        assert_eq!(
            matches!(c.validate(), Err(EngineError::InvalidConfig(_))),
            rejected
        );
    }

    #[test]
    fn test_rejects_oversized_min_history() {
        let c = LivenessConfig {
            min_history_len: HISTORY_LEN_LIMIT + 1,
            ..LivenessConfig::default()
        };
        assert!(c.validate().is_err());
    }
}

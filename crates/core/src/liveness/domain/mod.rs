pub mod blink_pattern;
pub mod eye_state;
pub mod liveness_config;
pub mod liveness_tracker;

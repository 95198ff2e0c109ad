//! Liveness-gated face capture decision engine.
//!
//! Detected faces are mapped into overlay space, gated against an on-screen
//! outline, and tracked until a blink confirms a live subject, at which
//! point a capture event is emitted.

pub mod detection;
pub mod liveness;
pub mod outline;
pub mod pipeline;
pub mod shared;

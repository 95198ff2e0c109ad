/// Both eyes at or above this open probability count as open.
pub const EYE_OPEN_THRESHOLD: f32 = 0.6;

/// Both eyes at or below this open probability count as closed.
pub const EYE_CLOSED_THRESHOLD: f32 = 0.1;

pub const SMILE_THRESHOLD: f32 = 0.7;

/// Blink matching starts once the eye history holds this many samples.
pub const MIN_BLINK_HISTORY: usize = 6;

/// Longest run of closed samples accepted as a blink (longer runs look
/// like closed eyes, not a blink).
pub const MAX_CLOSED_RUN: usize = 3;

/// Upper bounds accepted for the configurable closed run and minimum
/// history length.
pub const CLOSED_RUN_LIMIT: usize = 16;
pub const HISTORY_LEN_LIMIT: usize = 64;

/// Open samples required before and after the closed run.
pub const BLINK_LEAD_OPEN: usize = 2;
pub const BLINK_TRAIL_OPEN: usize = 4;

pub const EYE_OPEN_SYMBOL: char = '1';
pub const EYE_CLOSED_SYMBOL: char = '0';

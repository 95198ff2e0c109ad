use crate::shared::constants::{
    BLINK_LEAD_OPEN, BLINK_TRAIL_OPEN, CLOSED_RUN_LIMIT, EYE_CLOSED_SYMBOL, EYE_OPEN_SYMBOL,
};

/// Recognizes a blink in an eye-state history: two open samples, a short
/// run of closed samples, then four open samples.
pub struct BlinkPattern {
    patterns: Vec<String>,
}

impl BlinkPattern {
    /// `max_closed_run` bounds the closed run; longer runs do not count.
    /// Values above `CLOSED_RUN_LIMIT` are clamped.
    pub fn new(max_closed_run: usize) -> Self {
        let max_closed_run = max_closed_run.min(CLOSED_RUN_LIMIT);
        let lead: String = std::iter::repeat(EYE_OPEN_SYMBOL)
            .take(BLINK_LEAD_OPEN)
            .collect();
        let trail: String = std::iter::repeat(EYE_OPEN_SYMBOL)
            .take(BLINK_TRAIL_OPEN)
            .collect();
        let patterns = (1..=max_closed_run)
            .rev()
            .map(|k| {
                let closed: String = std::iter::repeat(EYE_CLOSED_SYMBOL).take(k).collect();
                format!("{lead}{closed}{trail}")
            })
            .collect();
        Self { patterns }
    }

    pub fn matches(&self, history: &str) -> bool {
        self.patterns.iter().any(|p| history.contains(p.as_str()))
    }

    /// Length of the longest pattern, i.e. the most history a match can span.
    pub fn longest(&self) -> usize {
        self.patterns.iter().map(String::len).max().unwrap_or(0)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

//! Playback time sources.
//!
//! Stand-in for the player's current-time display: the trigger asks a
//! `TimestampSource` for the moment to mark.

pub trait TimestampSource: Send + Sync {
    /// Current playback time as a display string, or None when unknown.
    fn current(&self) -> Option<String>;
}

/// Fixed, operator-supplied timestamp.
pub struct FixedTimestamp {
    display: String,
}

impl FixedTimestamp {
    pub fn new(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
        }
    }
}

impl TimestampSource for FixedTimestamp {
    fn current(&self) -> Option<String> {
        Some(self.display.trim().to_string())
    }
}

/// Source with no player attached; the trigger falls back to its default.
pub struct NoTimestamp;

impl TimestampSource for NoTimestamp {
    fn current(&self) -> Option<String> {
        None
    }
}

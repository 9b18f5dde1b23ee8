//! Operator confirmation.
//!
//! The reaction task calls the confirmer through `spawn_blocking`, so
//! implementations may block (interactive prompts included).

pub trait Confirmer: Send + Sync {
    /// True to proceed with the marker, false to silently drop it.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Accepts every prompt (non-interactive runs).
pub struct AcceptAll;

impl Confirmer for AcceptAll {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Declines every prompt.
pub struct DeclineAll;

impl Confirmer for DeclineAll {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

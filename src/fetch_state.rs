//! Shared state of the sweep polling loop
//!
//! Owned by the scene, displayed by the info overlay.

/// Outcome of the most recent update cycle
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FetchState {
    /// No update cycle has completed yet
    #[default]
    Waiting,
    /// Last fetch succeeded
    Live,
    /// Last fetch failed; the display still shows the previous sweep
    Failed(String),
}

impl FetchState {
    pub fn is_live(&self) -> bool {
        matches!(self, FetchState::Live)
    }
}

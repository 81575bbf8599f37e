/// Vertical drag distance past which releasing the full player minimizes it.
pub const DISMISS_THRESHOLD: f64 = 150.0;

/// Result of releasing a drag on the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Dragged far enough: the player minimized.
    Minimized,
    /// Not far enough: the player snaps back to its resting position.
    SnapBack,
    /// The player was not draggable in its current mode.
    Ignored,
}

impl DragOutcome {
    /// Classify a release at `offset` (downward positive).
    pub fn for_offset(offset: f64) -> Self {
        if offset > DISMISS_THRESHOLD {
            Self::Minimized
        } else {
            Self::SnapBack
        }
    }
}

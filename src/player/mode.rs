/// Which layout the player renders in. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMode {
    /// Overlay covering the feed: video, scrubber, transport, "Up Next".
    Full,
    /// Slim bar docked under the feed.
    Minimized,
    /// Video surface with header/footer overlays.
    Fullscreen,
}

impl PlayerMode {
    /// Minimized always wins, so fullscreen chrome never shows in the mini bar.
    pub fn from_flags(minimized: bool, fullscreen: bool) -> Self {
        match (minimized, fullscreen) {
            (true, _) => Self::Minimized,
            (false, true) => Self::Fullscreen,
            (false, false) => Self::Full,
        }
    }

    /// True when the player covers the feed.
    pub fn hides_feed(self) -> bool {
        !matches!(self, Self::Minimized)
    }
}

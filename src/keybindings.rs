//! Keybinding registry: maps actions to key events with config overrides.
//!
//! Bindings are looked up per `Context`. A context that has no binding for a
//! key defers to its parent, ending at `Global`.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    ShowHelp,
    CycleTheme,
    NavDown,
    NavUp,
    NextCategory,
    PrevCategory,
    Select,
    TogglePlay,
    SkipForward,
    SkipBack,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    ToggleFullscreen,
    Minimize,
    RestorePlayer,
    ClosePlayer,
    OpenInBrowser,
    /// Jump to a tenth of the duration: `SeekPercent(30)` seeks to 30%.
    SeekPercent(u8),
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::ShowHelp => "Show help",
            Self::CycleTheme => "Cycle theme",
            Self::NavDown => "Navigate down",
            Self::NavUp => "Navigate up",
            Self::NextCategory => "Next category",
            Self::PrevCategory => "Previous category",
            Self::Select => "Play selected video",
            Self::TogglePlay => "Play / pause",
            Self::SkipForward => "Skip forward",
            Self::SkipBack => "Skip back",
            Self::VolumeUp => "Volume up",
            Self::VolumeDown => "Volume down",
            Self::ToggleMute => "Mute / unmute",
            Self::ToggleFullscreen => "Toggle fullscreen",
            Self::Minimize => "Minimize player",
            Self::RestorePlayer => "Restore player",
            Self::ClosePlayer => "Close player",
            Self::OpenInBrowser => "Open video in browser",
            Self::SeekPercent(_) => "Jump to 0%..90%",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context: determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    /// Feed visible, no player docked.
    Feed,
    /// Feed visible with the mini player docked below it.
    MiniPlayer,
    /// Full player overlay.
    Player,
    Fullscreen,
}

impl Context {
    /// Context consulted when this one has no binding for a key.
    pub fn parent(self) -> Option<Context> {
        match self {
            Self::Global => None,
            Self::Feed | Self::Player => Some(Self::Global),
            Self::MiniPlayer => Some(Self::Feed),
            Self::Fullscreen => Some(Self::Player),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Feed => "Feed",
            Self::MiniPlayer => "Mini player",
            Self::Player => "Player",
            Self::Fullscreen => "Fullscreen",
        }
    }
}

// ============================================================================
// Key Parsing
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "Up", "Down", "Space"
/// - Modifier combos: "Ctrl+d"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        let c = chars.next()?;
        return chars.next().is_none().then_some(KeySpec::ctrl(c));
    }

    // Named keys (case-insensitive)
    let named = match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "backspace" => Some(KeyCode::Backspace),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    };
    if let Some(code) = named {
        return Some(KeySpec::plain(code));
    }

    if let Some(n) = s
        .strip_prefix(['F', 'f'])
        .and_then(|n| n.parse::<u8>().ok())
    {
        return (1..=12).contains(&n).then_some(KeySpec::plain(KeyCode::F(n)));
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(KeySpec::char(c))
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Default Bindings
// ============================================================================

const DEFAULT_BINDINGS: &[(Context, KeySpec, Action)] = &[
    // Global
    (Context::Global, KeySpec::char('q'), Action::Quit),
    (Context::Global, KeySpec::ctrl('c'), Action::Quit),
    (Context::Global, KeySpec::char('?'), Action::ShowHelp),
    (Context::Global, KeySpec::char('T'), Action::CycleTheme),
    // Feed
    (Context::Feed, KeySpec::char('j'), Action::NavDown),
    (Context::Feed, KeySpec::plain(KeyCode::Down), Action::NavDown),
    (Context::Feed, KeySpec::char('k'), Action::NavUp),
    (Context::Feed, KeySpec::plain(KeyCode::Up), Action::NavUp),
    (Context::Feed, KeySpec::char('l'), Action::NextCategory),
    (Context::Feed, KeySpec::plain(KeyCode::Right), Action::NextCategory),
    (Context::Feed, KeySpec::plain(KeyCode::Tab), Action::NextCategory),
    (Context::Feed, KeySpec::char('h'), Action::PrevCategory),
    (Context::Feed, KeySpec::plain(KeyCode::Left), Action::PrevCategory),
    (Context::Feed, KeySpec::plain(KeyCode::Enter), Action::Select),
    // Mini player, layered over the feed
    (Context::MiniPlayer, KeySpec::char(' '), Action::TogglePlay),
    (Context::MiniPlayer, KeySpec::char('p'), Action::RestorePlayer),
    (Context::MiniPlayer, KeySpec::char('x'), Action::ClosePlayer),
    // Full player
    (Context::Player, KeySpec::char(' '), Action::TogglePlay),
    (Context::Player, KeySpec::char('l'), Action::SkipForward),
    (Context::Player, KeySpec::plain(KeyCode::Right), Action::SkipForward),
    (Context::Player, KeySpec::char('h'), Action::SkipBack),
    (Context::Player, KeySpec::plain(KeyCode::Left), Action::SkipBack),
    (Context::Player, KeySpec::char('+'), Action::VolumeUp),
    (Context::Player, KeySpec::char('='), Action::VolumeUp),
    (Context::Player, KeySpec::char('-'), Action::VolumeDown),
    (Context::Player, KeySpec::char('m'), Action::ToggleMute),
    (Context::Player, KeySpec::char('f'), Action::ToggleFullscreen),
    (Context::Player, KeySpec::plain(KeyCode::Esc), Action::Minimize),
    (Context::Player, KeySpec::char('v'), Action::Minimize),
    (Context::Player, KeySpec::char('x'), Action::ClosePlayer),
    (Context::Player, KeySpec::char('o'), Action::OpenInBrowser),
    (Context::Player, KeySpec::char('j'), Action::NavDown),
    (Context::Player, KeySpec::plain(KeyCode::Down), Action::NavDown),
    (Context::Player, KeySpec::char('k'), Action::NavUp),
    (Context::Player, KeySpec::plain(KeyCode::Up), Action::NavUp),
    (Context::Player, KeySpec::plain(KeyCode::Enter), Action::Select),
    (Context::Player, KeySpec::char('0'), Action::SeekPercent(0)),
    (Context::Player, KeySpec::char('1'), Action::SeekPercent(10)),
    (Context::Player, KeySpec::char('2'), Action::SeekPercent(20)),
    (Context::Player, KeySpec::char('3'), Action::SeekPercent(30)),
    (Context::Player, KeySpec::char('4'), Action::SeekPercent(40)),
    (Context::Player, KeySpec::char('5'), Action::SeekPercent(50)),
    (Context::Player, KeySpec::char('6'), Action::SeekPercent(60)),
    (Context::Player, KeySpec::char('7'), Action::SeekPercent(70)),
    (Context::Player, KeySpec::char('8'), Action::SeekPercent(80)),
    (Context::Player, KeySpec::char('9'), Action::SeekPercent(90)),
    // Fullscreen, layered over the full player
    (Context::Fullscreen, KeySpec::plain(KeyCode::Esc), Action::ToggleFullscreen),
    (Context::Fullscreen, KeySpec::char('b'), Action::Minimize),
];

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts.
pub struct KeybindingRegistry {
    /// Primary lookup: (Context, KeySpec) -> Action
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings in registration order, for the help screen
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        for &(context, key, action) in DEFAULT_BINDINGS {
            registry.bind(context, key, action);
        }
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    /// Apply user overrides from the config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "toggle_play").
    /// Values are key strings (e.g., "q", "Ctrl+d", "F5"). The new key replaces
    /// every default key of that action, in every context the action had.
    ///
    /// Returns a list of warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };

            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();
            contexts.dedup();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts {
                self.bind(ctx, key, action);
            }

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Look up the action for a key, walking from `context` up its parents.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        // Shifted characters arrive with SHIFT set; the char already carries it.
        let modifiers = match code {
            KeyCode::Char(_) => modifiers.difference(KeyModifiers::SHIFT),
            _ => modifiers,
        };
        let key = KeySpec::new(code, modifiers);
        let mut current = Some(context);
        while let Some(ctx) = current {
            if let Some(&action) = self.lookup.get(&(ctx, key)) {
                return Some(action);
            }
            current = ctx.parent();
        }
        None
    }

    /// First key bound to `action` in `context`, formatted for hints.
    pub fn key_hint(&self, action: Action, context: Context) -> Option<String> {
        self.bindings
            .iter()
            .find(|(c, _, a)| *a == action && *c == context)
            .map(|(_, key, _)| format_key(key))
    }

    /// All bindings for the help screen.
    ///
    /// Returns (context, key_display_string, action, description) tuples.
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action.
fn parse_action_name(name: &str) -> Option<Action> {
    let name = name.to_lowercase();
    if let Some(digit) = name.strip_prefix("seek_") {
        return match digit.parse::<u8>() {
            Ok(d) if d <= 9 => Some(Action::SeekPercent(d * 10)),
            _ => None,
        };
    }
    match name.as_str() {
        "quit" => Some(Action::Quit),
        "show_help" | "help" => Some(Action::ShowHelp),
        "cycle_theme" | "theme" => Some(Action::CycleTheme),
        "nav_down" | "down" => Some(Action::NavDown),
        "nav_up" | "up" => Some(Action::NavUp),
        "next_category" => Some(Action::NextCategory),
        "prev_category" => Some(Action::PrevCategory),
        "select" | "enter" => Some(Action::Select),
        "toggle_play" | "play" => Some(Action::TogglePlay),
        "skip_forward" => Some(Action::SkipForward),
        "skip_back" => Some(Action::SkipBack),
        "volume_up" => Some(Action::VolumeUp),
        "volume_down" => Some(Action::VolumeDown),
        "toggle_mute" | "mute" => Some(Action::ToggleMute),
        "toggle_fullscreen" | "fullscreen" => Some(Action::ToggleFullscreen),
        "minimize" => Some(Action::Minimize),
        "restore_player" | "restore" => Some(Action::RestorePlayer),
        "close_player" | "close" => Some(Action::ClosePlayer),
        "open_in_browser" | "open" => Some(Action::OpenInBrowser),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

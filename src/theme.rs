//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Category bar --
    pub pill: Style,
    pub pill_selected: Style,

    // -- Feed --
    pub section_header: Style,
    pub card_title: Style,
    pub card_selected: Style,
    pub card_badge: Style,

    // -- Player --
    pub player_title: Style,
    pub player_surface: Style,
    pub player_glyph: Style,
    pub scrubber_filled: Style,
    pub scrubber_empty: Style,
    pub transport: Style,
    pub time: Style,
    pub up_next_header: Style,
    pub up_next_selected: Style,
    pub skeleton: Style,

    // -- Mini player --
    pub mini_bar: Style,
    pub mini_progress: Style,

    // -- Fullscreen overlays --
    pub overlay: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub help_key: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            pill: Style::default().fg(Color::Gray).bg(Color::Black),
            pill_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),

            section_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            card_title: Style::default(),
            card_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            card_badge: Style::default().fg(Color::DarkGray),

            player_title: Style::default().add_modifier(Modifier::BOLD),
            player_surface: Style::default().bg(Color::Black).fg(Color::Gray),
            player_glyph: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            scrubber_filled: Style::default().fg(Color::Red),
            scrubber_empty: Style::default().fg(Color::DarkGray),
            transport: Style::default().fg(Color::White),
            time: Style::default().fg(Color::Gray),
            up_next_header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            up_next_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            skeleton: Style::default().fg(Color::DarkGray),

            mini_bar: Style::default().bg(Color::Black).fg(Color::White),
            mini_progress: Style::default().fg(Color::Red),

            overlay: Style::default().fg(Color::White).bg(Color::DarkGray),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
            help_key: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }

    fn light() -> Self {
        Self {
            pill: Style::default().fg(Color::Black).bg(Color::Gray),
            pill_selected: Style::default()
                .fg(Color::White)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),

            section_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            card_title: Style::default().fg(Color::Black),
            card_selected: Style::default().bg(Color::Blue).fg(Color::White),
            card_badge: Style::default().fg(Color::DarkGray),

            player_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            player_surface: Style::default().bg(Color::Black).fg(Color::White),
            player_glyph: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            scrubber_filled: Style::default().fg(Color::Red),
            scrubber_empty: Style::default().fg(Color::Gray),
            transport: Style::default().fg(Color::Black),
            time: Style::default().fg(Color::DarkGray),
            up_next_header: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            up_next_selected: Style::default().bg(Color::Blue).fg(Color::White),
            skeleton: Style::default().fg(Color::Gray),

            mini_bar: Style::default().bg(Color::White).fg(Color::Black),
            mini_progress: Style::default().fg(Color::Red),

            overlay: Style::default().fg(Color::White).bg(Color::DarkGray),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
            help_key: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup, built from a `ColorPalette`.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 24] = [
    "pill",
    "pill_selected",
    "section_header",
    "card_title",
    "card_selected",
    "card_badge",
    "player_title",
    "player_surface",
    "player_glyph",
    "scrubber_filled",
    "scrubber_empty",
    "transport",
    "time",
    "up_next_header",
    "up_next_selected",
    "skeleton",
    "mini_bar",
    "mini_progress",
    "overlay",
    "status_bar",
    "panel_border",
    "panel_border_focused",
    "help_key",
    "error",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 24] = [
            p.pill,
            p.pill_selected,
            p.section_header,
            p.card_title,
            p.card_selected,
            p.card_badge,
            p.player_title,
            p.player_surface,
            p.player_glyph,
            p.scrubber_filled,
            p.scrubber_empty,
            p.transport,
            p.time,
            p.up_next_header,
            p.up_next_selected,
            p.skeleton,
            p.mini_bar,
            p.mini_progress,
            p.overlay,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
            p.help_key,
            Style::default().fg(Color::Red),
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================

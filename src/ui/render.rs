//! Render functions for the TUI.
//!
//! Dispatches on the player layout. Every frame rebuilds the mouse hit map
//! from scratch so input always resolves against what is on screen.

use crate::app::{App, HitMap};
use crate::player::PlayerMode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use super::{feed, help, player, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let mut hits = HitMap::default();

    if area.width < 1 || area.height < 1 {
        app.hits = hits;
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        // For very small terminals just show a minimal message
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        app.hits = hits;
        return;
    }

    match app.player_mode() {
        None | Some(PlayerMode::Minimized) => render_browse(f, app, area, &mut hits),
        Some(PlayerMode::Full) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)])
                .split(area);
            player::render_full(f, app, chunks[0], &mut hits);
            status::render(f, app, chunks[1]);
        }
        Some(PlayerMode::Fullscreen) => player::render_fullscreen(f, app, area, &mut hits),
    }

    if app.show_help {
        help::render(f, app);
    }

    app.hits = hits;
}

/// Pill bar, feed, the mini player when docked, and the status bar.
fn render_browse(f: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let mini_height = if app.player.is_some() { player::MINI_HEIGHT } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(mini_height),
            Constraint::Length(1),
        ])
        .split(area);

    feed::render_pills(f, app, chunks[0], hits);
    feed::render_cards(f, app, chunks[1], hits);
    if mini_height > 0 {
        player::render_mini(f, app, chunks[2], hits);
    }
    status::render(f, app, chunks[3]);
}

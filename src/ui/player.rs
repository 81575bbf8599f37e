//! Player views: the full overlay, the docked mini bar, and fullscreen.

use crate::app::{App, Hit, HitMap};
use crate::keybindings::{Action, Context};
use crate::player::{format_time, recommendations, PlaybackSession};
use crate::util::{display_width, strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::SPINNER_FRAMES;

/// Rows taken by the docked mini player.
pub(super) const MINI_HEIGHT: u16 = 2;

/// Below this width "Up Next" goes under the video instead of beside it.
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 100;

/// A piece of a control row, optionally clickable.
struct Segment {
    text: String,
    style: Style,
    hit: Option<Hit>,
}

impl Segment {
    fn new(text: impl Into<String>, style: Style, hit: Option<Hit>) -> Self {
        Self {
            text: text.into(),
            style,
            hit,
        }
    }
}

/// Draw `segments` left to right on one row, recording hit regions for the
/// clickable ones that fit.
fn render_segments(f: &mut Frame, area: Rect, segments: Vec<Segment>, hits: &mut HitMap) {
    let mut x = area.x;
    let right = area.x + area.width;
    let mut spans = Vec::with_capacity(segments.len());
    for segment in segments {
        let width = u16::try_from(display_width(&segment.text)).unwrap_or(u16::MAX);
        if let Some(hit) = segment.hit {
            let visible = width.min(right.saturating_sub(x));
            hits.push(Rect::new(x, area.y, visible, 1), hit);
        }
        x = x.saturating_add(width);
        spans.push(Span::styled(segment.text, segment.style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ============================================================================
// Shared pieces
// ============================================================================

/// Scrubber row: filled track, thumb, empty track.
fn render_scrubber(
    f: &mut Frame,
    app: &App,
    session: &PlaybackSession,
    area: Rect,
    hits: &mut HitMap,
) {
    if area.width < 2 {
        return;
    }
    let width = area.width as usize;
    let filled = (session.progress().clamp(0.0, 1.0) * (width - 1) as f64).round() as usize;
    let empty = width - 1 - filled;

    let line = Line::from(vec![
        Span::styled("━".repeat(filled), app.style("scrubber_filled")),
        Span::styled("●", app.style("scrubber_filled")),
        Span::styled("─".repeat(empty), app.style("scrubber_empty")),
    ]);
    f.render_widget(Paragraph::new(line), area);
    hits.push(area, Hit::Scrubber);
}

/// Transport row: skip back, play/pause, skip forward, volume, time.
fn render_transport(
    f: &mut Frame,
    app: &App,
    session: &PlaybackSession,
    area: Rect,
    hits: &mut HitMap,
) {
    let style = app.style("transport");
    let skip = app.config.skip_seconds;
    let play_glyph = if session.is_ended() {
        " ⟲ "
    } else if session.is_playing() {
        " ⏸ "
    } else {
        " ▶ "
    };
    let volume = if session.is_muted() {
        " 🔇 muted ".to_string()
    } else {
        format!(" 🔊 {:>3.0}% ", session.volume() * 100.0)
    };
    let time = format!(
        " {} / {}",
        format_time(session.elapsed()),
        format_time(session.duration())
    );

    let segments = vec![
        Segment::new(format!("⏪ {:.0}s", skip), style, Some(Hit::SkipBack)),
        Segment::new(play_glyph, style, Some(Hit::PlayButton)),
        Segment::new(format!("{:.0}s ⏩", skip), style, Some(Hit::SkipForward)),
        Segment::new(volume, style, Some(Hit::MuteButton)),
        Segment::new(time, app.style("time"), None),
    ];
    render_segments(f, area, segments, hits);
}

/// Video surface with the center glyph: spinner while loading, restart when
/// ended, play while paused, nothing while playing.
fn render_surface(
    f: &mut Frame,
    app: &App,
    session: &PlaybackSession,
    area: Rect,
    hits: &mut HitMap,
) {
    f.render_widget(Block::default().style(app.style("player_surface")), area);
    if area.height < 1 {
        return;
    }

    let glyph: Option<String> = if session.is_loading() {
        let frame = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        Some(format!("{} Loading", frame))
    } else if session.is_ended() {
        Some("⟲  Replay".to_string())
    } else if !session.is_playing() {
        Some("▶  Play".to_string())
    } else {
        None
    };

    let center = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    if let Some(glyph) = glyph {
        let paragraph = Paragraph::new(Span::styled(glyph, app.style("player_glyph")))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, center);
    }

    // The middle third of the surface toggles play; the rest starts a drag.
    let tap_height = (area.height / 3).max(1);
    let tap = Rect::new(
        area.x + area.width / 3,
        area.y + (area.height - tap_height) / 2,
        area.width / 3,
        tap_height,
    );
    hits.push(tap, Hit::PlayButton);
}

fn key_hint(app: &App, action: Action, context: Context) -> String {
    app.keybindings
        .key_hint(action, context)
        .unwrap_or_else(|| "?".to_string())
}

// ============================================================================
// Full player
// ============================================================================

/// Full player overlay, shifted down while being dragged.
pub(super) fn render_full(f: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let Some(session) = app.player.as_ref() else {
        return;
    };

    let shift = drag_shift(session.drag_offset(), app.config.drag_units_per_row, area.height);
    let area = Rect::new(area.x, area.y + shift, area.width, area.height - shift);
    if area.height < 4 {
        return;
    }
    hits.push(area, Hit::DragHandle);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    render_top_bar(f, app, session, chunks[0], hits);

    let body = chunks[1];
    let (video_area, up_next_area) = if body.width >= SIDE_BY_SIDE_MIN_WIDTH {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(body);
        (cols[0], cols[1])
    } else {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(body);
        (rows[0], rows[1])
    };

    let video = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(video_area);

    render_surface(f, app, session, video[0], hits);
    render_scrubber(f, app, session, video[1], hits);
    render_transport(f, app, session, video[2], hits);

    let hint = format!(
        "⛶ [{}] fullscreen",
        key_hint(app, Action::ToggleFullscreen, Context::Player)
    );
    render_segments(
        f,
        video[3],
        vec![Segment::new(hint, app.style("card_badge"), Some(Hit::FullscreenButton))],
        hits,
    );

    render_up_next(f, app, session, up_next_area, hits);
}

/// Rows to push the player down for a drag of `offset` units.
fn drag_shift(offset: f64, units_per_row: f64, height: u16) -> u16 {
    if offset <= 0.0 || units_per_row <= 0.0 {
        return 0;
    }
    let rows = (offset / units_per_row).floor();
    if rows >= f64::from(height) {
        height
    } else {
        rows as u16
    }
}

/// Minimize on the left, title in the middle, close on the right.
fn render_top_bar(
    f: &mut Frame,
    app: &App,
    session: &PlaybackSession,
    area: Rect,
    hits: &mut HitMap,
) {
    let minimize = " ▾ minimize ";
    let close = " ✕ close ";
    let chrome = display_width(minimize) + display_width(close) + 2;
    let title = strip_control_chars(&session.video().title);
    let budget = (area.width as usize).saturating_sub(chrome);
    let title = truncate_to_width(&title, budget).into_owned();
    let pad = (area.width as usize)
        .saturating_sub(chrome + display_width(&title))
        .max(1);

    let segments = vec![
        Segment::new(minimize, app.style("transport"), Some(Hit::MinimizeButton)),
        Segment::new(" ", Style::default(), None),
        Segment::new(title, app.style("player_title"), None),
        Segment::new(" ".repeat(pad), Style::default(), None),
        Segment::new(close, app.style("transport"), Some(Hit::CloseButton)),
    ];
    render_segments(f, area, segments, hits);
}

/// "Up Next": the rest of the catalog grouped by category, or a skeleton
/// while the bound video is still loading.
fn render_up_next(
    f: &mut Frame,
    app: &App,
    session: &PlaybackSession,
    area: Rect,
    hits: &mut HitMap,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border"))
        .title(Span::styled(" Up Next ", app.style("up_next_header")));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width < 1 || inner.height < 1 {
        return;
    }

    let width = inner.width as usize;

    if session.is_loading() {
        let lines: Vec<Line> = (0..inner.height)
            .map(|row| {
                let len = if row % 3 == 0 { width / 3 } else { width * 3 / 4 };
                Line::from(Span::styled("░".repeat(len), app.style("skeleton")))
            })
            .collect();
        f.render_widget(Paragraph::new(lines), inner);
        return;
    }

    let groups = recommendations(&app.catalog, session.video());
    if groups.is_empty() {
        let empty = Paragraph::new("Nothing else to watch")
            .alignment(Alignment::Center)
            .style(app.style("card_badge"));
        f.render_widget(empty, inner);
        return;
    }

    // (line, recommendation index for video rows)
    let mut rows: Vec<(Line, Option<usize>)> = Vec::new();
    let selected = session.recommendation_index();
    let mut index = 0;
    for group in &groups {
        let name = strip_control_chars(&group.category.name);
        rows.push((
            Line::from(Span::styled(
                truncate_to_width(&name, width).into_owned(),
                app.style("section_header"),
            )),
            None,
        ));
        for video in &group.videos {
            let title = strip_control_chars(&video.title);
            let title = truncate_to_width(&title, width.saturating_sub(2)).into_owned();
            let line = if index == selected {
                Line::from(Span::styled(format!("▶ {}", title), app.style("up_next_selected")))
            } else {
                Line::from(Span::styled(format!("  {}", title), app.style("card_title")))
            };
            rows.push((line, Some(index)));
            index += 1;
        }
    }

    let selected_row = rows
        .iter()
        .position(|(_, i)| *i == Some(selected))
        .unwrap_or(0);
    let height = inner.height as usize;
    let scroll = (selected_row + 1).saturating_sub(height);

    let mut lines = Vec::with_capacity(height);
    for (offset, (line, rec)) in rows.into_iter().skip(scroll).take(height).enumerate() {
        if let Some(rec) = rec {
            let y = inner.y + offset as u16;
            hits.push(Rect::new(inner.x, y, inner.width, 1), Hit::Recommendation(rec));
        }
        lines.push(line);
    }
    f.render_widget(Paragraph::new(lines), inner);
}

// ============================================================================
// Mini player
// ============================================================================

/// Slim bar docked under the feed: progress strip, then play, title, close.
pub(super) fn render_mini(f: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let Some(session) = app.player.as_ref() else {
        return;
    };
    if area.height < MINI_HEIGHT || area.width < 10 {
        return;
    }
    f.render_widget(Block::default().style(app.style("mini_bar")), area);
    hits.push(area, Hit::MiniBar);

    let strip = Rect::new(area.x, area.y, area.width, 1);
    let filled = (session.progress().clamp(0.0, 1.0) * f64::from(area.width)).round() as usize;
    let strip_line = Line::from(vec![
        Span::styled("▀".repeat(filled), app.style("mini_progress")),
        Span::styled(
            "▀".repeat((area.width as usize).saturating_sub(filled)),
            app.style("scrubber_empty"),
        ),
    ]);
    f.render_widget(Paragraph::new(strip_line), strip);

    let row = Rect::new(area.x, area.y + 1, area.width, 1);
    let play = if session.is_ended() {
        " ⟲ "
    } else if session.is_loading() {
        SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()]
    } else if session.is_playing() {
        " ⏸ "
    } else {
        " ▶ "
    };
    let close = " ✕ ";
    let time = format!(
        " {} / {} ",
        format_time(session.elapsed()),
        format_time(session.duration())
    );
    let fixed = display_width(play) + display_width(close) + display_width(&time) + 1;
    let title = strip_control_chars(&session.video().title);
    let title =
        truncate_to_width(&title, (area.width as usize).saturating_sub(fixed)).into_owned();
    let pad = (area.width as usize).saturating_sub(fixed + display_width(&title));

    let style = app.style("mini_bar");
    let segments = vec![
        Segment::new(play, style, Some(Hit::MiniPlay)),
        Segment::new(" ", style, None),
        Segment::new(title, style, None),
        Segment::new(" ".repeat(pad), style, None),
        Segment::new(time, app.style("time"), None),
        Segment::new(close, style, Some(Hit::CloseButton)),
    ];
    render_segments(f, row, segments, hits);
}

// ============================================================================
// Fullscreen
// ============================================================================

/// Video surface over the whole terminal with a header and footer on top.
pub(super) fn render_fullscreen(f: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let Some(session) = app.player.as_ref() else {
        return;
    };
    if area.height < 4 {
        return;
    }

    render_surface(f, app, session, area, hits);

    let overlay = app.style("overlay");
    let header = Rect::new(area.x, area.y, area.width, 1);
    f.render_widget(Block::default().style(overlay), header);
    let back = format!(
        " ← Back to Home [{}] ",
        key_hint(app, Action::Minimize, Context::Fullscreen)
    );
    let title = strip_control_chars(&session.video().title);
    let title = truncate_to_width(
        &title,
        (area.width as usize).saturating_sub(display_width(&back) + 1),
    )
    .into_owned();
    render_segments(
        f,
        header,
        vec![
            Segment::new(back, overlay, Some(Hit::MinimizeButton)),
            Segment::new(" ", overlay, None),
            Segment::new(title, overlay, None),
        ],
        hits,
    );

    let footer = Rect::new(area.x, area.y + area.height - 2, area.width, 2);
    f.render_widget(Block::default().style(overlay), footer);
    render_scrubber(f, app, session, Rect::new(footer.x, footer.y, footer.width, 1), hits);
    let controls = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(22)])
        .split(Rect::new(footer.x, footer.y + 1, footer.width, 1));
    render_transport(f, app, session, controls[0], hits);
    let exit = format!(
        "[{}] exit fullscreen",
        key_hint(app, Action::ToggleFullscreen, Context::Fullscreen)
    );
    render_segments(
        f,
        controls[1],
        vec![Segment::new(exit, overlay, Some(Hit::FullscreenButton))],
        hits,
    );
}

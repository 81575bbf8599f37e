//! Keybinding overlay.
//!
//! Lists every binding, user overrides included, grouped by the context it
//! applies in. Groups that are live for the current view are marked.

use crate::app::App;
use crate::keybindings::Context;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

/// Group order and headings.
const CONTEXT_ORDER: [(Context, &str); 5] = [
    (Context::Global, "General"),
    (Context::Feed, "Feed"),
    (Context::Player, "Player"),
    (Context::MiniPlayer, "Mini Player"),
    (Context::Fullscreen, "Fullscreen"),
];

const KEY_COLUMN: u16 = 16;

/// Contexts whose bindings currently resolve: `current` and its ancestors.
fn live_contexts(current: Context) -> Vec<Context> {
    std::iter::successors(Some(current), |c| c.parent()).collect()
}

pub(super) fn render(f: &mut Frame, app: &App) {
    let overlay = centered_rect(80, 80, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }
    f.render_widget(Clear, overlay);

    let live = live_contexts(app.key_context());
    let bindings = app.keybindings.all_bindings();

    let mut rows: Vec<Row> = Vec::new();
    for (ctx, label) in &CONTEXT_ORDER {
        let mut group = bindings.iter().filter(|(c, _, _, _)| c == ctx).peekable();
        if group.peek().is_none() {
            continue;
        }
        if !rows.is_empty() {
            rows.push(Row::new(vec![Line::from(""), Line::from("")]));
        }

        let heading = if live.contains(ctx) {
            format!("{} (active)", label)
        } else {
            label.to_string()
        };
        rows.push(
            Row::new(vec![Line::from(Span::styled(
                heading,
                Style::default().add_modifier(Modifier::BOLD),
            ))])
            .style(app.style("section_header")),
        );
        for (_, key, _, description) in group {
            rows.push(Row::new(vec![
                Line::from(Span::styled(format!("  {}", key), app.style("help_key"))),
                Line::from(*description),
            ]));
        }
    }

    // Two border rows plus the column header.
    let visible_height = overlay.height.saturating_sub(3) as usize;
    let max_scroll = rows.len().saturating_sub(visible_height);
    let scroll = app.help_scroll_offset.min(max_scroll);

    let title = if max_scroll > 0 {
        format!(" Keys ({}/{}) ", scroll + 1, max_scroll + 1)
    } else {
        " Keys (? to close) ".to_string()
    };

    let table = Table::new(
        rows.into_iter().skip(scroll).take(visible_height),
        [Constraint::Length(KEY_COLUMN), Constraint::Min(20)],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("panel_border_focused"))
            .title(title),
    )
    .header(
        Row::new(vec!["Key", "Does"])
            .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)),
    )
    .style(app.style("overlay"));
    f.render_widget(table, overlay);

    if scroll < max_scroll {
        let footer = Rect::new(
            overlay.x + 1,
            overlay.y + overlay.height.saturating_sub(1),
            overlay.width.saturating_sub(2),
            1,
        );
        f.render_widget(
            Paragraph::new(Span::styled(" j/k scroll, ? or Esc close ", app.style("card_badge"))),
            footer,
        );
    }
}

/// A rectangle covering the given percentages of `area`, centered in it.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

use crate::app::{App, Hit, HitMap};
use crate::catalog::Video;
use crate::util::{display_width, strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Gap between pills in the category bar.
const PILL_GAP: u16 = 1;

/// Render the category pill bar.
///
/// Pills scroll horizontally so the selected one is always on screen.
pub(super) fn render_pills(f: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let pills = app.feed.pills(&app.catalog);
    let labels: Vec<String> = pills
        .iter()
        .map(|p| format!(" {} ", strip_control_chars(p.label)))
        .collect();
    let widths: Vec<u16> = labels
        .iter()
        .map(|l| u16::try_from(display_width(l)).unwrap_or(u16::MAX))
        .collect();

    let selected = pills.iter().position(|p| p.selected).unwrap_or(0);
    let first = first_visible_pill(&widths, selected, area.width);

    let mut spans = Vec::new();
    for (index, x) in place_pills(&widths, first, area.x, area.width) {
        let style = if pills[index].selected {
            app.style("pill_selected")
        } else {
            app.style("pill")
        };
        spans.push(Span::styled(labels[index].clone(), style));
        spans.push(Span::raw(" ".repeat(PILL_GAP as usize)));
        hits.push(Rect::new(x, area.y, widths[index], 1), Hit::Pill(index));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Left edge of each pill that fits, starting from `first` at column `start`.
fn place_pills(widths: &[u16], first: usize, start: u16, available: u16) -> Vec<(usize, u16)> {
    // Widened so an oversized label cannot wrap the column arithmetic.
    let right = (u32::from(start) + u32::from(available)).min(u32::from(u16::MAX));
    let mut placed = Vec::new();
    let mut x = u32::from(start);
    for (index, width) in widths.iter().enumerate().skip(first) {
        if x + u32::from(*width) > right {
            break;
        }
        placed.push((index, x as u16));
        x += u32::from(*width) + u32::from(PILL_GAP);
    }
    placed
}

/// First pill to draw so that `selected` fits within `available` columns.
fn first_visible_pill(widths: &[u16], selected: usize, available: u16) -> usize {
    let mut first = 0;
    while first < selected {
        let span: u32 = widths[first..=selected]
            .iter()
            .map(|w| u32::from(*w) + u32::from(PILL_GAP))
            .sum();
        if span <= u32::from(available) {
            break;
        }
        first += 1;
    }
    first
}

/// One line of the feed body.
enum FeedRow<'a> {
    Header(&'a str),
    Card { index: usize, video: &'a Video, category: &'a str },
}

/// Render the feed: one header per displayed section followed by its cards.
pub(super) fn render_cards(f: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let title = format!(" {} ", app.feed.filter());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if app.feed_visible() && app.player.is_none() {
            app.style("panel_border_focused")
        } else {
            app.style("panel_border")
        })
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 1 || inner.height < 1 {
        return;
    }

    let mut rows = Vec::new();
    let mut index = 0;
    for section in app.feed.displayed_sections(&app.catalog) {
        rows.push(FeedRow::Header(&section.category.name));
        for video in &section.contents {
            rows.push(FeedRow::Card {
                index,
                video,
                category: &section.category.name,
            });
            index += 1;
        }
    }

    if index == 0 {
        let empty = Paragraph::new("No videos in this category")
            .alignment(Alignment::Center)
            .style(app.style("card_badge"));
        f.render_widget(empty, inner);
        return;
    }

    let selected = app.feed.selected_index();
    let selected_row = rows
        .iter()
        .position(|r| matches!(r, FeedRow::Card { index, .. } if *index == selected))
        .unwrap_or(0);
    let height = inner.height as usize;
    let scroll = (selected_row + 1).saturating_sub(height);

    let width = inner.width as usize;
    let mut lines = Vec::with_capacity(height);
    for (offset, row) in rows.iter().skip(scroll).take(height).enumerate() {
        match row {
            FeedRow::Header(name) => {
                let name = strip_control_chars(name);
                lines.push(Line::from(Span::styled(
                    truncate_to_width(&name, width).into_owned(),
                    app.style("section_header"),
                )));
            }
            FeedRow::Card {
                index,
                video,
                category,
            } => {
                let is_selected = *index == selected;
                lines.push(card_line(app, video, category, is_selected, width));
                // Offset fits in u16 because it is bounded by inner.height
                let y = inner.y + offset as u16;
                hits.push(Rect::new(inner.x, y, inner.width, 1), Hit::Card(*index));
            }
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// A card row: marker, title, then the category badge right-aligned.
fn card_line<'a>(
    app: &App,
    video: &Video,
    category: &str,
    selected: bool,
    width: usize,
) -> Line<'a> {
    let marker = if selected { "▶ " } else { "  " };
    let badge = format!(" {} ", strip_control_chars(category));
    let badge_width = display_width(&badge);

    let title_budget = width.saturating_sub(display_width(marker) + badge_width + 1);
    let title = strip_control_chars(&video.title);
    let title = truncate_to_width(&title, title_budget).into_owned();
    let pad = width.saturating_sub(display_width(marker) + display_width(&title) + badge_width);

    let title_style = if selected {
        app.style("card_selected")
    } else {
        app.style("card_title")
    };

    let mut spans = vec![
        Span::styled(marker, title_style),
        Span::styled(title, title_style),
        Span::styled(" ".repeat(pad), title_style),
    ];
    if badge_width + display_width(marker) < width {
        spans.push(Span::styled(badge, app.style("card_badge")));
    }
    Line::from(spans)
}

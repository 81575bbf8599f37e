use crate::app::App;
use crate::keybindings::{Action, Context};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Actions worth a hint in each context, in display order.
fn hint_actions(context: Context) -> &'static [(Action, &'static str)] {
    match context {
        Context::Feed | Context::Global => &[
            (Action::Select, "play"),
            (Action::NextCategory, "category"),
            (Action::ShowHelp, "help"),
            (Action::Quit, "quit"),
        ],
        Context::MiniPlayer => &[
            (Action::TogglePlay, "play/pause"),
            (Action::RestorePlayer, "expand"),
            (Action::ClosePlayer, "close"),
            (Action::Select, "play"),
            (Action::Quit, "quit"),
        ],
        Context::Player => &[
            (Action::TogglePlay, "play/pause"),
            (Action::SkipBack, "back"),
            (Action::SkipForward, "fwd"),
            (Action::ToggleMute, "mute"),
            (Action::ToggleFullscreen, "fullscreen"),
            (Action::Minimize, "minimize"),
            (Action::ClosePlayer, "close"),
        ],
        Context::Fullscreen => &[
            (Action::TogglePlay, "play/pause"),
            (Action::ToggleFullscreen, "exit fullscreen"),
            (Action::Minimize, "minimize"),
        ],
    }
}

/// Keybinding hints for `context`, resolved through its parents so user
/// overrides show up.
pub(super) fn hints(app: &App, context: Context) -> String {
    hint_actions(context)
        .iter()
        .filter_map(|(action, label)| {
            let mut ctx = Some(context);
            while let Some(c) = ctx {
                if let Some(key) = app.keybindings.key_hint(*action, c) {
                    return Some(format!("[{}] {}", key, label));
                }
                ctx = c.parent();
            }
            None
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Render the status bar
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Borrow the status message instead of cloning it
    let text: Cow<'_, str> = match &app.status_message {
        Some((msg, _)) => Cow::Borrowed(msg.as_ref()),
        None => Cow::Owned(hints(app, app.key_context())),
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}

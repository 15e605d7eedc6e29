//! Command line UI component

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::{CommandLineState, CommandMode};
use crate::theme::Theme;

const SEARCH_PREFIX: &str = "/company ";

/// Draw the command line at the bottom of the screen
pub fn draw(frame: &mut Frame, area: Rect, state: &CommandLineState, filter: &str, theme: &Theme) {
    let (prefix, style) = match state.mode {
        CommandMode::Normal => {
            let line = match &state.message {
                Some(msg) if state.is_error => Span::styled(msg.clone(), Style::default().fg(theme.error)),
                Some(msg) => Span::styled(msg.clone(), Style::default().fg(theme.fg_muted)),
                None => Span::styled(
                    format!("{} | : commands, / company, ? help", filter),
                    Style::default().fg(theme.fg_muted),
                ),
            };
            frame.render_widget(Paragraph::new(Line::from(line)), area);
            return;
        }
        CommandMode::Command => (":", Style::default().fg(theme.accent_primary)),
        CommandMode::Search => (SEARCH_PREFIX, Style::default().fg(theme.info)),
    };

    let text = format!("{}{}", prefix, state.input);
    let cursor = prefix.chars().count() + state.cursor;
    let line = build_line_with_cursor(&text, cursor, style, theme);
    frame.render_widget(Paragraph::new(line), area);
}

/// Build a line with a visible cursor
fn build_line_with_cursor(
    text: &str,
    cursor_pos: usize,
    base_style: Style,
    theme: &Theme,
) -> Line<'static> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();

    if cursor_pos > 0 {
        let before: String = chars.iter().take(cursor_pos).collect();
        spans.push(Span::styled(before, base_style));
    }

    // Space when the cursor sits past the end
    let cursor_char = chars.get(cursor_pos).copied().unwrap_or(' ');
    let cursor_style =
        Style::default().fg(theme.bg_primary).bg(theme.cursor).add_modifier(Modifier::BOLD);
    spans.push(Span::styled(cursor_char.to_string(), cursor_style));

    if cursor_pos + 1 < chars.len() {
        let after: String = chars.iter().skip(cursor_pos + 1).collect();
        spans.push(Span::styled(after, base_style));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_at_start_splits_in_two() {
        let theme = Theme::default();
        let line = build_line_with_cursor(":done", 0, Style::default(), &theme);
        assert_eq!(line.spans.len(), 2);
    }

    #[test]
    fn cursor_past_end_shows_blank() {
        let theme = Theme::default();
        let line = build_line_with_cursor(":done", 5, Style::default(), &theme);
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[1].content, " ");
    }

    #[test]
    fn cursor_in_middle_splits_in_three() {
        let theme = Theme::default();
        let line = build_line_with_cursor("/company goo", 10, Style::default(), &theme);
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "o");
    }
}

//! UI rendering components

pub mod command_line;
pub mod layout;
pub mod problems;
pub mod progress;

use ratatui::{Frame, style::Style, widgets::Block};

use crate::app::sheet::Sheet;
use crate::app::state::{AppState, Screen};
use crate::theme::Theme;

/// Main draw function
pub fn draw<B>(frame: &mut Frame, state: &mut AppState, sheet: &Sheet<B>, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    let (tab_area, body, command_area) = layout::split_screen(area);

    let report = sheet.report();
    let summary = format!("{}/{} ({}%)", report.completed, report.total, report.rounded_percentage());
    layout::draw_tab_bar(frame, tab_area, state.screen, &summary, theme);

    // Help floats over whichever screen it was opened from
    let underlying = match state.screen {
        Screen::Help => state.previous_screen,
        screen => screen,
    };
    match underlying {
        Screen::Progress => {
            progress::draw(frame, body, report, state.chart, &mut state.topic_scroll, theme)
        }
        _ => problems::draw(frame, body, &mut state.list, sheet, theme),
    }
    if state.screen == Screen::Help {
        layout::draw_help(frame, body, theme);
    }

    let mut filter = sheet.filter().to_string();
    if sheet.is_diverged() {
        filter.push_str(" | unsaved changes");
    }
    command_line::draw(frame, command_area, &state.command_line, &filter, theme);
}

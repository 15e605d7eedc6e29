//! Layout utilities and common components

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
};

use crate::app::state::Screen;
use crate::theme::Theme;

/// Below this width topic names are shortened
pub const NARROW_WIDTH: u16 = 60;
/// Below this width topic names are cut hard
pub const VERY_NARROW_WIDTH: u16 = 40;

/// Split the frame into tab bar, body and command line
pub fn split_screen(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Draw the screen tabs with the overall percentage on the right
pub fn draw_tab_bar(frame: &mut Frame, area: Rect, screen: Screen, summary: &str, theme: &Theme) {
    let selected = match screen {
        Screen::Problems => 0,
        Screen::Progress => 1,
        Screen::Help => 2,
    };

    let tabs = Tabs::new(vec![" Problems ", " Progress ", " Help "])
        .select(selected)
        .style(Style::default().fg(theme.fg_muted).bg(theme.bg_secondary))
        .highlight_style(
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )
        .divider("│");
    frame.render_widget(tabs, area);

    let summary = Paragraph::new(Line::from(Span::styled(
        format!("{} ", summary),
        Style::default().fg(theme.fg_secondary),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(summary, area);
}

/// Shorten a topic name to fit a terminal of `width` columns
pub fn abbreviate_topic(name: &str, width: u16) -> String {
    if width >= NARROW_WIDTH {
        return name.to_string();
    }

    let len = name.chars().count();
    if width < VERY_NARROW_WIDTH && len > 10 {
        return format!("{}...", name.chars().take(8).collect::<String>());
    }
    if len > 15 {
        return format!("{}...", name.chars().take(13).collect::<String>());
    }
    name.replace("Arrays", "Arr").replace("Part-", "P")
}

/// Draw the key reference as a centered popup
pub fn draw_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup = centered_rect(area, 64, 26);
    frame.render_widget(Clear, popup);

    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", k), Style::default().fg(theme.accent_secondary)),
            Span::styled(desc, Style::default().fg(theme.fg_primary)),
        ])
    };
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        ))
    };

    let lines = vec![
        heading("Navigation"),
        key("j / k", "Move down / up"),
        key("g / G", "First / last row"),
        key("Ctrl-d / u", "Page down / up"),
        key("Enter", "Expand topic or show details"),
        key("l / h", "Expand / collapse topic"),
        key("Tab", "Switch between problems and progress"),
        Line::default(),
        heading("Progress"),
        key("m / Space", "Mark problem complete or not"),
        key("y / 1-4", "Copy primary link / LeetCode, GFG, CN, YouTube"),
        key("c / h / l", "Switch chart (progress view)"),
        key("r", "Reload progress from disk"),
        Line::default(),
        heading("Filters"),
        key("/", "Search company tags"),
        key(":company <q>", "Filter by company"),
        key(":source <s>", "leetcode, gfg, codingninjas, youtube, all"),
        key(":difficulty <d>", "easy, medium, hard, all"),
        key(":nofilter", "Clear every filter"),
        key(":yank [s]", "Copy the link from one source"),
        Line::default(),
        key(":reset", "Forget all progress"),
        key("q", "Quit"),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// A rect of at most `width` x `height` centered in `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

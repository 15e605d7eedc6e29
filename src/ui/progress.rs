//! Progress dashboard with switchable charts

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, LineGauge, Paragraph, Wrap},
};

use super::layout::abbreviate_topic;
use crate::app::state::ChartView;
use crate::catalog::Difficulty;
use crate::stats::{ProgressReport, Tally};
use crate::theme::Theme;

/// Draw the header summary and the selected chart.
///
/// `topic_scroll` is clamped to the rows the by-topic chart can show.
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    report: &ProgressReport,
    chart: ChartView,
    topic_scroll: &mut usize,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(area);

    draw_summary(frame, chunks[0], report, theme);

    let block = Block::default()
        .title(chart_title(chart))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    match chart {
        ChartView::Overview => draw_overview(frame, inner, report, theme),
        ChartView::ByTopic => draw_topics(frame, inner, report, topic_scroll, theme, area.width),
        ChartView::ByDifficulty => draw_difficulties(frame, inner, report, theme),
    }
}

/// Tab-like title listing every chart, the active one marked
fn chart_title(active: ChartView) -> String {
    let names: Vec<String> = ChartView::ALL
        .iter()
        .map(|&view| {
            if view == active { format!("[{}]", view.label()) } else { view.label().to_string() }
        })
        .collect();
    format!(" {} (c: next) ", names.join(" "))
}

fn draw_summary(frame: &mut Frame, area: Rect, report: &ProgressReport, theme: &Theme) {
    let band = report.motivation();
    let lines = vec![
        Line::from(Span::styled(
            "Your DSA Journey",
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!("{}%", report.rounded_percentage()),
                Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} of {} problems completed", report.completed, report.total),
                Style::default().fg(theme.fg_secondary),
            ),
        ]),
        Line::default(),
        Line::from(Span::styled(band.title(), Style::default().fg(theme.success))),
        Line::from(Span::styled(band.message(), Style::default().fg(theme.fg_muted))),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));
    let summary = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(summary, area);
}

fn draw_overview(frame: &mut Frame, area: Rect, report: &ProgressReport, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let overall = Tally::new(report.completed, report.total);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.success).bg(theme.bg_tertiary))
        .ratio(gauge_ratio(overall))
        .label(format!("{}%", report.rounded_percentage()));
    frame.render_widget(gauge, chunks[1]);

    let counts = Paragraph::new(Line::from(vec![
        Span::styled(format!("Completed {}", report.completed), Style::default().fg(theme.success)),
        Span::raw("   "),
        Span::styled(format!("Remaining {}", report.remaining()), Style::default().fg(theme.warning)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(counts, chunks[2]);
}

fn draw_topics(
    frame: &mut Frame,
    area: Rect,
    report: &ProgressReport,
    scroll: &mut usize,
    theme: &Theme,
    width: u16,
) {
    if report.by_topic.is_empty() {
        let msg = Paragraph::new("No topics").style(Style::default().fg(theme.fg_muted));
        frame.render_widget(msg, area);
        return;
    }

    let total = report.by_topic.len();
    let (start, end) = topic_window(total, area.height as usize, *scroll);
    *scroll = start;

    let shown = end - start;
    let hidden = total - shown;
    let mut constraints = vec![Constraint::Length(1); shown];
    if hidden > 0 {
        constraints.push(Constraint::Length(1));
    }
    let chunks = Layout::default().direction(Direction::Vertical).constraints(constraints).split(area);

    for (topic, &row) in report.by_topic[start..end].iter().zip(chunks.iter()) {
        let label = format!(
            "{:<18} {:>3}/{:<3}",
            abbreviate_topic(&topic.name, width),
            topic.tally.completed,
            topic.tally.total
        );
        let gauge = LineGauge::default()
            .label(label)
            .filled_style(Style::default().fg(theme.accent_primary))
            .unfilled_style(Style::default().fg(theme.bg_tertiary))
            .line_set(symbols::line::THICK)
            .ratio(gauge_ratio(topic.tally));
        frame.render_widget(gauge, row);
    }

    if hidden > 0 {
        let more = Paragraph::new(scroll_hint(start, total - end))
            .style(Style::default().fg(theme.fg_muted))
            .alignment(Alignment::Center);
        frame.render_widget(more, chunks[shown]);
    }
}

/// Rows `start..end` of `len` topics that fit in `height` lines, keeping one
/// line for the scroll hint when they don't all fit
fn topic_window(len: usize, height: usize, offset: usize) -> (usize, usize) {
    if len <= height {
        return (0, len);
    }
    let rows = height.saturating_sub(1).max(1);
    let start = offset.min(len - rows);
    (start, start + rows)
}

fn scroll_hint(above: usize, below: usize) -> String {
    match (above, below) {
        (0, below) => format!("+{} more (j to scroll)", below),
        (above, 0) => format!("{} above (k to scroll)", above),
        (above, below) => format!("{} above, +{} more (j/k to scroll)", above, below),
    }
}

fn draw_difficulties(frame: &mut Frame, area: Rect, report: &ProgressReport, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3); 3])
        .split(area);

    for (difficulty, &row) in Difficulty::ALL.iter().zip(chunks.iter()) {
        let tally = report.difficulty(*difficulty);
        let gauge = Gauge::default()
            .block(Block::default().title(format!(" {} ", difficulty)))
            .gauge_style(Style::default().fg(theme.difficulty(*difficulty)).bg(theme.bg_tertiary))
            .ratio(gauge_ratio(tally))
            .label(format!("{}/{}", tally.completed, tally.total));
        frame.render_widget(gauge, row);
    }
}

/// Gauges reject ratios above 1, which orphan ids can produce
fn gauge_ratio(tally: Tally) -> f64 {
    tally.ratio().clamp(0.0, 1.0)
}

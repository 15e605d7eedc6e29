//! Topic tree with problems and a details pane

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::layout::abbreviate_topic;
use crate::app::sheet::Sheet;
use crate::app::state::{ListRow, ListState};
use crate::catalog::{LinkKind, Problem};
use crate::theme::Theme;

const STATUS_OPEN: &str = "○";
const STATUS_DONE: &str = "✓";

/// Draw the problem list, splitting off a details pane when one is open
pub fn draw<B>(frame: &mut Frame, area: Rect, list: &mut ListState, sheet: &Sheet<B>, theme: &Theme) {
    let detail = list.open_problem.as_deref().and_then(|id| sheet.catalog().find_problem(id));

    let (list_area, detail_area) = match detail {
        Some(_) => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(area);
            (chunks[0], Some(chunks[1]))
        }
        None => (area, None),
    };

    let screen_width = frame.area().width;
    draw_list(frame, list_area, list, sheet, theme, screen_width);

    if let (Some(problem), Some(area)) = (detail, detail_area) {
        let completed = sheet.record().is_completed(&problem.id);
        draw_details(frame, area, problem, completed, theme);
    }
}

fn draw_list<B>(
    frame: &mut Frame,
    area: Rect,
    list: &mut ListState,
    sheet: &Sheet<B>,
    theme: &Theme,
    screen_width: u16,
) {
    let title = if sheet.filter().is_active() {
        format!(" Problems ({}) ", sheet.filter())
    } else {
        String::from(" Problems ")
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    list.visible_height = inner.height as usize;

    let filtered = sheet.filtered();
    if filtered.is_empty() {
        let msg = Paragraph::new("No problems match the current filter\n\n:nofilter clears it")
            .style(Style::default().fg(theme.fg_muted))
            .wrap(Wrap { trim: true });
        frame.render_widget(msg, inner);
        return;
    }

    let rows = list.rows(&filtered, sheet.record());
    list.clamp_selection(rows.len());

    let selected_style = selected_style(theme);

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(list.scroll_offset)
        .take(inner.height as usize)
        .map(|(index, row)| {
            let selected = index == list.selected_index;
            match row {
                ListRow::Topic { name, tally, expanded } => {
                    let icon = if *expanded { "▼" } else { "▶" };
                    let text = format!(
                        "{} {} ({}/{})",
                        icon,
                        abbreviate_topic(name, screen_width),
                        tally.completed,
                        tally.total
                    );
                    let style = if selected {
                        selected_style
                    } else if tally.total > 0 && tally.completed >= tally.total {
                        Style::default().fg(theme.success).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD)
                    };
                    Line::from(Span::styled(text, style))
                }
                ListRow::Problem { problem, completed, .. } => {
                    problem_line(problem, *completed, selected, selected_style, theme)
                }
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Link name prefixed with the digit that copies it
fn link_label(kind: LinkKind) -> String {
    let digit = LinkKind::ALL.iter().position(|&k| k == kind).map_or(0, |i| i + 1);
    format!("[{}] {:<14}", digit, kind.label())
}

fn selected_style(theme: &Theme) -> Style {
    Style::default().fg(theme.fg_primary).bg(theme.selection).add_modifier(Modifier::BOLD)
}

fn problem_line(
    problem: &Problem,
    completed: bool,
    selected: bool,
    selected_style: Style,
    theme: &Theme,
) -> Line<'static> {
    let (status, status_style) = if completed {
        (STATUS_DONE, Style::default().fg(theme.success))
    } else {
        (STATUS_OPEN, Style::default().fg(theme.fg_muted))
    };
    let title_style = if selected {
        selected_style
    } else if completed {
        Style::default().fg(theme.fg_muted).add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(theme.fg_secondary)
    };

    Line::from(vec![
        Span::raw("   "),
        Span::styled(format!("{} ", status), status_style),
        Span::styled(problem.title.clone(), title_style),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", problem.difficulty),
            Style::default().fg(theme.difficulty(problem.difficulty)),
        ),
    ])
}

fn draw_details(frame: &mut Frame, area: Rect, problem: &Problem, completed: bool, theme: &Theme) {
    let label = Style::default().fg(theme.fg_muted);
    let mut lines = vec![
        Line::from(Span::styled(
            problem.title.clone(),
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Id          ", label),
            Span::styled(problem.id.clone(), Style::default().fg(theme.fg_secondary)),
        ]),
        Line::from(vec![
            Span::styled("Difficulty  ", label),
            Span::styled(
                problem.difficulty.to_string(),
                Style::default().fg(theme.difficulty(problem.difficulty)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Status      ", label),
            if completed {
                Span::styled("Completed", Style::default().fg(theme.success))
            } else {
                Span::styled("Not started", Style::default().fg(theme.warning))
            },
        ]),
        Line::default(),
    ];

    if problem.links.primary().is_none() {
        lines.push(Line::from(Span::styled("No links", label)));
    }
    for (kind, url) in problem.links.iter() {
        lines.push(Line::from(vec![
            Span::styled(link_label(kind), Style::default().fg(theme.accent_secondary)),
            Span::styled(url.to_string(), Style::default().fg(theme.info)),
        ]));
    }
    if problem.links.primary().is_some() {
        lines.push(Line::from(Span::styled("y or 1-4 copies a link", label)));
    }

    if !problem.company_tags.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Companies", label)));
        let tags = problem.company_tags.iter().cloned().collect::<Vec<_>>().join(", ");
        lines.push(Line::from(Span::styled(tags, Style::default().fg(theme.fg_secondary))));
    }

    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_secondary));

    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Difficulty, SourceLinks};

    fn problem() -> Problem {
        Problem {
            id: "s1p1".into(),
            title: "User Input / Output".into(),
            difficulty: Difficulty::Easy,
            links: SourceLinks::default(),
            company_tags: Default::default(),
        }
    }

    #[test]
    fn link_labels_carry_copy_digit() {
        assert_eq!(link_label(LinkKind::LeetCode), format!("[1] {:<14}", "LeetCode"));
        assert_eq!(link_label(LinkKind::YouTube), format!("[4] {:<14}", "YouTube"));
    }

    #[test]
    fn selected_rows_use_selection_color() {
        let theme = Theme::default();
        let line = problem_line(&problem(), false, true, selected_style(&theme), &theme);
        assert_eq!(line.spans[2].style.bg, Some(theme.selection));
    }

    #[test]
    fn problem_line_marks_status() {
        let theme = Theme::default();
        let selected = Style::default();

        let open = problem_line(&problem(), false, false, selected, &theme);
        assert_eq!(open.spans[1].content, format!("{} ", STATUS_OPEN));

        let done = problem_line(&problem(), true, false, selected, &theme);
        assert_eq!(done.spans[1].content, format!("{} ", STATUS_DONE));
        assert_eq!(done.spans[4].content, "[Easy]");
    }
}

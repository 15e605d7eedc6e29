//! Plain-text output for the non-interactive subcommands

use std::fmt::Write;

use crate::app::Sheet;
use crate::catalog::Difficulty;
use crate::stats::{ProgressReport, rounded_percentage};

/// Filtered problems grouped by topic, one line per problem
pub fn render_listing<B>(sheet: &Sheet<B>) -> String {
    let filtered = sheet.filtered();
    let mut out = String::new();

    if filtered.is_empty() {
        let _ = writeln!(out, "No problems match {}", sheet.filter());
        return out;
    }

    for topic in &filtered.topics {
        let _ = writeln!(out, "{}", topic.name);
        for problem in &topic.problems {
            let mark = if sheet.record().is_completed(&problem.id) { "x" } else { " " };
            let _ = write!(out, "  [{}] {:<8} {} ({})", mark, problem.id, problem.title, problem.difficulty);
            if let Some((_, url)) = problem.links.primary() {
                let _ = write!(out, "  {}", url);
            }
            out.push('\n');
        }
    }
    let _ = writeln!(out, "\n{} problems, {}", filtered.problem_count(), sheet.filter());
    out
}

/// Human-readable progress summary
pub fn render_stats(report: &ProgressReport) -> String {
    let mut out = String::new();
    let band = report.motivation();

    let _ = writeln!(
        out,
        "{}% complete ({} of {}, {} remaining)",
        report.rounded_percentage(),
        report.completed,
        report.total,
        report.remaining()
    );
    let _ = writeln!(out, "{}\n", band.title());

    let _ = writeln!(out, "By difficulty");
    for difficulty in Difficulty::ALL {
        let tally = report.difficulty(difficulty);
        let _ = writeln!(out, "  {:<8} {:>4}/{:<4}", difficulty.label(), tally.completed, tally.total);
    }

    let _ = writeln!(out, "\nBy topic");
    for topic in &report.by_topic {
        let _ = writeln!(
            out,
            "  {:<24} {:>4}/{:<4} {:>3}%",
            topic.name,
            topic.tally.completed,
            topic.tally.total,
            rounded_percentage(topic.tally.percentage())
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_catalog;
    use crate::progress::{DEFAULT_STORAGE_KEY, MemoryBackend};
    use pretty_assertions::assert_eq;

    const SHEET: &str = r#"{"sheetData":[
        {"head_step_no":"Arrays","topics":[
            {"id":"a1","title":"Two Sum","difficulty":0,"lc_link":"https://lc/two-sum"},
            {"id":"a2","title":"Kadane","difficulty":1}
        ]}
    ]}"#;

    async fn sheet() -> Sheet<MemoryBackend> {
        Sheet::open(parse_catalog(SHEET).unwrap(), MemoryBackend::new(), DEFAULT_STORAGE_KEY).await
    }

    #[tokio::test]
    async fn listing_marks_completed_problems() {
        let mut sheet = sheet().await;
        let _ = sheet.toggle("a1").await;

        let listing = render_listing(&sheet);
        assert!(listing.starts_with("Arrays\n"));
        assert!(listing.contains("  [x] a1       Two Sum (Easy)  https://lc/two-sum\n"));
        assert!(listing.contains("  [ ] a2       Kadane (Medium)\n"));
        assert!(listing.contains("2 problems, all problems"));
    }

    #[tokio::test]
    async fn listing_reports_empty_filter() {
        let mut sheet = sheet().await;
        sheet.filter_mut().difficulty = Some(Difficulty::Hard);
        assert_eq!(render_listing(&sheet), "No problems match difficulty=Hard\n");
    }

    #[tokio::test]
    async fn corrupt_progress_reports_zero_of_total() {
        let backend = MemoryBackend::new();
        backend.insert_raw(DEFAULT_STORAGE_KEY, "{garbage");
        let sheet =
            Sheet::open(parse_catalog(SHEET).unwrap(), backend, DEFAULT_STORAGE_KEY).await;

        let stats = render_stats(sheet.report());
        assert!(stats.starts_with("0% complete (0 of 2, 2 remaining)\n"));
        assert!(render_listing(&sheet).contains("  [ ] a1 "));
    }

    #[tokio::test]
    async fn stats_summarize_progress() {
        let mut sheet = sheet().await;
        let _ = sheet.toggle("a2").await;

        let stats = render_stats(sheet.report());
        assert!(stats.starts_with("50% complete (1 of 2, 1 remaining)\n"));
        assert!(stats.contains("You're making great progress!"));
        assert!(stats.contains("  Arrays                      1/2     50%"));
    }
}

//! Progress aggregation over the catalog and a completion snapshot

use std::collections::HashMap;

use serde::Serialize;

use super::motivation::MotivationBand;
use crate::catalog::{Catalog, Difficulty};
use crate::progress::CompletionRecord;

/// A completed/total pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub completed: usize,
    pub total: usize,
}

impl Tally {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// Completed fraction in `0.0..=1.0` for a consistent tally, 0 when empty
    pub fn ratio(&self) -> f64 {
        if self.total == 0 { 0.0 } else { self.completed as f64 / self.total as f64 }
    }

    pub fn percentage(&self) -> f64 {
        progress_percentage(self.completed, self.total)
    }

    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }

    fn count(&mut self, completed: bool) {
        self.total += 1;
        if completed {
            self.completed += 1;
        }
    }
}

/// Stats for one topic name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicStats {
    pub name: String,
    pub tally: Tally,
}

/// Everything the progress screens need, computed in one pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    pub total: usize,
    /// Size of the completion record, orphan ids included
    pub completed: usize,
    pub percentage: f64,
    /// One entry per distinct topic name, in first-appearance order
    pub by_topic: Vec<TopicStats>,
    /// Indexed by [`Difficulty::index`]
    pub by_difficulty: [Tally; 3],
}

impl ProgressReport {
    pub fn compute(catalog: &Catalog, record: &CompletionRecord) -> Self {
        let total = total_count(catalog);
        let completed = completed_count(record);

        Self {
            total,
            completed,
            percentage: progress_percentage(completed, total),
            by_topic: per_topic_stats(catalog, record),
            by_difficulty: per_difficulty_stats(catalog, record),
        }
    }

    pub fn topic(&self, name: &str) -> Option<&Tally> {
        self.by_topic.iter().find(|t| t.name == name).map(|t| &t.tally)
    }

    pub fn difficulty(&self, difficulty: Difficulty) -> Tally {
        self.by_difficulty[difficulty.index()]
    }

    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }

    /// Percentage rounded for display
    pub fn rounded_percentage(&self) -> u32 {
        rounded_percentage(self.percentage)
    }

    pub fn motivation(&self) -> MotivationBand {
        MotivationBand::from_percentage(self.percentage)
    }
}

/// Number of problems in the catalog
pub fn total_count(catalog: &Catalog) -> usize {
    catalog.problem_count()
}

/// Number of completed ids. This is the record's cardinality and may include
/// ids the catalog no longer has.
pub fn completed_count(record: &CompletionRecord) -> usize {
    record.len()
}

/// `completed / total * 100`, or 0 for an empty catalog
pub fn progress_percentage(completed: usize, total: usize) -> f64 {
    if total == 0 { 0.0 } else { completed as f64 / total as f64 * 100.0 }
}

/// Round half away from zero, clamping negatives and NaN to 0
pub fn rounded_percentage(percentage: f64) -> u32 {
    if percentage.is_nan() || percentage <= 0.0 { 0 } else { percentage.round() as u32 }
}

/// Completion per topic name. Sections sharing a name share a bucket.
pub fn per_topic_stats(catalog: &Catalog, record: &CompletionRecord) -> Vec<TopicStats> {
    let mut stats: Vec<TopicStats> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for section in &catalog.sections {
        let slot = *index.entry(section.name.as_str()).or_insert_with(|| {
            stats.push(TopicStats { name: section.name.clone(), tally: Tally::default() });
            stats.len() - 1
        });

        for problem in &section.problems {
            stats[slot].tally.count(record.is_completed(&problem.id));
        }
    }

    stats
}

/// Completion per difficulty, indexed by [`Difficulty::index`]
pub fn per_difficulty_stats(catalog: &Catalog, record: &CompletionRecord) -> [Tally; 3] {
    let mut stats = [Tally::default(); 3];
    for (_, problem) in catalog.problems() {
        stats[problem.difficulty.index()].count(record.is_completed(&problem.id));
    }
    stats
}

//! Problem filtering
//!
//! A filter is the conjunction of a company query, a source link kind and a
//! difficulty. Topics left with no problems are dropped from the result.

use std::collections::HashMap;
use std::fmt;

use crate::catalog::{Catalog, Difficulty, LinkKind, Problem};

/// Active filter state. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemFilter {
    /// Case-insensitive substring matched against company tags
    pub company: String,
    pub source: Option<LinkKind>,
    pub difficulty: Option<Difficulty>,
}

impl ProblemFilter {
    /// True when any part of the filter narrows the list
    pub fn is_active(&self) -> bool {
        !self.company.is_empty() || self.source.is_some() || self.difficulty.is_some()
    }

    pub fn matches(&self, problem: &Problem) -> bool {
        problem.matches_company(&self.company)
            && self.source.is_none_or(|kind| problem.links.has(kind))
            && self.difficulty.is_none_or(|d| problem.difficulty == d)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for ProblemFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_active() {
            return f.write_str("all problems");
        }

        let mut parts = Vec::new();
        if !self.company.is_empty() {
            parts.push(format!("company~{:?}", self.company));
        }
        if let Some(kind) = self.source {
            parts.push(format!("source={}", kind));
        }
        if let Some(difficulty) = self.difficulty {
            parts.push(format!("difficulty={}", difficulty));
        }
        f.write_str(&parts.join(", "))
    }
}

/// A topic with its matching problems
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredTopic<'a> {
    pub name: &'a str,
    pub problems: Vec<&'a Problem>,
}

/// Filter result, topics in first-appearance order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredCatalog<'a> {
    pub topics: Vec<FilteredTopic<'a>>,
}

impl<'a> FilteredCatalog<'a> {
    pub fn topic(&self, name: &str) -> Option<&FilteredTopic<'a>> {
        self.topics.iter().find(|t| t.name == name)
    }

    pub fn problem_count(&self) -> usize {
        self.topics.iter().map(|t| t.problems.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

/// Apply `filter` to every section. Sections sharing a name are merged, and
/// topics with no matches are omitted.
pub fn filter_problems<'a>(catalog: &'a Catalog, filter: &ProblemFilter) -> FilteredCatalog<'a> {
    let mut topics: Vec<FilteredTopic<'a>> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for section in &catalog.sections {
        let matching: Vec<&'a Problem> =
            section.problems.iter().filter(|p| filter.matches(p)).collect();
        if matching.is_empty() {
            continue;
        }

        match index.get(section.name.as_str()) {
            Some(&slot) => topics[slot].problems.extend(matching),
            None => {
                index.insert(section.name.as_str(), topics.len());
                topics.push(FilteredTopic { name: section.name.as_str(), problems: matching });
            }
        }
    }

    FilteredCatalog { topics }
}

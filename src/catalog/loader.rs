//! Catalog parsing
//!
//! Reads the sheet JSON format:
//!
//! ```text
//! { "sheetData": [ { "head_step_no": "...", "topics": [ { "id", "title",
//!   "difficulty": 0|1|2, "lc_link"?, "gfg_link"?, "cs_link"?, "yt_link"?,
//!   "company_tags"?: "[\"Amazon\", ...]" } ] } ] }
//! ```
//!
//! Structural problems fail the whole load. `company_tags` is an embedded JSON
//! string and is parsed leniently.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::model::{Catalog, Difficulty, Problem, SourceLinks, TopicSection};

/// The sheet bundled into the binary
const BUNDLED_SHEET: &str = include_str!("../../data/sheet.json");

/// Errors raised when the catalog violates its structural assumptions
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Catalog is not valid JSON or has the wrong shape
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// A section has no `topics` array
    #[error("Section '{section}' has no topics array")]
    MissingTopics { section: String },

    /// A difficulty code outside 0..=2
    #[error("Problem '{id}' has invalid difficulty {value}")]
    InvalidDifficulty { id: String, value: i64 },

    /// A problem with an empty id
    #[error("Problem '{title}' in section '{section}' has an empty id")]
    EmptyId { section: String, title: String },

    /// The same id appears twice
    #[error("Problem id '{id}' appears more than once")]
    DuplicateId { id: String },
}

#[derive(Debug, Deserialize)]
struct RawSheet {
    #[serde(rename = "sheetData")]
    sheet_data: Vec<RawSection>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    head_step_no: String,
    topics: Option<Vec<RawProblem>>,
}

#[derive(Debug, Deserialize)]
struct RawProblem {
    id: String,
    title: String,
    difficulty: i64,
    lc_link: Option<String>,
    gfg_link: Option<String>,
    cs_link: Option<String>,
    yt_link: Option<String>,
    company_tags: Option<String>,
}

/// Parse the bundled catalog
pub fn bundled() -> Result<Catalog, CatalogError> {
    parse_catalog(BUNDLED_SHEET)
}

/// Read and parse a catalog file
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|source| CatalogError::Io { path: path.display().to_string(), source })?;
    parse_catalog(&contents)
}

/// Parse catalog JSON and validate it
pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    let raw: RawSheet = serde_json::from_str(json)?;

    let mut seen_ids = HashSet::new();
    let mut sections = Vec::with_capacity(raw.sheet_data.len());

    for raw_section in raw.sheet_data {
        let Some(raw_problems) = raw_section.topics else {
            return Err(CatalogError::MissingTopics { section: raw_section.head_step_no });
        };

        let mut problems = Vec::with_capacity(raw_problems.len());
        for raw_problem in raw_problems {
            let problem = convert_problem(raw_problem, &raw_section.head_step_no)?;
            if !seen_ids.insert(problem.id.clone()) {
                return Err(CatalogError::DuplicateId { id: problem.id });
            }
            problems.push(problem);
        }

        sections.push(TopicSection { name: raw_section.head_step_no, problems });
    }

    let catalog = Catalog::new(sections);
    for name in catalog.repeated_topic_names() {
        tracing::warn!("Topic '{}' appears in several sections; its stats will be merged", name);
    }
    tracing::debug!(
        sections = catalog.sections.len(),
        problems = catalog.problem_count(),
        "Catalog loaded"
    );

    Ok(catalog)
}

fn convert_problem(raw: RawProblem, section: &str) -> Result<Problem, CatalogError> {
    let id = raw.id.trim().to_string();
    if id.is_empty() {
        return Err(CatalogError::EmptyId { section: section.to_string(), title: raw.title });
    }

    let difficulty = u8::try_from(raw.difficulty)
        .ok()
        .and_then(Difficulty::from_code)
        .ok_or(CatalogError::InvalidDifficulty { id: id.clone(), value: raw.difficulty })?;

    let company_tags = parse_company_tags(&id, raw.company_tags.as_deref());

    Ok(Problem {
        id,
        title: raw.title,
        difficulty,
        links: SourceLinks {
            leetcode: non_empty(raw.lc_link),
            gfg: non_empty(raw.gfg_link),
            coding_ninjas: non_empty(raw.cs_link),
            youtube: non_empty(raw.yt_link),
        },
        company_tags,
    })
}

/// Blank links are treated as missing
fn non_empty(link: Option<String>) -> Option<String> {
    link.map(|l| l.trim().to_string()).filter(|l| !l.is_empty())
}

/// Parse the embedded JSON tag list; anything malformed yields no tags
fn parse_company_tags(id: &str, raw: Option<&str>) -> BTreeSet<String> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return BTreeSet::new();
    };

    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(tags) => {
            tags.into_iter().map(|t| t.trim().to_string()).filter(|t| !t.is_empty()).collect()
        }
        Err(e) => {
            tracing::debug!("Ignoring malformed company_tags on '{}': {}", id, e);
            BTreeSet::new()
        }
    }
}

//! Catalog model
//!
//! The catalog is read-only reference data: it is parsed once at startup and
//! never mutated afterwards.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Problem difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties in display order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Map the catalog's numeric code (0, 1, 2)
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Difficulty::Easy),
            1 => Some(Difficulty::Medium),
            2 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Position in [`Difficulty::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" => Ok(Difficulty::Easy),
            "medium" | "m" => Ok(Difficulty::Medium),
            "hard" | "h" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}' (expected easy, medium or hard)", other)),
        }
    }
}

/// The kind of an external source link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    LeetCode,
    Gfg,
    CodingNinjas,
    YouTube,
}

impl LinkKind {
    pub const ALL: [LinkKind; 4] =
        [LinkKind::LeetCode, LinkKind::Gfg, LinkKind::CodingNinjas, LinkKind::YouTube];

    pub fn label(self) -> &'static str {
        match self {
            LinkKind::LeetCode => "LeetCode",
            LinkKind::Gfg => "GFG",
            LinkKind::CodingNinjas => "Coding Ninjas",
            LinkKind::YouTube => "YouTube",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "leetcode" | "lc" => Ok(LinkKind::LeetCode),
            "gfg" | "geeksforgeeks" => Ok(LinkKind::Gfg),
            "codingninjas" | "coding-ninjas" | "cs" => Ok(LinkKind::CodingNinjas),
            "youtube" | "yt" => Ok(LinkKind::YouTube),
            other => Err(format!(
                "unknown source '{}' (expected leetcode, gfg, codingninjas or youtube)",
                other
            )),
        }
    }
}

/// External links for a problem. Absent links are `None`, never empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLinks {
    pub leetcode: Option<String>,
    pub gfg: Option<String>,
    pub coding_ninjas: Option<String>,
    pub youtube: Option<String>,
}

impl SourceLinks {
    /// Get the link of a given kind
    pub fn get(&self, kind: LinkKind) -> Option<&str> {
        match kind {
            LinkKind::LeetCode => self.leetcode.as_deref(),
            LinkKind::Gfg => self.gfg.as_deref(),
            LinkKind::CodingNinjas => self.coding_ninjas.as_deref(),
            LinkKind::YouTube => self.youtube.as_deref(),
        }
    }

    pub fn has(&self, kind: LinkKind) -> bool {
        self.get(kind).is_some()
    }

    /// Present links in display order
    pub fn iter(&self) -> impl Iterator<Item = (LinkKind, &str)> {
        LinkKind::ALL.into_iter().filter_map(|kind| self.get(kind).map(|url| (kind, url)))
    }

    /// The first practice link, falling back to the video
    pub fn primary(&self) -> Option<(LinkKind, &str)> {
        self.iter().next()
    }

    /// The link of `kind`, or the primary link when no kind is given
    pub fn pick(&self, kind: Option<LinkKind>) -> Option<(LinkKind, &str)> {
        match kind {
            Some(kind) => self.get(kind).map(|url| (kind, url)),
            None => self.primary(),
        }
    }
}

/// A single practice problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub links: SourceLinks,
    pub company_tags: BTreeSet<String>,
}

impl Problem {
    /// Case-insensitive substring match against any company tag.
    /// An empty query matches every problem. Whitespace in the query counts.
    pub fn matches_company(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query_lower = query.to_lowercase();
        self.company_tags.iter().any(|tag| tag.to_lowercase().contains(&query_lower))
    }
}

/// A named group of problems, in catalog order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSection {
    pub name: String,
    pub problems: Vec<Problem>,
}

/// The whole problem sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub sections: Vec<TopicSection>,
}

impl Catalog {
    pub fn new(sections: Vec<TopicSection>) -> Self {
        Self { sections }
    }

    /// Total number of problems across all sections
    pub fn problem_count(&self) -> usize {
        self.sections.iter().map(|s| s.problems.len()).sum()
    }

    /// Iterate every problem with its section name, in catalog order
    pub fn problems(&self) -> impl Iterator<Item = (&str, &Problem)> {
        self.sections
            .iter()
            .flat_map(|s| s.problems.iter().map(move |p| (s.name.as_str(), p)))
    }

    /// Find a problem by id
    pub fn find_problem(&self, id: &str) -> Option<&Problem> {
        self.problems().map(|(_, p)| p).find(|p| p.id == id)
    }

    /// Section names that occur more than once, in first-appearance order
    pub fn repeated_topic_names(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        let mut repeated = Vec::new();
        for section in &self.sections {
            let name = section.name.as_str();
            if !seen.insert(name) && !repeated.contains(&name) {
                repeated.push(name);
            }
        }
        repeated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(id: &str, tags: &[&str]) -> Problem {
        Problem {
            id: id.into(),
            title: format!("Problem {id}"),
            difficulty: Difficulty::Easy,
            links: SourceLinks::default(),
            company_tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn difficulty_codes_map_in_order() {
        assert_eq!(Difficulty::from_code(0), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_code(1), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_code(2), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_code(3), None);
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("brutal".parse::<Difficulty>().is_err());
    }

    #[test]
    fn link_kind_parses_aliases() {
        assert_eq!("leetcode".parse::<LinkKind>(), Ok(LinkKind::LeetCode));
        assert_eq!("codingninjas".parse::<LinkKind>(), Ok(LinkKind::CodingNinjas));
        assert_eq!("yt".parse::<LinkKind>(), Ok(LinkKind::YouTube));
    }

    #[test]
    fn company_match_is_case_insensitive_substring() {
        let p = problem("p1", &["Amazon", "Google"]);
        assert!(p.matches_company("amaz"));
        assert!(p.matches_company("GOOG"));
        assert!(!p.matches_company("Meta"));
    }

    #[test]
    fn empty_company_query_matches_untagged_problem() {
        let p = problem("p1", &[]);
        assert!(p.matches_company(""));
        assert!(!p.matches_company("amazon"));
    }

    #[test]
    fn company_query_is_not_trimmed() {
        let p = problem("p1", &["Amazon", "Goldman Sachs"]);
        assert!(!p.matches_company("amazon "));
        assert!(p.matches_company("n s"));
        assert!(p.matches_company(" "));
        assert!(!problem("p2", &["Amazon"]).matches_company(" "));
    }

    #[test]
    fn pick_reaches_every_link_kind() {
        let links = SourceLinks {
            leetcode: Some("https://lc".into()),
            youtube: Some("https://yt".into()),
            ..Default::default()
        };
        assert_eq!(links.pick(None), Some((LinkKind::LeetCode, "https://lc")));
        assert_eq!(links.pick(Some(LinkKind::YouTube)), Some((LinkKind::YouTube, "https://yt")));
        assert_eq!(links.pick(Some(LinkKind::Gfg)), None);
    }

    #[test]
    fn primary_link_prefers_practice_sites() {
        let links = SourceLinks {
            gfg: Some("https://gfg".into()),
            youtube: Some("https://yt".into()),
            ..Default::default()
        };
        assert_eq!(links.primary(), Some((LinkKind::Gfg, "https://gfg")));
        assert!(!links.has(LinkKind::LeetCode));
    }

    #[test]
    fn repeated_topic_names_reports_each_once() {
        let catalog = Catalog::new(vec![
            TopicSection { name: "Arrays".into(), problems: vec![problem("a", &[])] },
            TopicSection { name: "Graphs".into(), problems: vec![] },
            TopicSection { name: "Arrays".into(), problems: vec![problem("b", &[])] },
            TopicSection { name: "Arrays".into(), problems: vec![] },
        ]);
        assert_eq!(catalog.repeated_topic_names(), vec!["Arrays"]);
        assert_eq!(catalog.problem_count(), 2);
        assert!(catalog.find_problem("b").is_some());
    }
}

//! The working sheet: catalog, completion store and filter in one place
//!
//! Screens never touch storage directly. They receive a `&Sheet` and read
//! the current snapshot, report and filtered list from it.

use crate::catalog::Catalog;
use crate::progress::{CompletionRecord, CompletionStore, KeyValueBackend, PersistenceError};
use crate::stats::{FilteredCatalog, ProblemFilter, ProgressReport, filter_problems};

/// What happened to a toggle, for status messages
#[derive(Debug)]
pub struct ToggleResult {
    pub id: String,
    pub completed: bool,
    /// The id is not in the catalog
    pub orphan: bool,
    pub error: Option<PersistenceError>,
}

pub struct Sheet<B> {
    catalog: Catalog,
    store: CompletionStore<B>,
    filter: ProblemFilter,
    report: ProgressReport,
    report_revision: u64,
}

impl<B: KeyValueBackend> Sheet<B> {
    pub fn new(catalog: Catalog, store: CompletionStore<B>) -> Self {
        let report = ProgressReport::compute(&catalog, store.snapshot());
        let report_revision = store.revision();
        Self { catalog, store, filter: ProblemFilter::default(), report, report_revision }
    }

    /// Open the completion store behind `backend` and pair it with `catalog`.
    ///
    /// Unreadable progress is logged and treated as empty. A later toggle
    /// overwrites the unreadable entry with the new record.
    pub async fn open(catalog: Catalog, backend: B, key: impl Into<String>) -> Self {
        let store = CompletionStore::open(backend, key).await;
        Self::new(catalog, store)
    }

    /// Flip completion of a problem and persist it
    pub async fn toggle(&mut self, id: &str) -> ToggleResult {
        let outcome = self.store.toggle(id).await;
        self.sync_report();

        ToggleResult {
            id: id.to_string(),
            completed: outcome.snapshot.is_completed(id),
            orphan: self.catalog.find_problem(id).is_none(),
            error: outcome.error,
        }
    }

    /// Forget all progress
    pub async fn reset(&mut self) -> Result<(), PersistenceError> {
        let outcome = self.store.clear().await;
        self.sync_report();
        outcome.into_result().map(|_| ())
    }

    /// Re-read progress from storage, replacing the in-memory snapshot
    pub async fn reload(&mut self) -> Result<(), PersistenceError> {
        let result = self.store.reload().await;
        self.sync_report();
        result
    }

    fn sync_report(&mut self) {
        if self.report_revision != self.store.revision() {
            self.report = ProgressReport::compute(&self.catalog, self.store.snapshot());
            self.report_revision = self.store.revision();
        }
    }
}

impl<B> Sheet<B> {
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn record(&self) -> &CompletionRecord {
        self.store.snapshot()
    }

    pub fn store(&self) -> &CompletionStore<B> {
        &self.store
    }

    /// Aggregate stats for the current snapshot
    pub fn report(&self) -> &ProgressReport {
        &self.report
    }

    pub fn filter(&self) -> &ProblemFilter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut ProblemFilter {
        &mut self.filter
    }

    /// Problems matching the current filter
    pub fn filtered(&self) -> FilteredCatalog<'_> {
        filter_problems(&self.catalog, &self.filter)
    }

    /// Memory holds changes storage does not
    pub fn is_diverged(&self) -> bool {
        self.store.is_diverged()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Difficulty, LinkKind, parse_catalog};
    use crate::progress::{DEFAULT_STORAGE_KEY, MemoryBackend};
    use crate::stats::Tally;

    const SHEET: &str = r#"{"sheetData":[
        {"head_step_no":"Arrays","topics":[
            {"id":"a1","title":"Two Sum","difficulty":0,"lc_link":"https://lc/two-sum","company_tags":"[\"Amazon\"]"},
            {"id":"a2","title":"Kadane","difficulty":1,"gfg_link":"https://gfg/kadane"},
            {"id":"a3","title":"Inversions","difficulty":2,"cs_link":"https://cn/inv"}
        ]},
        {"head_step_no":"Graphs","topics":[
            {"id":"g1","title":"Islands","difficulty":1,"gfg_link":"https://gfg/islands"}
        ]}
    ]}"#;

    async fn sheet(backend: MemoryBackend) -> Sheet<MemoryBackend> {
        let catalog = parse_catalog(SHEET).unwrap();
        Sheet::open(catalog, backend, DEFAULT_STORAGE_KEY).await
    }

    #[tokio::test]
    async fn toggle_updates_report() {
        let mut sheet = sheet(MemoryBackend::new()).await;
        assert_eq!(sheet.report().completed, 0);

        let result = sheet.toggle("a2").await;
        assert!(result.completed);
        assert!(!result.orphan);
        assert!(result.error.is_none());
        assert_eq!(sheet.report().completed, 1);
        assert_eq!(sheet.report().topic("Arrays"), Some(&Tally::new(1, 3)));
        assert_eq!(sheet.report().difficulty(Difficulty::Medium), Tally::new(1, 2));
    }

    #[tokio::test]
    async fn orphan_toggle_persists_without_topic_credit() {
        let backend = MemoryBackend::new();
        let mut sheet = sheet(backend.clone()).await;

        let result = sheet.toggle("p9").await;
        assert!(result.orphan);
        assert!(result.completed);
        assert_eq!(sheet.report().completed, 1);
        assert!(sheet.report().by_topic.iter().all(|t| t.tally.completed == 0));
        assert!(backend.raw(DEFAULT_STORAGE_KEY).unwrap().contains("\"p9\":true"));
    }

    #[tokio::test]
    async fn failed_toggle_is_reported_and_kept() {
        let backend = MemoryBackend::new();
        let mut sheet = sheet(backend.clone()).await;
        backend.set_fail_writes(true);

        let result = sheet.toggle("a1").await;
        assert!(result.error.is_some());
        assert!(sheet.record().is_completed("a1"));
        assert!(sheet.is_diverged());
        assert_eq!(sheet.report().completed, 1);
    }

    #[tokio::test]
    async fn reset_then_reload_is_empty() {
        let backend = MemoryBackend::new();
        let mut sheet = sheet(backend).await;
        let _ = sheet.toggle("a1").await;
        let _ = sheet.toggle("g1").await;

        sheet.reset().await.unwrap();
        sheet.reload().await.unwrap();
        assert!(sheet.record().is_empty());
        assert_eq!(sheet.report().percentage, 0.0);
    }

    #[tokio::test]
    async fn reload_picks_up_external_writes() {
        let backend = MemoryBackend::new();
        let mut sheet = sheet(backend.clone()).await;
        backend.insert_raw(DEFAULT_STORAGE_KEY, r#"{"version":1,"completed":{"g1":true}}"#);

        assert_eq!(sheet.report().completed, 0);
        sheet.reload().await.unwrap();
        assert_eq!(sheet.report().topic("Graphs"), Some(&Tally::new(1, 1)));
    }

    #[tokio::test]
    async fn corrupt_progress_opens_empty() {
        let backend = MemoryBackend::new();
        backend.insert_raw(DEFAULT_STORAGE_KEY, "{garbage");
        let catalog = parse_catalog(SHEET).unwrap();

        let sheet = Sheet::open(catalog, backend, DEFAULT_STORAGE_KEY).await;
        assert!(sheet.record().is_empty());
        assert_eq!(sheet.report().completed, 0);
        assert_eq!(sheet.report().total, 4);
        assert!(!sheet.is_diverged());
    }

    #[tokio::test]
    async fn unreadable_progress_opens_empty() {
        let backend = MemoryBackend::new();
        backend.insert_raw(DEFAULT_STORAGE_KEY, r#"{"version":1,"completed":{"a1":true}}"#);
        backend.set_fail_reads(true);
        let catalog = parse_catalog(SHEET).unwrap();

        let sheet = Sheet::open(catalog, backend, DEFAULT_STORAGE_KEY).await;
        assert_eq!(sheet.report().completed, 0);
        assert_eq!(sheet.report().total, 4);
    }

    #[tokio::test]
    async fn toggle_after_corrupt_read_replaces_entry() {
        let backend = MemoryBackend::new();
        backend.insert_raw(DEFAULT_STORAGE_KEY, "{garbage");
        let catalog = parse_catalog(SHEET).unwrap();
        let mut sheet = Sheet::open(catalog, backend.clone(), DEFAULT_STORAGE_KEY).await;

        let result = sheet.toggle("a1").await;
        assert!(result.error.is_none());
        assert_eq!(
            backend.raw(DEFAULT_STORAGE_KEY).unwrap(),
            r#"{"version":1,"completed":{"a1":true}}"#
        );
    }

    #[tokio::test]
    async fn filter_narrows_listing() {
        let mut sheet = sheet(MemoryBackend::new()).await;
        sheet.filter_mut().source = Some(LinkKind::LeetCode);

        let filtered = sheet.filtered();
        assert_eq!(filtered.problem_count(), 1);
        assert!(filtered.topic("Graphs").is_none());
    }
}

//! Change-set retrieval with truncation accounting.
//!
//! One fetch per change kind: count the unbounded total first, then pull at
//! most `max_results` rows. The truncation flag compares the cap against the
//! total count, not against the rows that came back.

use chrono::NaiveDate;
use serde::Serialize;

use crate::store::{ChangeKind, PageChange, Store, StoreError};

/// The pages matching one crawl and change kind, in stable page-url order.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeSet {
    pub pages: Vec<PageChange>,
    /// True iff a cap was supplied and more matching rows exist beyond it.
    pub truncated: bool,
    /// Unbounded count of matching rows, regardless of any cap.
    pub total_rows: u64,
}

impl ChangeSet {
    /// How many matching pages the digest is not showing.
    pub fn hidden_rows(&self) -> u64 {
        self.total_rows.saturating_sub(self.pages.len() as u64)
    }
}

/// Fetch the change set for one crawl and kind, capped at `max_results` rows
/// when supplied. A failed query propagates; there is no retry at this layer.
pub fn fetch_changes(
    store: &Store,
    crawl: NaiveDate,
    kind: ChangeKind,
    max_results: Option<usize>,
) -> Result<ChangeSet, StoreError> {
    let total_rows = store.count_changes(crawl, kind)?;
    let pages = store.page_changes(crawl, kind, max_results)?;

    let truncated = max_results.is_some_and(|max| (max as u64) < total_rows);

    Ok(ChangeSet {
        pages,
        truncated,
        total_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ChangeRecord;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn seeded_store(crawl: &str, kind: ChangeKind, count: usize) -> Store {
        let mut store = Store::open_in_memory().unwrap();
        let records: Vec<ChangeRecord> = (0..count)
            .map(|i| ChangeRecord {
                crawl: date(crawl),
                change: kind,
                page: format!("https://example.org/page-{i:02}"),
                diff: format!("-old {i}\n+new {i}"),
            })
            .collect();
        store.insert_changes(&records).unwrap();
        store
    }

    #[test]
    fn cap_truncates_and_reports_total() {
        let store = seeded_store("2024-01-08", ChangeKind::Added, 12);

        let set = fetch_changes(&store, date("2024-01-08"), ChangeKind::Added, Some(5)).unwrap();
        assert_eq!(set.pages.len(), 5);
        assert!(set.truncated);
        assert_eq!(set.total_rows, 12);
        assert_eq!(set.hidden_rows(), 7);
    }

    #[test]
    fn no_cap_returns_everything() {
        let store = seeded_store("2024-01-08", ChangeKind::Modified, 12);

        let set = fetch_changes(&store, date("2024-01-08"), ChangeKind::Modified, None).unwrap();
        assert_eq!(set.pages.len() as u64, set.total_rows);
        assert!(!set.truncated);
    }

    #[test]
    fn cap_equal_to_total_is_not_truncated() {
        let store = seeded_store("2024-01-08", ChangeKind::Added, 5);

        let set = fetch_changes(&store, date("2024-01-08"), ChangeKind::Added, Some(5)).unwrap();
        assert_eq!(set.pages.len(), 5);
        assert!(!set.truncated);
    }

    #[test]
    fn empty_category_yields_empty_set() {
        let store = seeded_store("2024-01-08", ChangeKind::Added, 3);

        let set = fetch_changes(&store, date("2024-01-08"), ChangeKind::Deleted, None).unwrap();
        assert!(set.pages.is_empty());
        assert!(!set.truncated);
        assert_eq!(set.total_rows, 0);
    }

    #[test]
    fn pages_come_back_in_url_order() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .insert_changes(&[
                ChangeRecord {
                    crawl: date("2024-01-08"),
                    change: ChangeKind::Added,
                    page: "https://example.org/zebra".to_string(),
                    diff: String::new(),
                },
                ChangeRecord {
                    crawl: date("2024-01-08"),
                    change: ChangeKind::Added,
                    page: "https://example.org/alpha".to_string(),
                    diff: String::new(),
                },
            ])
            .unwrap();

        let set = fetch_changes(&store, date("2024-01-08"), ChangeKind::Added, Some(1)).unwrap();
        assert_eq!(set.pages[0].page, "https://example.org/alpha");
        assert!(set.truncated);
        assert_eq!(set.total_rows, 2);
    }

    #[test]
    fn diff_payload_passes_through_verbatim() {
        let mut store = Store::open_in_memory().unwrap();
        let diff = "--- a\n+++ b\n-removed line\n+added line";
        store
            .insert_changes(&[ChangeRecord {
                crawl: date("2024-01-08"),
                change: ChangeKind::Modified,
                page: "https://example.org/p".to_string(),
                diff: diff.to_string(),
            }])
            .unwrap();

        let set = fetch_changes(&store, date("2024-01-08"), ChangeKind::Modified, None).unwrap();
        assert_eq!(set.pages[0].diff, diff);
    }
}

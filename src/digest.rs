//! Digest assembly.
//!
//! Resolves the crawl pair once, then fetches each change kind against the
//! resolved current crawl. The exclude filter drops uninteresting pages from
//! the digest body after fetching; totals and the truncation flag still
//! describe the unfiltered store contents.

use chrono::NaiveDate;
use regex::RegexSet;
use serde::Serialize;
use thiserror::Error;

use crate::store::fetch::{fetch_changes, ChangeSet};
use crate::store::resolve::{resolve_crawl_pair, ResolveError};
use crate::store::{ChangeKind, Store, StoreError};

/// Everything the renderer needs for one change digest.
#[derive(Debug, Serialize)]
pub struct Digest {
    pub current: NaiveDate,
    pub previous: NaiveDate,
    pub added: ChangeSet,
    pub deleted: ChangeSet,
    pub modified: ChangeSet,
}

impl Digest {
    /// True when no page changed in any category between the two crawls.
    pub fn is_empty(&self) -> bool {
        self.added.total_rows == 0 && self.deleted.total_rows == 0 && self.modified.total_rows == 0
    }
}

#[derive(Debug, Error)]
pub enum DigestError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Drops pages whose url matches any configured exclude pattern. Routine
/// churn (news indexes, meeting calendars) would otherwise drown out the
/// changes worth reading about.
pub struct PageFilter {
    excludes: Option<RegexSet>,
}

impl PageFilter {
    /// A filter that keeps everything.
    pub fn keep_all() -> Self {
        PageFilter { excludes: None }
    }

    pub fn from_patterns(patterns: &[String]) -> Result<Self, regex::Error> {
        if patterns.is_empty() {
            return Ok(PageFilter::keep_all());
        }
        Ok(PageFilter {
            excludes: Some(RegexSet::new(patterns)?),
        })
    }

    pub fn is_interesting(&self, page: &str) -> bool {
        match &self.excludes {
            Some(set) => !set.is_match(page),
            None => true,
        }
    }

    fn apply(&self, set: &mut ChangeSet) {
        if self.excludes.is_some() {
            set.pages.retain(|p| self.is_interesting(&p.page));
        }
    }
}

/// Build the digest for the crawl pair resolved from `target` (absent target
/// means the latest pair). One fetch per change kind, each capped at
/// `max_results` rows.
pub fn build(
    store: &Store,
    target: Option<NaiveDate>,
    max_results: Option<usize>,
    filter: &PageFilter,
) -> Result<Digest, DigestError> {
    let pair = resolve_crawl_pair(store, target)?;

    let mut added = fetch_changes(store, pair.current, ChangeKind::Added, max_results)?;
    let mut deleted = fetch_changes(store, pair.current, ChangeKind::Deleted, max_results)?;
    let mut modified = fetch_changes(store, pair.current, ChangeKind::Modified, max_results)?;

    filter.apply(&mut added);
    filter.apply(&mut deleted);
    filter.apply(&mut modified);

    Ok(Digest {
        current: pair.current,
        previous: pair.previous,
        added,
        deleted,
        modified,
    })
}

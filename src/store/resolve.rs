//! Crawl-pair resolution.
//!
//! A digest compares the two most recent crawl snapshots. Resolution asks the
//! store for the two newest distinct crawl dates at or before an optional
//! target and pairs them up. Failure kinds are distinct so callers can tell
//! "not enough snapshots" apart from "that date was never crawled".

use chrono::NaiveDate;
use thiserror::Error;

use crate::store::{Store, StoreError};

/// Two temporally adjacent crawl snapshots, `previous` strictly older than
/// `current`. Adjacency comes from the store's distinct/descending query:
/// no crawl date exists strictly between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CrawlPair {
    pub current: NaiveDate,
    pub previous: NaiveDate,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The store holds fewer than two crawl dates matching the filter, so
    /// there is no previous snapshot to diff against.
    #[error("need at least two crawls to compare, found {found}")]
    NotEnoughCrawls { found: usize },

    /// A concrete target was requested but the newest crawl at or before it
    /// is a different date. Substituting the nearest date would attribute the
    /// digest to a crawl that never happened, so this fails loudly instead.
    #[error("{requested} is not a crawl date (closest earlier crawl: {resolved})")]
    TargetNotCrawled {
        requested: NaiveDate,
        resolved: NaiveDate,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolve the crawl pair to digest: the two most recent distinct crawl dates
/// at or before `target`, or the two most recent overall when `target` is
/// absent. Row 0 of the descending query becomes `current`, row 1 `previous`.
pub fn resolve_crawl_pair(
    store: &Store,
    target: Option<NaiveDate>,
) -> Result<CrawlPair, ResolveError> {
    let dates = store.distinct_crawl_dates(target, Some(2))?;

    if dates.len() < 2 {
        return Err(ResolveError::NotEnoughCrawls { found: dates.len() });
    }

    let pair = CrawlPair {
        current: dates[0],
        previous: dates[1],
    };

    // round-trip check: a concrete target must itself be a crawl date
    if let Some(requested) = target {
        if pair.current != requested {
            return Err(ResolveError::TargetNotCrawled {
                requested,
                resolved: pair.current,
            });
        }
    }

    Ok(pair)
}

//! Library entry points for the sitewatch change digest tool.
//!
//! The crawl pipeline writes per-page change records into a SQLite store;
//! sitewatch resolves the two most recent crawl snapshots and renders what
//! changed between them.

pub mod cli;
pub mod config;
pub mod date;
pub mod digest;
pub mod report;
pub mod store;
pub mod util;

pub use digest::{Digest, DigestError};
pub use store::fetch::ChangeSet;
pub use store::resolve::{CrawlPair, ResolveError};
pub use store::{ChangeKind, ChangeRecord, PageChange, Store, StoreError};

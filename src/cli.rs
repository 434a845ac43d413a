use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::store::ChangeKind;

#[derive(Parser)]
#[command(name = "sitewatch")]
#[command(about = "Change digests for a monitored website")]
#[command(version)]
pub struct Cli {
    /// Path to the change database (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the change digest for the most recent crawl pair
    Digest(DigestArgs),

    /// List every page with one kind of change in a crawl
    Changes(ChangesArgs),

    /// List the crawl dates present in the store, newest first
    Dates,

    /// Load change records produced by the crawl pipeline
    Import(ImportArgs),
}

#[derive(Parser)]
pub struct DigestArgs {
    /// Crawl date to digest (YYYY-MM-DD, defaults to the latest crawl)
    #[arg(long)]
    pub date: Option<String>,

    /// Cap on pages shown per change kind
    #[arg(long)]
    pub max_results: Option<usize>,

    /// Output as JSON instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Show diagnostics
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

#[derive(Parser)]
pub struct ChangesArgs {
    /// Crawl date (YYYY-MM-DD)
    pub date: String,

    /// Which change kind to list
    #[arg(value_enum)]
    pub kind: ChangeKind,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// JSON file holding an array of {crawl, change, page, diff} records
    pub file: PathBuf,
}

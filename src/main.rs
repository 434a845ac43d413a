use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;

use sitewatch::cli::{Cli, Command};
use sitewatch::config::{Config, FileConfig};
use sitewatch::date::parse_crawl_date;
use sitewatch::digest::{self, DigestError, PageFilter};
use sitewatch::report;
use sitewatch::store::fetch::fetch_changes;
use sitewatch::store::resolve::{resolve_crawl_pair, ResolveError};
use sitewatch::store::{ChangeRecord, Store};

fn open_store(db_path: Option<&PathBuf>) -> Store {
    let result = match db_path {
        Some(path) => Store::open(path),
        None => Store::open_default(),
    };

    match result {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error opening change database: {e}");
            exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let file_config = match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error reading config file: {e}");
            exit(1);
        }
    };

    let db_path = cli.db.or(file_config.db_path.clone());

    match cli.command {
        Command::Digest(args) => {
            let config = Config::from_digest_args(&args, file_config, db_path);
            let store = open_store(config.db_path.as_ref());

            let mut diagnostics = Vec::new();
            let target = parse_crawl_date(args.date.as_deref(), &mut diagnostics);
            // a malformed --date degrades to "latest crawl" rather than failing
            for diagnostic in &diagnostics {
                eprintln!("[diagnostic] {diagnostic}");
            }

            let filter = match PageFilter::from_patterns(&config.exclude) {
                Ok(filter) => filter,
                Err(e) => {
                    eprintln!("Invalid exclude pattern in config: {e}");
                    exit(1);
                }
            };

            match digest::build(&store, target, config.max_results, &filter) {
                Ok(digest) => report::print(&digest, &config),
                Err(DigestError::Resolve(ResolveError::Store(e))) => {
                    eprintln!("Error querying change database: {e}");
                    exit(1);
                }
                Err(DigestError::Resolve(e)) => {
                    // no valid pair to diff; skip cleanly rather than emit a
                    // digest attributed to the wrong crawl
                    eprintln!("Skipping digest: {e}");
                    exit(1);
                }
                Err(DigestError::Store(e)) => {
                    eprintln!("Error querying change database: {e}");
                    exit(1);
                }
            }
        }
        Command::Changes(args) => {
            let store = open_store(db_path.as_ref());

            let mut diagnostics = Vec::new();
            let Some(date) = parse_crawl_date(Some(&args.date), &mut diagnostics) else {
                for diagnostic in &diagnostics {
                    eprintln!("{diagnostic}");
                }
                exit(1);
            };

            // validates that the date is a real crawl with a predecessor
            let pair = match resolve_crawl_pair(&store, Some(date)) {
                Ok(pair) => pair,
                Err(e) => {
                    eprintln!("Cannot resolve crawl {date}: {e}");
                    exit(1);
                }
            };

            match fetch_changes(&store, pair.current, args.kind, None) {
                Ok(set) => {
                    if args.json {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&set)
                                .unwrap_or_else(|_| String::from("{}"))
                        );
                    } else {
                        print!("{}", report::text::render_detail(pair.current, args.kind, &set));
                    }
                }
                Err(e) => {
                    eprintln!("Error fetching changes: {e}");
                    exit(1);
                }
            }
        }
        Command::Dates => {
            let store = open_store(db_path.as_ref());

            match store.distinct_crawl_dates(None, None) {
                Ok(dates) => {
                    if dates.is_empty() {
                        println!("No crawls recorded. Run 'sitewatch import' first.");
                    } else {
                        for date in dates {
                            println!("{date}");
                        }
                    }
                }
                Err(e) => {
                    eprintln!("Error listing crawl dates: {e}");
                    exit(1);
                }
            }
        }
        Command::Import(args) => {
            let mut store = open_store(db_path.as_ref());

            let file = match File::open(&args.file) {
                Ok(file) => file,
                Err(e) => {
                    eprintln!("Cannot open {}: {e}", args.file.display());
                    exit(1);
                }
            };

            let records: Vec<ChangeRecord> = match serde_json::from_reader(BufReader::new(file)) {
                Ok(records) => records,
                Err(e) => {
                    eprintln!("Cannot parse {}: {e}", args.file.display());
                    exit(1);
                }
            };

            match store.insert_changes(&records) {
                Ok(count) => println!("imported {count} change records"),
                Err(e) => {
                    eprintln!("Error importing change records: {e}");
                    exit(1);
                }
            }
        }
    }
}

//! Plain-text digest rendering.
//!
//! One section per change kind:
//! - new pages carry a Wayback Machine link dated just after the crawl
//! - modified pages show their diff payload indented below the url
//! - truncated sections end with an "N more ... not shown" notice

use chrono::NaiveDate;

use crate::digest::Digest;
use crate::store::fetch::ChangeSet;
use crate::store::ChangeKind;
use crate::util::{web_archive, without_origin};

pub fn render(digest: &Digest) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Website changes from {} to {}\n",
        digest.previous, digest.current
    ));

    if digest.is_empty() {
        output.push_str("\nNo changes detected between these crawls.\n");
        return output;
    }

    // archive links only make sense for pages that exist in the new crawl
    render_section(
        &mut output,
        ChangeKind::Added,
        &digest.added,
        Some(digest.current),
    );
    render_section(&mut output, ChangeKind::Deleted, &digest.deleted, None);
    render_section(&mut output, ChangeKind::Modified, &digest.modified, None);

    output
}

/// Full listing for a single change kind, used by the `changes` subcommand.
pub fn render_detail(current: NaiveDate, kind: ChangeKind, set: &ChangeSet) -> String {
    let mut output = String::new();
    output.push_str(&format!("{} pages in the {} crawl\n", kind.label(), current));
    let archive_date = matches!(kind, ChangeKind::Added).then_some(current);
    render_section(&mut output, kind, set, archive_date);
    output
}

fn render_section(
    output: &mut String,
    kind: ChangeKind,
    set: &ChangeSet,
    archive_date: Option<NaiveDate>,
) {
    if set.total_rows == 0 {
        return;
    }

    output.push_str(&format!("\n{} pages ({}):\n", kind.label(), set.total_rows));

    for page in &set.pages {
        output.push_str(&format!("  {}\n", without_origin(&page.page)));

        if archive_date.is_some() {
            output.push_str(&format!(
                "    archived: {}\n",
                web_archive(&page.page, archive_date)
            ));
        }

        if matches!(kind, ChangeKind::Modified) && !page.diff.is_empty() {
            for line in page.diff.lines() {
                output.push_str(&format!("    {line}\n"));
            }
        }
    }

    if set.truncated {
        output.push_str(&format!(
            "  ({} more {} pages not shown)\n",
            set.hidden_rows(),
            kind.label()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PageChange;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn page(url: &str, diff: &str) -> PageChange {
        PageChange {
            page: url.to_string(),
            diff: diff.to_string(),
        }
    }

    fn digest() -> Digest {
        Digest {
            current: date("2024-01-08"),
            previous: date("2024-01-01"),
            added: ChangeSet {
                pages: vec![page("https://example.org/a", "")],
                truncated: true,
                total_rows: 4,
            },
            deleted: ChangeSet {
                pages: vec![],
                truncated: false,
                total_rows: 0,
            },
            modified: ChangeSet {
                pages: vec![page("https://example.org/d", "-old\n+new")],
                truncated: false,
                total_rows: 1,
            },
        }
    }

    #[test]
    fn header_names_both_crawls() {
        let out = render(&digest());
        assert!(out.starts_with("Website changes from 2024-01-01 to 2024-01-08\n"));
    }

    #[test]
    fn truncated_section_reports_hidden_count() {
        let out = render(&digest());
        assert!(out.contains("new pages (4):"));
        assert!(out.contains("(3 more new pages not shown)"));
    }

    #[test]
    fn empty_section_is_omitted() {
        let out = render(&digest());
        assert!(!out.contains("removed pages"));
    }

    #[test]
    fn added_pages_link_to_the_archive() {
        let out = render(&digest());
        assert!(out.contains("archived: https://web.archive.org/web/20240109000000/https://example.org/a"));
    }

    #[test]
    fn modified_pages_show_their_diff_indented() {
        let out = render(&digest());
        assert!(out.contains("  /d\n    -old\n    +new\n"));
    }

    #[test]
    fn no_changes_message_when_empty() {
        let mut d = digest();
        d.added = ChangeSet {
            pages: vec![],
            truncated: false,
            total_rows: 0,
        };
        d.modified = ChangeSet {
            pages: vec![],
            truncated: false,
            total_rows: 0,
        };
        let out = render(&d);
        assert!(out.contains("No changes detected between these crawls."));
    }

    #[test]
    fn detail_listing_names_the_kind_and_crawl() {
        let set = ChangeSet {
            pages: vec![page("https://example.org/x", "")],
            truncated: false,
            total_rows: 1,
        };
        let out = render_detail(date("2024-01-08"), ChangeKind::Deleted, &set);
        assert!(out.starts_with("removed pages in the 2024-01-08 crawl\n"));
        assert!(out.contains("  /x\n"));
    }
}

//! URL helpers for digest rendering.

use chrono::NaiveDate;
use url::Url;

/// Strip the scheme and host from a page url, keeping path and query. Every
/// page in a digest shares one origin, so repeating it is noise. Anything
/// that does not parse as an absolute url is returned unchanged.
pub fn without_origin(page: &str) -> String {
    match Url::parse(page) {
        Ok(url) => match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        },
        Err(_) => page.to_string(),
    }
}

/// Wayback Machine link for a page. With a crawl date, point at the day after
/// the crawl so the archive picks the capture closest to it; without one,
/// `*` lands on the archive's calendar view.
pub fn web_archive(page: &str, latest_date: Option<NaiveDate>) -> String {
    let date_param = match latest_date {
        Some(date) => {
            let day_after = date.succ_opt().unwrap_or(date);
            format!("{}000000", day_after.format("%Y%m%d"))
        }
        None => "*".to_string(),
    };
    format!("https://web.archive.org/web/{date_param}/{page}")
}

//! JSON output for digests.
//!
//! Serializes the full Digest (crawl pair, per-kind change sets, truncation
//! flags and totals) for scripting and piping.

use crate::digest::Digest;

pub fn render(digest: &Digest) -> String {
    serde_json::to_string_pretty(digest).unwrap_or_else(|_| String::from("{}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fetch::ChangeSet;

    #[test]
    fn json_carries_dates_and_truncation() {
        let digest = Digest {
            current: "2024-01-08".parse().unwrap(),
            previous: "2024-01-01".parse().unwrap(),
            added: ChangeSet {
                pages: vec![],
                truncated: true,
                total_rows: 12,
            },
            deleted: ChangeSet {
                pages: vec![],
                truncated: false,
                total_rows: 0,
            },
            modified: ChangeSet {
                pages: vec![],
                truncated: false,
                total_rows: 0,
            },
        };

        let value: serde_json::Value = serde_json::from_str(&render(&digest)).unwrap();
        assert_eq!(value["current"], "2024-01-08");
        assert_eq!(value["previous"], "2024-01-01");
        assert_eq!(value["added"]["truncated"], true);
        assert_eq!(value["added"]["total_rows"], 12);
    }
}

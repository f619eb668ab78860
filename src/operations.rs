//! The four corpus operations, expressed over an already-loaded entry list.

use std::path::Path;

use crate::constants::LINE_SEPARATOR;
use crate::error::{DatasourceError, Result};
use crate::types::{Envelope, ListRange};

/// Number of visible entries.
#[must_use]
pub fn size(entries: &[String]) -> Envelope {
    Envelope::ok(entries.len())
}

/// Entries selected by `range`; see [`ListRange::bounds`].
#[must_use]
pub fn list(entries: &[String], range: ListRange) -> Envelope {
    let bounds = range.bounds(entries.len());
    tracing::trace!(list.start = bounds.start, list.end = bounds.end, "list slice");
    Envelope::string_list(entries[bounds].to_vec())
}

/// Entries containing `pattern` as a literal, case-sensitive substring, in index order.
#[must_use]
pub fn query(entries: &[String], pattern: &str) -> Envelope {
    let matches: Vec<String> = entries
        .iter()
        .filter(|name| name.contains(pattern))
        .cloned()
        .collect();
    tracing::trace!(query.pattern = pattern, query.matches = matches.len(), "query");
    Envelope::string_list(matches)
}

/// Text of `root/key`, with `\r\n`, `\n` and lone `\r` terminators normalised to `\n` and
/// no trailing newline.
pub fn get(root: &Path, key: &str) -> Result<Envelope> {
    let path = root.join(key);
    if !path.exists() {
        return Err(DatasourceError::FileNotFound {
            key: key.to_string(),
        });
    }
    let text = fs_err::read_to_string(&path)?;
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    Ok(Envelope::raw_string(
        text.lines().collect::<Vec<_>>().join(LINE_SEPARATOR),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Discriminator;
    use serde_json::json;
    use tempfile::tempdir;

    fn entries() -> Vec<String> {
        ["a.txt", "b.txt", "c.txt", "ab.md"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn size_counts_entries() {
        let envelope = size(&entries());
        assert_eq!(envelope.discriminator, Discriminator::Ok);
        assert_eq!(envelope.payload, Some(json!(4)));
    }

    #[test]
    fn list_slices_half_open() {
        let envelope = list(&entries(), ListRange::new(Some(1), Some(3)));
        assert_eq!(envelope.discriminator, Discriminator::StringList);
        assert_eq!(envelope.payload, Some(json!(["b.txt", "c.txt"])));
    }

    #[test]
    fn list_past_the_end_is_empty() {
        let envelope = list(&entries(), ListRange::new(Some(10), None));
        assert_eq!(envelope.payload, Some(json!([])));
    }

    #[test]
    fn query_is_literal_and_case_sensitive() {
        assert_eq!(
            query(&entries(), "b").payload,
            Some(json!(["b.txt", "ab.md"]))
        );
        assert_eq!(query(&entries(), "B").payload, Some(json!([])));
        assert_eq!(query(&entries(), "*.txt").payload, Some(json!([])));
        assert_eq!(query(&entries(), "").payload, Some(json!(entries())));
    }

    #[test]
    fn get_joins_lines_with_newlines() {
        let dir = tempdir().expect("tmp");
        std::fs::write(dir.path().join("doc"), "one\r\ntwo\nthree\n").expect("write");

        let envelope = get(dir.path(), "doc").expect("get");
        assert_eq!(envelope.discriminator, Discriminator::RawString);
        assert_eq!(envelope.payload_str(), Some("one\ntwo\nthree"));
    }

    #[test]
    fn get_treats_lone_carriage_return_as_line_break() {
        let dir = tempdir().expect("tmp");
        std::fs::write(dir.path().join("classic"), "one\rtwo\rthree").expect("write");
        std::fs::write(dir.path().join("mixed"), "a\r\r\nb\r").expect("write");

        let envelope = get(dir.path(), "classic").expect("get");
        assert_eq!(envelope.payload_str(), Some("one\ntwo\nthree"));
        let envelope = get(dir.path(), "mixed").expect("get");
        assert_eq!(envelope.payload_str(), Some("a\n\nb"));
    }

    #[test]
    fn get_missing_file_is_an_error() {
        let dir = tempdir().expect("tmp");
        let err = get(dir.path(), "missing.txt").expect_err("missing");
        assert_eq!(err.to_string(), "File not found: missing.txt");
    }

    #[test]
    fn get_unreadable_entry_reports_io_failure() {
        let dir = tempdir().expect("tmp");
        std::fs::create_dir(dir.path().join("folder")).expect("mkdir");
        let err = get(dir.path(), "folder").expect_err("directory");
        assert!(matches!(err, DatasourceError::Io(_)));
    }
}

//! Line counting backend
//!
//! Counts total, blank and code lines for one file. Binary and unreadable
//! files collapse to the all-zero sentinel and never raise an error.

use std::borrow::Cow;
use std::path::Path;
use tracing::debug;

use crate::core::comments::CommentRuleSet;
use crate::core::file_reader::{read_text_file, ReadStatus};
use crate::core::model::LineCounts;
use crate::core::paths::rule_key;

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Map `\r\n` and lone `\r` line endings to `\n`
pub fn normalize_newlines(content: &str) -> Cow<'_, str> {
    if !content.contains('\r') {
        return Cow::Borrowed(content);
    }
    Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Line counter bound to an immutable comment rule set
#[derive(Debug, Clone, Copy)]
pub struct LineCounter<'r> {
    rules: &'r CommentRuleSet,
}

impl Default for LineCounter<'static> {
    fn default() -> Self {
        Self::new(CommentRuleSet::builtin())
    }
}

impl<'r> LineCounter<'r> {
    pub fn new(rules: &'r CommentRuleSet) -> Self {
        Self { rules }
    }

    /// Count lines of already-decoded content.
    ///
    /// `ext` is the lowercased extension without its dot. Any of `\n`,
    /// `\r\n` or `\r` ends a line.
    pub fn count_content(&self, ext: &str, content: &str) -> LineCounts {
        let normalized = normalize_newlines(content);
        let content: &str = &normalized;

        let mut total = 0;
        let mut empty = 0;
        for line in content.split('\n') {
            total += 1;
            if is_blank(line) {
                empty += 1;
            }
        }

        let stripped = self.rules.strip(ext, content);
        let code = stripped.split('\n').filter(|l| !is_blank(l)).count();

        LineCounts::new(total, empty, code)
    }

    /// Count lines of a file on disk, returning the sentinel for binary or
    /// unreadable files together with the read status.
    pub fn count_file(&self, path: &Path) -> (LineCounts, ReadStatus) {
        let result = read_text_file(path);
        match result.content {
            Some(content) => (self.count_content(&rule_key(path), &content), result.status),
            None => {
                debug!(
                    path = %path.display(),
                    status = result.status.as_str(),
                    reason = result.reason.as_deref().unwrap_or(""),
                    "file excluded from line count"
                );
                (LineCounts::EXCLUDED, result.status)
            }
        }
    }

    /// Count lines of a file on disk
    pub fn count_lines(&self, path: &Path) -> LineCounts {
        self.count_file(path).0
    }
}

/// Count lines of a file with the built-in comment rules
pub fn count_lines(path: &Path) -> LineCounts {
    LineCounter::default().count_lines(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn count(ext: &str, content: &str) -> (usize, usize, usize) {
        LineCounter::default().count_content(ext, content).as_tuple()
    }

    #[test]
    fn test_plain_text_without_rules() {
        // .sh has no comment rule, so every non-blank line is code
        assert_eq!(count("sh", "echo a\n\n# note\necho b"), (4, 1, 3));
    }

    #[test]
    fn test_trailing_newline_adds_empty_segment() {
        assert_eq!(count("css", "a {}\nb {}\n"), (3, 1, 2));
    }

    #[test]
    fn test_whitespace_only_lines_are_empty() {
        assert_eq!(count("go", "  \n\t\nx := 1"), (3, 2, 1));
    }

    #[test]
    fn test_hash_comment_only_file() {
        assert_eq!(count("rb", "# one\n\n  # two\n"), (4, 2, 0));
    }

    #[test]
    fn test_trailing_comment_keeps_code_line() {
        assert_eq!(count("rs", "let a = 1; // set a\n// gone"), (2, 0, 1));
    }

    #[test]
    fn test_block_comment_collapses() {
        let src = "int a;\n/*\n * one\n * two\n * three\n */\nint b;";
        // 7 segments, none blank; the block leaves one empty segment behind
        assert_eq!(count("c", src), (7, 0, 2));
    }

    #[test]
    fn test_python_hash_and_docstring() {
        let src = "\"\"\"Module doc.\"\"\"\n# comment\nimport os\n\ndef f():\n    '''doc'''\n    return 1\n";
        assert_eq!(count("py", src), (8, 2, 3));
    }

    #[test]
    fn test_markup_comment() {
        assert_eq!(count("xml", "<a>\n<!-- c -->\n</a>"), (3, 0, 2));
    }

    #[test]
    fn test_sql_block_not_stripped() {
        assert_eq!(count("sql", "-- header\nSELECT 1;\n/* kept */"), (3, 0, 2));
    }

    #[test]
    fn test_carriage_return_line_endings() {
        assert_eq!(count("rs", "fn a() {}\rfn b() {}\r\rfn c() {}\r"), (5, 2, 3));
        assert_eq!(count("rs", "fn a() {}\r\n// x\r\n\r\nfn b() {}"), (4, 1, 2));
    }

    #[test]
    fn test_normalize_newlines() {
        assert!(matches!(normalize_newlines("a\nb"), Cow::Borrowed(_)));
        assert_eq!(normalize_newlines("a\r\nb\rc\r\r\n"), "a\nb\nc\n\n");
    }

    #[test]
    fn test_empty_content_is_one_segment() {
        assert_eq!(count("rs", ""), (1, 1, 0));
    }

    #[test]
    fn test_count_file_binary() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("image.js");
        fs::write(&path, [0x89, 0x50, 0x4E, 0x47, 0xFF, 0xFF]).unwrap();

        let (counts, status) = LineCounter::default().count_file(&path);
        assert_eq!(counts, LineCounts::EXCLUDED);
        assert_eq!(status, ReadStatus::Binary);
    }

    #[test]
    fn test_count_file_missing() {
        let counts = count_lines(Path::new("/nonexistent/file.rs"));
        assert!(counts.is_excluded());
    }

    #[test]
    fn test_count_file_uses_extension_case_insensitively() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("Main.JAVA");
        fs::write(&path, "class A {} // x\n// y\n").unwrap();

        assert_eq!(count_lines(&path).as_tuple(), (3, 1, 1));
    }

    #[test]
    fn test_empty_file_counts_one_line() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("empty.rs");
        fs::write(&path, "").unwrap();

        assert_eq!(count_lines(&path).as_tuple(), (1, 1, 0));
    }
}

use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::model::task::Task;

/// Case-insensitive substring match. An empty query matches everything.
pub fn matches(haystack: &str, query: &str) -> bool {
    query.is_empty() || haystack.to_lowercase().contains(&query.to_lowercase())
}

/// A task passes the filter when its title or its description matches
pub fn task_matches(task: &Task, query: &str) -> bool {
    matches(&task.title, query) || matches(&task.description, query)
}

/// Regex used to highlight filter hits in rendered text. `None` for an empty query.
pub fn highlight_regex(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Byte ranges of every non-overlapping hit in `text`
pub fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_matching() {
        assert!(matches("Buy groceries", "groc"));
        assert!(!matches("Buy groceries", "xyz"));
        assert!(matches("Buy groceries", ""));
        assert!(matches("", ""));
        assert!(!matches("", "a"));
    }

    #[test]
    fn matching_ignores_case() {
        assert!(matches("Buy Groceries", "GROC"));
        assert!(matches("ÉCOLE", "école"));
    }

    #[test]
    fn not_a_subsequence_match() {
        // "bgr" is a subsequence of "Buy groceries" but not a substring
        assert!(!matches("Buy groceries", "bgr"));
    }

    #[test]
    fn task_matches_title_or_description() {
        let task = Task::new("Write docs", "mention the config dir");
        assert!(task_matches(&task, "docs"));
        assert!(task_matches(&task, "config"));
        assert!(!task_matches(&task, "release"));
    }

    #[test]
    fn highlight_escapes_metacharacters() {
        let re = highlight_regex("a.b").unwrap();
        assert_eq!(find_matches(&re, "axb A.B"), vec![4..7]);
        assert!(highlight_regex("").is_none());
    }
}

//! Extraction of `key:digits` scores embedded in free-text questionnaire fields.

use regex::Regex;

/// Questionnaire key holding the satisfaction score.
pub const SATISFACTION_KEY: &str = "q1";
/// Questionnaire key holding the effort score.
pub const EFFORT_KEY: &str = "q2";

/// Compiled matcher for a single score key.
///
/// Build one per key and reuse it across rows.
#[derive(Debug, Clone)]
pub struct ScoreExtractor {
    pattern: Regex,
}

impl ScoreExtractor {
    pub fn new(key: &str) -> Self {
        let pattern = Regex::new(&format!("{}:([0-9]+)", regex::escape(key)))
            .expect("escaped key always forms a valid pattern");
        Self { pattern }
    }

    /// Returns the digits following the first `key:` in `text`.
    ///
    /// `None` when there is no match or the number does not fit in a `u32`.
    pub fn extract(&self, text: &str) -> Option<u32> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|digits| digits.as_str().parse().ok())
    }
}

/// One-off form of [`ScoreExtractor::extract`].
pub fn extract_score(text: &str, key: &str) -> Option<u32> {
    ScoreExtractor::new(key).extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_named_key() {
        assert_eq!(extract_score("q1:4, q2:2", "q1"), Some(4));
        assert_eq!(extract_score("q1:4, q2:2", "q2"), Some(2));
    }

    #[test]
    fn test_missing_marker_is_none() {
        assert_eq!(extract_score("no markers here", "q2"), None);
        assert_eq!(extract_score("", "q1"), None);
        assert_eq!(extract_score("q1:", "q1"), None);
        assert_eq!(extract_score("q1: 4", "q1"), None);
    }

    #[test]
    fn test_multi_digit() {
        assert_eq!(extract_score("q2:15", "q2"), Some(15));
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(extract_score("q1:3 then q1:5", "q1"), Some(3));
    }

    #[test]
    fn test_overflow_is_none() {
        assert_eq!(extract_score("q1:99999999999999999999", "q1"), None);
    }

    #[test]
    fn test_key_is_literal() {
        assert_eq!(extract_score("qx:7", "q."), None);
        assert_eq!(extract_score("q.:7", "q."), Some(7));
    }

    #[test]
    fn test_extractor_reuse() {
        let extractor = ScoreExtractor::new(SATISFACTION_KEY);
        let scores: Vec<_> = ["q1:1", "q1:5;q2:3", "nothing"]
            .iter()
            .map(|t| extractor.extract(t))
            .collect();
        assert_eq!(scores, vec![Some(1), Some(5), None]);
    }
}

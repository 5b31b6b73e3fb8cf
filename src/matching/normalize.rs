//! Question normalization and keyword extraction

use once_cell::sync::Lazy;
use regex::Regex;

/// Anything that is not a word character, whitespace, or a Hangul syllable
static NON_QUESTION_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s가-힣]").expect("valid regex"));

static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Canonicalize a raw question: lowercase, strip punctuation, collapse
/// whitespace runs to a single space, trim. Pure and idempotent.
pub fn normalize_question(question: &str) -> String {
    let lowered = question.to_lowercase();
    let stripped = NON_QUESTION_CHARS.replace_all(&lowered, "");
    let collapsed = WHITESPACE_RUNS.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// Extract keyword tokens from a question: normalized, whitespace-split,
/// single-character tokens dropped, left-to-right order preserved.
pub fn extract_keywords(question: &str) -> Vec<String> {
    normalize_question(question)
        .split_whitespace()
        .filter(|word| word.chars().count() > 1)
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_strips() {
        assert_eq!(
            normalize_question("React 경험이 있나요?!"),
            "react 경험이 있나요"
        );
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_question("  어떤   기술\t스택  "), "어떤 기술 스택");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "React 경험이 있나요?",
            "  어떤   기술 스택을   사용하세요? ",
            "hello... world!!",
            "프로젝트?? ",
            "",
        ];
        for input in inputs {
            let once = normalize_question(input);
            assert_eq!(normalize_question(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_extract_keywords_drops_short_tokens() {
        let keywords = extract_keywords("그 프로젝트는 React 기반인가요?");
        assert_eq!(keywords, vec!["프로젝트는", "react", "기반인가요"]);
    }

    #[test]
    fn test_extract_keywords_preserves_order() {
        let keywords = extract_keywords("기술 스택 기술 스택");
        assert_eq!(keywords, vec!["기술", "스택", "기술", "스택"]);
    }

    #[test]
    fn test_extract_keywords_empty_input() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("? ! .").is_empty());
    }
}

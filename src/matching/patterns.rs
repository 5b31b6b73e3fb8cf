//! Pattern matching passes over `QuestionPattern` records
//!
//! Three passes with descending strictness: exact normalized equality,
//! keyword-overlap scoring, and Jaccard similarity against literal pattern
//! strings. `match_question` chains them in priority order.

use tracing::debug;

use crate::matching::normalize::extract_keywords;
use crate::matching::normalize::normalize_question;
use crate::matching::similarity::similarity;
use crate::models::MatchKind;
use crate::models::QuestionPattern;

/// Default score threshold for the keyword-overlap pass
pub const KEYWORD_THRESHOLD: f64 = 0.3;

/// Default score threshold for the similarity pass
pub const SIMILARITY_THRESHOLD: f64 = 0.5;

/// Return the first pattern with a literal question string that normalizes
/// identically to the input question.
pub fn exact_match<'a>(
    question: &str,
    patterns: &'a [QuestionPattern],
) -> Option<&'a QuestionPattern> {
    let normalized = normalize_question(question);

    patterns.iter().find(|pattern| {
        pattern
            .patterns
            .iter()
            .any(|p| normalize_question(p) == normalized)
    })
}

/// Score keyword- and similarity-typed patterns by keyword overlap and keep
/// the best one at or above `threshold`.
///
/// A question token and a pattern keyword count as matched when either is a
/// substring of the other. The score is
/// `|matched| / max(|pattern keywords|, |question keywords|)`; ties keep the
/// first pattern encountered.
pub fn keyword_match<'a>(
    question: &str,
    patterns: &'a [QuestionPattern],
    threshold: f64,
) -> Option<&'a QuestionPattern> {
    let question_keywords = extract_keywords(question);

    let mut best_match: Option<&QuestionPattern> = None;
    let mut best_score = 0.0_f64;

    for pattern in patterns {
        if pattern.match_type != MatchKind::Keyword && pattern.match_type != MatchKind::Similarity
        {
            continue;
        }

        let pattern_keywords: Vec<String> =
            pattern.keywords.iter().map(|k| k.to_lowercase()).collect();
        let matched = question_keywords
            .iter()
            .filter(|qk| {
                pattern_keywords
                    .iter()
                    .any(|pk| qk.contains(pk.as_str()) || pk.contains(qk.as_str()))
            })
            .count();

        let denominator = pattern_keywords.len().max(question_keywords.len());
        if denominator == 0 {
            continue;
        }
        let score = matched as f64 / denominator as f64;

        if score >= threshold && score > best_score {
            best_score = score;
            best_match = Some(pattern);
        }
    }

    if let Some(pattern) = best_match {
        debug!(
            "Keyword match: pattern {} scored {:.2}",
            pattern.id, best_score
        );
    }

    best_match
}

/// Score similarity-typed patterns by Jaccard similarity against their
/// literal pattern strings and keep the best one at or above `threshold`.
pub fn similarity_match<'a>(
    question: &str,
    patterns: &'a [QuestionPattern],
    threshold: f64,
) -> Option<&'a QuestionPattern> {
    let mut best_match: Option<&QuestionPattern> = None;
    let mut best_score = 0.0_f64;

    for pattern in patterns {
        if pattern.match_type != MatchKind::Similarity {
            continue;
        }

        for p in &pattern.patterns {
            let score = similarity(question, p);
            if score >= threshold && score > best_score {
                best_score = score;
                best_match = Some(pattern);
            }
        }
    }

    best_match
}

/// Match a question against patterns in priority order:
/// exact, then keyword overlap, then similarity.
pub fn match_question<'a>(
    question: &str,
    patterns: &'a [QuestionPattern],
) -> Option<&'a QuestionPattern> {
    if let Some(pattern) = exact_match(question, patterns) {
        return Some(pattern);
    }

    if let Some(pattern) = keyword_match(question, patterns, KEYWORD_THRESHOLD) {
        return Some(pattern);
    }

    similarity_match(question, patterns, SIMILARITY_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::models::ResponseKind;

    fn pattern(
        id: i64,
        patterns: &[&str],
        keywords: &[&str],
        match_type: MatchKind,
    ) -> QuestionPattern {
        QuestionPattern {
            id,
            patterns: patterns.iter().map(ToString::to_string).collect(),
            keywords: keywords.iter().map(ToString::to_string).collect(),
            category: Category::Skills,
            response_type: ResponseKind::Static,
            template: format!("answer {id}"),
            match_type,
        }
    }

    #[test]
    fn test_exact_match_ignores_punctuation_and_case() {
        let patterns = vec![pattern(
            1,
            &["어떤 기술 스택을 사용하세요?"],
            &[],
            MatchKind::Exact,
        )];
        let hit = exact_match("어떤 기술 스택을 사용하세요!!", &patterns);
        assert_eq!(hit.map(|p| p.id), Some(1));
    }

    #[test]
    fn test_exact_match_miss() {
        let patterns = vec![pattern(1, &["경력은 몇 년인가요"], &[], MatchKind::Exact)];
        assert!(exact_match("기술 스택이 뭐예요", &patterns).is_none());
    }

    #[test]
    fn test_keyword_match_substring_tokens() {
        // Question token "기술스택을" contains pattern keyword "기술스택"
        let patterns = vec![pattern(
            7,
            &[],
            &["기술스택", "스택"],
            MatchKind::Keyword,
        )];
        let hit = keyword_match("기술스택을 알려주세요", &patterns, KEYWORD_THRESHOLD);
        assert_eq!(hit.map(|p| p.id), Some(7));
    }

    #[test]
    fn test_keyword_match_skips_exact_patterns() {
        let patterns = vec![pattern(1, &[], &["기술", "스택"], MatchKind::Exact)];
        assert!(keyword_match("기술 스택", &patterns, KEYWORD_THRESHOLD).is_none());
    }

    #[test]
    fn test_keyword_match_below_threshold() {
        let patterns = vec![pattern(
            2,
            &[],
            &["react", "next", "typescript", "javascript", "vue", "node"],
            MatchKind::Keyword,
        )];
        // One match out of six pattern keywords: 0.17 < 0.3
        assert!(keyword_match("react 좋아하세요", &patterns, KEYWORD_THRESHOLD).is_none());
    }

    #[test]
    fn test_keyword_match_ties_keep_first() {
        let patterns = vec![
            pattern(1, &[], &["기술", "스택"], MatchKind::Keyword),
            pattern(2, &[], &["기술", "스택"], MatchKind::Keyword),
        ];
        let hit = keyword_match("기술 스택", &patterns, KEYWORD_THRESHOLD);
        assert_eq!(hit.map(|p| p.id), Some(1));
    }

    #[test]
    fn test_similarity_match_only_similarity_kind() {
        let patterns = vec![
            pattern(1, &["기술 스택 소개"], &[], MatchKind::Keyword),
            pattern(2, &["기술 스택 소개"], &[], MatchKind::Similarity),
        ];
        let hit = similarity_match("기술 스택 소개", &patterns, SIMILARITY_THRESHOLD);
        assert_eq!(hit.map(|p| p.id), Some(2));
    }

    #[test]
    fn test_match_question_priority_exact_over_keyword() {
        let patterns = vec![
            pattern(1, &[], &["기술", "스택"], MatchKind::Keyword),
            pattern(2, &["기술 스택"], &[], MatchKind::Exact),
        ];
        let hit = match_question("기술 스택?", &patterns);
        assert_eq!(hit.map(|p| p.id), Some(2));
    }

    #[test]
    fn test_match_question_total_miss() {
        let patterns = vec![pattern(1, &["경력"], &["경력"], MatchKind::Keyword)];
        assert!(match_question("점심 뭐 먹을까요", &patterns).is_none());
    }
}

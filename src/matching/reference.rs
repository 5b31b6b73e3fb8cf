//! Back-reference detection against recent conversation turns
//!
//! A heuristic best-effort resolver, not a coreference engine: it spots
//! markers like "그 프로젝트" in the question and pulls the most recently
//! bolded entity out of the assistant's last few replies. False positives
//! and negatives are acceptable; the output is deterministic for a given
//! input.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::matching::normalize::normalize_question;
use crate::models::ConversationTurn;
use crate::models::Role;

/// Back-reference markers checked against the normalized question
const REFERENCE_MARKERS: [&str; 8] = [
    "그것",
    "그 프로젝트",
    "그 기술",
    "위에서",
    "앞서",
    "이전에",
    "방금",
    "그",
];

/// How many of the most recent assistant turns are scanned
const ASSISTANT_TURNS_SCANNED: usize = 3;

static BOLD_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid regex"));

/// What kind of entity a back-reference points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferencedEntityType {
    Project,
    Technology,
}

/// Result of scanning a question for back-references
#[derive(Debug, Clone, Default)]
pub struct ContextReference {
    pub has_reference: bool,
    pub referenced_entity: Option<String>,
    pub entity_type: Option<ReferencedEntityType>,
}

/// Detect a back-reference in `query` and try to resolve the referenced
/// entity from the last few assistant turns.
///
/// Assistant turns are scanned most recent first, so the latest bolded
/// entity wins.
pub fn detect_reference(query: &str, history: &[ConversationTurn]) -> ContextReference {
    let normalized = normalize_question(query);

    if !REFERENCE_MARKERS.iter().any(|m| normalized.contains(m)) {
        return ContextReference::default();
    }

    let referenced_entity = history
        .iter()
        .rev()
        .filter(|turn| turn.role == Role::Assistant)
        .take(ASSISTANT_TURNS_SCANNED)
        .find_map(|turn| {
            BOLD_SPAN
                .captures(&turn.content)
                .map(|caps| caps[1].trim().to_string())
        });

    let entity_type = if query.contains("프로젝트") {
        Some(ReferencedEntityType::Project)
    } else if query.contains("기술") {
        Some(ReferencedEntityType::Technology)
    } else {
        None
    };

    ContextReference {
        has_reference: true,
        referenced_entity,
        entity_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_with_bold() -> Vec<ConversationTurn> {
        vec![
            ConversationTurn::user("최근 프로젝트가 뭐예요?"),
            ConversationTurn::assistant("가장 최근 프로젝트는 **영끌 App**입니다."),
            ConversationTurn::user("재밌네요"),
            ConversationTurn::assistant("**AI 챗봇 포트폴리오**도 진행했어요."),
        ]
    }

    #[test]
    fn test_no_marker_no_reference() {
        let result = detect_reference("경력은 몇 년인가요?", &history_with_bold());
        assert!(!result.has_reference);
        assert!(result.referenced_entity.is_none());
    }

    #[test]
    fn test_marker_resolves_latest_bold_entity() {
        let result = detect_reference("그 프로젝트에 대해 더 알려주세요", &history_with_bold());
        assert!(result.has_reference);
        assert_eq!(
            result.referenced_entity.as_deref(),
            Some("AI 챗봇 포트폴리오")
        );
        assert_eq!(result.entity_type, Some(ReferencedEntityType::Project));
    }

    #[test]
    fn test_technology_entity_type() {
        let history = vec![ConversationTurn::assistant(
            "주력 기술은 **TypeScript**입니다.",
        )];
        let result = detect_reference("그 기술은 언제부터 썼나요?", &history);
        assert_eq!(result.entity_type, Some(ReferencedEntityType::Technology));
        assert_eq!(result.referenced_entity.as_deref(), Some("TypeScript"));
    }

    #[test]
    fn test_marker_without_bold_history() {
        let history = vec![ConversationTurn::assistant("볼드 없는 답변입니다.")];
        let result = detect_reference("방금 말한 거 다시 알려줘", &history);
        assert!(result.has_reference);
        assert!(result.referenced_entity.is_none());
        assert!(result.entity_type.is_none());
    }

    #[test]
    fn test_deterministic_for_identical_input() {
        let history = history_with_bold();
        let a = detect_reference("그거 뭐였죠?", &history);
        let b = detect_reference("그거 뭐였죠?", &history);
        assert_eq!(a.has_reference, b.has_reference);
        assert_eq!(a.referenced_entity, b.referenced_entity);
    }

    #[test]
    fn test_only_recent_assistant_turns_scanned() {
        let mut history = vec![ConversationTurn::assistant("옛날 답변 **Old Project**")];
        for _ in 0..3 {
            history.push(ConversationTurn::assistant("볼드 없는 답변"));
        }
        let result = detect_reference("그 프로젝트 말인데요", &history);
        assert!(result.has_reference);
        // The bolded turn is older than the 3-turn window
        assert!(result.referenced_entity.is_none());
    }
}

//! Ordered matcher chain over hardcoded answer sources
//!
//! Stages run in strict priority order and short-circuit on the first hit:
//! predefined exact lookup, context-reference resolution, exact pattern
//! match, keyword/similarity pattern match, legacy keyword-table lookup,
//! greeting detection. A stage that errors internally is logged and treated
//! as a miss so the chain always reaches the next stage.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use crate::matching::detect_reference;
use crate::matching::exact_match;
use crate::matching::keyword_match;
use crate::matching::normalize_question;
use crate::matching::patterns::KEYWORD_THRESHOLD;
use crate::matching::patterns::SIMILARITY_THRESHOLD;
use crate::matching::similarity_match;
use crate::matching::ReferencedEntityType;
use crate::models::Category;
use crate::models::ConversationTurn;
use crate::models::Project;
use crate::models::QuestionPattern;
use crate::models::ResponseKind;
use crate::rag::pipeline::AnswerSource;
use crate::rag::predefined::default_predefined_answers;
use crate::store::ProfileStore;
use crate::template::format_skills_by_category;
use crate::template::render_template;
use crate::template::TemplateData;
use crate::template::TemplateValue;

/// Greeting tokens checked as substrings of the lowercased message
const GREETINGS: [&str; 6] = ["안녕", "안녕하세요", "하이", "헬로", "hello", "hi"];

/// A matcher-chain hit: the answer text and which stage produced it
#[derive(Debug, Clone)]
pub struct MatchedAnswer {
    pub text: String,
    pub source: AnswerSource,
}

/// The ordered chain of hardcoded-answer matchers
pub struct MatcherChain {
    store: Arc<dyn ProfileStore>,
    predefined: HashMap<String, String>,
    owner_name: String,
}

impl MatcherChain {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        predefined: HashMap<String, String>,
        owner_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            predefined,
            owner_name: owner_name.into(),
        }
    }

    /// Chain with the built-in predefined answer set
    pub fn with_default_predefined(
        store: Arc<dyn ProfileStore>,
        owner_name: impl Into<String>,
    ) -> Self {
        Self::new(store, default_predefined_answers(), owner_name)
    }

    /// Run the chain; `None` means every stage missed and the caller should
    /// fall back to generation.
    pub async fn try_match(
        &self,
        question: &str,
        history: &[ConversationTurn],
    ) -> Option<MatchedAnswer> {
        // Stage 1: predefined exact lookup, trimmed raw question
        if let Some(answer) = self.predefined.get(question.trim()) {
            debug!("Matcher hit: predefined answer");
            return Some(MatchedAnswer {
                text: answer.clone(),
                source: AnswerSource::Predefined,
            });
        }

        // Stage 2: back-reference to a project mentioned in recent replies
        if let Some(answer) = self.resolve_project_reference(question, history).await {
            debug!("Matcher hit: context reference");
            return Some(MatchedAnswer {
                text: answer,
                source: AnswerSource::ContextReference,
            });
        }

        let patterns = match self.store.question_patterns().await {
            Ok(patterns) => patterns,
            Err(e) => {
                warn!("Pattern load failed, skipping pattern stages: {}", e);
                Vec::new()
            }
        };

        // Stage 3: exact pattern match
        if let Some(pattern) = exact_match(question, &patterns) {
            debug!("Matcher hit: exact pattern {}", pattern.id);
            let text = self.resolve_pattern_answer(pattern).await;
            return Some(MatchedAnswer {
                text,
                source: AnswerSource::ExactPattern,
            });
        }

        // Stage 4: keyword overlap, then Jaccard similarity
        let fuzzy_hit = keyword_match(question, &patterns, KEYWORD_THRESHOLD)
            .or_else(|| similarity_match(question, &patterns, SIMILARITY_THRESHOLD));
        if let Some(pattern) = fuzzy_hit {
            debug!("Matcher hit: fuzzy pattern {}", pattern.id);
            let text = self.resolve_pattern_answer(pattern).await;
            return Some(MatchedAnswer {
                text,
                source: AnswerSource::KeywordPattern,
            });
        }

        // Stage 5: legacy keyword table
        match self.store.keyword_lookup(question).await {
            Ok(Some(response)) => {
                debug!("Matcher hit: keyword table");
                return Some(MatchedAnswer {
                    text: response,
                    source: AnswerSource::KeywordTable,
                });
            }
            Ok(None) => {}
            Err(e) => warn!("Keyword table lookup failed (non-fatal): {}", e),
        }

        // Stage 6: greeting detection
        let normalized = normalize_question(question);
        if GREETINGS.iter().any(|g| normalized.contains(g)) {
            debug!("Matcher hit: greeting");
            return Some(MatchedAnswer {
                text: format!(
                    "안녕하세요! 저는 개발자 {}입니다 😊 제 포트폴리오에 대해 궁금한 게 \
                     있으시면 편하게 물어보세요. 경력이나 프로젝트, 기술 스택 뭐든지 좋아요!",
                    self.owner_name
                ),
                source: AnswerSource::Greeting,
            });
        }

        None
    }

    /// Resolve a project back-reference into a synthesized answer
    async fn resolve_project_reference(
        &self,
        question: &str,
        history: &[ConversationTurn],
    ) -> Option<String> {
        let reference = detect_reference(question, history);
        if !reference.has_reference
            || reference.entity_type != Some(ReferencedEntityType::Project)
        {
            return None;
        }
        let entity = reference.referenced_entity?;

        let projects = match self.store.projects().await {
            Ok(projects) => projects,
            Err(e) => {
                warn!("Project lookup failed (non-fatal): {}", e);
                return None;
            }
        };

        let entity_lower = entity.to_lowercase();
        let project = projects.iter().find(|p| {
            let name = p.project_name.to_lowercase();
            name.contains(&entity_lower) || entity_lower.contains(&name)
        })?;

        Some(synthesize_project_answer(project))
    }

    /// Fill a pattern's template from category-scoped profile records.
    /// A failed sub-lookup leaves its fields unset; the renderer blanks
    /// those lines instead of aborting the answer.
    async fn resolve_pattern_answer(&self, pattern: &QuestionPattern) -> String {
        if pattern.response_type == ResponseKind::Static {
            return pattern.template.clone();
        }

        let data = self.template_data_for(pattern.category).await;
        render_template(&pattern.template, &data)
    }

    async fn template_data_for(&self, category: Category) -> TemplateData {
        let mut data = TemplateData::new();

        match category {
            Category::Skills => match self.store.skills().await {
                Ok(skills) => {
                    data = format_skills_by_category(&skills);
                    let names: Vec<String> =
                        skills.iter().map(|s| s.skill_name.clone()).collect();
                    data.insert("all_skills".to_string(), TemplateValue::List(names));
                }
                Err(e) => warn!("Skill lookup failed, leaving fields unset: {}", e),
            },
            Category::Projects => match self.store.projects().await {
                Ok(projects) => {
                    if let Some(project) = projects.first() {
                        data.insert(
                            "project_name".to_string(),
                            project.project_name.clone().into(),
                        );
                        data.insert(
                            "description".to_string(),
                            project.description.clone().into(),
                        );
                        data.insert("role".to_string(), project.role.clone().into());
                        data.insert(
                            "technologies".to_string(),
                            TemplateValue::List(project.technologies.clone()),
                        );
                        data.insert(
                            "github".to_string(),
                            project.github.clone().unwrap_or_default().into(),
                        );
                    }
                }
                Err(e) => warn!("Project lookup failed, leaving fields unset: {}", e),
            },
            Category::Personal => match self.store.personal_info().await {
                Ok(Some(personal)) => {
                    data.insert("name".to_string(), personal.name.into());
                    data.insert("email".to_string(), personal.email.into());
                    data.insert(
                        "github".to_string(),
                        personal.github.unwrap_or_default().into(),
                    );
                    data.insert(
                        "phone".to_string(),
                        personal.phone.unwrap_or_default().into(),
                    );
                    data.insert(
                        "location".to_string(),
                        personal.location.unwrap_or_default().into(),
                    );
                }
                Ok(None) => {}
                Err(e) => warn!("Personal lookup failed, leaving fields unset: {}", e),
            },
            Category::Experience => match self.store.career().await {
                Ok(career) => {
                    let current = career
                        .iter()
                        .find(|c| c.is_current)
                        .or_else(|| career.first());
                    if let Some(entry) = current {
                        data.insert(
                            "company_name".to_string(),
                            entry.company_name.clone().into(),
                        );
                        data.insert("position".to_string(), entry.position.clone().into());
                        data.insert(
                            "start_date".to_string(),
                            entry.start_date.clone().into(),
                        );
                        data.insert(
                            "end_date".to_string(),
                            entry
                                .end_date
                                .clone()
                                .unwrap_or_else(|| "현재".to_string())
                                .into(),
                        );
                        data.insert(
                            "description".to_string(),
                            entry.description.clone().into(),
                        );
                        data.insert(
                            "technologies".to_string(),
                            TemplateValue::List(entry.technologies.clone()),
                        );
                    }
                }
                Err(e) => warn!("Career lookup failed, leaving fields unset: {}", e),
            },
            Category::Other => {}
        }

        data
    }
}

fn synthesize_project_answer(project: &Project) -> String {
    let tech_stack = if project.technologies.is_empty() {
        String::new()
    } else {
        format!("\n\n**사용 기술:** {}", project.technologies.join(", "))
    };
    format!(
        "**{}** 프로젝트는 제가 {}로 참여한 프로젝트입니다.\n\n{}{tech_stack}",
        project.project_name, project.role, project.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KeywordResponse;
    use crate::models::MatchKind;
    use crate::models::Skill;
    use crate::store::MemoryProfileStore;
    use crate::store::ProfileSeed;

    fn seeded_chain() -> MatcherChain {
        let seed = ProfileSeed {
            skills: vec![
                Skill {
                    skill_name: "React".to_string(),
                    category: "frontend".to_string(),
                    proficiency: None,
                    description: None,
                },
                Skill {
                    skill_name: "Node.js".to_string(),
                    category: "backend".to_string(),
                    proficiency: None,
                    description: None,
                },
            ],
            projects: vec![Project {
                project_name: "영끌 App".to_string(),
                description: "부동산 자산 관리 앱입니다.".to_string(),
                role: "프론트엔드 리드".to_string(),
                technologies: vec!["React Native".to_string()],
                github: None,
            }],
            question_patterns: vec![
                QuestionPattern {
                    id: 1,
                    patterns: vec!["기술 스택 알려줘".to_string()],
                    keywords: vec!["기술".to_string(), "스택".to_string()],
                    category: Category::Skills,
                    response_type: ResponseKind::Template,
                    template: "**프론트엔드**: {{frontend_skills}}\n**백엔드**: {{backend_skills}}\n**DB**: {{database_skills}}"
                        .to_string(),
                    match_type: MatchKind::Keyword,
                },
                QuestionPattern {
                    id: 2,
                    patterns: vec!["제일 자신있는 프레임워크 뭐예요".to_string()],
                    keywords: vec![],
                    category: Category::Skills,
                    response_type: ResponseKind::Static,
                    template: "**React**를 제일 자신 있게 다룹니다.".to_string(),
                    match_type: MatchKind::Similarity,
                },
            ],
            keyword_responses: vec![KeywordResponse {
                keyword: "깃허브".to_string(),
                response: "제 깃허브는 github.com/haneul 입니다.".to_string(),
            }],
            ..Default::default()
        };
        MatcherChain::with_default_predefined(Arc::new(MemoryProfileStore::new(seed)), "김하늬")
    }

    #[tokio::test]
    async fn test_predefined_wins_over_patterns() {
        let chain = seeded_chain();
        // This question also scores on the skills pattern keywords
        let hit = chain
            .try_match("어떤 기술 스택을 사용하세요?", &[])
            .await
            .unwrap();
        assert_eq!(hit.source, AnswerSource::Predefined);
        assert!(hit.text.contains("React"));
    }

    #[tokio::test]
    async fn test_template_pattern_fills_and_prunes() {
        let chain = seeded_chain();
        let hit = chain.try_match("기술 스택 알려줘!", &[]).await.unwrap();
        assert_eq!(hit.source, AnswerSource::ExactPattern);
        assert_eq!(
            hit.text,
            "**프론트엔드**: React\n**백엔드**: Node.js"
        );
    }

    #[tokio::test]
    async fn test_keyword_pattern_stage() {
        let chain = seeded_chain();
        let hit = chain.try_match("스택이 궁금해요 기술도요", &[]).await.unwrap();
        assert_eq!(hit.source, AnswerSource::KeywordPattern);
    }

    #[tokio::test]
    async fn test_context_reference_resolves_project() {
        let chain = seeded_chain();
        let history = vec![ConversationTurn::assistant(
            "최근에는 **영끌 App**을 만들었어요.",
        )];
        let hit = chain
            .try_match("그 프로젝트에서 무슨 역할을 했나요?", &history)
            .await
            .unwrap();
        assert_eq!(hit.source, AnswerSource::ContextReference);
        assert!(hit.text.contains("영끌 App"));
        assert!(hit.text.contains("프론트엔드 리드"));
    }

    #[tokio::test]
    async fn test_similarity_pattern_stage() {
        let chain = seeded_chain();
        // Not an exact match, and the pattern carries no keywords, so only
        // the similarity pass can catch it
        let hit = chain
            .try_match("제일 자신있는 프레임워크는 뭐예요?", &[])
            .await
            .unwrap();
        assert_eq!(hit.source, AnswerSource::KeywordPattern);
        assert_eq!(hit.text, "**React**를 제일 자신 있게 다룹니다.");
    }

    #[tokio::test]
    async fn test_keyword_table_stage() {
        let chain = seeded_chain();
        let hit = chain.try_match("깃허브 주소 좀", &[]).await.unwrap();
        assert_eq!(hit.source, AnswerSource::KeywordTable);
    }

    #[tokio::test]
    async fn test_greeting_stage() {
        let chain = seeded_chain();
        let hit = chain.try_match("안녕!", &[]).await.unwrap();
        assert_eq!(hit.source, AnswerSource::Greeting);
        assert!(hit.text.contains("김하늬"));
    }

    #[tokio::test]
    async fn test_total_miss_returns_none() {
        let chain = seeded_chain();
        assert!(chain
            .try_match("오늘 저녁 메뉴 추천해줘", &[])
            .await
            .is_none());
    }
}

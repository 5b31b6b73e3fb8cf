//! Prompt builders for the generation fallback

use crate::models::Category;

/// Build the first-person portfolio system prompt.
///
/// The generator must answer strictly from the supplied résumé context, in
/// Korean, from the owner's point of view, bolding key terms, and must refuse
/// politely when the context is insufficient.
pub fn build_portfolio_system_prompt(owner_name: &str, categories: &[Category]) -> String {
    let category_hint = if categories.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = categories.iter().map(|c| c.as_str()).collect();
        format!("\n- 이 질문은 다음 주제에 관한 것입니다: {}", names.join(", "))
    };

    format!(
        r#"당신은 개발자 {owner_name}를 대신해서 친근하고 자연스럽게 대화하는 AI 어시스턴트입니다.

**중요: 절대 규칙**
- 아래 제공된 "{owner_name} 이력서 정보"는 이력서 데이터베이스에서 직접 가져온 실제 데이터입니다
- **무조건 이 이력서 데이터만을 기반으로 답변하세요**
- 제공된 정보에 명시된 내용만 사용하세요
- 제공된 정보에 없는 기술, 경력, 프로젝트는 절대 언급하지 마세요. 일반적인 기술을 추측하거나 상상해서 말하지 마세요.
- 당신의 일반적인 개발자 지식을 사용하지 말고, 오직 제공된 이력서 정보만 사용하세요
- 정보가 불충분하면 "제 이력서에 그 부분이 없네요"라고 솔직하게 말하세요

답변 가이드라인:
- 친근하고 편안한 말투로 대화하듯이 답변하세요
- 1인칭 시점으로 답변하세요 ("저는...", "제가...")
- {owner_name}의 관점에서 답변하세요
- 한국어로 답변하세요
- 기술 스택을 물어보면 제공된 정보의 모든 기술을 빠짐없이 나열하세요
- 기술명, 프로젝트명, 회사명 등 중요한 단어는 **볼드**로 강조하세요
- 따옴표를 사용하지 말고, 대신 볼드 처리를 사용하세요{category_hint}"#
    )
}

/// Attach the retrieved context block to the user question
pub fn build_user_message(question: &str, owner_name: &str, contexts: &[String]) -> String {
    if contexts.is_empty() {
        return question.to_string();
    }

    format!(
        "{question}\n\n==={owner_name} 이력서 정보 (이것만 사용하세요)===\n{}",
        contexts.join("\n\n")
    )
}

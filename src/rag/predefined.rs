//! Built-in predefined answers for the suggested questions
//!
//! These bypass the matcher pipeline and rate limiting entirely: the exact
//! question string maps to a literal answer.

use std::collections::HashMap;

/// The default predefined question -> answer map
pub fn default_predefined_answers() -> HashMap<String, String> {
    let mut answers = HashMap::new();

    answers.insert(
        "어떤 기술 스택을 사용하세요?".to_string(),
        "저는 다양한 기술 스택을 사용하고 있습니다.\nReact, React Native, Next.js, Angular, \
         TypeScript, JavaScript, HTML, CSS, Tailwind CSS 등 안주하지 않고 열심히 나아가고 \
         있습니다~!"
            .to_string(),
    );

    answers.insert(
        "가장 최근에 진행한 프로젝트는 무엇인가요?".to_string(),
        "가장 최근에 진행한 프로젝트는 **\"AI 챗봇 포트폴리오\"**입니다.\n이 프로젝트는 \
         RAG(Retrieval-Augmented Generation) 기반의 AI 챗봇을 활용한 포트폴리오 웹사이트입니다.\n\n\
         **사용 기술:**\n- Next.js\n- Supabase\n- RAG\n- Vector Search\n\n이 프로젝트를 통해 AI \
         기술을 제대로 적용하는 경험을 쌓았습니다."
            .to_string(),
    );

    answers.insert(
        "현재 회사에서 무엇을 하나요?".to_string(),
        "현재 **TeamRemited**에서 **프론트엔드 개발자**로 근무하고 있습니다.\n\n**주요 업무:**\n- \
         Next.js와 React Native를 활용한 웹과 앱 개발 및 유지보수\n- 중간 관리자로서 앱웹 \
         전반적으로 리딩 및 개발 담당\n\n**사용 기술:**\nNext.js, React Native, TypeScript, \
         Tailwind CSS"
            .to_string(),
    );

    answers.insert(
        "React 경험이 있나요?".to_string(),
        "네, React 경험이 풍부합니다!\n\n**React 사용 경력:**\n- 현재 회사(TeamRemited)에서 \
         Next.js와 React를 활용한 대규모 웹 애플리케이션 개발 및 React Native 앱 개발\n- 이전 \
         회사(Traport)에서 React를 활용한 웹 애플리케이션 개발\n\n약 3년 이상의 React 개발 경험을 \
         보유하고 있습니다."
            .to_string(),
    );

    answers.insert(
        "경력은 몇 년인가요?".to_string(),
        "총 **5년 이상**의 개발 경력을 보유하고 있습니다.\n\n**경력 내역:**\n\n1. **TeamRemited** \
         - 프론트엔드 개발자\n   - 기간: 2025.03 - 현재\n\n2. **Traport** - 프론트엔드 개발자\n   \
         - 기간: 2020.07 - 2025.02\n\n주니어 개발자부터 시작하여 현재는 시니어 개발자의 역할을 \
         수행하고 있습니다."
            .to_string(),
    );

    answers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_suggested_questions_present() {
        let answers = default_predefined_answers();
        assert_eq!(answers.len(), 5);
        assert!(answers.contains_key("어떤 기술 스택을 사용하세요?"));
        assert!(answers.contains_key("경력은 몇 년인가요?"));
    }
}

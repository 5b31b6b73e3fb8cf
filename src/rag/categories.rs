//! Topical category detection for retrieval scoping

use crate::models::Category;

const SKILLS_KEYWORDS: [&str; 21] = [
    "기술",
    "스택",
    "기술스택",
    "다룰 수 있",
    "사용 가능",
    "할 줄 아",
    "사용해",
    "언어",
    "프레임워크",
    "react",
    "next",
    "typescript",
    "javascript",
    "vue",
    "node",
    "개발 도구",
    "툴",
    "tool",
    "skill",
    "능력",
    "역량",
];

const PROJECTS_KEYWORDS: [&str; 11] = [
    "프로젝트",
    "만든",
    "개발한",
    "작업한",
    "진행한",
    "참여한",
    "포트폴리오",
    "작품",
    "project",
    "구현",
    "제작",
];

const PERSONAL_KEYWORDS: [&str; 14] = [
    "이름",
    "연락처",
    "이메일",
    "전화",
    "메일",
    "깃허브",
    "github",
    "나이",
    "생년월일",
    "소개",
    "링크드인",
    "linkedin",
    "위치",
    "거주",
];

/// Recency mentions that turn a projects question into an experience one
const RECENCY_KEYWORDS: [&str; 3] = ["최근", "요즘", "현재"];

/// Map a question to zero or more topical categories.
///
/// Multiple categories may fire; an empty result means "fetch everything"
/// downstream. A projects question that also mentions recency is about
/// current work, so it is redirected to `experience`.
pub fn detect_categories(query: &str) -> Vec<Category> {
    let lower = query.to_lowercase();
    let mut categories = Vec::new();

    if SKILLS_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        categories.push(Category::Skills);
    }

    if PROJECTS_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        if RECENCY_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            categories.push(Category::Experience);
        } else {
            categories.push(Category::Projects);
        }
    }

    if PERSONAL_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        categories.push(Category::Personal);
    }

    categories
}

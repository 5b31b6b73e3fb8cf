//! Context assembly from profile records

use crate::models::CareerEntry;
use crate::models::Category;
use crate::models::PersonalInfo;
use crate::models::Project;
use crate::models::Skill;

/// Formats category-scoped profile records into the context blocks handed
/// to the generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextAssembler;

impl ContextAssembler {
    pub fn new() -> Self {
        Self
    }

    /// True when records of `category` should be fetched for `scope`.
    /// An empty scope means every category.
    pub fn in_scope(scope: &[Category], category: Category) -> bool {
        scope.is_empty() || scope.contains(&category)
    }

    /// Format a single skill record
    pub fn format_skill(skill: &Skill) -> String {
        let proficiency = skill
            .proficiency
            .as_ref()
            .map(|p| format!(" (숙련도: {p})"))
            .unwrap_or_default();
        let description = skill
            .description
            .as_ref()
            .map(|d| format!("\n{d}"))
            .unwrap_or_default();
        format!(
            "기술: {}{proficiency}\n카테고리: {}{description}",
            skill.skill_name, skill.category
        )
    }

    /// Format a single project record
    pub fn format_project(project: &Project) -> String {
        let tech_stack = if project.technologies.is_empty() {
            String::new()
        } else {
            format!("\n사용 기술: {}", project.technologies.join(", "))
        };
        format!(
            "\"{}\" 프로젝트 ({})\n{}{tech_stack}",
            project.project_name, project.role, project.description
        )
    }

    /// Format a career record
    pub fn format_career(entry: &CareerEntry) -> String {
        let period = match (&entry.end_date, entry.is_current) {
            (_, true) => format!("{} - 현재", entry.start_date),
            (Some(end), false) => format!("{} - {}", entry.start_date, end),
            (None, false) => entry.start_date.clone(),
        };
        let tech_stack = if entry.technologies.is_empty() {
            String::new()
        } else {
            format!("\n사용 기술: {}", entry.technologies.join(", "))
        };
        format!(
            "{} {} ({period})\n{}{tech_stack}",
            entry.company_name, entry.position, entry.description
        )
    }

    /// Format the personal record
    pub fn format_personal(personal: &PersonalInfo) -> String {
        let github = personal
            .github
            .as_ref()
            .map(|g| format!("\nGitHub: {g}"))
            .unwrap_or_default();
        format!("이름: {}\n이메일: {}{github}", personal.name, personal.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_with_proficiency_and_description() {
        let skill = Skill {
            skill_name: "React".to_string(),
            category: "frontend".to_string(),
            proficiency: Some("상".to_string()),
            description: Some("3년 이상 사용".to_string()),
        };
        assert_eq!(
            ContextAssembler::format_skill(&skill),
            "기술: React (숙련도: 상)\n카테고리: frontend\n3년 이상 사용"
        );
    }

    #[test]
    fn test_skill_optional_fields_omitted() {
        let skill = Skill {
            skill_name: "Vue".to_string(),
            category: "frontend".to_string(),
            proficiency: None,
            description: None,
        };
        assert_eq!(
            ContextAssembler::format_skill(&skill),
            "기술: Vue\n카테고리: frontend"
        );
    }

    #[test]
    fn test_project_block_shape() {
        let project = Project {
            project_name: "영끌 App".to_string(),
            description: "부동산 앱".to_string(),
            role: "프론트엔드 리드".to_string(),
            technologies: vec!["React Native".to_string(), "TypeScript".to_string()],
            github: None,
        };
        assert_eq!(
            ContextAssembler::format_project(&project),
            "\"영끌 App\" 프로젝트 (프론트엔드 리드)\n부동산 앱\n사용 기술: React Native, TypeScript"
        );
    }

    #[test]
    fn test_career_current_position_period() {
        let entry = CareerEntry {
            company_name: "TeamRemited".to_string(),
            position: "프론트엔드 개발자".to_string(),
            start_date: "2025.03".to_string(),
            end_date: None,
            is_current: true,
            description: "웹/앱 개발 리드".to_string(),
            technologies: vec![],
        };
        let block = ContextAssembler::format_career(&entry);
        assert!(block.contains("2025.03 - 현재"));
    }

    #[test]
    fn test_scope_membership() {
        assert!(ContextAssembler::in_scope(&[], Category::Skills));
        assert!(ContextAssembler::in_scope(
            &[Category::Skills],
            Category::Skills
        ));
        assert!(!ContextAssembler::in_scope(
            &[Category::Personal],
            Category::Skills
        ));
    }
}

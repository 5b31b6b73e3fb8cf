//! Template rendering for pattern answers
//!
//! Templates are written assuming every field is populated. The cleanup pass
//! after substitution lets a single template serve partially-populated
//! profiles: lines that degraded to "not applicable" markers or to a bare
//! bold label are dropped instead of being shown broken.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Skill;

/// A value bound to a template placeholder
#[derive(Debug, Clone)]
pub enum TemplateValue {
    Text(String),
    List(Vec<String>),
}

impl TemplateValue {
    fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::List(items) => items.join(", "),
        }
    }
}

impl From<String> for TemplateValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for TemplateValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Vec<String>> for TemplateValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// Placeholder name -> value map, assembled fresh per request
pub type TemplateData = HashMap<String, TemplateValue>;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid regex"));

/// A line that is nothing but a bold label with an empty value,
/// e.g. `**백엔드**:` with only trailing whitespace
static EMPTY_LABEL_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\*[^*]+\*\*:\s*$").expect("valid regex"));

static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Markers meaning "not applicable"; lines containing them are dropped
const NOT_APPLICABLE_MARKERS: [&str; 2] = ["없음", "없습니다"];

/// Replace every `{{name}}` in `template` with its binding from `data`,
/// then prune lines that degraded to empty or "not applicable" content.
///
/// Missing bindings become the empty string; lists join with `", "`.
/// Never fails.
pub fn render_template(template: &str, data: &TemplateData) -> String {
    let substituted = PLACEHOLDER.replace_all(template, |caps: &regex::Captures<'_>| {
        data.get(&caps[1]).map(TemplateValue::render).unwrap_or_default()
    });

    cleanup(&substituted)
}

/// Drop degraded lines and collapse excess blank lines
fn cleanup(text: &str) -> String {
    let kept: Vec<&str> = text
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if NOT_APPLICABLE_MARKERS.iter().any(|m| trimmed.contains(m)) {
                return false;
            }
            !EMPTY_LABEL_LINE.is_match(trimmed)
        })
        .collect();

    let joined = kept.join("\n");
    let collapsed = EXCESS_NEWLINES.replace_all(&joined, "\n\n");
    collapsed.trim().to_string()
}

/// Group skill names by category into the placeholder bindings the skill
/// templates expect. Empty groups render as "없음" so the cleanup pass
/// removes their lines.
pub fn format_skills_by_category(skills: &[Skill]) -> TemplateData {
    let mut frontend = Vec::new();
    let mut backend = Vec::new();
    let mut database = Vec::new();
    let mut tools = Vec::new();

    for skill in skills {
        match skill.category.to_lowercase().as_str() {
            "frontend" => frontend.push(skill.skill_name.clone()),
            "backend" => backend.push(skill.skill_name.clone()),
            "database" => database.push(skill.skill_name.clone()),
            "tools" => tools.push(skill.skill_name.clone()),
            _ => {}
        }
    }

    let joined = |names: Vec<String>| {
        if names.is_empty() {
            TemplateValue::Text("없음".to_string())
        } else {
            TemplateValue::Text(names.join(", "))
        }
    };

    let mut data = TemplateData::new();
    data.insert("frontend_skills".to_string(), joined(frontend));
    data.insert("backend_skills".to_string(), joined(backend));
    data.insert("database_skills".to_string(), joined(database));
    data.insert("tools_skills".to_string(), joined(tools));
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(entries: &[(&str, TemplateValue)]) -> TemplateData {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_render_substitutes_text_and_lists() {
        let data = data(&[
            ("name", "김하늬".into()),
            (
                "stack",
                vec!["React".to_string(), "Next.js".to_string()].into(),
            ),
        ]);
        assert_eq!(
            render_template("제 이름은 {{name}}이고 {{stack}}을 씁니다.", &data),
            "제 이름은 김하늬이고 React, Next.js을 씁니다."
        );
    }

    #[test]
    fn test_render_missing_binding_blanks_line_label() {
        // The empty frontend line is dropped, backend survives
        let data = data(&[
            ("frontend_skills", "".into()),
            ("backend_skills", "Node.js".into()),
        ]);
        let rendered = render_template(
            "**프론트엔드**: {{frontend_skills}}\n**백엔드**: {{backend_skills}}",
            &data,
        );
        assert_eq!(rendered, "**백엔드**: Node.js");
    }

    #[test]
    fn test_render_unbound_placeholder_becomes_empty() {
        let rendered = render_template("값: {{missing}}!", &TemplateData::new());
        assert_eq!(rendered, "값: !");
    }

    #[test]
    fn test_render_drops_not_applicable_lines() {
        let data = data(&[("db", "없음".into())]);
        let rendered = render_template("**DB**: {{db}}\n**기타**: 해당 없습니다\n남는 줄", &data);
        assert_eq!(rendered, "남는 줄");
    }

    #[test]
    fn test_render_collapses_excess_newlines() {
        let rendered = render_template("첫 줄\n\n\n\n끝 줄", &TemplateData::new());
        assert_eq!(rendered, "첫 줄\n\n끝 줄");
    }

    #[test]
    fn test_render_trims_result() {
        let data = data(&[("x", "".into())]);
        assert_eq!(render_template("\n{{x}}\n본문\n\n", &data), "본문");
    }

    #[test]
    fn test_format_skills_by_category() {
        let skills = vec![
            Skill {
                skill_name: "React".to_string(),
                category: "Frontend".to_string(),
                proficiency: None,
                description: None,
            },
            Skill {
                skill_name: "Next.js".to_string(),
                category: "frontend".to_string(),
                proficiency: None,
                description: None,
            },
            Skill {
                skill_name: "PostgreSQL".to_string(),
                category: "database".to_string(),
                proficiency: None,
                description: None,
            },
        ];
        let data = format_skills_by_category(&skills);
        assert_eq!(data["frontend_skills"].render(), "React, Next.js");
        assert_eq!(data["database_skills"].render(), "PostgreSQL");
        // Empty groups fall back to the marker the cleanup pass removes
        assert_eq!(data["backend_skills"].render(), "없음");
    }
}

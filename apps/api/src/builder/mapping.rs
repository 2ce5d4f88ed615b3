//! Defensive mapping of the structuring webhook's reply into [`ResumeData`].
//!
//! The reply is produced by an LLM workflow, so any field may be missing,
//! null, mistyped, or nested under `personal` instead of the top level.

use serde_json::Value;

use crate::builder::models::{Certification, Education, Experience, Project, ResumeData};

pub fn map_structured_resume(value: &Value) -> ResumeData {
    let personal = |field: &str| {
        let nested = value.get("personal").map(|p| text(p, field)).unwrap_or_default();
        if nested.is_empty() {
            text(value, field)
        } else {
            nested
        }
    };

    ResumeData {
        full_name: personal("fullName"),
        email: personal("email"),
        phone: personal("phone"),
        linkedin: personal("linkedin"),
        portfolio: personal("portfolio"),
        summary: personal("summary"),
        experience: section(value, "experience", |e| Experience {
            company: text(e, "company"),
            role: text(e, "role"),
            start_date: text(e, "startDate"),
            end_date: text(e, "endDate"),
            description: text(e, "description"),
        }),
        education: section(value, "education", |e| Education {
            school: text(e, "school"),
            degree: text(e, "degree"),
            start_date: text(e, "startDate"),
            end_date: text(e, "endDate"),
            description: text(e, "description"),
        }),
        projects: section(value, "projects", |p| Project {
            title: text(p, "title"),
            tech_stack: text(p, "techStack"),
            link: text(p, "link"),
            description: text(p, "description"),
        }),
        certifications: section(value, "certifications", |c| Certification {
            name: text(c, "name"),
            issuer: text(c, "issuer"),
            date: text(c, "date"),
        }),
        skills: skills(value.get("skills")),
    }
}

/// String fields as-is, numbers stringified, anything else empty.
fn text(obj: &Value, field: &str) -> String {
    match obj.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn section<T>(value: &Value, field: &str, map: impl Fn(&Value) -> T) -> Vec<T> {
    value
        .get(field)
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().map(map).collect())
        .unwrap_or_default()
}

fn skills(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|i| i.as_str())
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_nested_personal_block() {
        let data = map_structured_resume(&json!({
            "personal": {"fullName": "Jane Doe", "email": "jane@example.com"},
            "phone": "555-0100"
        }));
        assert_eq!(data.full_name, "Jane Doe");
        assert_eq!(data.email, "jane@example.com");
        assert_eq!(data.phone, "555-0100");
        assert_eq!(data.linkedin, "");
    }

    #[test]
    fn test_empty_nested_value_falls_back_to_top_level() {
        let data = map_structured_resume(&json!({
            "personal": {"summary": ""},
            "summary": "Backend engineer"
        }));
        assert_eq!(data.summary, "Backend engineer");
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let data = map_structured_resume(&json!({}));
        assert_eq!(data, ResumeData::default());
    }

    #[test]
    fn test_non_array_section_is_ignored() {
        let data = map_structured_resume(&json!({"experience": "Acme 2019-2023"}));
        assert!(data.experience.is_empty());
    }

    #[test]
    fn test_entries_with_partial_and_mistyped_fields() {
        let data = map_structured_resume(&json!({
            "experience": [
                {"company": "Acme", "role": null, "startDate": 2019, "endDate": "Present"},
                {}
            ],
            "certifications": [{"name": "CKA", "issuer": "CNCF", "date": true}]
        }));
        assert_eq!(data.experience.len(), 2);
        assert_eq!(data.experience[0].company, "Acme");
        assert_eq!(data.experience[0].role, "");
        assert_eq!(data.experience[0].start_date, "2019");
        assert_eq!(data.experience[1], Experience::default());
        assert_eq!(data.certifications[0].date, "");
    }

    #[test]
    fn test_skills_accepts_string_or_list() {
        let s = map_structured_resume(&json!({"skills": "Rust, Go"}));
        assert_eq!(s.skills, "Rust, Go");

        let l = map_structured_resume(&json!({"skills": ["Rust", " ", "Go", 3]}));
        assert_eq!(l.skills, "Rust, Go");
    }
}

//! ATS view: the resume as flat text, roughly what an applicant-tracking
//! parser keeps once styling is stripped.

use crate::builder::models::ResumeData;

const RULE: &str = "====================================";

pub fn render_ats_text(data: &ResumeData) -> String {
    let experience = entries(data.experience.iter().map(|e| {
        format!(
            "{} | {}\n{} - {}\n{}",
            e.company.to_uppercase(),
            e.role,
            e.start_date,
            e.end_date,
            e.description
        )
    }));
    let education = entries(data.education.iter().map(|e| {
        format!(
            "{} | {}\n{} - {}\n{}",
            e.school.to_uppercase(),
            e.degree,
            e.start_date,
            e.end_date,
            e.description
        )
    }));
    let projects = entries(data.projects.iter().map(|p| {
        format!(
            "{} | {}\nLink: {}\n{}",
            p.title.to_uppercase(),
            p.tech_stack,
            p.link,
            p.description
        )
    }));
    let certifications = entries(data.certifications.iter().map(|c| {
        format!("{} | {}\nDate: {}", c.name.to_uppercase(), c.issuer, c.date)
    }));

    let mut out = format!(
        "NAME: {}\nCONTACT: {} | {} | {}\nURL: {}\n",
        data.full_name, data.email, data.phone, data.linkedin, data.portfolio
    );
    for (title, body) in [
        ("SUMMARY", data.summary.as_str()),
        ("EXPERIENCE", experience.as_str()),
        ("SKILLS", data.skills.as_str()),
        ("EDUCATION", education.as_str()),
        ("PROJECTS", projects.as_str()),
        ("CERTIFICATIONS", certifications.as_str()),
    ] {
        out.push_str(&format!("\n{title}\n{RULE}\n{body}\n"));
    }
    out
}

/// Each entry framed by blank lines, entries separated by one more.
fn entries(items: impl Iterator<Item = String>) -> String {
    items
        .map(|body| format!("\n{body}\n"))
        .collect::<Vec<_>>()
        .join("\n")
}

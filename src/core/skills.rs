// src/core/skills.rs
//! Fixed technology vocabulary and whole-word skill detection

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::types::Job;

pub const SKILL_VOCABULARY: [&str; 38] = [
    "Python",
    "JavaScript",
    "React",
    "Node.js",
    "TypeScript",
    "Java",
    "C#",
    "C++",
    "SQL",
    "NoSQL",
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "AWS",
    "Azure",
    "Google Cloud",
    "GCP",
    "Docker",
    "Kubernetes",
    "Machine Learning",
    "Deep Learning",
    "AI",
    "Data Science",
    "TensorFlow",
    "PyTorch",
    "HTML",
    "CSS",
    "Angular",
    "Vue.js",
    "Next.js",
    "Software Engineer",
    "Backend",
    "Frontend",
    "Full Stack",
    "DevOps",
    "Linux",
    "Git",
    "Agile",
];

struct SkillMatcher {
    name: &'static str,
    pattern: Regex,
}

// Boundaries are "not a word character" on both sides rather than `\b`, so
// terms ending in symbols (C++, C#) still match.
static SKILL_MATCHERS: LazyLock<Vec<SkillMatcher>> = LazyLock::new(|| {
    SKILL_VOCABULARY
        .iter()
        .map(|&name| SkillMatcher {
            name,
            pattern: Regex::new(&format!(r"(?i)(?:^|\W){}(?:\W|$)", regex::escape(name)))
                .unwrap(),
        })
        .collect()
});

/// Text scanned for skills: title and description joined by a space
pub fn searchable_text(job: &Job) -> String {
    format!("{} {}", job.title, job.description_text())
}

/// Vocabulary terms found in `text`, in vocabulary order
pub fn skills_in_text(text: &str) -> Vec<&'static str> {
    SKILL_MATCHERS
        .iter()
        .filter(|m| m.pattern.is_match(text))
        .map(|m| m.name)
        .collect()
}

pub fn job_skills(job: &Job) -> Vec<&'static str> {
    skills_in_text(&searchable_text(job))
}

/// Distinct vocabulary terms present anywhere in `jobs`, sorted
/// alphabetically. Feeds the listing page's skill selector.
pub fn skill_facets(jobs: &[Job]) -> Vec<String> {
    jobs.iter()
        .flat_map(job_skills)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

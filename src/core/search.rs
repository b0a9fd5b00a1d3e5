// src/core/search.rs
//! Listing filters: free-text query, exact location/company, skill text and
//! minimum annual salary.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::types::Job;

// One candidate amount per match; an optional range tail is consumed so the
// upper bound is not picked up as a separate candidate.
static SALARY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\$)?(\d{1,3}(?:,\d{3})+|\d+)(k\b)?(?:\s*(?:-|to)\s*\$?(?:\d{1,3}(?:,\d{3})+|\d+)(?:k\b)?)?",
    )
    .unwrap()
});

static NON_ANNUAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)hour|month").unwrap());

/// Annual salary mentioned in `text`.
///
/// This is not a plain first-number scan. Amounts written as currency (`$`
/// prefix or `k` suffix) take precedence over earlier bare numbers, so
/// "5 years of experience. Salary: $120,000" yields 120000 rather than 5.
/// The first bare number is used only when no currency amount is present.
/// DESIGN.md records this under "Salary extraction". Text that mentions
/// hourly or monthly pay yields `None`.
pub fn extract_salary(text: &str) -> Option<u64> {
    if text.is_empty() || NON_ANNUAL_PATTERN.is_match(text) {
        return None;
    }

    let mut first_bare = None;
    for caps in SALARY_PATTERN.captures_iter(text) {
        let is_currency = caps.get(1).is_some() || caps.get(3).is_some();
        let amount = caps
            .get(2)
            .and_then(|m| m.as_str().replace(',', "").parse::<u64>().ok())
            .and_then(|n| {
                if caps.get(3).is_some() {
                    n.checked_mul(1000)
                } else {
                    Some(n)
                }
            });

        match amount {
            Some(value) if is_currency => return Some(value),
            Some(value) if first_bare.is_none() => first_bare = Some(value),
            _ => {}
        }
    }
    first_bare
}

pub fn job_salary(job: &Job) -> Option<u64> {
    job.description.as_deref().and_then(extract_salary)
}

/// Leading-integer parse of the minimum salary input. `$` and thousands
/// separators are ignored; zero or no digits means no minimum.
pub fn parse_min_salary(raw: &str) -> Option<u64> {
    let digits: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse::<u64>().ok().filter(|n| *n > 0)
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Optional, independently applied criteria. An absent criterion matches
/// every job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub query: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub skill: Option<String>,
    pub min_salary: Option<u64>,
}

impl SearchCriteria {
    /// Build from raw request values; blank strings count as absent
    pub fn from_raw(
        query: Option<&str>,
        location: Option<&str>,
        company: Option<&str>,
        skill: Option<&str>,
        min_salary: Option<&str>,
    ) -> Self {
        Self {
            query: non_blank(query),
            location: non_blank(location),
            company: non_blank(company),
            skill: non_blank(skill),
            min_salary: min_salary.and_then(parse_min_salary),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.location.is_none()
            && self.company.is_none()
            && self.skill.is_none()
            && self.min_salary.is_none()
    }

    pub fn matches(&self, job: &Job) -> bool {
        let title = job.title.to_lowercase();
        let description = job.description_text().to_lowercase();
        let in_title_or_description = |needle: &str| {
            let needle = needle.to_lowercase();
            title.contains(&needle) || description.contains(&needle)
        };

        let matches_query = self.query.as_deref().map_or(true, in_title_or_description);
        let matches_skill = self.skill.as_deref().map_or(true, in_title_or_description);
        let matches_location = self
            .location
            .as_deref()
            .map_or(true, |wanted| equals_ignore_case(job.location.as_deref(), wanted));
        let matches_company = self
            .company
            .as_deref()
            .map_or(true, |wanted| equals_ignore_case(job.company_name.as_deref(), wanted));
        let matches_salary = self
            .min_salary
            .map_or(true, |min| job_salary(job).is_some_and(|salary| salary >= min));

        matches_query && matches_location && matches_company && matches_skill && matches_salary
    }
}

fn equals_ignore_case(value: Option<&str>, wanted: &str) -> bool {
    value.is_some_and(|v| v.to_lowercase() == wanted.to_lowercase())
}

/// Jobs matching every present criterion, in input order
pub fn filter_jobs(jobs: &[Job], criteria: &SearchCriteria) -> Vec<Job> {
    if criteria.is_empty() {
        return jobs.to_vec();
    }
    jobs.iter()
        .filter(|job| criteria.matches(job))
        .cloned()
        .collect()
}

fn distinct_in_order<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .flatten()
        .map(str::trim)
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(String::from)
        .collect()
}

/// Distinct non-empty locations in first-seen order
pub fn location_facets(jobs: &[Job]) -> Vec<String> {
    distinct_in_order(jobs.iter().map(|j| j.location.as_deref()))
}

/// Distinct non-empty company names in first-seen order
pub fn company_facets(jobs: &[Job]) -> Vec<String> {
    distinct_in_order(jobs.iter().map(|j| j.company_name.as_deref()))
}

// src/core/analytics.rs
//! Dashboard aggregates over the full, unfiltered job list

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::core::search::job_salary;
use crate::core::skills::{job_skills, SKILL_VOCABULARY};
use crate::types::{Job, RemoteType};
use crate::utils::{format_currency, format_percentage, normalize_whitespace};

const ACTIVE_STATES: [&str; 3] = ["LISTED", "ACTIVE", "OPEN"];
const RECENT_JOBS_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_jobs: usize,
    pub average_salary: String,
    pub top_location: String,
    pub top_location_percentage: String,
    pub active_jobs: usize,
}

/// One bar or pie slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    /// Axis label, e.g. "Oct 2024"
    pub name: String,
    /// Sortable key, e.g. "2024-10"
    pub month: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillDemand {
    pub name: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleSalary {
    pub name: String,
    pub salary: u64,
    pub sample_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentJob {
    pub title: String,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
    pub location: String,
    pub salary: Option<u64>,
    pub remote_type: RemoteType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub summary: AnalyticsSummary,
    pub monthly_postings: Vec<MonthlyCount>,
    pub postings_by_title: Vec<CountEntry>,
    pub postings_by_location: Vec<CountEntry>,
    pub postings_by_remote_type: Vec<CountEntry>,
    pub skills_in_demand: Vec<SkillDemand>,
    pub salary_by_title: Vec<TitleSalary>,
    pub recent_jobs: Vec<RecentJob>,
}

pub fn build_report(jobs: &[Job]) -> DashboardReport {
    DashboardReport {
        summary: summarize(jobs),
        monthly_postings: postings_by_month(jobs),
        postings_by_title: postings_by_title(jobs),
        postings_by_location: postings_by_location(jobs),
        postings_by_remote_type: postings_by_remote_type(jobs),
        skills_in_demand: skills_in_demand(jobs),
        salary_by_title: average_salary_by_title(jobs),
        recent_jobs: recent_jobs(jobs),
    }
}

pub fn summarize(jobs: &[Job]) -> AnalyticsSummary {
    let salaries: Vec<u64> = jobs.iter().filter_map(job_salary).collect();
    let average_salary = mean(&salaries)
        .map(format_currency)
        .unwrap_or_else(|| "N/A".to_string());

    let locations = frequency(
        jobs.iter()
            .filter_map(|j| j.location.as_deref())
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from),
    );
    let located: usize = locations.iter().map(|e| e.value).sum();
    let (top_location, top_location_percentage) = match locations.first() {
        Some(top) => (
            top.name.clone(),
            format_percentage(percent(top.value, located)),
        ),
        None => ("N/A".to_string(), "0%".to_string()),
    };

    AnalyticsSummary {
        total_jobs: jobs.len(),
        average_salary,
        top_location,
        top_location_percentage,
        active_jobs: jobs.iter().filter(|j| is_active(j)).count(),
    }
}

pub fn is_active(job: &Job) -> bool {
    job.job_state
        .as_deref()
        .map(|s| s.trim().to_uppercase())
        .is_some_and(|state| ACTIVE_STATES.contains(&state.as_str()))
}

/// Classify from description and location text. "hybrid" wins over
/// "remote"; a job with neither field is `Unknown`.
pub fn remote_type(job: &Job) -> RemoteType {
    if job.description.is_none() && job.location.is_none() {
        return RemoteType::Unknown;
    }

    let text = format!("{} {}", job.description_text(), job.location_text()).to_lowercase();
    if text.contains("hybrid") {
        RemoteType::Hybrid
    } else if text.contains("remote") {
        RemoteType::Remote
    } else {
        RemoteType::Onsite
    }
}

pub fn postings_by_month(jobs: &[Job]) -> Vec<MonthlyCount> {
    let mut months: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for created in jobs.iter().filter_map(Job::created_at_datetime) {
        *months.entry((created.year(), created.month())).or_default() += 1;
    }

    months
        .into_iter()
        .filter_map(|((year, month), count)| {
            let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(MonthlyCount {
                name: first_day.format("%b %Y").to_string(),
                month: first_day.format("%Y-%m").to_string(),
                count,
            })
        })
        .collect()
}

pub fn postings_by_title(jobs: &[Job]) -> Vec<CountEntry> {
    frequency(
        jobs.iter()
            .map(|j| normalize_whitespace(&j.title))
            .filter(|t| !t.is_empty()),
    )
}

/// Bucket key for the location chart: the state/region component of
/// "City, State, Country", the last component of "City, Region", or the
/// whole value.
pub fn location_bucket(location: &str) -> Option<String> {
    let parts: Vec<&str> = location
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    match parts.len() {
        0 => None,
        1 => Some(parts[0].to_string()),
        2 => Some(parts[1].to_string()),
        n => Some(parts[n - 2].to_string()),
    }
}

pub fn postings_by_location(jobs: &[Job]) -> Vec<CountEntry> {
    frequency(jobs.iter().filter_map(|j| j.location.as_deref().and_then(location_bucket)))
}

pub fn postings_by_remote_type(jobs: &[Job]) -> Vec<CountEntry> {
    frequency(jobs.iter().map(|j| remote_type(j).label().to_string()))
}

/// Share of jobs mentioning each vocabulary skill. Shares overlap and need
/// not sum to 100.
pub fn skills_in_demand(jobs: &[Job]) -> Vec<SkillDemand> {
    if jobs.is_empty() {
        return Vec::new();
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for skill in jobs.iter().flat_map(job_skills) {
        *counts.entry(skill).or_default() += 1;
    }

    let mut demand: Vec<SkillDemand> = SKILL_VOCABULARY
        .iter()
        .filter_map(|skill| {
            let count = *counts.get(skill)?;
            Some(SkillDemand {
                name: skill.to_string(),
                percentage: percent(count, jobs.len()),
            })
        })
        .collect();
    demand.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    demand
}

pub fn average_salary_by_title(jobs: &[Job]) -> Vec<TitleSalary> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, (String, Vec<u64>)> = HashMap::new();

    for job in jobs {
        let Some(salary) = job_salary(job) else {
            continue;
        };
        let display = normalize_whitespace(&job.title);
        if display.is_empty() {
            continue;
        }
        let key = display.to_lowercase();
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups
            .entry(key)
            .or_insert_with(|| (display, Vec::new()))
            .1
            .push(salary);
    }

    let mut averages: Vec<TitleSalary> = order
        .into_iter()
        .filter_map(|key| groups.remove(&key))
        .filter_map(|(name, salaries)| {
            Some(TitleSalary {
                salary: mean(&salaries)?,
                sample_size: salaries.len(),
                name,
            })
        })
        .collect();
    averages.sort_by(|a, b| b.salary.cmp(&a.salary));
    averages
}

pub fn recent_jobs(jobs: &[Job]) -> Vec<RecentJob> {
    jobs.iter()
        .take(RECENT_JOBS_LIMIT)
        .map(|job| RecentJob {
            title: job.title.clone(),
            company_name: job.company_name.clone(),
            company_logo: job.company_logo.clone(),
            location: job
                .location_text()
                .split(',')
                .next()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or("Unknown")
                .to_string(),
            salary: job_salary(job),
            remote_type: remote_type(job),
        })
        .collect()
}

// Counts in descending order; ties keep first-seen order.
fn frequency(values: impl Iterator<Item = String>) -> Vec<CountEntry> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<CountEntry> = Vec::new();

    for value in values {
        match index.get(&value).copied() {
            Some(i) => entries[i].value += 1,
            None => {
                index.insert(value.clone(), entries.len());
                entries.push(CountEntry { name: value, value: 1 });
            }
        }
    }

    entries.sort_by(|a, b| b.value.cmp(&a.value));
    entries
}

fn mean(values: &[u64]) -> Option<u64> {
    if values.is_empty() {
        return None;
    }
    let total: u128 = values.iter().map(|v| u128::from(*v)).sum();
    Some((total as f64 / values.len() as f64).round() as u64)
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

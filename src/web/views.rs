// src/web/views.rs
//! Askama page models. Handlers build these from core results; templates
//! only read plain strings, numbers and flags.

use askama::Template;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use tracing::error;

use crate::core::analytics::{CountEntry, DashboardReport};
use crate::core::pagination::{page_window, Page, PageLink};
use crate::core::search::job_salary;
use crate::core::DashboardData;
use crate::types::Job;
use crate::utils::{format_currency, format_posted_date};
use crate::web::types::ListingParams;

const EXCERPT_CHARS: usize = 200;

/// Render a page, mapping template failures to a 500
pub fn render<T: Template>(template: &T) -> Result<RawHtml<String>, Status> {
    template.render().map(RawHtml).map_err(|e| {
        error!("Failed to render {}: {}", std::any::type_name::<T>(), e);
        Status::InternalServerError
    })
}

pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

fn select_options(values: &[String], current: Option<&str>) -> Vec<SelectOption> {
    let current = current.map(str::trim).unwrap_or("");
    values
        .iter()
        .map(|value| SelectOption {
            value: value.clone(),
            selected: value.eq_ignore_ascii_case(current),
        })
        .collect()
}

pub struct JobCardView {
    pub title: String,
    pub company_name: String,
    pub company_logo: String,
    pub location: String,
    pub state: String,
    pub posted: String,
    pub excerpt: String,
    pub salary: String,
    pub skills: Vec<String>,
    pub detail_url: String,
}

impl JobCardView {
    pub fn from_job(job: &Job) -> Self {
        let excerpt = match (&job.primary_description, &job.description) {
            (Some(primary), _) => primary.clone(),
            (None, Some(description)) if description.chars().count() > EXCERPT_CHARS => {
                let cut: String = description.chars().take(EXCERPT_CHARS).collect();
                format!("{}...", cut)
            }
            (None, Some(description)) => description.clone(),
            (None, None) => "No description available".to_string(),
        };

        Self {
            title: job.title.clone(),
            company_name: job.company_name.clone().unwrap_or_default(),
            company_logo: job.company_logo.clone().unwrap_or_default(),
            location: job.location.clone().unwrap_or_default(),
            state: job.job_state.clone().unwrap_or_else(|| "Active".to_string()),
            posted: format_posted_date(job.created_at.as_deref()),
            excerpt,
            salary: job_salary(job).map(format_currency).unwrap_or_default(),
            skills: job.skill_tags(),
            detail_url: job.detail_url.clone().unwrap_or_default(),
        }
    }
}

pub struct PageLinkView {
    pub label: String,
    pub href: String,
    pub current: bool,
    pub gap: bool,
}

#[derive(Template)]
#[template(path = "listings.html")]
pub struct ListingsTemplate {
    pub query: String,
    pub min_salary: String,
    pub locations: Vec<SelectOption>,
    pub companies: Vec<SelectOption>,
    pub skills: Vec<SelectOption>,
    pub cards: Vec<JobCardView>,
    pub total_items: usize,
    pub first_position: usize,
    pub last_position: usize,
    pub previous_href: String,
    pub next_href: String,
    pub page_links: Vec<PageLinkView>,
}

/// Filter dropdown contents, computed over the unfiltered collection
pub struct Facets {
    pub locations: Vec<String>,
    pub companies: Vec<String>,
    pub skills: Vec<String>,
}

impl ListingsTemplate {
    pub fn new(params: &ListingParams, facets: &Facets, page: &Page<Job>) -> Self {
        let page_links = if page.total_pages > 1 {
            page_window(page.page, page.total_pages)
                .into_iter()
                .map(|link| match link {
                    PageLink::Number(n) => PageLinkView {
                        label: n.to_string(),
                        href: params.page_href(n),
                        current: n == page.page,
                        gap: false,
                    },
                    PageLink::Ellipsis => PageLinkView {
                        label: "...".to_string(),
                        href: String::new(),
                        current: false,
                        gap: true,
                    },
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            query: params.query.clone().unwrap_or_default(),
            min_salary: params.min_salary.clone().unwrap_or_default(),
            locations: select_options(&facets.locations, params.location.as_deref()),
            companies: select_options(&facets.companies, params.company.as_deref()),
            skills: select_options(&facets.skills, params.skill.as_deref()),
            cards: page.items.iter().map(JobCardView::from_job).collect(),
            total_items: page.total_items,
            first_position: page.first_position(),
            last_position: page.last_position(),
            previous_href: if page.has_previous() {
                params.page_href(page.page - 1)
            } else {
                String::new()
            },
            next_href: if page.has_next() {
                params.page_href(page.page + 1)
            } else {
                String::new()
            },
            page_links,
        }
    }
}

/// Horizontal CSS bar; `width` is a percentage of the largest value
pub struct BarView {
    pub label: String,
    pub value: String,
    pub width: u32,
}

fn bars(entries: impl Iterator<Item = (String, u64, String)>) -> Vec<BarView> {
    let entries: Vec<_> = entries.collect();
    let max = entries.iter().map(|(_, v, _)| *v).max().unwrap_or(0).max(1);
    entries
        .into_iter()
        .map(|(label, value, shown)| BarView {
            label,
            value: shown,
            width: (value as f64 / max as f64 * 100.0).round() as u32,
        })
        .collect()
}

fn count_bars(entries: &[CountEntry]) -> Vec<BarView> {
    bars(
        entries
            .iter()
            .map(|e| (e.name.clone(), e.value as u64, e.value.to_string())),
    )
}

pub struct ChartView {
    pub title: &'static str,
    pub rows: Vec<BarView>,
}

impl ChartView {
    fn new(title: &'static str, rows: Vec<BarView>) -> Self {
        Self { title, rows }
    }
}

pub struct RecentJobView {
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub salary: String,
    pub remote_type: String,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub notice: String,
    pub total_jobs: usize,
    pub average_salary: String,
    pub top_location: String,
    pub top_location_percentage: String,
    pub active_jobs: usize,
    pub charts: Vec<ChartView>,
    pub recent_jobs: Vec<RecentJobView>,
}

impl DashboardTemplate {
    pub fn new(data: &DashboardData, report: &DashboardReport) -> Self {
        let summary = &report.summary;
        Self {
            notice: data.notice.clone().unwrap_or_default(),
            total_jobs: summary.total_jobs,
            average_salary: summary.average_salary.clone(),
            top_location: summary.top_location.clone(),
            top_location_percentage: summary.top_location_percentage.clone(),
            active_jobs: summary.active_jobs,
            charts: vec![
                ChartView::new(
                    "Job Postings Over Time",
                    bars(
                        report
                            .monthly_postings
                            .iter()
                            .map(|m| (m.name.clone(), m.count as u64, m.count.to_string())),
                    ),
                ),
                ChartView::new(
                    "Remote vs. Onsite",
                    count_bars(&report.postings_by_remote_type),
                ),
                ChartView::new("Jobs by Title", count_bars(&report.postings_by_title)),
                ChartView::new("Jobs by Location", count_bars(&report.postings_by_location)),
                ChartView::new(
                    "Skills in Demand",
                    bars(report.skills_in_demand.iter().map(|s| {
                        (
                            s.name.clone(),
                            s.percentage as u64,
                            format!("{}%", s.percentage),
                        )
                    })),
                ),
                ChartView::new(
                    "Average Salary by Title",
                    bars(
                        report
                            .salary_by_title
                            .iter()
                            .map(|t| (t.name.clone(), t.salary, format_currency(t.salary))),
                    ),
                ),
            ],
            recent_jobs: report
                .recent_jobs
                .iter()
                .map(|job| RecentJobView {
                    title: job.title.clone(),
                    company_name: job.company_name.clone().unwrap_or_default(),
                    location: job.location.clone(),
                    salary: job.salary.map(format_currency).unwrap_or_default(),
                    remote_type: job.remote_type.label().to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "upload.html")]
pub struct UploadTemplate {
    pub limit_mb: u64,
    pub success: String,
    pub error: String,
}

impl UploadTemplate {
    pub fn form(limit_mb: u64) -> Self {
        Self {
            limit_mb,
            success: String::new(),
            error: String::new(),
        }
    }

    pub fn succeeded(limit_mb: u64, message: String) -> Self {
        Self {
            success: message,
            ..Self::form(limit_mb)
        }
    }

    pub fn failed(limit_mb: u64, message: String) -> Self {
        Self {
            error: message,
            ..Self::form(limit_mb)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pagination::{paginate, PageOutcome};

    fn page_of(jobs: &[Job], page: usize) -> Page<Job> {
        match paginate(jobs, 2, page) {
            PageOutcome::Page(p) => p,
            PageOutcome::Redirect => panic!("unexpected redirect"),
        }
    }

    #[test]
    fn card_prefers_primary_description_and_truncates_long_text() {
        let mut job = Job::new("Engineer");
        job.description = Some("x".repeat(250));
        let card = JobCardView::from_job(&job);
        assert_eq!(card.excerpt.len(), EXCERPT_CHARS + 3);
        assert!(card.excerpt.ends_with("..."));
        assert_eq!(card.state, "Active");
        assert_eq!(card.posted, "N/A");

        job.primary_description = Some("Short summary".to_string());
        assert_eq!(JobCardView::from_job(&job).excerpt, "Short summary");
    }

    #[test]
    fn card_shows_salary_and_skill_tags() {
        let mut job = Job::new("Data Scientist");
        job.description = Some("Salary: $110,000 - $140,000".to_string());
        job.skill = Some("Python, SQL".to_string());
        let card = JobCardView::from_job(&job);
        assert_eq!(card.salary, "$110,000");
        assert_eq!(card.skills, vec!["Python", "SQL"]);
    }

    #[test]
    fn listing_links_carry_filters() {
        let jobs: Vec<Job> = (0..5).map(|i| Job::new(format!("Job {}", i))).collect();
        let params = ListingParams {
            company: Some("Statt".to_string()),
            ..Default::default()
        };
        let facets = Facets {
            locations: vec![],
            companies: vec!["Statt".to_string(), "Acme".to_string()],
            skills: vec![],
        };

        let view = ListingsTemplate::new(&params, &facets, &page_of(&jobs, 2));
        assert_eq!(view.first_position, 3);
        assert_eq!(view.last_position, 4);
        assert_eq!(view.previous_href, "/?company=Statt&page=1");
        assert_eq!(view.next_href, "/?company=Statt&page=3");
        assert_eq!(view.page_links.len(), 3);
        assert!(view.page_links[1].current);
        assert!(view.companies[0].selected);
        assert!(!view.companies[1].selected);
    }

    #[test]
    fn bars_scale_to_largest_value() {
        let entries = vec![
            CountEntry { name: "Onsite".to_string(), value: 4 },
            CountEntry { name: "Remote".to_string(), value: 1 },
        ];
        let bars = count_bars(&entries);
        assert_eq!(bars[0].width, 100);
        assert_eq!(bars[1].width, 25);
        assert_eq!(bars[1].value, "1");
    }

    #[test]
    fn bars_handle_very_large_salaries() {
        let bars = bars(
            [
                ("Quant".to_string(), 200_000_000_000_000_000u64, String::new()),
                ("Analyst".to_string(), 50_000_000_000_000_000u64, String::new()),
            ]
            .into_iter(),
        );
        assert_eq!(bars[0].width, 100);
        assert_eq!(bars[1].width, 25);
    }

    #[test]
    fn templates_render() {
        let upload = UploadTemplate::failed(10, "Please select an Excel (.xlsx) file".to_string());
        let html = upload.render().unwrap();
        assert!(html.contains("Please select an Excel (.xlsx) file"));

        let data = DashboardData::from_feed(Err(crate::error::BoardError::UpstreamFetch(
            "HTTP 500".to_string(),
        )));
        let report = crate::core::analytics::build_report(&data.jobs);
        let html = DashboardTemplate::new(&data, &report).render().unwrap();
        assert!(html.contains("Using sample data"));
    }
}

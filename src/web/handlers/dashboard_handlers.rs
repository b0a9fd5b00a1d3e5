// src/web/handlers/dashboard_handlers.rs
use crate::core::analytics::{build_report, DashboardReport};
use crate::core::DashboardSource;
use crate::types::Job;
use crate::web::types::{DataResponse, ServerConfig};
use crate::web::views::{render, DashboardTemplate};

use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

pub async fn dashboard_handler(source: &State<DashboardSource>) -> Result<RawHtml<String>, Status> {
    let data = source.load().await;
    let report = build_report(&data.jobs);

    if data.using_sample_data {
        info!("Rendering dashboard from {} sample jobs", data.jobs.len());
    } else {
        info!("Rendering dashboard from {} jobs", data.jobs.len());
    }

    render(&DashboardTemplate::new(&data, &report))
}

/// Raw collection consumed by the dashboard
pub async fn dashboard_jobs_handler(config: &State<ServerConfig>) -> Json<Vec<Job>> {
    Json(config.store.load().await)
}

pub async fn dashboard_summary_handler(
    config: &State<ServerConfig>,
) -> Json<DataResponse<DashboardReport>> {
    let jobs = config.store.load().await;
    let report = build_report(&jobs);

    Json(DataResponse::success(
        format!("Dashboard report for {} jobs", jobs.len()),
        report,
    ))
}

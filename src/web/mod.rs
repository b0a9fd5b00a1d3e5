// src/web/mod.rs

pub mod handlers;
pub mod types;
pub mod views;

pub use handlers::*;
pub use types::*;

use crate::core::analytics::DashboardReport;
use crate::core::DashboardSource;
use crate::environment::EnvironmentConfig;
use crate::types::Job;
use anyhow::Result;
use rocket::data::{Limits, ToByteUnit};
use rocket::form::{Errors, Form};
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, get, post, routes, Build, Rocket, State};
use tracing::info;

#[get("/?<params..>")]
pub async fn listings(params: ListingParams, config: &State<ServerConfig>) -> Result<ListingResponse, Status> {
    handlers::listings_handler(params, config).await
}

#[get("/dashboard")]
pub async fn dashboard(source: &State<DashboardSource>) -> Result<RawHtml<String>, Status> {
    handlers::dashboard_handler(source).await
}

#[get("/upload")]
pub async fn upload_page(config: &State<ServerConfig>) -> Result<RawHtml<String>, Status> {
    handlers::upload_page_handler(config).await
}

#[post("/upload", data = "<upload>")]
pub async fn upload_form(
    upload: Result<Form<JobUploadForm<'_>>, Errors<'_>>,
    config: &State<ServerConfig>,
) -> Result<RawHtml<String>, Status> {
    handlers::upload_form_handler(upload, config).await
}

#[get("/dashboard/jobs")]
pub async fn dashboard_jobs(config: &State<ServerConfig>) -> Json<Vec<Job>> {
    handlers::dashboard_jobs_handler(config).await
}

#[get("/dashboard/summary")]
pub async fn dashboard_summary(config: &State<ServerConfig>) -> Json<DataResponse<DashboardReport>> {
    handlers::dashboard_summary_handler(config).await
}

#[post("/jobs/upload", data = "<upload>")]
pub async fn upload_jobs(
    upload: Result<Form<JobUploadForm<'_>>, Errors<'_>>,
    config: &State<ServerConfig>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::upload_api_handler(upload, config).await
}

#[get("/health")]
pub async fn health(config: &State<ServerConfig>) -> Json<TextResponse> {
    handlers::health_handler(config).await
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Endpoint not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Check the request path".to_string()],
    ))
}

#[rocket::catch(413)]
pub fn payload_too_large() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Upload exceeds the size limit".to_string(),
        "FILE_TOO_LARGE".to_string(),
        vec!["Use a smaller spreadsheet".to_string()],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

/// Assemble the application without launching it
pub fn build_rocket(environment: &EnvironmentConfig) -> Result<Rocket<Build>> {
    let server_config = ServerConfig::from_environment(environment);
    let dashboard_source =
        DashboardSource::new(environment.dashboard_url(), environment.fetch_timeout_secs)?;

    let upload_limit = environment.upload_limit_mb.mebibytes();
    let limits = Limits::default()
        .limit("file", upload_limit)
        .limit("data-form", upload_limit + 1.mebibytes());

    let figment = rocket::Config::figment()
        .merge(("address", environment.address.clone()))
        .merge(("port", environment.port))
        .merge(("limits", limits));

    Ok(rocket::custom(figment)
        .manage(server_config)
        .manage(dashboard_source)
        .register("/api", catchers![bad_request, not_found, payload_too_large, internal_error])
        .mount("/", routes![listings, dashboard, upload_page, upload_form])
        .mount(
            "/api",
            routes![dashboard_jobs, dashboard_summary, upload_jobs, health],
        ))
}

// Main server start function
pub async fn start_web_server(environment: EnvironmentConfig) -> Result<()> {
    info!("Starting job board server");
    info!("Job data: {}", environment.data_path.display());
    info!("Dashboard data: {}", environment.dashboard_url());
    info!("Server: http://{}:{}", environment.address, environment.port);

    let _rocket = build_rocket(&environment)?
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Web server error: {}", e))?;

    Ok(())
}

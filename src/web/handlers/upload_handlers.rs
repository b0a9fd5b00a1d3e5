// src/web/handlers/upload_handlers.rs
//! Spreadsheet upload, as an HTML form and as a JSON API

use crate::core::importer::{import_spreadsheet, ImportSummary};
use crate::error::BoardError;
use crate::utils::validate_file_extension;
use crate::web::types::{
    ActionResponse, JobUploadForm, ServerConfig, StandardErrorResponse,
};
use crate::web::views::{render, UploadTemplate};

use rocket::form::{Errors, Form};
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

pub const ALLOWED_EXTENSIONS: [&str; 1] = ["xlsx"];

/// Why an upload was rejected, in a form both the page and the API can show
#[derive(Debug)]
pub struct UploadFailure {
    pub message: String,
    pub code: &'static str,
    pub suggestions: Vec<String>,
}

impl UploadFailure {
    fn into_response(self) -> StandardErrorResponse {
        StandardErrorResponse::new(self.message, self.code.to_string(), self.suggestions)
    }
}

fn missing_file(errors: &Errors<'_>, limit_mb: u64) -> UploadFailure {
    warn!("Rejected upload form: {}", errors);
    UploadFailure {
        message: "No spreadsheet received".to_string(),
        code: "INVALID_UPLOAD",
        suggestions: vec![
            "Send the workbook in a multipart field named \"file\"".to_string(),
            format!("Keep the file under {} MB", limit_mb),
        ],
    }
}

/// Validate the uploaded file, then replace the stored collection with its
/// rows. The upload is staged in a temp file that is always removed.
pub async fn import_upload(
    file: &mut TempFile<'_>,
    config: &ServerConfig,
) -> Result<ImportSummary, UploadFailure> {
    let file_name = file
        .raw_name()
        .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str().to_string())
        .unwrap_or_default();

    if let Err(e) = validate_file_extension(&file_name, &ALLOWED_EXTENSIONS) {
        warn!("Rejected upload '{}': {}", file_name, e);
        return Err(UploadFailure {
            message: "Please select an Excel (.xlsx) file".to_string(),
            code: "INVALID_FORMAT",
            suggestions: vec!["Upload a workbook saved as .xlsx".to_string()],
        });
    }

    info!("Importing uploaded spreadsheet '{}' ({} bytes)", file_name, file.len());

    let temp_path = std::env::temp_dir().join(format!("jobs_upload_{}.xlsx", uuid::Uuid::new_v4()));

    if let Err(e) = file.persist_to(&temp_path).await {
        error!("Failed to save uploaded file: {}", e);
        return Err(UploadFailure {
            message: "Failed to process uploaded file".to_string(),
            code: "FILE_SAVE_ERROR",
            suggestions: vec!["Try uploading the file again".to_string()],
        });
    }

    let bytes = tokio::fs::read(&temp_path).await;
    let _ = tokio::fs::remove_file(&temp_path).await;

    let bytes = bytes.map_err(|e| {
        error!("Failed to read staged upload: {}", e);
        UploadFailure {
            message: "Failed to process uploaded file".to_string(),
            code: "FILE_SAVE_ERROR",
            suggestions: vec!["Try uploading the file again".to_string()],
        }
    })?;

    import_spreadsheet(&config.store, &bytes).await.map_err(|e| {
        error!("Import failed: {}", e);
        let suggestions = match e {
            BoardError::Import(_) => vec![
                "Check the file opens in a spreadsheet application".to_string(),
                "Put column headers such as Title, Location and Company Name in the first row"
                    .to_string(),
            ],
            _ => vec![
                "Try again in a few moments".to_string(),
                "Check the server can write its data file".to_string(),
            ],
        };
        UploadFailure {
            message: "Failed to upload file. Please try again.".to_string(),
            code: e.code(),
            suggestions,
        }
    })
}

fn success_message(summary: &ImportSummary) -> String {
    format!("File uploaded successfully! Imported {} jobs.", summary.imported)
}

pub async fn upload_page_handler(config: &State<ServerConfig>) -> Result<RawHtml<String>, Status> {
    render(&UploadTemplate::form(config.upload_limit_mb))
}

pub async fn upload_form_handler(
    upload: Result<Form<JobUploadForm<'_>>, Errors<'_>>,
    config: &State<ServerConfig>,
) -> Result<RawHtml<String>, Status> {
    let limit_mb = config.upload_limit_mb;

    let outcome = match upload {
        Ok(mut form) => import_upload(&mut form.file, config).await,
        Err(errors) => Err(missing_file(&errors, limit_mb)),
    };

    let page = match outcome {
        Ok(summary) => UploadTemplate::succeeded(limit_mb, success_message(&summary)),
        Err(failure) => UploadTemplate::failed(limit_mb, failure.message),
    };
    render(&page)
}

pub async fn upload_api_handler(
    upload: Result<Form<JobUploadForm<'_>>, Errors<'_>>,
    config: &State<ServerConfig>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let mut form = upload
        .map_err(|errors| Json(missing_file(&errors, config.upload_limit_mb).into_response()))?;

    let summary = import_upload(&mut form.file, config)
        .await
        .map_err(|failure| Json(failure.into_response()))?;

    let mut response = ActionResponse::success(success_message(&summary), "imported".to_string())
        .with_next_actions(vec![
            "Browse the listings".to_string(),
            "Open the dashboard".to_string(),
        ]);

    if !summary.ignored_columns.is_empty() {
        response.message = format!(
            "{} Ignored columns: {}.",
            response.message,
            summary.ignored_columns.join(", ")
        );
    }

    Ok(Json(response))
}

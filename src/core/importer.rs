// src/core/importer.rs
//! Spreadsheet upload: first sheet, header row keyed, full replacement

use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};
use std::io::Cursor;
use tracing::{info, warn};

use crate::core::job_store::JobStore;
use crate::error::{BoardError, BoardResult};
use crate::types::job::TIMESTAMP_FORMAT;
use crate::types::{Job, JobField};

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedWorkbook {
    pub jobs: Vec<Job>,
    /// Header cells that did not map to a job field
    pub ignored_columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub imported: usize,
    pub ignored_columns: Vec<String>,
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| cell.to_string()),
        other => other.to_string(),
    }
}

/// Parse the first sheet of a workbook into jobs. Columns are matched by
/// header; unknown columns are dropped and blank rows skipped.
pub fn parse_workbook(bytes: &[u8]) -> BoardResult<ParsedWorkbook> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| BoardError::Import(format!("not a readable spreadsheet: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| BoardError::Import("workbook has no sheets".to_string()))?
        .map_err(|e| BoardError::Import(format!("failed to read first sheet: {}", e)))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        warn!("First sheet is empty, importing no jobs");
        return Ok(ParsedWorkbook {
            jobs: Vec::new(),
            ignored_columns: Vec::new(),
        });
    };

    let mut ignored_columns = Vec::new();
    let columns: Vec<Option<JobField>> = header
        .iter()
        .map(|cell| {
            let name = cell_text(cell);
            let field = JobField::from_header(&name);
            if field.is_none() && !name.trim().is_empty() {
                ignored_columns.push(name.trim().to_string());
            }
            field
        })
        .collect();

    let jobs = rows
        .filter(|row| row.iter().any(|cell| !cell_text(cell).trim().is_empty()))
        .map(|row| {
            let mut job = Job::default();
            for (cell, field) in row.iter().zip(&columns) {
                if let Some(field) = field {
                    job.set_field(*field, cell_text(cell));
                }
            }
            job
        })
        .collect();

    Ok(ParsedWorkbook {
        jobs,
        ignored_columns,
    })
}

/// Replace the stored collection with the workbook's rows. No merge or
/// dedupe against existing data.
pub async fn import_spreadsheet(store: &JobStore, bytes: &[u8]) -> BoardResult<ImportSummary> {
    let parsed = parse_workbook(bytes)?;

    if !parsed.ignored_columns.is_empty() {
        info!("Ignoring unknown columns: {:?}", parsed.ignored_columns);
    }

    store.save(&parsed.jobs).await?;
    info!("Imported {} jobs from spreadsheet", parsed.jobs.len());

    Ok(ImportSummary {
        imported: parsed.jobs.len(),
        ignored_columns: parsed.ignored_columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn workbook(header: &[&str], rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, name) in header.iter().enumerate() {
            sheet.write_string(0, col as u16, *name).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet.write_string(r as u32 + 1, col as u16, *value).unwrap();
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[tokio::test]
    async fn import_three_rows_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JobStore::new(dir.path().join("jobs.json"));
        let bytes = workbook(
            &["Title", "Location", "Company Name"],
            &[
                &["ML Engineer", "Austin, Texas, United States", "Statt"],
                &["Data Scientist", "New York, New York, United States", "DataWorks"],
                &["AI Researcher", "United States", "TechCorp"],
            ],
        );

        let summary = import_spreadsheet(&store, &bytes).await.unwrap();
        assert_eq!(summary.imported, 3);

        let jobs = store.load().await;
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[1].title, "Data Scientist");
        assert_eq!(jobs[1].location.as_deref(), Some("New York, New York, United States"));
        assert_eq!(jobs[1].company_name.as_deref(), Some("DataWorks"));
        for job in &jobs {
            let value = serde_json::to_value(job).unwrap();
            assert_eq!(value.as_object().unwrap().len(), 3);
            assert!(job.description.is_none());
            assert!(job.created_at.is_none());
        }
    }

    #[tokio::test]
    async fn import_replaces_existing_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = JobStore::new(dir.path().join("jobs.json"));
        store
            .save(&[Job::new("Old 1"), Job::new("Old 2"), Job::new("Old 3")])
            .await
            .unwrap();

        let bytes = workbook(&["Title"], &[&["New"]]);
        import_spreadsheet(&store, &bytes).await.unwrap();

        let titles: Vec<_> = store.load().await.into_iter().map(|j| j.title).collect();
        assert_eq!(titles, vec!["New"]);
    }

    #[test]
    fn unknown_columns_are_dropped_and_reported() {
        let bytes = workbook(
            &["Title", "Salary Band", "company_name"],
            &[&["SRE", "B3", "Acme"]],
        );
        let parsed = parse_workbook(&bytes).unwrap();
        assert_eq!(parsed.ignored_columns, vec!["Salary Band"]);
        assert_eq!(parsed.jobs[0].company_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn blank_rows_are_skipped_and_blank_cells_stay_absent() {
        let bytes = workbook(
            &["Title", "Location"],
            &[&["First", ""], &["", ""], &["Third", "Remote"]],
        );
        let parsed = parse_workbook(&bytes).unwrap();
        assert_eq!(parsed.jobs.len(), 2);
        assert_eq!(parsed.jobs[0].location, None);
        assert_eq!(parsed.jobs[1].location.as_deref(), Some("Remote"));
    }

    #[test]
    fn numeric_cells_render_without_fraction() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Title").unwrap();
        sheet.write_string(0, 1, "Poster Id").unwrap();
        sheet.write_string(1, 0, "Analyst").unwrap();
        sheet.write_number(1, 1, 12345.0).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let parsed = parse_workbook(&bytes).unwrap();
        assert_eq!(parsed.jobs[0].poster_id, Some(12345));
    }

    #[test]
    fn missing_title_column_leaves_empty_title() {
        let bytes = workbook(&["Location"], &[&["Remote"]]);
        let parsed = parse_workbook(&bytes).unwrap();
        assert_eq!(parsed.jobs[0].title, "");
        assert_eq!(parsed.jobs[0].location.as_deref(), Some("Remote"));
    }

    #[test]
    fn non_spreadsheet_bytes_fail() {
        let result = parse_workbook(b"Title,Location\nEngineer,Remote\n");
        assert!(matches!(result, Err(BoardError::Import(_))));
    }

    #[tokio::test]
    async fn failed_parse_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = JobStore::new(dir.path().join("jobs.json"));
        store.save(&[Job::new("Keep me")]).await.unwrap();

        assert!(import_spreadsheet(&store, b"garbage").await.is_err());
        assert_eq!(store.load().await.len(), 1);
    }
}

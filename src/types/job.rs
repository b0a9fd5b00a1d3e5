// src/types/job.rs
//! Canonical job record and the single mapping layer between it and the
//! persisted/uploaded representations.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One job posting. Persisted keys are the display-style names used by the
/// source spreadsheets ("Company Name", "Created At", ...). Underscore and
/// camelCase spellings are accepted on read and never written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "Title", alias = "title", default)]
    pub title: String,

    #[serde(
        rename = "Description",
        alias = "description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(
        rename = "Primary Description",
        alias = "Primary_Description",
        alias = "primaryDescription",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub primary_description: Option<String>,

    #[serde(
        rename = "Detail URL",
        alias = "Detail_URL",
        alias = "detailUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub detail_url: Option<String>,

    #[serde(
        rename = "Location",
        alias = "location",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,

    #[serde(
        rename = "Skill",
        alias = "skill",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub skill: Option<String>,

    #[serde(
        rename = "Insight",
        alias = "insight",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub insight: Option<String>,

    #[serde(
        rename = "Job State",
        alias = "Job_State",
        alias = "jobState",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub job_state: Option<String>,

    #[serde(
        rename = "Poster Id",
        alias = "Poster_Id",
        alias = "posterId",
        default,
        deserialize_with = "deserialize_poster_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub poster_id: Option<i64>,

    #[serde(
        rename = "Company Name",
        alias = "Company_Name",
        alias = "companyName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub company_name: Option<String>,

    #[serde(
        rename = "Company Logo",
        alias = "Company_Logo",
        alias = "companyLogo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub company_logo: Option<String>,

    #[serde(
        rename = "Created At",
        alias = "Created_At",
        alias = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,

    #[serde(
        rename = "Scraped At",
        alias = "Scraped_At",
        alias = "scrapedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub scraped_at: Option<String>,
}

// Poster ids arrive as integers, floats (spreadsheets) or numeric strings.
fn deserialize_poster_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Int(v)) => Some(v),
        Some(RawId::Float(v)) if v.fract() == 0.0 => Some(v as i64),
        Some(RawId::Text(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

impl Job {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn location_text(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }

    /// Parse `created_at`. Accepts the stored timestamp form, RFC 3339 and
    /// bare dates.
    pub fn created_at_datetime(&self) -> Option<NaiveDateTime> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    /// Individual entries of the comma-joined `skill` field
    pub fn skill_tags(&self) -> Vec<String> {
        self.skill
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Assign a value through the header mapping. Blank values leave the
    /// field absent.
    pub fn set_field(&mut self, field: JobField, value: String) {
        let value = value.trim().to_string();
        if value.is_empty() {
            return;
        }

        match field {
            JobField::Title => self.title = value,
            JobField::Description => self.description = Some(value),
            JobField::PrimaryDescription => self.primary_description = Some(value),
            JobField::DetailUrl => self.detail_url = Some(value),
            JobField::Location => self.location = Some(value),
            JobField::Skill => self.skill = Some(value),
            JobField::Insight => self.insight = Some(value),
            JobField::JobState => self.job_state = Some(value),
            JobField::PosterId => self.poster_id = value.parse().ok(),
            JobField::CompanyName => self.company_name = Some(value),
            JobField::CompanyLogo => self.company_logo = Some(value),
            JobField::CreatedAt => self.created_at = Some(value),
            JobField::ScrapedAt => self.scraped_at = Some(value),
        }
    }
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Known job columns, addressed by spreadsheet header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    Title,
    Description,
    PrimaryDescription,
    DetailUrl,
    Location,
    Skill,
    Insight,
    JobState,
    PosterId,
    CompanyName,
    CompanyLogo,
    CreatedAt,
    ScrapedAt,
}

impl JobField {
    /// Map a header cell ("Company Name", "company_name", "companyName") to a
    /// field. Unknown headers yield `None` and their column is dropped.
    pub fn from_header(header: &str) -> Option<Self> {
        let normalized: String = header
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        let field = match normalized.as_str() {
            "title" => JobField::Title,
            "description" => JobField::Description,
            "primarydescription" => JobField::PrimaryDescription,
            "detailurl" => JobField::DetailUrl,
            "location" => JobField::Location,
            "skill" | "skills" => JobField::Skill,
            "insight" => JobField::Insight,
            "jobstate" => JobField::JobState,
            "posterid" => JobField::PosterId,
            "companyname" => JobField::CompanyName,
            "companylogo" => JobField::CompanyLogo,
            "createdat" => JobField::CreatedAt,
            "scrapedat" => JobField::ScrapedAt,
            _ => return None,
        };
        Some(field)
    }
}

/// Work arrangement derived from description and location text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteType {
    Remote,
    Hybrid,
    Onsite,
    Unknown,
}

impl RemoteType {
    pub fn label(self) -> &'static str {
        match self {
            RemoteType::Remote => "Remote",
            RemoteType::Hybrid => "Hybrid",
            RemoteType::Onsite => "Onsite",
            RemoteType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for RemoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_display_and_underscore_keys() {
        let raw = r#"[
            {"Title": "Data Scientist", "Company Name": "DataWorks", "Created At": "2025-01-20 14:30:00"},
            {"Title": "ML Engineer", "Company_Name": "Statt", "Job_State": "LISTED"}
        ]"#;
        let jobs: Vec<Job> = serde_json::from_str(raw).unwrap();

        assert_eq!(jobs[0].company_name.as_deref(), Some("DataWorks"));
        assert_eq!(jobs[1].company_name.as_deref(), Some("Statt"));
        assert_eq!(jobs[1].job_state.as_deref(), Some("LISTED"));
    }

    #[test]
    fn writes_only_canonical_keys_and_omits_absent_fields() {
        let mut job = Job::new("Backend Engineer");
        job.company_name = Some("Acme".to_string());

        let value = serde_json::to_value(&job).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 2);
        assert_eq!(object["Title"], "Backend Engineer");
        assert_eq!(object["Company Name"], "Acme");
    }

    #[test]
    fn null_skill_and_string_poster_id_are_accepted() {
        let raw = r#"{"Title": "SRE", "Skill": null, "Poster Id": "42"}"#;
        let job: Job = serde_json::from_str(raw).unwrap();
        assert_eq!(job.skill, None);
        assert_eq!(job.poster_id, Some(42));
    }

    #[test]
    fn header_mapping_ignores_case_spaces_and_underscores() {
        assert_eq!(JobField::from_header("Company Name"), Some(JobField::CompanyName));
        assert_eq!(JobField::from_header("company_name"), Some(JobField::CompanyName));
        assert_eq!(JobField::from_header("companyName"), Some(JobField::CompanyName));
        assert_eq!(JobField::from_header(" Title "), Some(JobField::Title));
        assert_eq!(JobField::from_header("Salary Band"), None);
    }

    #[test]
    fn set_field_skips_blank_values() {
        let mut job = Job::new("Analyst");
        job.set_field(JobField::Location, "   ".to_string());
        job.set_field(JobField::PosterId, "12345".to_string());
        assert_eq!(job.location, None);
        assert_eq!(job.poster_id, Some(12345));
    }

    #[test]
    fn skill_tags_split_comma_joined_field() {
        let mut job = Job::new("Engineer");
        job.skill = Some("Python, SQL ,, Docker".to_string());
        assert_eq!(job.skill_tags(), vec!["Python", "SQL", "Docker"]);
    }

    #[test]
    fn timestamps_parse_in_stored_and_bare_forms() {
        assert!(parse_timestamp("2024-10-22 18:15:23").is_some());
        assert!(parse_timestamp("2024-10-22").is_some());
        assert!(parse_timestamp("2024-10-22T18:15:23Z").is_some());
        assert!(parse_timestamp("last tuesday").is_none());
    }
}

// src/web/types.rs
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use rocket::form::FromForm;
use rocket::fs::TempFile;
use rocket::serde::Serialize;

use crate::core::search::SearchCriteria;
use crate::core::JobStore;
use crate::environment::EnvironmentConfig;

pub struct ServerConfig {
    pub store: JobStore,
    pub page_size: usize,
    pub upload_limit_mb: u64,
}

impl ServerConfig {
    pub fn from_environment(environment: &EnvironmentConfig) -> Self {
        Self {
            store: JobStore::new(environment.data_path.clone()),
            page_size: environment.page_size,
            upload_limit_mb: environment.upload_limit_mb,
        }
    }
}

/// Query string of the listing page. Every value is kept as raw text so a
/// malformed `page` or `minSalary` never rejects the request.
#[derive(Debug, Default, Clone, FromForm)]
pub struct ListingParams {
    pub query: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub skill: Option<String>,
    #[field(name = "minSalary")]
    pub min_salary: Option<String>,
    pub page: Option<String>,
}

impl ListingParams {
    pub fn criteria(&self) -> SearchCriteria {
        SearchCriteria::from_raw(
            self.query.as_deref(),
            self.location.as_deref(),
            self.company.as_deref(),
            self.skill.as_deref(),
            self.min_salary.as_deref(),
        )
    }

    /// Requested page; missing, zero or unparseable means the first page
    pub fn page_number(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<usize>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1)
    }

    /// Non-blank filter values in the order they appear in links
    fn filter_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("query", self.query.as_deref()),
            ("location", self.location.as_deref()),
            ("company", self.company.as_deref()),
            ("skill", self.skill.as_deref()),
            ("minSalary", self.min_salary.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        })
        .collect()
    }

    /// Query string carrying the active filters and the given page
    pub fn to_query_string(&self, page: usize) -> String {
        let mut parts: Vec<String> = self
            .filter_pairs()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, NON_ALPHANUMERIC)))
            .collect();
        parts.push(format!("page={}", page));
        parts.join("&")
    }

    pub fn page_href(&self, page: usize) -> String {
        format!("/?{}", self.to_query_string(page))
    }
}

#[derive(FromForm)]
pub struct JobUploadForm<'f> {
    pub file: TempFile<'f>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ActionResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_actions: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Action,
    Error,
}

impl TextResponse {
    pub fn success(message: String) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
        }
    }
}

impl ActionResponse {
    pub fn success(message: String, action: String) -> Self {
        Self {
            response_type: ResponseType::Action,
            success: true,
            message,
            action,
            next_actions: None,
        }
    }

    pub fn with_next_actions(mut self, next_actions: Vec<String>) -> Self {
        self.next_actions = Some(next_actions);
        self
    }
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ListingParams {
        let mut params = <ListingParams as Default>::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "query" => params.query = value,
                "location" => params.location = value,
                "company" => params.company = value,
                "skill" => params.skill = value,
                "minSalary" => params.min_salary = value,
                "page" => params.page = value,
                _ => unreachable!(),
            }
        }
        params
    }

    #[test]
    fn page_number_defaults_to_first_page() {
        assert_eq!(params(&[]).page_number(), 1);
        assert_eq!(params(&[("page", "0")]).page_number(), 1);
        assert_eq!(params(&[("page", "abc")]).page_number(), 1);
        assert_eq!(params(&[("page", "-3")]).page_number(), 1);
        assert_eq!(params(&[("page", "4")]).page_number(), 4);
    }

    #[test]
    fn query_string_keeps_filters_and_encodes_values() {
        let p = params(&[
            ("query", "data scientist"),
            ("location", "Austin, Texas, United States"),
            ("skill", "C++"),
            ("minSalary", "100000"),
            ("page", "9"),
        ]);
        assert_eq!(
            p.to_query_string(1),
            "query=data%20scientist&location=Austin%2C%20Texas%2C%20United%20States\
             &skill=C%2B%2B&minSalary=100000&page=1"
        );
    }

    #[test]
    fn blank_filters_are_left_out() {
        let p = params(&[("query", "  "), ("company", "Statt")]);
        assert_eq!(p.to_query_string(2), "company=Statt&page=2");
        assert_eq!(p.page_href(2), "/?company=Statt&page=2");
    }

    #[test]
    fn criteria_parse_raw_values() {
        let p = params(&[("company", "Statt"), ("minSalary", "$120,000")]);
        let criteria = p.criteria();
        assert_eq!(criteria.company.as_deref(), Some("Statt"));
        assert_eq!(criteria.min_salary, Some(120_000));
        assert!(criteria.query.is_none());
    }
}

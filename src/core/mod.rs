// src/core/mod.rs
//! Job data handling: persistence, import, search, paging and analytics

pub mod analytics;
pub mod dashboard_source;
pub mod importer;
pub mod job_store;
pub mod pagination;
pub mod sample_data;
pub mod search;
pub mod skills;

pub use dashboard_source::{DashboardData, DashboardSource};
pub use job_store::JobStore;
pub use search::SearchCriteria;

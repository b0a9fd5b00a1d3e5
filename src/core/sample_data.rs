// src/core/sample_data.rs
//! Built-in dataset shown on the dashboard when its data feed is unavailable

use crate::types::Job;

// (title, description, location, company, created at)
const SAMPLE_ROWS: [(&str, &str, &str, &str, &str); 5] = [
    (
        "Machine Learning Engineer",
        "Role Description:\nWe are seeking a Machine Learning Engineer with approximately 5 years of experience in the field. The ideal candidate will have a strong foundation in low-level machine learning skills, data science, and advanced AI techniques. You will be working with Large Language Models (LLMs), Retrieval-Augmented Generation (RAG), and other state-of-the-art toolchains. Salary: $120,000 - $150,000",
        "Austin, Texas, United States",
        "Statt",
        "2024-10-22 18:15:23",
    ),
    (
        "Machine Learning Software Engineer",
        "Compensation: $120,000 - $140,000/year\n\nLocation: Onsite - Oklahoma City, OK\n\nPosition: Machine Learning Software Engineer",
        "Oklahoma City, Oklahoma, United States",
        "Inceed",
        "2025-02-05 18:53:31",
    ),
    (
        "Machine Learning Engineer",
        "Machine Learning Engineer (Temporary Contract) Location: 100% RemotePay Rate: $90-110/hour",
        "United States",
        "Synchro",
        "2024-11-27 18:31:01",
    ),
    (
        "AI Research Scientist",
        "Looking for an AI Research Scientist with experience in deep learning. Salary range: $150,000 - $180,000",
        "San Francisco, California, United States",
        "TechCorp",
        "2025-01-15 10:00:00",
    ),
    (
        "Data Scientist",
        "Data Scientist position with focus on machine learning models. Salary: $110,000 - $140,000",
        "New York, New York, United States",
        "DataWorks",
        "2025-01-20 14:30:00",
    ),
];

pub const SAMPLE_SIZE: usize = SAMPLE_ROWS.len();

pub fn sample_jobs() -> Vec<Job> {
    SAMPLE_ROWS
        .iter()
        .map(|&(title, description, location, company, created_at)| Job {
            title: title.to_string(),
            description: Some(description.to_string()),
            location: Some(location.to_string()),
            company_name: Some(company.to_string()),
            created_at: Some(created_at.to_string()),
            job_state: Some("LISTED".to_string()),
            ..Default::default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_five_listed_jobs() {
        let jobs = sample_jobs();
        assert_eq!(jobs.len(), SAMPLE_SIZE);
        assert_eq!(SAMPLE_SIZE, 5);
        assert!(jobs.iter().all(|j| j.job_state.as_deref() == Some("LISTED")));
    }
}

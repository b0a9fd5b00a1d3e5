// src/utils.rs
use anyhow::Result;

use crate::types::job::parse_timestamp;

/// Collapse runs of whitespace and trim
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whole-dollar amount with thousands separators, e.g. "$135,000"
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${}", grouped)
}

pub fn format_percentage(value: u32) -> String {
    format!("{}%", value)
}

/// Posting date as shown on listing cards, e.g. "Oct 22, 2024"
pub fn format_posted_date(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate file extension against allowed types
pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> Result<()> {
    let ext = get_file_extension(filename)
        .ok_or_else(|| anyhow::anyhow!("File has no extension: {}", filename))?;

    if !allowed.contains(&ext.as_str()) {
        anyhow::bail!(
            "Unsupported file extension: {}. Allowed: {:?}",
            ext,
            allowed
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Data \t Scientist\n"), "Data Scientist");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(999), "$999");
        assert_eq!(format_currency(125_000), "$125,000");
        assert_eq!(format_currency(1_234_567), "$1,234,567");
    }

    #[test]
    fn test_format_posted_date() {
        assert_eq!(format_posted_date(Some("2024-10-22 18:15:23")), "Oct 22, 2024");
        assert_eq!(format_posted_date(Some("2025-02-05")), "Feb 5, 2025");
        assert_eq!(format_posted_date(Some("soon")), "N/A");
        assert_eq!(format_posted_date(None), "N/A");
    }

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("jobs.xlsx"), Some("xlsx".to_string()));
        assert_eq!(get_file_extension("Export.XLSX"), Some("xlsx".to_string()));
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("jobs.xlsx", &["xlsx"]).is_ok());
        assert!(validate_file_extension("jobs.csv", &["xlsx"]).is_err());
        assert!(validate_file_extension("jobs", &["xlsx"]).is_err());
    }
}

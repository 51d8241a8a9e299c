//! Card payload validation — shape checks before anything reaches the board.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::card::{ColumnId, JobCard, WorkMode};

/// Incoming create/update body for a card. The server assigns ids; clients
/// send the tech stack as free-form text that is parsed on submit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPayload {
    // Required fields deserialize leniently so a missing or malformed value
    // surfaces as a 400 naming the field, not a body rejection.
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub applied_date: String,
    #[serde(default)]
    pub column_id: String,
    #[serde(default)]
    pub work_mode: Option<WorkMode>,
    #[serde(default)]
    pub tech_stack_input: Option<String>,
}

impl CardPayload {
    /// Validates the payload and materializes it into a card with the given id.
    pub fn into_card(self, id: Uuid) -> Result<JobCard, AppError> {
        let company = self.company.trim().to_string();
        if company.is_empty() {
            return Err(AppError::Validation("company is required".to_string()));
        }

        let role = self.role.trim().to_string();
        if role.is_empty() {
            return Err(AppError::Validation("role is required".to_string()));
        }

        let link = match self.link.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(l) if is_http_url(l) => Some(l.to_string()),
            Some(_) => {
                return Err(AppError::Validation(
                    "link must start with http(s)://".to_string(),
                ))
            }
        };

        let applied_date = self.applied_date.trim();
        if applied_date.is_empty() {
            return Err(AppError::Validation("appliedDate is required".to_string()));
        }
        let applied_date: NaiveDate = applied_date.parse().map_err(|_| {
            AppError::Validation("appliedDate must be a valid YYYY-MM-DD date".to_string())
        })?;

        let column_id = self.column_id.trim();
        if column_id.is_empty() {
            return Err(AppError::Validation("columnId is required".to_string()));
        }
        let column_id: ColumnId = column_id.parse().map_err(|_| {
            AppError::Validation(
                "columnId must be one of applied, interview, offer, rejected".to_string(),
            )
        })?;

        Ok(JobCard {
            id,
            company,
            role,
            link,
            applied_date,
            column_id,
            work_mode: self.work_mode,
            tech_stack: parse_tech_stack(self.tech_stack_input.as_deref().unwrap_or("")),
        })
    }
}

fn is_http_url(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Parses free-form comma-separated input into a tag list: trims each tag,
/// collapses inner whitespace, drops empties, and dedupes case-insensitively
/// while preserving the first-seen casing. Empty results become `None`.
pub fn parse_tech_stack(input: &str) -> Option<Vec<String>> {
    let mut seen = HashSet::new();
    let tags: Vec<String> = input
        .split(',')
        .map(|tag| tag.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.to_ascii_lowercase()))
        .collect();

    (!tags.is_empty()).then_some(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CardPayload {
        CardPayload {
            company: "Acme".to_string(),
            role: "Platform Engineer".to_string(),
            link: None,
            applied_date: "2025-11-03".to_string(),
            column_id: "applied".to_string(),
            work_mode: None,
            tech_stack_input: None,
        }
    }

    #[test]
    fn test_valid_payload_materializes() {
        let card = payload().into_card(Uuid::new_v4()).unwrap();
        assert_eq!(card.company, "Acme");
        assert_eq!(card.column_id, ColumnId::Applied);
        assert_eq!(
            card.applied_date,
            NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
        );
        assert!(card.tech_stack.is_none());
    }

    #[test]
    fn test_blank_company_rejected() {
        let mut p = payload();
        p.company = "   ".to_string();
        let err = p.into_card(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("company")));
    }

    #[test]
    fn test_missing_fields_deserialize_then_fail_validation() {
        // Even an empty body reaches the validation layer.
        let p: CardPayload = serde_json::from_str("{}").unwrap();
        let err = p.into_card(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("company")));

        let p: CardPayload =
            serde_json::from_str(r#"{"company": "Acme", "role": "SRE", "columnId": "applied"}"#)
                .unwrap();
        let err = p.into_card(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("appliedDate")));
    }

    #[test]
    fn test_blank_role_rejected() {
        let mut p = payload();
        p.role = String::new();
        let err = p.into_card(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("role")));
    }

    #[test]
    fn test_missing_applied_date_rejected() {
        let mut p = payload();
        p.applied_date = String::new();
        let err = p.into_card(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("appliedDate")));
    }

    #[test]
    fn test_malformed_applied_date_rejected() {
        let mut p = payload();
        p.applied_date = "03/11/2025".to_string();
        let err = p.into_card(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("appliedDate")));
    }

    #[test]
    fn test_unknown_column_rejected() {
        let mut p = payload();
        p.column_id = "archived".to_string();
        let err = p.into_card(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("columnId")));
    }

    #[test]
    fn test_link_must_be_http() {
        let mut p = payload();
        p.link = Some("ftp://jobs.acme.dev".to_string());
        assert!(p.into_card(Uuid::new_v4()).is_err());

        let mut p = payload();
        p.link = Some("HTTPS://jobs.acme.dev/role".to_string());
        let card = p.into_card(Uuid::new_v4()).unwrap();
        assert_eq!(card.link.as_deref(), Some("HTTPS://jobs.acme.dev/role"));
    }

    #[test]
    fn test_empty_link_becomes_none() {
        let mut p = payload();
        p.link = Some("   ".to_string());
        let card = p.into_card(Uuid::new_v4()).unwrap();
        assert!(card.link.is_none());
    }

    #[test]
    fn test_tech_stack_input_is_parsed() {
        let mut p = payload();
        p.tech_stack_input = Some("Rust,  tokio , axum".to_string());
        let card = p.into_card(Uuid::new_v4()).unwrap();
        assert_eq!(
            card.tech_stack.unwrap(),
            vec!["Rust".to_string(), "tokio".to_string(), "axum".to_string()]
        );
    }

    #[test]
    fn test_parse_tech_stack_dedupes_case_insensitively() {
        let tags = parse_tech_stack("Rust, rust, RUST, Postgres").unwrap();
        assert_eq!(tags, vec!["Rust".to_string(), "Postgres".to_string()]);
    }

    #[test]
    fn test_parse_tech_stack_collapses_inner_whitespace() {
        let tags = parse_tech_stack("Apache   Kafka , k8s").unwrap();
        assert_eq!(tags, vec!["Apache Kafka".to_string(), "k8s".to_string()]);
    }

    #[test]
    fn test_parse_tech_stack_empty_input_is_none() {
        assert!(parse_tech_stack("").is_none());
        assert!(parse_tech_stack(" , ,, ").is_none());
    }
}

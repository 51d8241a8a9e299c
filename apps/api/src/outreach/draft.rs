//! Recruiter message drafting: prompt assembly, the single model call, and
//! shape validation of the reply.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::outreach::prompts::{DRAFT_PROMPT_TEMPLATE, DRAFT_SYSTEM};

/// Requested register for the drafted message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Friendly,
    Direct,
    Formal,
}

impl Tone {
    fn as_str(&self) -> &'static str {
        match self {
            Tone::Friendly => "friendly",
            Tone::Direct => "direct",
            Tone::Formal => "formal",
        }
    }
}

/// Body of `POST /api/v1/outreach/draft`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub job_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tone: Option<Tone>,
}

/// A drafted outreach message, ready to send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftResponse {
    pub subject: String,
    pub message: String,
}

/// Raw model payload before shape validation. Fields are optional so a
/// wrong-shaped reply surfaces as a 502, not a parse failure deep inside.
#[derive(Debug, Deserialize)]
struct RawDraft {
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Builds the fixed drafting prompt from the request context.
pub fn build_prompt(req: &DraftRequest) -> String {
    DRAFT_PROMPT_TEMPLATE
        .replace("{company}", req.company.trim())
        .replace("{job_title}", req.job_title.trim())
        .replace("{job_url}", non_empty(req.job_url.as_deref()).unwrap_or("(not provided)"))
        .replace("{notes}", non_empty(req.notes.as_deref()).unwrap_or("(none)"))
        .replace("{tone}", req.tone.unwrap_or_default().as_str())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Drafts a recruiter outreach message for the given role.
pub async fn draft_message(
    llm: &LlmClient,
    req: &DraftRequest,
) -> Result<DraftResponse, AppError> {
    if req.company.trim().is_empty() || req.job_title.trim().is_empty() {
        return Err(AppError::Validation(
            "company and jobTitle are required".to_string(),
        ));
    }

    let prompt = build_prompt(req);
    let raw: RawDraft = llm
        .call_json(&prompt, DRAFT_SYSTEM)
        .await
        .map_err(map_llm_error)?;

    let subject = raw.subject.as_deref().map(str::trim).unwrap_or_default();
    let message = raw.message.as_deref().map(str::trim).unwrap_or_default();
    if subject.is_empty() || message.is_empty() {
        return Err(AppError::ModelOutput(
            "reply is missing subject or message".to_string(),
        ));
    }

    Ok(DraftResponse {
        subject: subject.to_string(),
        message: message.to_string(),
    })
}

/// An empty or undecodable reply is the model's fault (502); transport and
/// API failures are internal (500).
fn map_llm_error(err: LlmError) -> AppError {
    match err {
        LlmError::EmptyContent | LlmError::Parse(_) => AppError::ModelOutput(err.to_string()),
        other => AppError::Llm(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> DraftRequest {
        DraftRequest {
            company: "Acme".to_string(),
            job_title: "Platform Engineer".to_string(),
            job_url: None,
            notes: None,
            tone: None,
        }
    }

    #[test]
    fn test_prompt_fills_context_fields() {
        let mut req = request();
        req.job_url = Some("https://jobs.acme.dev/platform".to_string());
        req.notes = Some("3 years of Rust".to_string());
        req.tone = Some(Tone::Direct);

        let prompt = build_prompt(&req);
        assert!(prompt.contains("- Company: Acme"));
        assert!(prompt.contains("- Role: Platform Engineer"));
        assert!(prompt.contains("- Job URL: https://jobs.acme.dev/platform"));
        assert!(prompt.contains("- Candidate notes: 3 years of Rust"));
        assert!(prompt.contains("- Tone: direct"));
        assert!(!prompt.contains("{company}"));
    }

    #[test]
    fn test_prompt_placeholders_for_absent_context() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("- Job URL: (not provided)"));
        assert!(prompt.contains("- Candidate notes: (none)"));
        assert!(prompt.contains("- Tone: friendly"));
    }

    #[test]
    fn test_blank_optional_fields_use_placeholders() {
        let mut req = request();
        req.job_url = Some("   ".to_string());
        req.notes = Some(String::new());

        let prompt = build_prompt(&req);
        assert!(prompt.contains("- Job URL: (not provided)"));
        assert!(prompt.contains("- Candidate notes: (none)"));
    }

    #[test]
    fn test_tone_deserializes_lowercase() {
        let tone: Tone = serde_json::from_str(r#""formal""#).unwrap();
        assert_eq!(tone, Tone::Formal);
        assert_eq!(Tone::default(), Tone::Friendly);
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let req: DraftRequest = serde_json::from_str(
            r#"{"company": "Acme", "jobTitle": "SRE", "jobUrl": "https://a.dev", "tone": "direct"}"#,
        )
        .unwrap();
        assert_eq!(req.job_title, "SRE");
        assert_eq!(req.job_url.as_deref(), Some("https://a.dev"));
        assert_eq!(req.tone, Some(Tone::Direct));
    }

    #[tokio::test]
    async fn test_missing_company_is_rejected_before_any_call() {
        let llm = LlmClient::new("test-key".to_string());
        let mut req = request();
        req.company = "  ".to_string();

        let err = draft_message(&llm, &req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_llm_error_mapping() {
        assert!(matches!(
            map_llm_error(LlmError::EmptyContent),
            AppError::ModelOutput(_)
        ));
        let parse_err = serde_json::from_str::<RawDraft>("not json").unwrap_err();
        assert!(matches!(
            map_llm_error(LlmError::Parse(parse_err)),
            AppError::ModelOutput(_)
        ));
        assert!(matches!(
            map_llm_error(LlmError::Api {
                status: 529,
                message: "overloaded".to_string()
            }),
            AppError::Llm(_)
        ));
    }

    #[test]
    fn test_raw_draft_accepts_partial_shapes() {
        let raw: RawDraft = serde_json::from_str(r#"{"subject": "hi"}"#).unwrap();
        assert_eq!(raw.subject.as_deref(), Some("hi"));
        assert!(raw.message.is_none());
    }
}

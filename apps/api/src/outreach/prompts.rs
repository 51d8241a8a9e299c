// All LLM prompt constants for the outreach module.

/// System prompt for recruiter outreach drafting — enforces JSON-only output.
pub const DRAFT_SYSTEM: &str = "You draft concise, professional outreach messages \
    from job candidates to recruiters. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Outreach drafting prompt template.
/// Replace: {company}, {job_title}, {job_url}, {notes}, {tone}
pub const DRAFT_PROMPT_TEMPLATE: &str = r#"Draft an outreach message to a recruiter.

Return ONLY valid JSON:
{
  "subject": "...",
  "message": "..."
}

Context:
- Company: {company}
- Role: {job_title}
- Job URL: {job_url}
- Candidate notes: {notes}
- Tone: {tone}

Constraints:
- Message length: 80-140 words
- Be specific but do not invent facts
- Include a clear call to action (a 10-15 minute chat)"#;

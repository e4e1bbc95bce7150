//! Prompt templates for questionnaire analysis.

use crate::models::Answers;

/// System message for every analysis request.
pub const SYSTEM_PROMPT: &str = "You are an experienced Indian income-tax return reviewer. \
You flag risks in a filer's return before submission. You respond with JSON only.";

/// User message template. Uses {answers} and {documents} placeholders.
pub const ANALYSIS_PROMPT: &str = r#"Review the following income-tax filing questionnaire and identify anything likely to cause a defective-return notice, a mismatch with Form 26AS / AIS, or a missed disclosure.

Questionnaire answers:
{answers}
{documents}
Classify the overall risk and list the specific issues you found. Be concrete and refer to the answers or documents that triggered each issue.

Respond with a single JSON object matching exactly this schema:
{
  "riskLevel": "LOW" | "MEDIUM" | "HIGH" | "CRITICAL",
  "summary": "2-3 sentence overview of the filing's risk",
  "detectedIssues": [
    {
      "id": "short-kebab-case-identifier",
      "title": "Issue title",
      "short": "One-line description",
      "long": "Detailed explanation and what the filer should do"
    }
  ]
}

Return ONLY the JSON object. No markdown, no commentary."#;

/// Section embedded when document text is available. Uses {content}.
const DOCUMENTS_SECTION: &str = r#"
Text extracted from the filer's uploaded documents (salary slip / Form 26AS):
"""
{content}
"""
"#;

/// Build the user prompt. `None` if the answers cannot be serialized.
pub fn build_prompt(answers: &Answers, extracted_text: &str, max_content_chars: usize) -> Option<String> {
    let answers_json = answers.to_pretty_json().ok()?;

    let documents = if extracted_text.trim().is_empty() {
        String::new()
    } else {
        render(
            DOCUMENTS_SECTION,
            &[("content", truncate_content(extracted_text, max_content_chars))],
        )
    };

    Some(render(
        ANALYSIS_PROMPT,
        &[("answers", &answers_json), ("documents", &documents)],
    ))
}

/// Fill `{name}` placeholders in one pass. Substituted values are never
/// rescanned, and braces that are not a known placeholder are kept.
fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let found = vars.iter().find(|(name, _)| {
            tail.strip_prefix(name)
                .is_some_and(|after| after.starts_with('}'))
        });
        match found {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Truncate content to `max_chars` bytes (UTF-8 safe).
fn truncate_content(text: &str, max_chars: usize) -> &str {
    if text.len() <= max_chars {
        return text;
    }
    let mut end = max_chars;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalize_answers;
    use serde_json::json;

    fn answers() -> Answers {
        normalize_answers(&json!({"itrForm": "ITR-1", "hasCapitalGains": true})).unwrap()
    }

    #[test]
    fn test_prompt_embeds_answers_and_schema() {
        let prompt = build_prompt(&answers(), "", 100).unwrap();
        assert!(prompt.contains("\"itrForm\": \"ITR-1\""));
        assert!(prompt.contains("\"riskLevel\""));
        assert!(prompt.contains("Return ONLY the JSON object"));
        assert!(!prompt.contains("uploaded documents"));
        assert!(!prompt.contains("{answers}"));
        assert!(!prompt.contains("{documents}"));
    }

    #[test]
    fn test_prompt_embeds_document_text() {
        let prompt = build_prompt(&answers(), "Gross salary: 12,00,000", 100).unwrap();
        assert!(prompt.contains("uploaded documents"));
        assert!(prompt.contains("Gross salary: 12,00,000"));
    }

    #[test]
    fn test_placeholders_in_answers_are_literal() {
        let answers =
            normalize_answers(&json!({"note": "see {documents} and {answers}"})).unwrap();
        let prompt = build_prompt(&answers, "Form 26AS TDS 5000", 100).unwrap();
        assert!(prompt.contains("see {documents} and {answers}"));
        assert_eq!(prompt.matches("Form 26AS TDS 5000").count(), 1);
    }

    #[test]
    fn test_render_keeps_unknown_braces() {
        assert_eq!(render("{a} {b} {", &[("a", "{b}")]), "{b} {b} {");
    }

    #[test]
    fn test_whitespace_text_is_omitted() {
        let prompt = build_prompt(&answers(), " \n ", 100).unwrap();
        assert!(!prompt.contains("uploaded documents"));
    }

    #[test]
    fn test_truncate_content_utf8_safe() {
        assert_eq!(truncate_content("hello", 10), "hello");
        assert_eq!(truncate_content("hello", 3), "hel");
        // '₹' is three bytes; never split it.
        assert_eq!(truncate_content("a₹b", 2), "a");
    }
}

// Prompt constants for model-backed analysis.

/// Hard cap on how much of each input is sent to a model, in characters.
/// Keeps prompt cost bounded; anything past this adds little signal for a
/// fit score.
pub const PROMPT_CHAR_CAP: usize = 3000;

/// System prompt — role priming plus the JSON-only contract.
pub const ANALYZE_SYSTEM: &str =
    "You are an expert ATS analyst and career coach. \
    Compare a candidate CV against a job description, score the fit, and \
    rewrite the CV summary to pass applicant tracking systems. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Analysis prompt template. Replace `{jd_text}` and `{cv_text}` before
/// sending; both are expected to be pre-truncated.
pub const ANALYZE_PROMPT_TEMPLATE: &str = r##"Analyze how well the candidate CV below fits the job description, then rewrite the CV summary for that role.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 78,
  "skillsMatch": ["React", "TypeScript"],
  "missingSkills": ["AWS"],
  "rewrittenCV": "# Optimized CV for ...",
  "ethicalInsights": {
    "biasCheck": "One sentence on whether the rewritten text introduces age, gender, or origin signals.",
    "tokenUsage": 1450
  }
}

Rules:
- "score" is an integer from 0 to 100 measuring overall fit.
- "skillsMatch" lists skills from the job description that the CV demonstrates.
- "missingSkills" lists skills from the job description that the CV lacks; never repeat an entry of "skillsMatch".
- "rewrittenCV" is a markdown summary of the candidate tailored to this job, grounded only in what the CV states. Do NOT invent experience.
- "ethicalInsights.tokenUsage" is your estimate of tokens consumed by this request.

JOB DESCRIPTION:
{jd_text}

CANDIDATE CV:
{cv_text}"##;

/// Builds the single user prompt for one analysis call.
pub fn build_analysis_prompt(jd_text: &str, cv_text: &str) -> String {
    ANALYZE_PROMPT_TEMPLATE
        .replace("{jd_text}", jd_text)
        .replace("{cv_text}", cv_text)
}

/// Truncates to a character budget without splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_interpolates_both_inputs() {
        let prompt = build_analysis_prompt("Rust engineer wanted", "I write Rust");
        assert!(prompt.contains("JOB DESCRIPTION:\nRust engineer wanted"));
        assert!(prompt.contains("CANDIDATE CV:\nI write Rust"));
        assert!(!prompt.contains("{jd_text}"));
        assert!(!prompt.contains("{cv_text}"));
    }

    #[test]
    fn test_prompt_spells_out_the_output_schema() {
        for field in [
            "\"score\"",
            "\"skillsMatch\"",
            "\"missingSkills\"",
            "\"rewrittenCV\"",
            "\"biasCheck\"",
            "\"tokenUsage\"",
        ] {
            assert!(
                ANALYZE_PROMPT_TEMPLATE.contains(field),
                "template is missing {field}"
            );
        }
    }

    #[test]
    fn test_truncate_chars_under_and_over_budget() {
        assert_eq!(truncate_chars("short", 3000), "short");
        let long = "x".repeat(4000);
        assert_eq!(truncate_chars(&long, PROMPT_CHAR_CAP).len(), 3000);
    }

    #[test]
    fn test_truncate_chars_counts_chars_not_bytes() {
        let text = "ééééé"; // five chars, ten bytes
        assert_eq!(truncate_chars(text, 3), "ééé");
    }
}

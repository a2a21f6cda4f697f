//! Structured Response Parser — turns raw model text into a normalized
//! [`AnalysisResponse`].
//!
//! The model is trusted for content, not for shape: the score is clamped,
//! the skill lists are deduplicated, forced disjoint, and capped, the
//! role-fit label is always derived server-side, and the token count is
//! backfilled when the model omits it.

use crate::analysis::models::{AnalysisResponse, EthicalInsights, MatchDetails, RoleFit};
use crate::analysis::skills::{MATCHED_SKILLS_CAP, MISSING_SKILLS_CAP};
use crate::errors::AppError;
use crate::llm_client::strip_json_fences;

use serde::Deserialize;

/// Model-backed role-fit threshold: above this is "High", everything else
/// "Moderate". Two tiers only, while the heuristic path uses three. Known
/// asymmetry, kept until product unifies the labels.
pub const MODEL_HIGH_THRESHOLD: u32 = 70;

/// Characters-per-token divisor for the backfilled usage estimate. A rough
/// average for English prose, not a tokenizer.
const CHARS_PER_TOKEN: u64 = 4;

/// The schema the model is instructed to produce. `score` is mandatory;
/// everything else degrades to a default.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawModelAnalysis {
    score: i64,
    #[serde(default)]
    skills_match: Vec<String>,
    #[serde(default)]
    missing_skills: Vec<String>,
    #[serde(default, rename = "rewrittenCV")]
    rewritten_cv: String,
    #[serde(default)]
    ethical_insights: EthicalInsights,
}

/// Parses and normalizes one model reply. `jd_text`/`cv_text` are the
/// truncated texts that were actually sent, used only for the token
/// estimate.
pub fn parse_model_response(
    raw: &str,
    jd_text: &str,
    cv_text: &str,
) -> Result<AnalysisResponse, AppError> {
    let parsed: RawModelAnalysis = serde_json::from_str(strip_json_fences(raw))
        .map_err(|e| AppError::Analysis(format!("Model reply failed schema validation: {e}")))?;

    let score = parsed.score.clamp(0, 100) as u32;

    let skills_match = dedup_preserving_order(parsed.skills_match);
    let missing_skills: Vec<String> = dedup_preserving_order(parsed.missing_skills)
        .into_iter()
        .filter(|s| !skills_match.contains(s))
        .collect();

    let mut insights = parsed.ethical_insights;
    if insights.token_usage == 0 {
        insights.token_usage = estimate_tokens(jd_text, cv_text);
    }

    Ok(AnalysisResponse {
        score,
        match_details: MatchDetails {
            skills_match: skills_match
                .into_iter()
                .take(MATCHED_SKILLS_CAP)
                .collect(),
            missing_skills: missing_skills
                .into_iter()
                .take(MISSING_SKILLS_CAP)
                .collect(),
            role_fit: model_role_fit(score),
        },
        rewritten_cv: parsed.rewritten_cv,
        ethical_insights: Some(insights),
    })
}

pub fn model_role_fit(score: u32) -> RoleFit {
    if score > MODEL_HIGH_THRESHOLD {
        RoleFit::High
    } else {
        RoleFit::Moderate
    }
}

/// `ceil(chars / 4)` over both prompt inputs.
fn estimate_tokens(jd_text: &str, cv_text: &str) -> u64 {
    let chars = (jd_text.chars().count() + cv_text.chars().count()) as u64;
    chars.div_ceil(CHARS_PER_TOKEN)
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_REPLY: &str = r##"{
        "score": 78,
        "skillsMatch": ["React", "TypeScript"],
        "missingSkills": ["AWS"],
        "rewrittenCV": "# Optimized CV",
        "ethicalInsights": {"biasCheck": "No bias signals detected.", "tokenUsage": 1450}
    }"##;

    #[test]
    fn test_parse_full_reply() {
        let result = parse_model_response(FULL_REPLY, "jd", "cv").unwrap();
        assert_eq!(result.score, 78);
        assert_eq!(result.match_details.skills_match, vec!["React", "TypeScript"]);
        assert_eq!(result.match_details.missing_skills, vec!["AWS"]);
        assert_eq!(result.match_details.role_fit, RoleFit::High);
        assert_eq!(result.rewritten_cv, "# Optimized CV");
        let insights = result.ethical_insights.unwrap();
        assert_eq!(insights.token_usage, 1450);
        assert_eq!(insights.bias_check, "No bias signals detected.");
    }

    #[test]
    fn test_parse_fenced_reply() {
        let fenced = format!("```json\n{FULL_REPLY}\n```");
        let result = parse_model_response(&fenced, "jd", "cv").unwrap();
        assert_eq!(result.score, 78);
    }

    #[test]
    fn test_missing_optional_fields_fall_back_to_defaults() {
        let result = parse_model_response(r#"{"score": 40}"#, "jd", "cv").unwrap();
        assert!(result.match_details.skills_match.is_empty());
        assert!(result.match_details.missing_skills.is_empty());
        assert!(result.rewritten_cv.is_empty());
        assert!(result.ethical_insights.is_some());
    }

    #[test]
    fn test_missing_score_is_a_schema_failure() {
        let err = parse_model_response(r#"{"skillsMatch": []}"#, "jd", "cv").unwrap_err();
        assert!(matches!(err, AppError::Analysis(_)));
    }

    #[test]
    fn test_non_json_reply_is_a_schema_failure() {
        let err = parse_model_response("I would rate this CV a solid 7/10.", "jd", "cv").unwrap_err();
        assert!(matches!(err, AppError::Analysis(_)));
    }

    #[test]
    fn test_score_is_clamped_into_range() {
        let result = parse_model_response(r#"{"score": 140}"#, "jd", "cv").unwrap();
        assert_eq!(result.score, 100);
        let result = parse_model_response(r#"{"score": -3}"#, "jd", "cv").unwrap();
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_role_fit_boundary_70_is_moderate_71_is_high() {
        assert_eq!(model_role_fit(70), RoleFit::Moderate);
        assert_eq!(model_role_fit(71), RoleFit::High);
    }

    #[test]
    fn test_lists_are_deduplicated_and_disjoint() {
        let raw = r#"{
            "score": 50,
            "skillsMatch": ["React", "React", "AWS"],
            "missingSkills": ["AWS", "Docker", "Docker"]
        }"#;
        let result = parse_model_response(raw, "jd", "cv").unwrap();
        assert_eq!(result.match_details.skills_match, vec!["React", "AWS"]);
        assert_eq!(result.match_details.missing_skills, vec!["Docker"]);
    }

    #[test]
    fn test_lists_are_capped_at_display_limits() {
        let many: Vec<String> = (0..20).map(|i| format!("SkillA{i}")).collect();
        let others: Vec<String> = (0..20).map(|i| format!("SkillB{i}")).collect();
        let raw = serde_json::json!({
            "score": 50,
            "skillsMatch": many,
            "missingSkills": others,
        })
        .to_string();
        let result = parse_model_response(&raw, "jd", "cv").unwrap();
        assert_eq!(result.match_details.skills_match.len(), MATCHED_SKILLS_CAP);
        assert_eq!(result.match_details.missing_skills.len(), MISSING_SKILLS_CAP);
    }

    #[test]
    fn test_token_usage_backfilled_when_absent() {
        let jd = "j".repeat(10);
        let cv = "c".repeat(9);
        let result = parse_model_response(r#"{"score": 50}"#, &jd, &cv).unwrap();
        // ceil(19 / 4) = 5
        assert_eq!(result.ethical_insights.unwrap().token_usage, 5);
    }

    #[test]
    fn test_token_usage_backfilled_when_zero() {
        let raw = r#"{"score": 50, "ethicalInsights": {"biasCheck": "ok", "tokenUsage": 0}}"#;
        let result = parse_model_response(raw, "abcd", "efgh").unwrap();
        let insights = result.ethical_insights.unwrap();
        assert_eq!(insights.token_usage, 2);
        assert_eq!(insights.bias_check, "ok");
    }

    #[test]
    fn test_reported_token_usage_is_kept() {
        let raw = r#"{"score": 50, "ethicalInsights": {"biasCheck": "ok", "tokenUsage": 999}}"#;
        let result = parse_model_response(raw, "jd", "cv").unwrap();
        assert_eq!(result.ethical_insights.unwrap().token_usage, 999);
    }
}

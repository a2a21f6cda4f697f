//! Wire types for the analyze endpoint. Field names mirror what the browser
//! wizard consumes, hence the explicit camelCase renames.

use serde::{Deserialize, Serialize};

/// Inputs to a scoring strategy, assembled once per request after
/// validation and document extraction.
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub jd_text: String,
    pub cv_text: String,
}

/// Role-fit label derived from the score. Never trusted from a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleFit {
    High,
    Moderate,
    Low,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetails {
    pub skills_match: Vec<String>,
    pub missing_skills: Vec<String>,
    pub role_fit: RoleFit,
}

/// Model-backed runs only. `tokenUsage` is a character-based estimate when
/// the model does not report one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthicalInsights {
    #[serde(default)]
    pub bias_check: String,
    #[serde(default)]
    pub token_usage: u64,
}

/// The single success response of `POST /api/analyze`. Fully populated
/// before it is returned; there are no partial results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub score: u32,
    pub match_details: MatchDetails,
    #[serde(rename = "rewrittenCV")]
    pub rewritten_cv: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ethical_insights: Option<EthicalInsights>,
}

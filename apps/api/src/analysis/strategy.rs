//! Scoring strategies — one trait, two backends.
//!
//! The heuristic and model-backed scorers are variant implementations of the
//! same contract, selected per request. Both produce a complete
//! [`AnalysisResponse`]; neither leaves a field for the caller to fill in.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::analysis::models::{AnalysisInput, AnalysisResponse, MatchDetails, RoleFit};
use crate::analysis::prompts::{
    build_analysis_prompt, truncate_chars, ANALYZE_SYSTEM, PROMPT_CHAR_CAP,
};
use crate::analysis::response::parse_model_response;
use crate::analysis::skills::{
    candidate_skills, classify_skills, floored_score, raw_score, MATCHED_SKILLS_CAP,
    MISSING_SKILLS_CAP,
};
use crate::analysis::summary::build_rewritten_summary;
use crate::errors::AppError;
use crate::llm_client::{ChatBackend, ChatRequest};

/// Heuristic role-fit thresholds: three tiers, unlike the model-backed
/// two-tier labeling. With the 65 display floor, `Low` is currently
/// unreachable; both oddities are kept on purpose pending product review.
pub const HEURISTIC_HIGH_THRESHOLD: u32 = 80;
pub const HEURISTIC_MODERATE_THRESHOLD: u32 = 60;

#[async_trait]
pub trait ScoringStrategy: Send + Sync {
    async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResponse, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicStrategy — local keyword overlap, no model call
// ────────────────────────────────────────────────────────────────────────────

pub struct HeuristicStrategy;

#[async_trait]
impl ScoringStrategy for HeuristicStrategy {
    async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResponse, AppError> {
        let candidates = candidate_skills(&input.jd_text);
        let (matched, missing) = classify_skills(&candidates, &input.cv_text);

        let score = floored_score(raw_score(matched.len(), candidates.len()));

        debug!(
            candidates = candidates.len(),
            matched = matched.len(),
            score,
            "heuristic scoring complete"
        );

        // The summary sees the uncapped lists; only the response lists are
        // trimmed to the display caps.
        let rewritten_cv =
            build_rewritten_summary(candidates.first().map(String::as_str), &matched, &missing);

        Ok(AnalysisResponse {
            score,
            match_details: MatchDetails {
                skills_match: matched.into_iter().take(MATCHED_SKILLS_CAP).collect(),
                missing_skills: missing.into_iter().take(MISSING_SKILLS_CAP).collect(),
                role_fit: heuristic_role_fit(score),
            },
            rewritten_cv,
            ethical_insights: None,
        })
    }
}

pub fn heuristic_role_fit(score: u32) -> RoleFit {
    if score > HEURISTIC_HIGH_THRESHOLD {
        RoleFit::High
    } else if score > HEURISTIC_MODERATE_THRESHOLD {
        RoleFit::Moderate
    } else {
        RoleFit::Low
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ModelBackedStrategy — one prompt, one round trip, parsed reply
// ────────────────────────────────────────────────────────────────────────────

pub struct ModelBackedStrategy {
    backend: Arc<dyn ChatBackend>,
    credential: String,
    model: String,
}

impl ModelBackedStrategy {
    pub fn new(backend: Arc<dyn ChatBackend>, credential: String, model: String) -> Self {
        Self {
            backend,
            credential,
            model,
        }
    }
}

#[async_trait]
impl ScoringStrategy for ModelBackedStrategy {
    async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResponse, AppError> {
        let jd_text = truncate_chars(&input.jd_text, PROMPT_CHAR_CAP);
        let cv_text = truncate_chars(&input.cv_text, PROMPT_CHAR_CAP);
        let prompt = build_analysis_prompt(jd_text, cv_text);

        debug!(
            provider = self.backend.id(),
            model = %self.model,
            "dispatching analysis prompt"
        );

        let raw = self
            .backend
            .complete(ChatRequest {
                credential: &self.credential,
                model: &self.model,
                system: ANALYZE_SYSTEM,
                user: &prompt,
            })
            .await?;

        parse_model_response(&raw, jd_text, cv_text)
    }
}

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};
use bytes::Bytes;
use tracing::info;

use crate::analysis::models::{AnalysisInput, AnalysisResponse};
use crate::analysis::strategy::{HeuristicStrategy, ModelBackedStrategy, ScoringStrategy};
use crate::errors::AppError;
use crate::llm_client::registry::ProviderId;
use crate::state::AppState;

/// Optional request headers carrying the client's model configuration. The
/// credential comes from the browser's local settings store and is used for
/// this one request only.
const PROVIDER_HEADER: &str = "x-ai-provider";
const CREDENTIAL_HEADER: &str = "x-api-key";
const MODEL_HEADER: &str = "x-model";

/// Multipart field names, fixed by the wizard's form submission.
const JD_FIELD: &str = "jdText";
const CV_FIELD: &str = "cvFile";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScoringMode {
    Heuristic,
    Model(ProviderId),
}

/// POST /api/analyze
///
/// Pipeline: validate form → resolve mode and credential → extract document
/// text → run the selected scoring strategy. Validation failures reject the
/// request before any extraction or model work happens.
pub async fn handle_analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let (jd_text, cv_bytes) = read_form(&mut multipart).await?;

    let mode = resolve_mode(&headers)?;
    let strategy = build_strategy(&state, &headers, mode)?;

    let cv_text = state.extractor.extract(&cv_bytes)?;

    info!(
        jd_chars = jd_text.len(),
        cv_chars = cv_text.len(),
        heuristic = matches!(mode, ScoringMode::Heuristic),
        "starting analysis"
    );

    let input = AnalysisInput { jd_text, cv_text };
    let result = strategy.analyze(&input).await?;

    info!(score = result.score, "analysis complete");
    Ok(Json(result))
}

/// Reads the two required form fields. Unknown fields are ignored.
async fn read_form(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    let mut jd_text: Option<String> = None;
    let mut cv_bytes: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some(JD_FIELD) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable jdText field: {e}")))?;
                jd_text = Some(text);
            }
            Some(CV_FIELD) => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable cvFile field: {e}")))?;
                cv_bytes = Some(bytes);
            }
            _ => {}
        }
    }

    match (jd_text, cv_bytes) {
        (Some(jd), Some(cv)) if !jd.trim().is_empty() && !cv.is_empty() => Ok((jd, cv)),
        _ => Err(AppError::Validation(
            "Missing Job Description or CV file".to_string(),
        )),
    }
}

fn resolve_mode(headers: &HeaderMap) -> Result<ScoringMode, AppError> {
    let Some(raw) = header_value(headers, PROVIDER_HEADER) else {
        return Ok(ScoringMode::Heuristic);
    };
    if raw.eq_ignore_ascii_case("local") {
        return Ok(ScoringMode::Heuristic);
    }
    raw.parse::<ProviderId>()
        .map(ScoringMode::Model)
        .map_err(AppError::Validation)
}

fn build_strategy(
    state: &AppState,
    headers: &HeaderMap,
    mode: ScoringMode,
) -> Result<Box<dyn ScoringStrategy>, AppError> {
    match mode {
        ScoringMode::Heuristic => Ok(Box::new(HeuristicStrategy)),
        ScoringMode::Model(id) => {
            let backend = state.providers.get(id).ok_or_else(|| {
                AppError::Validation(format!("Unknown AI provider '{}'", id.as_str()))
            })?;
            let credential = header_value(headers, CREDENTIAL_HEADER)
                .filter(|key| !key.is_empty())
                .ok_or_else(|| {
                    AppError::Credential(format!(
                        "API key required for provider '{}'",
                        id.as_str()
                    ))
                })?;
            let model = header_value(headers, MODEL_HEADER)
                .unwrap_or_else(|| backend.default_model().to_string());
            Ok(Box::new(ModelBackedStrategy::new(backend, credential, model)))
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
}

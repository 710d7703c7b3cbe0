use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::quiz::axis::{AxisTriple, RawTriple};
use crate::quiz::flow::{Advance, QuizAnswer, QuizStep};
use crate::quiz::questions::QuizQuestion;
use crate::state::AppState;

/// True when some question for `step` currently lists `option_id`.
fn is_offered(questions: &[QuizQuestion], step: QuizStep, option_id: &str) -> bool {
    questions
        .iter()
        .filter(|q| q.kind.step() == step)
        .any(|q| q.options.iter().any(|o| o.id == option_id))
}

/// Builds an answer from raw option ids. Blank fields stay unanswered.
/// Ids that are not an axis value, or that the quiz no longer offers, are a
/// validation error.
fn answer_from_raw(raw: &RawTriple, questions: &[QuizQuestion]) -> Result<QuizAnswer, AppError> {
    let mut answer = QuizAnswer::default();
    let fields = [
        (QuizStep::BodyType, &raw.body_type),
        (QuizStep::ColorSeason, &raw.color_season),
        (QuizStep::StylePreference, &raw.style_preference),
    ];
    for (step, value) in fields {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            answer.answer(step, value)?;
            if !is_offered(questions, step, value) {
                return Err(AppError::Validation(format!(
                    "'{value}' is not offered at step {}",
                    step.number()
                )));
            }
        }
    }
    Ok(answer)
}

/// GET /api/v1/quiz
pub async fn handle_get_quiz(State(state): State<AppState>) -> Json<Vec<QuizQuestion>> {
    let store = state.store.read().await;
    let mut questions = store.questions.clone();
    questions.sort_by_key(|q| q.order);
    Json(questions)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceRequest {
    #[serde(flatten)]
    pub answer: RawTriple,
    pub current_step: QuizStep,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceResponse {
    pub status: &'static str,
    /// Step the UI should show next (the current one when blocked).
    pub step: QuizStep,
    pub step_number: usize,
    pub progress_percent: u32,
    pub back: Option<QuizStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triple: Option<AxisTriple>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl AdvanceResponse {
    fn at(status: &'static str, step: QuizStep) -> Self {
        AdvanceResponse {
            status,
            step,
            step_number: step.number(),
            progress_percent: step.progress_percent(),
            back: step.prev(),
            triple: None,
            redirect: None,
        }
    }
}

/// POST /api/v1/quiz/advance
pub async fn handle_advance(
    State(state): State<AppState>,
    Json(req): Json<AdvanceRequest>,
) -> Result<Json<AdvanceResponse>, AppError> {
    let answer = answer_from_raw(&req.answer, &state.store.read().await.questions)?;
    let response = match answer.advance(req.current_step) {
        Advance::Blocked(step) => AdvanceResponse::at("blocked", step),
        Advance::Next(step) => AdvanceResponse::at("next", step),
        Advance::Finished(triple) => AdvanceResponse {
            triple: Some(triple),
            redirect: Some(result_redirect(&triple)),
            ..AdvanceResponse::at("finished", req.current_step)
        },
    };
    Ok(Json(response))
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub triple: AxisTriple,
    pub redirect: String,
}

fn result_redirect(triple: &AxisTriple) -> String {
    format!("/result?{}", triple.to_query())
}

/// POST /api/v1/quiz/submit
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(raw): Json<RawTriple>,
) -> Result<Json<SubmitResponse>, AppError> {
    let answer = answer_from_raw(&raw, &state.store.read().await.questions)?;
    let triple = answer.finalize().ok_or_else(|| {
        let step = answer.first_unanswered().unwrap_or(QuizStep::first());
        AppError::Validation(format!(
            "step {} of {} is unanswered",
            step.number(),
            QuizStep::COUNT
        ))
    })?;

    info!(?triple, "Quiz completed");
    Ok(Json(SubmitResponse {
        redirect: result_redirect(&triple),
        triple,
    }))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::admin::images::{filter_by_category, today, ImageAssetInput, ImageAssetView, ImageCategory};
use crate::errors::AppError;
use crate::quiz::questions::{validate_option, QuizOption, QuizQuestion};
use crate::result::templates::{CombinationStatus, ResultTemplate, ResultTemplateInput};
use crate::state::AppState;
use crate::stylist::rules::{QuickQuestion, QuickQuestionInput, ResponseRule, ResponseRuleInput, StylistSettings};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// ---- result templates ----

/// GET /api/v1/admin/results
pub async fn handle_list_results(State(state): State<AppState>) -> Json<Vec<ResultTemplate>> {
    Json(state.store.read().await.templates.rows().to_vec())
}

fn check_template_input(state: &AppState, input: &ResultTemplateInput) -> Result<(), AppError> {
    input.validate().map_err(AppError::Validation)?;
    let unknown = state.catalog.unknown_ids(&input.recommended_products);
    if !unknown.is_empty() {
        return Err(AppError::Validation(format!("unknown product ids: {unknown:?}")));
    }
    Ok(())
}

/// POST /api/v1/admin/results
pub async fn handle_create_result(
    State(state): State<AppState>,
    Json(input): Json<ResultTemplateInput>,
) -> Result<(StatusCode, Json<ResultTemplate>), AppError> {
    check_template_input(&state, &input)?;
    let mut store = state.store.write().await;
    if let Some(existing) = store.templates.find(&input.triple) {
        return Err(AppError::Validation(format!(
            "combination already configured by template {}",
            existing.id
        )));
    }
    let template = input.into_template(new_id());
    store.templates.insert(template.clone());
    info!(template_id = %template.id, triple = ?template.triple, "Result template created");
    Ok((StatusCode::CREATED, Json(template)))
}

/// PUT /api/v1/admin/results/:id
pub async fn handle_update_result(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ResultTemplateInput>,
) -> Result<Json<ResultTemplate>, AppError> {
    check_template_input(&state, &input)?;
    let mut store = state.store.write().await;
    if let Some(other) = store.templates.find(&input.triple).filter(|t| t.id != id) {
        return Err(AppError::Validation(format!(
            "combination already configured by template {}",
            other.id
        )));
    }
    let template = input.into_template(id.clone());
    if !store.templates.replace(template.clone()) {
        return Err(AppError::NotFound(format!("Result template {id} not found")));
    }
    Ok(Json(template))
}

/// DELETE /api/v1/admin/results/:id
pub async fn handle_delete_result(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.store.write().await.templates.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Result template {id} not found")))
    }
}

/// GET /api/v1/admin/results/combinations
pub async fn handle_list_combinations(
    State(state): State<AppState>,
) -> Json<Vec<CombinationStatus>> {
    Json(state.store.read().await.templates.combinations())
}

#[derive(Debug, Serialize)]
pub struct GenerateMissingResponse {
    pub added: usize,
    pub total: usize,
}

/// POST /api/v1/admin/results/generate-missing
pub async fn handle_generate_missing(State(state): State<AppState>) -> Json<GenerateMissingResponse> {
    let mut store = state.store.write().await;
    let added = store.templates.generate_missing();
    let total = store.templates.rows().len();
    info!(added, total, "Generated missing result templates");
    Json(GenerateMissingResponse { added, total })
}

// ---- AI response rules ----

/// GET /api/v1/admin/ai-responses
pub async fn handle_list_rules(State(state): State<AppState>) -> Json<Vec<ResponseRule>> {
    Json(state.store.read().await.rules.clone())
}

/// POST /api/v1/admin/ai-responses
pub async fn handle_create_rule(
    State(state): State<AppState>,
    Json(input): Json<ResponseRuleInput>,
) -> Result<(StatusCode, Json<ResponseRule>), AppError> {
    input.validate().map_err(AppError::Validation)?;
    let rule = input.into_rule(new_id());
    state.store.write().await.rules.push(rule.clone());
    Ok((StatusCode::CREATED, Json(rule)))
}

/// PUT /api/v1/admin/ai-responses/:id
pub async fn handle_update_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ResponseRuleInput>,
) -> Result<Json<ResponseRule>, AppError> {
    input.validate().map_err(AppError::Validation)?;
    let mut store = state.store.write().await;
    let slot = store
        .rules
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Response rule {id} not found")))?;
    *slot = input.into_rule(id);
    Ok(Json(slot.clone()))
}

/// DELETE /api/v1/admin/ai-responses/:id
pub async fn handle_delete_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut store = state.store.write().await;
    let before = store.rules.len();
    store.rules.retain(|r| r.id != id);
    if store.rules.len() == before {
        return Err(AppError::NotFound(format!("Response rule {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---- quick questions ----

/// GET /api/v1/admin/quick-questions
/// Includes inactive questions, sorted by order.
pub async fn handle_list_quick_questions(State(state): State<AppState>) -> Json<Vec<QuickQuestion>> {
    let mut questions = state.store.read().await.quick_questions.clone();
    questions.sort_by_key(|q| q.order);
    Json(questions)
}

/// POST /api/v1/admin/quick-questions
/// Without an explicit order the question goes last.
pub async fn handle_create_quick_question(
    State(state): State<AppState>,
    Json(input): Json<QuickQuestionInput>,
) -> Result<(StatusCode, Json<QuickQuestion>), AppError> {
    input.validate().map_err(AppError::Validation)?;
    let mut store = state.store.write().await;
    let order = input.order.unwrap_or_else(|| {
        store.quick_questions.iter().map(|q| q.order).max().unwrap_or(0) + 1
    });
    let question = QuickQuestion {
        id: new_id(),
        text: input.text,
        category: input.category,
        order,
        active: input.active,
    };
    store.quick_questions.push(question.clone());
    Ok((StatusCode::CREATED, Json(question)))
}

/// PUT /api/v1/admin/quick-questions/:id
pub async fn handle_update_quick_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<QuickQuestionInput>,
) -> Result<Json<QuickQuestion>, AppError> {
    input.validate().map_err(AppError::Validation)?;
    let mut store = state.store.write().await;
    let slot = store
        .quick_questions
        .iter_mut()
        .find(|q| q.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Quick question {id} not found")))?;
    slot.text = input.text;
    slot.category = input.category;
    if let Some(order) = input.order {
        slot.order = order;
    }
    slot.active = input.active;
    Ok(Json(slot.clone()))
}

/// DELETE /api/v1/admin/quick-questions/:id
pub async fn handle_delete_quick_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut store = state.store.write().await;
    let before = store.quick_questions.len();
    store.quick_questions.retain(|q| q.id != id);
    if store.quick_questions.len() == before {
        return Err(AppError::NotFound(format!("Quick question {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---- quiz questions ----

/// GET /api/v1/admin/quiz-questions
pub async fn handle_list_quiz_questions(State(state): State<AppState>) -> Json<Vec<QuizQuestion>> {
    let mut questions = state.store.read().await.questions.clone();
    questions.sort_by_key(|q| q.order);
    Json(questions)
}

/// PUT /api/v1/admin/quiz-questions/:id
/// The question's axis cannot change; the quiz always asks all three.
pub async fn handle_update_quiz_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut question): Json<QuizQuestion>,
) -> Result<Json<QuizQuestion>, AppError> {
    question.id = id.clone();
    question.validate().map_err(AppError::Validation)?;
    let mut store = state.store.write().await;
    let slot = store
        .questions
        .iter_mut()
        .find(|q| q.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Quiz question {id} not found")))?;
    if slot.kind != question.kind {
        return Err(AppError::Validation(
            "a quiz question's axis cannot be changed".to_string(),
        ));
    }
    *slot = question;
    Ok(Json(slot.clone()))
}

/// POST /api/v1/admin/quiz-questions/:id/options
pub async fn handle_add_quiz_option(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(option): Json<QuizOption>,
) -> Result<(StatusCode, Json<QuizQuestion>), AppError> {
    let mut store = state.store.write().await;
    let question = store
        .questions
        .iter_mut()
        .find(|q| q.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Quiz question {id} not found")))?;
    validate_option(question.kind, &option).map_err(AppError::Validation)?;
    if question.options.iter().any(|o| o.id == option.id) {
        return Err(AppError::Validation(format!(
            "option '{}' already exists on this question",
            option.id
        )));
    }
    question.options.push(option);
    Ok((StatusCode::CREATED, Json(question.clone())))
}

/// DELETE /api/v1/admin/quiz-questions/:id/options/:option_id
pub async fn handle_delete_quiz_option(
    State(state): State<AppState>,
    Path((id, option_id)): Path<(String, String)>,
) -> Result<Json<QuizQuestion>, AppError> {
    let mut store = state.store.write().await;
    let question = store
        .questions
        .iter_mut()
        .find(|q| q.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Quiz question {id} not found")))?;
    let before = question.options.len();
    question.options.retain(|o| o.id != option_id);
    if question.options.len() == before {
        return Err(AppError::NotFound(format!("Option {option_id} not found")));
    }
    Ok(Json(question.clone()))
}

// ---- stylist settings ----

/// GET /api/v1/admin/settings
pub async fn handle_get_settings(State(state): State<AppState>) -> Json<StylistSettings> {
    Json(state.store.read().await.settings.clone())
}

/// PUT /api/v1/admin/settings
pub async fn handle_put_settings(
    State(state): State<AppState>,
    Json(settings): Json<StylistSettings>,
) -> Result<Json<StylistSettings>, AppError> {
    settings.validate().map_err(AppError::Validation)?;
    state.store.write().await.settings = settings.clone();
    info!(
        delay_ms = settings.response_delay_ms,
        max_products = settings.max_product_recommendations,
        "Stylist settings updated"
    );
    Ok(Json(settings))
}

// ---- image assets ----

#[derive(Debug, Deserialize)]
pub struct ImageFilter {
    #[serde(default)]
    pub category: Option<ImageCategory>,
}

/// GET /api/v1/admin/images?category=icon
pub async fn handle_list_images(
    State(state): State<AppState>,
    Query(filter): Query<ImageFilter>,
) -> Json<Vec<ImageAssetView>> {
    let store = state.store.read().await;
    Json(filter_by_category(&store.images, filter.category))
}

/// POST /api/v1/admin/images
pub async fn handle_register_image(
    State(state): State<AppState>,
    Json(input): Json<ImageAssetInput>,
) -> Result<(StatusCode, Json<ImageAssetView>), AppError> {
    input.validate().map_err(AppError::Validation)?;
    let asset = input.into_asset(new_id(), today());
    let view = ImageAssetView::from(&asset);
    state.store.write().await.images.push(asset);
    Ok((StatusCode::CREATED, Json(view)))
}

/// PUT /api/v1/admin/images/:id
/// Keeps the original upload date.
pub async fn handle_update_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ImageAssetInput>,
) -> Result<Json<ImageAssetView>, AppError> {
    input.validate().map_err(AppError::Validation)?;
    let mut store = state.store.write().await;
    let slot = store
        .images
        .iter_mut()
        .find(|img| img.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Image {id} not found")))?;
    *slot = input.into_asset(id, slot.upload_date);
    Ok(Json(ImageAssetView::from(&*slot)))
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BulkDeleteResponse {
    pub deleted: usize,
}

/// POST /api/v1/admin/images/delete
/// Unknown ids are ignored.
pub async fn handle_delete_images(
    State(state): State<AppState>,
    Json(req): Json<BulkDeleteRequest>,
) -> Json<BulkDeleteResponse> {
    let mut store = state.store.write().await;
    let before = store.images.len();
    store.images.retain(|img| !req.ids.contains(&img.id));
    Json(BulkDeleteResponse {
        deleted: before - store.images.len(),
    })
}

use axum::{
    extract::{Query, State},
    Json,
};

use crate::quiz::axis::RawTriple;
use crate::result::resolver::{resolve_view, ResultView};
use crate::result::share::{compose_share, ShareOutcome, ShareRequest};
use crate::state::AppState;

/// GET /api/v1/result?bodyType=..&colorSeason=..&stylePreference=..
/// Never fails: missing or unknown axis values take their defaults.
pub async fn handle_get_result(
    State(state): State<AppState>,
    Query(raw): Query<RawTriple>,
) -> Json<ResultView> {
    let triple = raw.validate_or_default();
    let store = state.store.read().await;
    Json(resolve_view(&store.templates, &state.catalog, triple))
}

/// POST /api/v1/result/share
pub async fn handle_share(Json(req): Json<ShareRequest>) -> Json<ShareOutcome> {
    let triple = req.triple.validate_or_default();
    Json(compose_share(&triple, &req.url, req.native_share))
}

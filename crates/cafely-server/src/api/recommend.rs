use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use cafely_core::PreferenceSet;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// Ranks the catalog against the posted quiz answers.
///
/// Unanswered fields may be omitted. An empty list means nothing matched.
pub(super) async fn recommend(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<PreferenceSet>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let Json(preferences) = body.map_err(|rejection| {
        ApiError::new(req_id.0.clone(), "bad_request", rejection.body_text())
    })?;

    let data = state.catalog.recommend(&preferences);
    tracing::debug!(
        answered = preferences.answered_count(),
        matches = data.len(),
        "recommendation computed"
    );

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

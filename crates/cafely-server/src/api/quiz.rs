use axum::{Extension, Json};
use cafely_core::{Question, QUESTIONS};

use crate::middleware::RequestId;

use super::{ApiResponse, ResponseMeta};

/// The five quiz questions, in the order they are asked.
pub(super) async fn get_quiz(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<&'static [Question]>> {
    Json(ApiResponse {
        data: &QUESTIONS,
        meta: ResponseMeta::new(req_id.0),
    })
}

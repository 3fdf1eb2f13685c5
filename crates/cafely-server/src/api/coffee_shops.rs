use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use cafely_finder::NearbyShops;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_finder_error, ApiError, ApiResponse, AppState, ResponseMeta};

const MIN_RADIUS_METERS: u32 = 100;
const MAX_RADIUS_METERS: u32 = 10_000;

#[derive(Debug, Deserialize)]
pub(super) struct CoffeeShopQuery {
    pub address: Option<String>,
    pub radius: Option<u32>,
}

pub(super) fn normalize_radius(radius: Option<u32>, default: u32) -> u32 {
    radius
        .unwrap_or(default)
        .clamp(MIN_RADIUS_METERS, MAX_RADIUS_METERS)
}

pub(super) async fn find_coffee_shops(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<CoffeeShopQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<NearbyShops>>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        ApiError::new(req_id.0.clone(), "bad_request", rejection.body_text())
    })?;

    let address = query.address.unwrap_or_default();
    if address.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "query parameter 'address' is required",
        ));
    }

    let radius = normalize_radius(query.radius, state.finder.radius_meters());
    let data = state
        .finder
        .find_coffee_shops_near_address(&address, radius)
        .await
        .map_err(|e| map_finder_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

//! Catalog API handlers

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;

use super::dto::{CatalogDto, CatalogQuery, EndTimesQuery};
use crate::application::CheckoutService;
use crate::domain::booking::{Field, FieldErrors, TimeSlot};
use crate::interfaces::http::common::{ApiError, ApiResponse, ApiResult};
use crate::shared::errors::DomainError;

#[derive(Clone)]
pub struct CatalogState {
    pub service: Arc<CheckoutService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/catalog",
    tag = "Catalog",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Option lists and limits", body = ApiResponse<CatalogDto>)
    )
)]
pub async fn get_catalog(
    State(state): State<CatalogState>,
    Query(query): Query<CatalogQuery>,
) -> Json<ApiResponse<CatalogDto>> {
    let ctx = state.service.context();
    Json(ApiResponse::success(CatalogDto::build(
        state.service.settings(),
        ctx.min_date(),
        query.country.as_deref(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/catalog/end-times",
    tag = "Catalog",
    params(EndTimesQuery),
    responses(
        (status = 200, description = "End slots for the start slot", body = ApiResponse<Vec<TimeSlot>>),
        (status = 422, description = "Not a start slot")
    )
)]
pub async fn get_end_times(Query(query): Query<EndTimesQuery>) -> ApiResult<Json<ApiResponse<Vec<TimeSlot>>>> {
    match TimeSlot::parse(&query.start) {
        Some(start) if start.is_start_slot() => Ok(Json(ApiResponse::success(start.end_slots().to_vec()))),
        _ => {
            let mut errors = FieldErrors::new();
            errors.insert(
                Field::StartTime,
                format!("'{}' is not an available start time", query.start),
            );
            Err(ApiError(DomainError::Validation(errors)))
        }
    }
}

//! Checkout API handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use super::dto::{CheckoutView, CreateCheckoutRequest, UpdateDraftRequest};
use crate::application::CheckoutService;
use crate::domain::checkout::CheckoutSession;
use crate::interfaces::http::common::{ApiResponse, ApiResult, ValidatedJson, ValidationFailure};

#[derive(Clone)]
pub struct CheckoutState {
    pub service: Arc<CheckoutService>,
}

type ViewResponse = Json<ApiResponse<CheckoutView>>;

fn view(state: &CheckoutState, session: CheckoutSession) -> ViewResponse {
    Json(ApiResponse::success(CheckoutView::from_session(
        session,
        &state.service.context(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/checkouts",
    tag = "Checkout",
    request_body = CreateCheckoutRequest,
    responses(
        (status = 201, description = "Session created", body = ApiResponse<CheckoutView>)
    )
)]
pub async fn create_checkout(
    State(state): State<CheckoutState>,
    body: Option<ValidatedJson<CreateCheckoutRequest>>,
) -> ApiResult<(StatusCode, ViewResponse)> {
    let request = body.map(|ValidatedJson(b)| b).unwrap_or_default();
    let session = state.service.create(request.layout).await?;
    Ok((StatusCode::CREATED, view(&state, session)))
}

#[utoipa::path(
    get,
    path = "/api/v1/checkouts/{id}",
    tag = "Checkout",
    params(("id" = Uuid, Path, description = "Checkout session ID")),
    responses(
        (status = 200, description = "Current session state", body = ApiResponse<CheckoutView>),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn get_checkout(
    State(state): State<CheckoutState>,
    Path(id): Path<Uuid>,
) -> ApiResult<ViewResponse> {
    let session = state.service.get(id).await?;
    Ok(view(&state, session))
}

#[utoipa::path(
    patch,
    path = "/api/v1/checkouts/{id}/draft",
    tag = "Checkout",
    params(("id" = Uuid, Path, description = "Checkout session ID")),
    request_body = UpdateDraftRequest,
    responses(
        (status = 200, description = "Draft updated", body = ApiResponse<CheckoutView>),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "Session is processing payment or confirmed")
    )
)]
pub async fn update_draft(
    State(state): State<CheckoutState>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateDraftRequest>,
) -> ApiResult<ViewResponse> {
    let session = state.service.apply_updates(id, body.updates).await?;
    Ok(view(&state, session))
}

#[utoipa::path(
    post,
    path = "/api/v1/checkouts/{id}/next",
    tag = "Checkout",
    params(("id" = Uuid, Path, description = "Checkout session ID")),
    responses(
        (status = 200, description = "Moved to the next step", body = ApiResponse<CheckoutView>),
        (status = 422, description = "Current step has errors", body = ApiResponse<ValidationFailure>),
        (status = 409, description = "No step to move to")
    )
)]
pub async fn next_step(
    State(state): State<CheckoutState>,
    Path(id): Path<Uuid>,
) -> ApiResult<ViewResponse> {
    let session = state.service.next(id).await?;
    Ok(view(&state, session))
}

#[utoipa::path(
    post,
    path = "/api/v1/checkouts/{id}/back",
    tag = "Checkout",
    params(("id" = Uuid, Path, description = "Checkout session ID")),
    responses(
        (status = 200, description = "Moved to the previous step", body = ApiResponse<CheckoutView>),
        (status = 409, description = "Already on the first step")
    )
)]
pub async fn previous_step(
    State(state): State<CheckoutState>,
    Path(id): Path<Uuid>,
) -> ApiResult<ViewResponse> {
    let session = state.service.back(id).await?;
    Ok(view(&state, session))
}

#[utoipa::path(
    post,
    path = "/api/v1/checkouts/{id}/payment",
    tag = "Checkout",
    params(("id" = Uuid, Path, description = "Checkout session ID")),
    responses(
        (status = 202, description = "Payment accepted for processing", body = ApiResponse<CheckoutView>),
        (status = 422, description = "Card details have errors", body = ApiResponse<ValidationFailure>),
        (status = 409, description = "Not on the payment step, or already processing")
    )
)]
pub async fn submit_payment(
    State(state): State<CheckoutState>,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, ViewResponse)> {
    let session = state.service.submit_payment(id).await?;
    Ok((StatusCode::ACCEPTED, view(&state, session)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/checkouts/{id}",
    tag = "Checkout",
    params(("id" = Uuid, Path, description = "Checkout session ID")),
    responses(
        (status = 204, description = "Session discarded"),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn discard_checkout(
    State(state): State<CheckoutState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.service.discard(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Reservation API handlers
//!
//! Both routes sit behind the login guard and act on the logged-in user.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Extension, Json,
};

use super::dto::{PurchaseRequestDto, ReservationHistoryResponse};
use crate::application::BookingService;
use crate::interfaces::http::common::{
    ApiError, JsonBody, MessageResponse, NO_RESERVATION, SUCESS,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct ReservationState {
    pub booking: Arc<BookingService>,
}

#[utoipa::path(
    get,
    path = "/reservation",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Trip history split into upcoming, past and canceled; `NO_RESERVATION` when empty", body = ReservationHistoryResponse),
        (status = 401, description = "NEED_LOGIN, INVALID_TOKEN or INVALID_USER", body = MessageResponse)
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Response, ApiError> {
    let history = state.booking.history(user.id).await?;

    if history.is_empty() {
        return Ok(Json(MessageResponse::new(NO_RESERVATION)).into_response());
    }

    Ok(Json(ReservationHistoryResponse {
        message: SUCESS.to_string(),
        results: history.into(),
    })
    .into_response())
}

#[utoipa::path(
    post,
    path = "/reservation/purchase",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    request_body = PurchaseRequestDto,
    responses(
        (status = 200, description = "Reservation booked", body = MessageResponse),
        (status = 400, description = "KEY_ERROR or ACCOMMODATION_DOES_NOT_EXIST", body = MessageResponse),
        (status = 401, description = "NEED_LOGIN, INVALID_TOKEN or INVALID_USER", body = MessageResponse)
    )
)]
pub async fn purchase(
    State(state): State<ReservationState>,
    Extension(user): Extension<AuthenticatedUser>,
    JsonBody(request): JsonBody<PurchaseRequestDto>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.booking.purchase(user.id, request.into()).await?;
    Ok(Json(MessageResponse::new(SUCESS)))
}

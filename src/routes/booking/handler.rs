use axum::{
    extract::{Json, Path, State, rejection::JsonRejection},
    response::IntoResponse,
};

use crate::{
    AppState,
    error::AppError,
    utils::{EmptyPayload, error_to_envelope, error_with_payload, success_to_envelope},
};

use super::model::{Agendamento, BOOK_FAILED, BOOK_REQUIRED, BookRequest, BookingListResponse};

#[axum::debug_handler]
pub async fn book(
    State(state): State<AppState>,
    req: Result<Json<BookRequest>, JsonRejection>,
) -> impl IntoResponse {
    let booking = match req
        .map_err(|_| AppError::InvalidInput(BOOK_REQUIRED))
        .and_then(|Json(req)| req.required())
    {
        Ok(booking) => booking,
        Err(e) => return error_to_envelope::<EmptyPayload>(Some(e.mensagem())),
    };

    match Agendamento::book(&state.pool, &booking).await {
        Ok(()) => success_to_envelope(EmptyPayload {}),
        Err(e) => {
            e.log("book");
            let mensagem = if e.is_internal() { BOOK_FAILED } else { e.mensagem() };
            error_to_envelope(Some(mensagem))
        }
    }
}

/// 路径里的 professor_id 目前不参与过滤，始终返回全部预约
#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<AppState>,
    Path(professor_id): Path<String>,
) -> impl IntoResponse {
    tracing::debug!("Listing bookings (requested for professor {})", professor_id);

    match Agendamento::list_all(&state.pool).await {
        Ok(agendamentos) => success_to_envelope(BookingListResponse { agendamentos }),
        Err(e) => {
            e.log("list bookings");
            error_with_payload(None, BookingListResponse::default())
        }
    }
}

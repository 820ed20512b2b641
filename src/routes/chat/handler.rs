use axum::{
    extract::{Json, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    response::IntoResponse,
};

use crate::{
    AppState,
    error::AppError,
    utils::{EmptyPayload, error_to_envelope, error_with_payload, success_to_envelope},
};

use super::model::{
    HISTORY_REQUIRED, HistoryQuery, MensagemChat, MessageListResponse, SEND_REQUIRED,
    SendMessageRequest,
};

#[axum::debug_handler]
pub async fn get_messages(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> impl IntoResponse {
    let (user1, user2) = match query
        .map_err(|_| AppError::InvalidInput(HISTORY_REQUIRED))
        .and_then(|Query(query)| query.required())
    {
        Ok(pair) => pair,
        Err(e) => {
            return error_with_payload(Some(e.mensagem()), MessageListResponse::default());
        }
    };

    match MensagemChat::history(&state.pool, user1, user2).await {
        Ok(mensagens) => success_to_envelope(MessageListResponse { mensagens }),
        Err(e) => {
            e.log("chat history");
            error_with_payload(None, MessageListResponse::default())
        }
    }
}

/// 发送失败对外只返回 `{sucesso: false}`，具体原因只记录在日志里
#[axum::debug_handler]
pub async fn send_message(
    State(state): State<AppState>,
    req: Result<Json<SendMessageRequest>, JsonRejection>,
) -> impl IntoResponse {
    let result = match req
        .map_err(|_| AppError::InvalidInput(SEND_REQUIRED))
        .and_then(|Json(req)| req.required())
    {
        Ok((remetente, destinatario, mensagem)) => {
            MensagemChat::send(&state.pool, remetente, destinatario, &mensagem).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => success_to_envelope(EmptyPayload {}),
        Err(e) => {
            e.log("send message");
            error_to_envelope(None)
        }
    }
}

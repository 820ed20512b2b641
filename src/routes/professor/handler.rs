use axum::{
    extract::{Json, State, rejection::JsonRejection},
    response::IntoResponse,
};

use crate::{
    AppState,
    error::AppError,
    utils::{error_to_envelope, error_with_payload, success_to_envelope},
};

use super::model::{
    LOGIN_REQUIRED, LoginRequest, LoginResponse, Professor, ProfessorListResponse,
    REGISTER_REQUIRED, RegisterRequest, RegisterResponse,
};

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    req: Result<Json<RegisterRequest>, JsonRejection>,
) -> impl IntoResponse {
    let (nome, senha) = match req
        .map_err(|_| AppError::InvalidInput(REGISTER_REQUIRED))
        .and_then(|Json(req)| req.required())
    {
        Ok(fields) => fields,
        Err(e) => return error_to_envelope::<RegisterResponse>(Some(e.mensagem())),
    };

    match Professor::register(&state.pool, &nome, &senha, state.config.bcrypt_cost).await {
        Ok(id) => success_to_envelope(RegisterResponse { id }),
        Err(e) => {
            e.log("register");
            error_to_envelope(Some(e.mensagem()))
        }
    }
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    req: Result<Json<LoginRequest>, JsonRejection>,
) -> impl IntoResponse {
    let (id, senha) = match req
        .map_err(|_| AppError::InvalidInput(LOGIN_REQUIRED))
        .and_then(|Json(req)| req.required())
    {
        Ok(fields) => fields,
        Err(e) => return error_to_envelope::<LoginResponse>(Some(e.mensagem())),
    };

    match Professor::authenticate(&state.pool, id, &senha).await {
        Ok(professor) => success_to_envelope(LoginResponse { professor }),
        Err(e) => {
            e.log("login");
            error_to_envelope(Some(e.mensagem()))
        }
    }
}

#[axum::debug_handler]
pub async fn list_professors(State(state): State<AppState>) -> impl IntoResponse {
    match Professor::list_all(&state.pool).await {
        Ok(professores) => success_to_envelope(ProfessorListResponse { professores }),
        Err(e) => {
            e.log("list professors");
            error_with_payload(None, ProfessorListResponse::default())
        }
    }
}

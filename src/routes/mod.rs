pub mod booking;
pub mod chat;
pub mod professor;

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// 存活检查，不访问数据库
pub async fn teste() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Servidor rodando e conectado ao banco!",
    })
}

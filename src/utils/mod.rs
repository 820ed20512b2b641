use axum::Json;
use bcrypt::{hash, verify};
use serde::Serialize;

use crate::error::AppError;

pub mod fields;

/// 生成加盐的 bcrypt 哈希，放到阻塞线程池中执行
pub async fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(password.as_bytes(), cost)).await??;
    Ok(hashed)
}

/// 校验密码，比较由 bcrypt 完成（常量时间）
pub async fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let hashed = hashed.to_owned();
    let ok = tokio::task::spawn_blocking(move || verify(password.as_bytes(), &hashed)).await??;
    Ok(ok)
}

/// 统一响应信封 `{sucesso, mensagem?, ...payload}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub sucesso: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mensagem: Option<String>,
    #[serde(flatten)]
    pub payload: Option<T>,
}

pub fn success_to_envelope<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        sucesso: true,
        mensagem: None,
        payload: Some(data),
    })
}

pub fn error_to_envelope<T>(mensagem: Option<&str>) -> Json<Envelope<T>> {
    Json(Envelope {
        sucesso: false,
        mensagem: mensagem.map(str::to_string),
        payload: None,
    })
}

/// 列表接口失败时仍然带上空集合，和旧客户端保持一致
pub fn error_with_payload<T>(mensagem: Option<&str>, data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        sucesso: false,
        mensagem: mensagem.map(str::to_string),
        payload: Some(data),
    })
}

/// 没有附加数据的成功响应
#[derive(Debug, Serialize)]
pub struct EmptyPayload {}

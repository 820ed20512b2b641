use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;
use crate::utils::fields::{loose_id, loose_text, parse_id};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MensagemChat {
    pub id: i32,
    pub remetente_id: i32,
    pub destinatario_id: i32,
    pub mensagem: String,
    pub data_envio: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default, deserialize_with = "loose_id")]
    pub remetente_id: Option<i32>,
    #[serde(default, deserialize_with = "loose_id")]
    pub destinatario_id: Option<i32>,
    #[serde(default, deserialize_with = "loose_text")]
    pub mensagem: Option<String>,
}

/// 查询串参数，保持原始文本，在校验时再解析
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub user1: Option<String>,
    pub user2: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct MessageListResponse {
    pub mensagens: Vec<MensagemChat>,
}

pub(super) const SEND_REQUIRED: &str = "Remetente, destinatário e mensagem são necessários";
pub(super) const HISTORY_REQUIRED: &str = "user1 e user2 são necessários";

impl SendMessageRequest {
    pub fn required(self) -> Result<(i32, i32, String), AppError> {
        match (self.remetente_id, self.destinatario_id, self.mensagem) {
            (Some(remetente), Some(destinatario), Some(mensagem)) => {
                Ok((remetente, destinatario, mensagem))
            }
            _ => Err(AppError::InvalidInput(SEND_REQUIRED)),
        }
    }
}

impl HistoryQuery {
    pub fn required(&self) -> Result<(i32, i32), AppError> {
        let parse = |raw: &Option<String>| {
            raw.as_deref()
                .map(parse_id)
                .transpose()
                .ok()
                .flatten()
                .flatten()
        };
        match (parse(&self.user1), parse(&self.user2)) {
            (Some(user1), Some(user2)) => Ok((user1, user2)),
            _ => Err(AppError::InvalidInput(HISTORY_REQUIRED)),
        }
    }
}

impl MensagemChat {
    pub async fn send(
        pool: &PgPool,
        remetente_id: i32,
        destinatario_id: i32,
        mensagem: &str,
    ) -> Result<(), AppError> {
        if mensagem.is_empty() {
            return Err(AppError::InvalidInput(SEND_REQUIRED));
        }

        sqlx::query(
            r#"
            INSERT INTO mensagens_chat (remetente_id, destinatario_id, mensagem)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(remetente_id)
        .bind(destinatario_id)
        .bind(mensagem)
        .execute(pool)
        .await
        // 消息没有唯一约束，能走到这里的约束冲突只会是外键
        .map_err(|e| AppError::from_insert(e, AppError::NotFound))?;

        tracing::debug!("Message sent from {} to {}", remetente_id, destinatario_id);
        Ok(())
    }

    /// 两人之间的双向消息，按发送时间升序
    pub async fn history(pool: &PgPool, user1: i32, user2: i32) -> Result<Vec<Self>, AppError> {
        let mensagens = sqlx::query_as::<_, MensagemChat>(
            r#"
            SELECT id, remetente_id, destinatario_id, mensagem, data_envio
            FROM mensagens_chat
            WHERE (remetente_id = $1 AND destinatario_id = $2)
               OR (remetente_id = $2 AND destinatario_id = $1)
            ORDER BY data_envio, id
            "#,
        )
        .bind(user1)
        .bind(user2)
        .fetch_all(pool)
        .await?;

        Ok(mensagens)
    }
}

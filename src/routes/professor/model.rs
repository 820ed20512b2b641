use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;
use crate::utils::{
    fields::{loose_id, loose_text},
    hash_password, verify_password,
};

#[derive(Debug, FromRow)]
pub struct Professor {
    pub id: i32,
    pub nome: String,
    #[sqlx(rename = "senha")]
    pub senha_hash: String,
}

/// 对外可见的教授信息，不含密码哈希
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ProfessorInfo {
    pub id: i32,
    pub nome: String,
}

impl From<Professor> for ProfessorInfo {
    fn from(professor: Professor) -> Self {
        Self {
            id: professor.id,
            nome: professor.nome,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "loose_text")]
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub senha: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: i32,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "loose_id")]
    pub id: Option<i32>,
    #[serde(default, deserialize_with = "loose_text")]
    pub senha: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub professor: ProfessorInfo,
}

#[derive(Debug, Default, Serialize)]
pub struct ProfessorListResponse {
    pub professores: Vec<ProfessorInfo>,
}

pub(super) const REGISTER_REQUIRED: &str = "Nome e senha são necessários";
pub(super) const LOGIN_REQUIRED: &str = "ID e senha são necessários";

impl RegisterRequest {
    pub fn required(self) -> Result<(String, String), AppError> {
        match (self.nome, self.senha) {
            (Some(nome), Some(senha)) => Ok((nome, senha)),
            _ => Err(AppError::InvalidInput(REGISTER_REQUIRED)),
        }
    }
}

impl LoginRequest {
    pub fn required(self) -> Result<(i32, String), AppError> {
        match (self.id, self.senha) {
            (Some(id), Some(senha)) => Ok((id, senha)),
            _ => Err(AppError::InvalidInput(LOGIN_REQUIRED)),
        }
    }
}

impl Professor {
    /// 注册教授，返回生成的 id；重名由 `professores.nome` 的唯一约束拒绝
    pub async fn register(
        pool: &PgPool,
        nome: &str,
        senha: &str,
        bcrypt_cost: u32,
    ) -> Result<i32, AppError> {
        if nome.is_empty() || senha.is_empty() {
            return Err(AppError::InvalidInput(REGISTER_REQUIRED));
        }

        let senha_hash = hash_password(senha, bcrypt_cost).await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO professores (nome, senha)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(nome)
        .bind(&senha_hash)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::from_insert(e, AppError::DuplicateName))?;

        tracing::info!("Registered professor {} with id {}", nome, id);
        Ok(id)
    }

    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, AppError> {
        let professor = sqlx::query_as::<_, Professor>(
            r#"
            SELECT id, nome, senha
            FROM professores
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(professor)
    }

    /// 无状态的一次性登录校验
    pub async fn authenticate(
        pool: &PgPool,
        id: i32,
        senha: &str,
    ) -> Result<ProfessorInfo, AppError> {
        if senha.is_empty() {
            return Err(AppError::InvalidInput(LOGIN_REQUIRED));
        }

        let professor = Self::find_by_id(pool, id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !verify_password(senha, &professor.senha_hash).await? {
            tracing::warn!("Wrong password for professor {}", id);
            return Err(AppError::WrongPassword);
        }

        Ok(professor.into())
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<ProfessorInfo>, AppError> {
        let professores = sqlx::query_as::<_, ProfessorInfo>(
            r#"
            SELECT id, nome
            FROM professores
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(professores)
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// 缺少必填字段，携带返回给客户端的提示
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("professor name already registered")]
    DuplicateName,

    #[error("professor not found")]
    NotFound,

    #[error("wrong password")]
    WrongPassword,

    #[error("slot already booked")]
    SlotConflict,

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),

    #[error("password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AppError {
    /// 把写入时的数据库错误归类：唯一约束冲突由调用方决定含义，外键冲突视为引用的教授不存在
    pub fn from_insert(err: sqlx::Error, on_unique: AppError) -> AppError {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return on_unique;
            }
            if db_err.is_foreign_key_violation() {
                return AppError::NotFound;
            }
        }
        AppError::StoreUnavailable(err)
    }

    /// 返回给客户端的提示信息
    pub fn mensagem(&self) -> &'static str {
        match self {
            AppError::InvalidInput(msg) => *msg,
            AppError::DuplicateName => "Nome já cadastrado!",
            AppError::NotFound => "Usuário não encontrado",
            AppError::WrongPassword => "Senha incorreta",
            AppError::SlotConflict => "Horário já agendado!",
            AppError::StoreUnavailable(_) | AppError::Hashing(_) | AppError::Task(_) => {
                "Erro no servidor"
            }
        }
    }

    /// 是否属于服务端故障（而不是业务拒绝）
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::StoreUnavailable(_) | AppError::Hashing(_) | AppError::Task(_)
        )
    }

    pub(crate) fn log(&self, operation: &str) {
        if self.is_internal() {
            tracing::error!("{} failed: {}", operation, self);
        } else {
            tracing::info!("{} rejected: {}", operation, self);
        }
    }
}

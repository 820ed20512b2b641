use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{AppState, routes};

// 教授注册、登录与列表
fn professor_routes() -> Router<AppState> {
    Router::new()
        .route("/cadastrar", post(routes::professor::register))
        .route("/login", post(routes::professor::login))
        .route("/professores", get(routes::professor::list_professors))
}

// 实验室预约
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/agendar", post(routes::booking::book))
        .route(
            "/agendamentos/{professor_id}",
            get(routes::booking::list_bookings),
        )
}

// 聊天
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/chat/mensagens", get(routes::chat::get_messages))
        .route("/chat/enviar", post(routes::chat::send_message))
}

/// 组装完整路由：API、静态文件、CORS（允许任意来源）和请求日志
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(professor_routes())
        .merge(booking_routes())
        .merge(chat_routes());

    Router::new()
        .route("/teste", get(routes::teste))
        .nest("/api", api)
        .fallback_service(ServeDir::new(&state.config.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

use std::path::Path;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::warn;

use crate::catalog::Product;
use crate::engine::ChatContext;
use crate::nlp::intent::IntentLabel;

const BANNER: &str =
    "✅ Chatbot AI đang chạy — Gửi POST JSON {'message':'...'} tới /chat hoặc test GET /chat?message=xin%20chao";


#[derive(Clone)]
pub struct AppState {
    pub context: Arc<ChatContext>,
}


#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}


#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    pub intent: IntentLabel,
    pub reply: String,
    pub products: Vec<Product>,
}


#[derive(Debug)]
pub enum ApiError {
    MissingMessage,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingMessage => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "message is required" })),
            )
                .into_response(),
        }
    }
}


pub fn create_router(context: Arc<ChatContext>, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/chat", get(chat_get).post(chat_post))
        .route_service("/ui", ServeFile::new(static_dir.join("chat.html")))
        .route_service("/favicon.ico", ServeFile::new(static_dir.join("favicon.jpg")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { context })
}

async fn index() -> &'static str {
    BANNER
}

async fn chat_get(
    State(state): State<AppState>,
    Query(query): Query<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    respond(&state, query.message)
}

async fn chat_post(State(state): State<AppState>, body: Bytes) -> Result<Json<ChatResponse>, ApiError> {
    let request = match serde_json::from_slice::<ChatRequest>(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected chat body: {}", e);
            return Err(ApiError::MissingMessage);
        }
    };
    respond(&state, request.message)
}

fn respond(state: &AppState, message: Option<String>) -> Result<Json<ChatResponse>, ApiError> {
    let message = message
        .filter(|m| !m.trim().is_empty())
        .ok_or(ApiError::MissingMessage)?;

    let outcome = state.context.resolve(&message);

    Ok(Json(ChatResponse {
        message,
        intent: outcome.intent,
        reply: outcome.reply,
        products: outcome.products,
    }))
}

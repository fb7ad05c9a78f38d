//! Chatbot endpoint.

use crate::api::{AppState, ChatReply, ChatRequest};
use crate::chat;
use crate::metrics::ProxyService;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

/// POST /v1/chat - Ask the farming advisor a question.
///
/// Always answers 200 with a `reply`; failures are reported inside it.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Json<ChatReply> {
    // An unreadable body is treated like an empty message
    let message = payload.map(|Json(req)| req.message).unwrap_or_default();

    let outcome = chat::converse(state.chat.as_ref(), &message).await;
    let label = outcome.label();
    state
        .metrics_collector
        .record_proxy_call(ProxyService::Chat, label);
    tracing::info!(
        model = state.chat.model(),
        outcome = label,
        chars = message.chars().count(),
        "Chat reply served"
    );

    Json(ChatReply {
        reply: outcome.into_reply(),
    })
}

use axum::{Json, extract::State};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    error::RelayError,
    message::{ChatRequest, ChatResponse},
    state::SharedState,
};

#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, RelayError> {
    let reply = state.relay.relay_chat(&payload).await?;
    info!(chars = reply.chars().count(), "relayed reply");
    Ok(Json(ChatResponse { reply }))
}

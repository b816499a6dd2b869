//! Bot Framework messaging endpoint
//!
//! The connector posts every activity to `/api/messages`. Messages run a
//! turn, conversation updates may trigger the greeting, and everything else
//! is acknowledged without action.

use axum::{extract::State, http::StatusCode};
use bytes::Bytes;
use integration_botframework::{Activity, ActivityKind};
use tracing::{debug, info, instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Handle an inbound activity
///
/// Returns `202 Accepted` once the turn has completed.
#[instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn handle_activity(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let activity: Activity = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Failed to parse activity");
        ApiError::BadRequest(format!("Invalid activity: {e}"))
    })?;

    debug!(
        activity_type = %activity.activity_type,
        channel = ?activity.channel_id,
        "Activity received"
    );

    match activity.kind() {
        ActivityKind::Message => {
            let message = activity
                .to_inbound_message()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            let outcome = state.turn_service.handle_message(&message).await?;
            info!(outcome = ?outcome, "Message handled");
        },
        ActivityKind::ConversationUpdate => {
            let update = activity
                .to_conversation_update()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            state.turn_service.handle_conversation_update(&update).await?;
        },
        ActivityKind::Other(kind) => {
            debug!(activity_type = %kind, "Ignoring activity");
        },
    }

    Ok(StatusCode::ACCEPTED)
}

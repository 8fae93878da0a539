/// Tool for emailing the weekly summary
///
/// This module implements the habit_share MCP tool. Stats are computed from
/// the store before the email is sent, so delivery works on a finished snapshot.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::share::{EmailTransport, ShareRequest, ShareService};
use crate::storage::KeyValueStore;
use crate::store::HabitStore;
use crate::ServerError;

/// Parameters for sharing the week
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ShareParams {
    /// Friend's email address
    pub recipient_email: String,
}

/// Response from sharing the week
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub message_id: Option<String>,
    pub message: String,
}

/// Email this week's progress to a friend
pub async fn share_week<S: KeyValueStore, T: EmailTransport>(
    store: &HabitStore<S>,
    service: &ShareService<T>,
    params: ShareParams,
    today: NaiveDate,
) -> Result<ShareResponse, ServerError> {
    let request = ShareRequest {
        recipient_email: params.recipient_email,
        stats: store.weekly_stats(today)?,
    };

    let receipt = service.share(&request).await?;

    Ok(ShareResponse {
        message: format!(
            "📤 Shared this week's progress for {} habit(s) with {}",
            request.stats.len(),
            request.recipient_email.trim()
        ),
        message_id: receipt.message_id,
    })
}

//! One bounded `getUpdates` call, mapped into the strict update union.

use std::time::Duration;

use teloxide::{
    prelude::*,
    types::{AllowedUpdate, Update, UpdateKind},
};

use pyqbot_core::{
    domain::{ChatId, InboundUpdate, UpdateEvent},
    errors::Error,
    Result,
};

/// Fetch the batch of updates after `since`.
///
/// `since = None` reads from the start of the queue (only used while the
/// cursor is at its initial value). Transport failure is an `Err`, distinct
/// from an empty batch, so the caller never advances the cursor on failure.
pub async fn poll(
    bot: &Bot,
    since: Option<i64>,
    timeout: Duration,
) -> Result<Vec<InboundUpdate>> {
    let mut req = bot
        .get_updates()
        .timeout(timeout.as_secs() as u32)
        .allowed_updates(vec![AllowedUpdate::Message, AllowedUpdate::CallbackQuery]);
    if let Some(offset) = since {
        req = req.offset(offset as i32);
    }

    let updates = req
        .send()
        .await
        .map_err(|e| Error::Transport(format!("getUpdates: {e}")))?;

    Ok(updates.into_iter().filter_map(map_update).collect())
}

/// Strict tagged-union parse at the boundary: anything that is neither a
/// text message nor a data-bearing callback is logged and dropped.
fn map_update(update: Update) -> Option<InboundUpdate> {
    let update_id = i64::from(update.id);

    let event = match update.kind {
        UpdateKind::Message(msg) => {
            let text = msg.text()?.to_string();
            let sender_name = msg
                .from()
                .map(|u| u.first_name.clone())
                .unwrap_or_else(|| "Student".to_string());
            UpdateEvent::Message {
                chat_id: ChatId(msg.chat.id.0),
                text,
                sender_name,
            }
        }
        UpdateKind::CallbackQuery(q) => {
            let chat_id = ChatId(q.message.as_ref()?.chat.id.0);
            UpdateEvent::Callback {
                chat_id,
                callback_id: q.id,
                data: q.data?,
            }
        }
        other => {
            tracing::debug!(update_id, kind = ?other, "skipping unsupported update kind");
            return None;
        }
    };

    Some(InboundUpdate { update_id, event })
}

use async_trait::async_trait;

use crate::{
    domain::ChatId,
    messaging::types::InlineKeyboard,
    Result,
};

/// Messenger port.
///
/// Telegram is the only implementation today; handlers and the run
/// controller talk to this trait so they can be exercised in tests with a
/// recording stub.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    /// Send an HTML-formatted message with link previews suppressed.
    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<()>;

    async fn send_inline_keyboard(
        &self,
        chat_id: ChatId,
        html: &str,
        keyboard: InlineKeyboard,
    ) -> Result<()>;

    /// Acknowledge a button press. Fire-and-forget; failures are ignored by
    /// callers.
    async fn answer_callback(&self, callback_id: &str) -> Result<()>;
}

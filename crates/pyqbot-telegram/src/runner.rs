//! The one-shot run controller.
//!
//! Each externally-scheduled invocation does exactly one pass:
//! load cursor → poll → handle each update in order → save cursor.
//! The cursor is threaded through as a value (read once, written once), so
//! the read-modify-write window stays explicit and narrow.

use std::sync::Arc;

use teloxide::Bot;

use pyqbot_core::{
    config::Config,
    cursor::CursorStore,
    messaging::port::MessagingPort,
    scrape::PaperSource,
    Result,
};

use crate::{handlers, poller};

pub struct AppState {
    pub cfg: Arc<Config>,
    pub messenger: Arc<dyn MessagingPort>,
    pub papers: Arc<dyn PaperSource>,
}

pub async fn run_once(state: Arc<AppState>, bot: &Bot) -> Result<()> {
    let store = CursorStore::new(&state.cfg.cursor_file);
    let last = store.load();
    tracing::info!(last_update_id = last, "starting run");

    // From the beginning of the queue only while the cursor is untouched.
    let since = (last > 0).then(|| last + 1);

    let updates = match poller::poll(bot, since, state.cfg.poll_timeout).await {
        Ok(updates) => updates,
        Err(e) => {
            // Transport failure: leave the cursor alone so nothing is lost.
            tracing::warn!(error = %e, "poll failed, cursor not advanced");
            return Ok(());
        }
    };

    if updates.is_empty() {
        tracing::info!("no new updates");
        save_cursor(&store, last);
        return Ok(());
    }

    tracing::info!(count = updates.len(), "processing updates");

    let mut new_last = last;
    for update in &updates {
        if let Err(e) = handlers::handle_update(&state, update).await {
            // Fail-forward: a permanently malformed update must not block
            // the queue, so the cursor still advances past it.
            tracing::warn!(update_id = update.update_id, error = %e, "update failed, skipping");
        }
        new_last = new_last.max(update.update_id);
    }

    save_cursor(&store, new_last);
    tracing::info!(last_update_id = new_last, "run finished");
    Ok(())
}

fn save_cursor(store: &CursorStore, id: i64) {
    if let Err(e) = store.save(id) {
        tracing::warn!(error = %e, "failed to persist cursor");
    }
}

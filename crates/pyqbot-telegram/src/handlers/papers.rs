//! The scrape-and-send flow behind /papers and the year buttons.

use tokio::time::sleep;

use pyqbot_core::{
    compose::{self, ComposeOptions},
    domain::ChatId,
    Result,
};

use crate::runner::AppState;

pub async fn handle_papers(
    state: &AppState,
    chat_id: ChatId,
    filter_year: Option<&str>,
) -> Result<()> {
    state
        .messenger
        .send_html(chat_id, &compose::fetching_text(filter_year))
        .await?;

    let papers = state.papers.fetch_papers(filter_year).await;
    if papers.is_empty() {
        return state
            .messenger
            .send_html(chat_id, &compose::no_results_text(filter_year))
            .await;
    }

    let opts = ComposeOptions {
        page_size: state.cfg.page_size,
        max_pages_per_group: state.cfg.max_pages_per_group,
        name_max_len: state.cfg.name_max_len,
    };

    // Sequential sends with a fixed pause between them (platform rate limits).
    for (i, message) in compose::compose_batch(&papers, filter_year, &opts)
        .iter()
        .enumerate()
    {
        if i > 0 {
            sleep(state.cfg.send_delay).await;
        }
        state.messenger.send_html(chat_id, message).await?;
    }

    Ok(())
}

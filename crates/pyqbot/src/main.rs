use std::sync::Arc;

use teloxide::Bot;

use pyqbot_core::{config::Config, scrape::WebPaperSource};
use pyqbot_telegram::{
    runner::{self, AppState},
    TelegramMessenger,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pyqbot_core::logging::init("pyqbot");

    // Missing token is fatal before any network call is attempted.
    let cfg = Arc::new(Config::load()?);

    let bot = Bot::new(cfg.bot_token.clone());
    let messenger = Arc::new(TelegramMessenger::new(bot.clone()));
    let papers = Arc::new(WebPaperSource::new(
        cfg.papers_url.clone(),
        cfg.http_timeout,
    )?);

    let state = Arc::new(AppState {
        cfg,
        messenger,
        papers,
    });

    runner::run_once(state, &bot).await?;
    Ok(())
}

//! Static responses: welcome, year selector, help, unknown-command hint.

use pyqbot_core::{
    compose::escape_html,
    domain::ChatId,
    messaging::types::{InlineButton, InlineKeyboard},
    Result,
};

use crate::runner::AppState;

const YEARS: &[&str] = &[
    "2024", "2023", "2022", "2021", "2020", "2019", "2018", "2017", "2016", "2015",
];

pub async fn handle_start(state: &AppState, chat_id: ChatId, name: &str) -> Result<()> {
    let keyboard = InlineKeyboard::new(vec![
        vec![InlineButton::new("📚 Get All Papers", "papers")],
        vec![InlineButton::new("📅 Select Year", "years")],
        vec![InlineButton::new("❓ Help", "help")],
    ]);

    let text = format!(
        "🎓 <b>Welcome {}!</b>\n\n\
         I'm your <b>JEE Main PYQ Papers</b> bot!\n\n\
         📄 Direct PDF downloads\n\
         📅 Papers from 2015-2024\n\
         ✅ Questions &amp; Solutions\n\n\
         ⚠️ <b>Note:</b> I check messages every 2 mins, so please be patient!\n\n\
         Click a button below to start 👇",
        escape_html(name)
    );

    state.messenger.send_inline_keyboard(chat_id, &text, keyboard).await
}

pub async fn handle_years(state: &AppState, chat_id: ChatId) -> Result<()> {
    let mut rows: Vec<Vec<InlineButton>> = YEARS
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|y| InlineButton::new(format!("📅 {y}"), format!("year_{y}")))
                .collect()
        })
        .collect();
    rows.push(vec![InlineButton::new("📚 All Papers", "papers")]);

    state
        .messenger
        .send_inline_keyboard(chat_id, "📅 <b>Select a Year:</b>", InlineKeyboard::new(rows))
        .await
}

pub async fn handle_help(state: &AppState, chat_id: ChatId) -> Result<()> {
    let text = "📖 <b>Help &amp; Commands</b>\n\n\
        <b>Commands:</b>\n\
        /start - Start the bot\n\
        /papers - Get all papers\n\
        /years - Select by year\n\
        /help - Show this help\n\n\
        <b>How it works:</b>\n\
        • I run on a schedule, so replies may take up to 2 mins\n\
        • Papers are fetched from MathonGo\n\
        • Click links to download PDFs\n\n\
        <b>Having issues?</b>\n\
        • Try again after a few minutes\n\
        • Some links may redirect to Google Drive";

    state.messenger.send_html(chat_id, text).await
}

pub async fn handle_unknown(state: &AppState, chat_id: ChatId) -> Result<()> {
    state
        .messenger
        .send_html(chat_id, "❓ Unknown command.\n\nTry /start or /help")
        .await
}

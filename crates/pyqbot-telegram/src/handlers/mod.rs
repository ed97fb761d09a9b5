//! Per-update handlers.
//!
//! Each handler talks to the messenger and paper-source ports only, so the
//! whole dispatch path can be exercised in tests with recording stubs.

use pyqbot_core::{
    command::{self, Command},
    domain::{ChatId, InboundUpdate, UpdateEvent},
    Result,
};

use crate::runner::AppState;

mod menus;
mod papers;

/// Handle one inbound update end to end.
pub async fn handle_update(state: &AppState, update: &InboundUpdate) -> Result<()> {
    if let UpdateEvent::Callback { callback_id, .. } = &update.event {
        // Ack first so the client stops its spinner; failures are ignored.
        if let Err(e) = state.messenger.answer_callback(callback_id).await {
            tracing::debug!(error = %e, "callback ack failed");
        }
    }

    let chat_id = chat_of(&update.event);
    match command::dispatch(&update.event) {
        Command::Start => menus::handle_start(state, chat_id, sender_of(&update.event)).await,
        Command::ListAll => papers::handle_papers(state, chat_id, None).await,
        Command::ListByYear(year) => papers::handle_papers(state, chat_id, Some(&year)).await,
        Command::YearMenu => menus::handle_years(state, chat_id).await,
        Command::Help => menus::handle_help(state, chat_id).await,
        Command::Unknown => menus::handle_unknown(state, chat_id).await,
    }
}

fn chat_of(event: &UpdateEvent) -> ChatId {
    match event {
        UpdateEvent::Message { chat_id, .. } | UpdateEvent::Callback { chat_id, .. } => *chat_id,
    }
}

fn sender_of(event: &UpdateEvent) -> &str {
    match event {
        UpdateEvent::Message { sender_name, .. } => sender_name,
        UpdateEvent::Callback { .. } => "Student",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use pyqbot_core::{
        config::Config,
        domain::{PaperKind, PaperRecord},
        messaging::{port::MessagingPort, types::InlineKeyboard},
        scrape::PaperSource,
    };

    use super::*;

    #[derive(Clone, Debug)]
    struct Sent {
        chat_id: i64,
        html: String,
        with_keyboard: bool,
    }

    #[derive(Default)]
    struct RecordingMessenger {
        sent: Mutex<Vec<Sent>>,
        acked: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MessagingPort for RecordingMessenger {
        async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<()> {
            self.sent.lock().unwrap().push(Sent {
                chat_id: chat_id.0,
                html: html.to_string(),
                with_keyboard: false,
            });
            Ok(())
        }

        async fn send_inline_keyboard(
            &self,
            chat_id: ChatId,
            html: &str,
            _keyboard: InlineKeyboard,
        ) -> Result<()> {
            self.sent.lock().unwrap().push(Sent {
                chat_id: chat_id.0,
                html: html.to_string(),
                with_keyboard: true,
            });
            Ok(())
        }

        async fn answer_callback(&self, callback_id: &str) -> Result<()> {
            self.acked.lock().unwrap().push(callback_id.to_string());
            Ok(())
        }
    }

    struct StubSource {
        papers: Vec<PaperRecord>,
    }

    #[async_trait]
    impl PaperSource for StubSource {
        async fn fetch_papers(&self, filter_year: Option<&str>) -> Vec<PaperRecord> {
            self.papers
                .iter()
                .filter(|p| filter_year.map_or(true, |y| p.year == y))
                .cloned()
                .collect()
        }
    }

    fn paper(name: &str, year: &str) -> PaperRecord {
        PaperRecord {
            name: name.to_string(),
            source_url: format!("https://x.com/{name}.pdf"),
            direct_url: format!("https://x.com/{name}.pdf"),
            year: year.to_string(),
            kind: PaperKind::Question,
        }
    }

    fn state_with(papers: Vec<PaperRecord>) -> (Arc<AppState>, Arc<RecordingMessenger>) {
        let messenger = Arc::new(RecordingMessenger::default());
        let cfg = Config {
            bot_token: "test-token".to_string(),
            papers_url: "https://example.com/papers".to_string(),
            cursor_file: "unused".into(),
            poll_timeout: Duration::from_secs(1),
            http_timeout: Duration::from_secs(1),
            send_delay: Duration::from_millis(0),
            page_size: 10,
            max_pages_per_group: 1,
            name_max_len: 60,
        };
        let state = Arc::new(AppState {
            cfg: Arc::new(cfg),
            messenger: messenger.clone(),
            papers: Arc::new(StubSource { papers }),
        });
        (state, messenger)
    }

    fn message(text: &str) -> InboundUpdate {
        InboundUpdate {
            update_id: 1,
            event: UpdateEvent::Message {
                chat_id: ChatId(7),
                text: text.to_string(),
                sender_name: "Asha".to_string(),
            },
        }
    }

    fn callback(data: &str) -> InboundUpdate {
        InboundUpdate {
            update_id: 2,
            event: UpdateEvent::Callback {
                chat_id: ChatId(7),
                callback_id: "cb-1".to_string(),
                data: data.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn start_sends_personalized_welcome_with_keyboard() {
        let (state, messenger) = state_with(vec![]);
        handle_update(&state, &message("/start")).await.unwrap();

        let sent = messenger.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].with_keyboard);
        assert!(sent[0].html.contains("Asha"));
    }

    #[tokio::test]
    async fn papers_flow_brackets_the_batch() {
        let (state, messenger) = state_with(vec![paper("a", "2021"), paper("b", "2021")]);
        handle_update(&state, &message("/papers")).await.unwrap();

        let sent = messenger.sent.lock().unwrap();
        // fetching + found + one group page + done
        assert_eq!(sent.len(), 4);
        assert!(sent[0].html.contains("Fetching"));
        assert!(sent[1].html.contains("Found <b>2 papers"));
        assert!(sent[2].html.contains("JEE Main 2021"));
        assert!(sent[3].html.contains("All papers sent"));
    }

    #[tokio::test]
    async fn empty_results_get_a_plain_notice() {
        let (state, messenger) = state_with(vec![]);
        handle_update(&state, &message("/papers")).await.unwrap();

        let sent = messenger.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert!(sent[1].html.contains("No papers found"));
    }

    #[tokio::test]
    async fn year_callback_is_acked_and_filtered() {
        let (state, messenger) = state_with(vec![paper("a", "2019"), paper("b", "2020")]);
        handle_update(&state, &callback("year_2019")).await.unwrap();

        assert_eq!(*messenger.acked.lock().unwrap(), vec!["cb-1".to_string()]);
        let sent = messenger.sent.lock().unwrap();
        assert!(sent[0].html.contains("for 2019"));
        assert!(sent.iter().any(|m| m.html.contains("JEE Main 2019")));
        assert!(!sent.iter().any(|m| m.html.contains("JEE Main 2020")));
    }

    #[tokio::test]
    async fn years_menu_offers_keyboard() {
        let (state, messenger) = state_with(vec![]);
        handle_update(&state, &callback("select_year")).await.unwrap();

        let sent = messenger.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].with_keyboard);
    }

    #[tokio::test]
    async fn unknown_text_gets_a_hint() {
        let (state, messenger) = state_with(vec![]);
        handle_update(&state, &message("what now")).await.unwrap();

        let sent = messenger.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].html.contains("Unknown command"));
        assert_eq!(sent[0].chat_id, 7);
    }
}

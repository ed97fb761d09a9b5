//! Lexical command dispatch.

use crate::domain::UpdateEvent;

/// Action derived from one inbound update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    ListAll,
    ListByYear(String),
    YearMenu,
    Help,
    Unknown,
}

/// Map an update to its action. Pure, case-insensitive, trimmed.
pub fn dispatch(event: &UpdateEvent) -> Command {
    match event {
        UpdateEvent::Message { text, .. } => from_text(text),
        UpdateEvent::Callback { data, .. } => from_callback(data),
    }
}

fn from_text(text: &str) -> Command {
    let text = text.trim().to_lowercase();
    match text.as_str() {
        "/start" => Command::Start,
        "/papers" | "/getpapers" => Command::ListAll,
        "/years" => Command::YearMenu,
        "/help" => Command::Help,
        _ => {
            if let Some(year) = text.strip_prefix("/year_") {
                return year_or_unknown(year);
            }
            Command::Unknown
        }
    }
}

fn from_callback(data: &str) -> Command {
    let data = data.trim().to_lowercase();
    match data.as_str() {
        "papers" | "get_all_papers" => Command::ListAll,
        "years" | "select_year" => Command::YearMenu,
        "help" => Command::Help,
        _ => {
            if let Some(year) = data
                .strip_prefix("year_")
                .or_else(|| data.strip_prefix("y_"))
            {
                return year_or_unknown(year);
            }
            Command::Unknown
        }
    }
}

fn year_or_unknown(year: &str) -> Command {
    if year.is_empty() {
        return Command::Unknown;
    }
    Command::ListByYear(year.to_string())
}

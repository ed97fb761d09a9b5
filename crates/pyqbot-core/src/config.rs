use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{errors::Error, Result};

const DEFAULT_PAPERS_URL: &str =
    "https://www.mathongo.com/iit-jee/jee-main-previous-year-question-paper";

/// Typed configuration for one run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Telegram bot token. The only fatal knob: without it we exit before
    /// attempting any network call.
    pub bot_token: String,

    /// Page the papers are scraped from.
    pub papers_url: String,

    /// File holding the last fully-processed update id.
    pub cursor_file: PathBuf,

    /// Long-poll wait for getUpdates.
    pub poll_timeout: Duration,
    /// Timeout for the scrape fetch and outbound sends.
    pub http_timeout: Duration,
    /// Fixed pause between consecutive outbound messages (rate limits).
    pub send_delay: Duration,

    /// Records per message within one year group.
    pub page_size: usize,
    /// Pages sent per year group before the "…and N more" trailer.
    pub max_pages_per_group: usize,
    /// Display-name truncation length.
    pub name_max_len: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let bot_token = env_str("BOT_TOKEN").and_then(non_empty).ok_or_else(|| {
            Error::Config("BOT_TOKEN environment variable is required".to_string())
        })?;

        let papers_url =
            env_str("PAPERS_URL").unwrap_or_else(|| DEFAULT_PAPERS_URL.to_string());
        let cursor_file = PathBuf::from(
            env_str("CURSOR_FILE").unwrap_or_else(|| "last_update_id.txt".to_string()),
        );

        let poll_timeout = Duration::from_secs(env_u64("POLL_TIMEOUT_SECS").unwrap_or(5));
        let http_timeout = Duration::from_secs(env_u64("HTTP_TIMEOUT_SECS").unwrap_or(30));
        let send_delay = Duration::from_millis(env_u64("SEND_DELAY_MS").unwrap_or(500));

        let page_size = env_usize("PAGE_SIZE").unwrap_or(10).max(1);
        let max_pages_per_group = env_usize("MAX_PAGES_PER_GROUP").unwrap_or(1).max(1);
        let name_max_len = env_usize("NAME_MAX_LEN").unwrap_or(60).max(1);

        Ok(Self {
            bot_token,
            papers_url,
            cursor_file,
            poll_timeout,
            http_timeout,
            send_delay,
            page_size,
            max_pages_per_group,
            name_max_len,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_usize(key: &str) -> Option<usize> {
    env_str(key).and_then(|s| s.trim().parse::<usize>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

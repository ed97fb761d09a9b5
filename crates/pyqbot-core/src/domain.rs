/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Question paper vs. its solutions/answer key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaperKind {
    Question,
    Solution,
}

/// One deduplicated, classified, downloadable document.
///
/// Identity is the raw `source_url` as it appeared on the page; `direct_url`
/// is the same link rewritten so fetching it returns file bytes instead of a
/// sharing-service viewer page. Records live only for one scrape+send cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaperRecord {
    pub name: String,
    pub source_url: String,
    pub direct_url: String,
    /// Four-digit year, or the `"Other"` bucket when no year was found.
    pub year: String,
    pub kind: PaperKind,
}

/// Strictly-typed inbound update, built at the adapter boundary.
///
/// Anything that matches neither shape is logged and dropped there; the core
/// never does speculative field access on raw platform payloads.
#[derive(Clone, Debug)]
pub struct InboundUpdate {
    /// Platform-assigned, monotonically increasing.
    pub update_id: i64,
    pub event: UpdateEvent,
}

#[derive(Clone, Debug)]
pub enum UpdateEvent {
    Message {
        chat_id: ChatId,
        text: String,
        sender_name: String,
    },
    Callback {
        chat_id: ChatId,
        callback_id: String,
        data: String,
    },
}

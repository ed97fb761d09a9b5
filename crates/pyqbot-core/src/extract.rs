//! Paper extraction from the scraped page.
//!
//! Three independent scan strategies run over the same parsed document and
//! feed one deduplicating merge stage keyed on the raw (pre-normalization)
//! URL. The page structure is not under our control, so the strategies are
//! deliberately redundant: whichever one still matches after a layout change
//! keeps the bot alive.

use std::collections::HashSet;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::domain::{PaperKind, PaperRecord};
use crate::{links, year};

/// Link-text keywords that mark an anchor as paper-like.
const PAPER_KEYWORDS: &[&str] = &[
    "paper", "question", "solution", "download", "pdf", "pyq", "jee",
];

/// Display-text keywords that mark a record as a solution/answer key.
const SOLUTION_KEYWORDS: &[&str] = &["solution", "answer", "key"];

/// Attributes sites commonly stash download URLs in.
const DATA_ATTRS: &[&str] = &["data-url", "data-href", "data-pdf", "data-link"];

/// Substitute name for candidates with no usable link text.
const PLACEHOLDER_NAME: &str = "JEE Paper";

/// Display-name truncation limit.
const NAME_MAX_LEN: usize = 60;

/// An unvalidated paper-like link found by one scan strategy,
/// before dedup and classification.
struct Candidate {
    raw_url: String,
    display_text: String,
}

/// Extract a deduplicated, classified list of papers from a fetched page.
///
/// The first strategy to observe a URL wins; later duplicates from any
/// strategy are dropped. Candidates rejected by `filter_year` still count as
/// seen so a duplicate cannot re-enter through another strategy.
pub fn extract_papers(
    html: &str,
    base_url: &str,
    filter_year: Option<&str>,
) -> Vec<PaperRecord> {
    let doc = Html::parse_document(html);
    let base = Url::parse(base_url).ok();

    let mut seen: HashSet<String> = HashSet::new();
    let mut papers = Vec::new();

    let candidates = anchor_scan(&doc, base.as_ref())
        .into_iter()
        .chain(attribute_scan(&doc, base.as_ref()))
        .chain(script_scan(&doc, base.as_ref()));

    for cand in candidates {
        if !seen.insert(cand.raw_url.clone()) {
            continue;
        }

        // Either the text or the URL may carry the year.
        let year = year::extract_year(&format!("{}{}", cand.display_text, cand.raw_url));
        if let Some(wanted) = filter_year {
            if year != wanted {
                continue;
            }
        }

        papers.push(PaperRecord {
            name: clean_name(&cand.display_text),
            direct_url: links::normalize(&cand.raw_url),
            kind: classify_kind(&cand.display_text),
            source_url: cand.raw_url,
            year,
        });
    }

    tracing::debug!(count = papers.len(), "extracted paper records");
    papers
}

/// Strategy 1: every hyperlink with a non-empty target.
fn anchor_scan(doc: &Html, base: Option<&Url>) -> Vec<Candidate> {
    let sel = Selector::parse("a[href]").expect("valid selector");

    let mut out = Vec::new();
    for el in doc.select(&sel) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        let text = element_text(&el);

        let Some(raw_url) = resolve(base, href) else {
            continue;
        };
        if is_paper_link(&raw_url, &text) {
            out.push(Candidate {
                raw_url,
                display_text: text,
            });
        }
    }
    out
}

/// Strategy 2: elements carrying an explicit data-bound URL attribute.
fn attribute_scan(doc: &Html, base: Option<&Url>) -> Vec<Candidate> {
    let mut out = Vec::new();
    for attr in DATA_ATTRS {
        let sel = Selector::parse(&format!("[{attr}]")).expect("valid selector");
        for el in doc.select(&sel) {
            let Some(value) = el.value().attr(attr) else {
                continue;
            };
            let text = element_text(&el);

            let Some(raw_url) = resolve(base, value) else {
                continue;
            };
            if is_paper_link(&raw_url, &text) {
                out.push(Candidate {
                    raw_url,
                    display_text: text,
                });
            }
        }
    }
    out
}

/// Strategy 3: inline script blocks with embedded URLs or JSON fragments.
fn script_scan(doc: &Html, base: Option<&Url>) -> Vec<Candidate> {
    let sel = Selector::parse("script").expect("valid selector");
    let pdf_re = Regex::new(r#"https?://[^"'<>\s\\]+\.pdf"#).expect("valid regex");
    let json_re = Regex::new(r#""url"\s*:\s*"([^"]+\.pdf[^"]*)""#).expect("valid regex");

    let mut out = Vec::new();
    for el in doc.select(&sel) {
        let script: String = el.text().collect();
        // JSON-embedded URLs arrive with forward slashes escaped.
        let unescaped = script.replace(r"\/", "/");

        for m in pdf_re.find_iter(&unescaped) {
            out.push(Candidate {
                raw_url: m.as_str().to_string(),
                display_text: String::new(),
            });
        }

        for caps in json_re.captures_iter(&unescaped) {
            if let Some(raw_url) = resolve(base, &caps[1]) {
                out.push(Candidate {
                    raw_url,
                    display_text: String::new(),
                });
            }
        }
    }
    out
}

/// Resolve a link target against the page URL, rejecting in-page anchors and
/// script pseudo-URLs.
fn resolve(base: Option<&Url>, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript") {
        return None;
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    base.and_then(|b| b.join(href).ok()).map(String::from)
}

fn is_paper_link(url: &str, text: &str) -> bool {
    if has_document_extension(url) || url.contains("drive.google.com") {
        return true;
    }
    let lower = text.to_lowercase();
    PAPER_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

fn has_document_extension(url: &str) -> bool {
    let lower = url.to_lowercase();
    let path = lower.split(['?', '#']).next().unwrap_or(&lower);
    path.ends_with(".pdf")
}

fn classify_kind(display_text: &str) -> PaperKind {
    let lower = display_text.to_lowercase();
    if SOLUTION_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        PaperKind::Solution
    } else {
        PaperKind::Question
    }
}

fn element_text(el: &scraper::ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

/// Collapse internal whitespace, truncate, substitute the placeholder when
/// nothing is left.
fn clean_name(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return PLACEHOLDER_NAME.to_string();
    }
    collapsed.chars().take(NAME_MAX_LEN).collect()
}

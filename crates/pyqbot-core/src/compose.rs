//! Outbound message composition: grouping, pagination, notices.

use std::collections::BTreeMap;

use crate::domain::{PaperKind, PaperRecord};

#[derive(Clone, Copy, Debug)]
pub struct ComposeOptions {
    /// Records per message within one year group.
    pub page_size: usize,
    /// Pages sent per group before the overflow trailer.
    pub max_pages_per_group: usize,
    /// Display-name truncation for link labels.
    pub name_max_len: usize,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            page_size: 10,
            max_pages_per_group: 1,
            name_max_len: 60,
        }
    }
}

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Compose the full outbound batch for a non-empty result set: a leading
/// found-N notice, the year groups, and a trailing done notice.
///
/// Groups are ordered by lexically descending year string. With the `"Other"`
/// bucket present this places `"Other"` before every numeric year; that
/// matches the observed production ordering and is kept as-is.
pub fn compose_batch(
    papers: &[PaperRecord],
    filter_year: Option<&str>,
    opts: &ComposeOptions,
) -> Vec<String> {
    let mut messages = vec![found_text(papers.len(), filter_year)];

    let mut groups: BTreeMap<&str, Vec<&PaperRecord>> = BTreeMap::new();
    for paper in papers {
        groups.entry(paper.year.as_str()).or_default().push(paper);
    }

    for (year, records) in groups.iter().rev() {
        let shown = records.len().min(opts.page_size * opts.max_pages_per_group);
        for page in records[..shown].chunks(opts.page_size) {
            messages.push(group_page(year, page, opts.name_max_len));
        }
        if records.len() > shown {
            messages.push(format!("<i>...and {} more</i>", records.len() - shown));
        }
    }

    messages.push(done_text());
    messages
}

fn group_page(year: &str, records: &[&PaperRecord], name_max_len: usize) -> String {
    let mut msg = format!("📅 <b>JEE Main {}</b>\n\n", escape_html(year));
    for paper in records {
        let icon = match paper.kind {
            PaperKind::Question => "📄",
            PaperKind::Solution => "📝",
        };
        let label: String = paper.name.chars().take(name_max_len).collect();
        msg.push_str(&format!(
            "{icon} <a href=\"{}\">{}</a>\n\n",
            escape_html(&paper.direct_url),
            escape_html(&label),
        ));
    }
    msg
}

/// Pre-scrape notice, sent by the handler before the fetch starts.
pub fn fetching_text(filter_year: Option<&str>) -> String {
    format!(
        "🔄 <b>Fetching papers{}...</b>\n\nPlease wait!",
        for_year(filter_year)
    )
}

/// Plain "nothing found" message; raw errors are never surfaced to the user.
pub fn no_results_text(filter_year: Option<&str>) -> String {
    format!(
        "❌ <b>No papers found{}</b>\n\n\
         Possible reasons:\n\
         • Website structure changed\n\
         • Network issues\n\n\
         Try /papers to get all papers.",
        for_year(filter_year)
    )
}

fn found_text(count: usize, filter_year: Option<&str>) -> String {
    format!(
        "✅ Found <b>{count} papers{}</b>!\n\nSending links...",
        for_year(filter_year)
    )
}

fn done_text() -> String {
    "✅ <b>All papers sent!</b>\n\n\
     💡 Click the links to download PDFs directly.\n\n\
     Good luck with your preparation! 🎯"
        .to_string()
}

fn for_year(filter_year: Option<&str>) -> String {
    filter_year
        .map(|y| format!(" for {y}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaperKind;

    fn paper(name: &str, year: &str) -> PaperRecord {
        PaperRecord {
            name: name.to_string(),
            source_url: format!("https://x.com/{name}.pdf"),
            direct_url: format!("https://x.com/{name}.pdf"),
            year: year.to_string(),
            kind: PaperKind::Question,
        }
    }

    #[test]
    fn twelve_records_make_one_page_plus_trailer() {
        let papers: Vec<_> = (0..12).map(|i| paper(&format!("p{i}"), "2021")).collect();
        let msgs = compose_batch(&papers, None, &ComposeOptions::default());

        // found notice + one page + trailer + done notice
        assert_eq!(msgs.len(), 4);
        assert!(msgs[0].contains("Found <b>12 papers"));
        assert_eq!(msgs[1].matches("<a href=").count(), 10);
        assert!(msgs[2].contains("...and 2 more"));
    }

    #[test]
    fn exact_page_has_no_trailer() {
        let papers: Vec<_> = (0..10).map(|i| paper(&format!("p{i}"), "2021")).collect();
        let msgs = compose_batch(&papers, None, &ComposeOptions::default());
        assert_eq!(msgs.len(), 3);
        assert!(!msgs.iter().any(|m| m.contains("more</i>")));
    }

    #[test]
    fn groups_sort_lexically_descending_with_other_first() {
        let papers = vec![paper("a", "2021"), paper("b", "Other"), paper("c", "2023")];
        let msgs = compose_batch(&papers, None, &ComposeOptions::default());

        assert!(msgs[1].contains("JEE Main Other"));
        assert!(msgs[2].contains("JEE Main 2023"));
        assert!(msgs[3].contains("JEE Main 2021"));
    }

    #[test]
    fn names_and_urls_are_html_escaped() {
        let mut p = paper("a", "2020");
        p.name = "Shift <1> & co".to_string();
        p.direct_url = "https://x.com/a?b=1&c=2".to_string();
        let msgs = compose_batch(&[p], None, &ComposeOptions::default());

        assert!(msgs[1].contains("Shift &lt;1&gt; &amp; co"));
        assert!(msgs[1].contains("b=1&amp;c=2"));
    }

    #[test]
    fn found_notice_reflects_year_filter() {
        let msgs = compose_batch(&[paper("a", "2019")], Some("2019"), &ComposeOptions::default());
        assert!(msgs[0].contains("papers for 2019"));
    }

    #[test]
    fn solution_records_get_distinct_icon() {
        let mut p = paper("sol", "2020");
        p.kind = PaperKind::Solution;
        let msgs = compose_batch(&[p], None, &ComposeOptions::default());
        assert!(msgs[1].contains("📝"));
    }

    #[test]
    fn escapes_html_reference_cases() {
        assert_eq!(
            escape_html(r#"<a href="x&y">"#),
            "&lt;a href=&quot;x&amp;y&quot;&gt;"
        );
    }
}

//! Year classification for free text and URLs.

use regex::Regex;

/// Bucket for records no year could be read from.
pub const OTHER: &str = "Other";

/// First four-digit year in the 2010–2029 range, else [`OTHER`].
///
/// Callers pass display text and URL concatenated; either may carry the
/// year. On multi-year text ("2015 vs 2016 comparison") this returns the
/// first occurrence in scan order. That is a deliberate heuristic carried
/// over from the original page layout, not a bug to fix.
pub fn extract_year(text: &str) -> String {
    let re = Regex::new(r"20[12][0-9]").expect("valid regex");
    re.find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| OTHER.to_string())
}

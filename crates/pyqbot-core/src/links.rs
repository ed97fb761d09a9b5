//! Sharing-link → direct-download rewriting.

use regex::Regex;

/// Rewrite a sharing-style URL into its direct-download form.
///
/// Total and idempotent: malformed input comes back unchanged, and the
/// canonical forms produced here map to themselves.
pub fn normalize(url: &str) -> String {
    if url.contains("drive.google.com") {
        if let Some(id) = drive_file_id(url) {
            return format!("https://drive.google.com/uc?export=download&id={id}");
        }
        return url.to_string();
    }

    if url.contains("dropbox.com") {
        // Only the trailing `dl=0` toggle; other query values stay untouched.
        if let Some(prefix) = url.strip_suffix("dl=0") {
            return format!("{prefix}dl=1");
        }
        return url.to_string();
    }

    url.to_string()
}

/// Extract a Drive file id, trying the known URL shapes in order.
fn drive_file_id(url: &str) -> Option<String> {
    let patterns = [
        r"/file/d/([a-zA-Z0-9_-]+)",
        r"[?&]id=([a-zA-Z0-9_-]+)",
        r"/open\?id=([a-zA-Z0-9_-]+)",
    ];

    for pat in patterns {
        let re = Regex::new(pat).expect("valid regex");
        if let Some(caps) = re.captures(url) {
            return Some(caps[1].to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_drive_file_path() {
        assert_eq!(
            normalize("https://drive.google.com/file/d/ABC123/view?usp=sharing"),
            "https://drive.google.com/uc?export=download&id=ABC123"
        );
    }

    #[test]
    fn rewrites_drive_open_link() {
        assert_eq!(
            normalize("https://drive.google.com/open?id=xYz_9-8"),
            "https://drive.google.com/uc?export=download&id=xYz_9-8"
        );
    }

    #[test]
    fn drive_without_id_is_unchanged() {
        let url = "https://drive.google.com/drive/folders";
        assert_eq!(normalize(url), url);
    }

    #[test]
    fn flips_dropbox_download_toggle() {
        assert_eq!(
            normalize("https://www.dropbox.com/s/abc/paper.pdf?dl=0"),
            "https://www.dropbox.com/s/abc/paper.pdf?dl=1"
        );
    }

    #[test]
    fn dropbox_other_queries_untouched() {
        let url = "https://www.dropbox.com/s/abc/paper.pdf?raw=1";
        assert_eq!(normalize(url), url);
    }

    #[test]
    fn foreign_and_malformed_urls_pass_through() {
        for url in ["https://example.com/a.pdf", "not a url at all", ""] {
            assert_eq!(normalize(url), url);
        }
    }

    #[test]
    fn idempotent_on_every_branch() {
        let inputs = [
            "https://drive.google.com/file/d/ABC123/view",
            "https://drive.google.com/open?id=Q1",
            "https://www.dropbox.com/s/abc/x.pdf?dl=0",
            "https://example.com/x.pdf",
            "garbage",
        ];
        for url in inputs {
            let once = normalize(url);
            assert_eq!(normalize(&once), once, "not idempotent for {url}");
        }
    }
}

// SPDX-License-Identifier: MPL-2.0

//! Project page extraction
//!
//! Best-effort single-pass scan of a fetched page body for a display title
//! and a representative image. This is deliberately regex-based, not a
//! structural HTML parse; callers only see `Option`s, so a future real
//! parser can slot in behind the same interface.

use regex::Regex;
use std::sync::OnceLock;

use crate::config::Config;

/// What one project page yielded, ephemeral.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSummary {
    pub title: Option<String>,
    /// Absolute image URL, resolved against the wiki base.
    pub image_url: Option<String>,
}

/// Extract a summary from a page body.
pub fn extract(html: &str, config: &Config) -> PageSummary {
    PageSummary {
        title: extract_title(html),
        image_url: extract_image(html).map(|url| config.absolutize(&url)),
    }
}

/// First heading carrying MediaWiki's `firstHeading` id, else the first
/// `<h1>` of any kind, markup stripped.
fn extract_title(html: &str) -> Option<String> {
    static FIRST_HEADING: OnceLock<Regex> = OnceLock::new();
    static ANY_HEADING: OnceLock<Regex> = OnceLock::new();
    let first = FIRST_HEADING.get_or_init(|| {
        Regex::new(r#"(?is)<h1[^>]*id="firstHeading"[^>]*>(.*?)</h1>"#).expect("valid regex")
    });
    let any = ANY_HEADING
        .get_or_init(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").expect("valid regex"));

    let capture = first
        .captures(html)
        .or_else(|| any.captures(html))?;
    let title = strip_tags(&capture[1]);
    (!title.is_empty()).then_some(title)
}

/// First image source in document order; later matches are ignored.
fn extract_image(html: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re =
        RE.get_or_init(|| Regex::new(r#"(?i)<img[^>]*src="([^"]+)""#).expect("valid regex"));
    Some(re.captures(html)?[1].to_string())
}

/// Drop all markup tags and surrounding whitespace.
pub(crate) fn strip_tags(fragment: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"));
    re.replace_all(fragment, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_heading_preferred() {
        let html = r#"
            <h1>Site chrome</h1>
            <h1 id="firstHeading" class="firstHeading"><span>LED Cube</span></h1>
        "#;
        assert_eq!(extract_title(html), Some(String::from("LED Cube")));
    }

    #[test]
    fn generic_heading_fallback() {
        assert_eq!(
            extract_title("<h1 class=\"x\"> Plasma Globe </h1>"),
            Some(String::from("Plasma Globe"))
        );
        assert_eq!(extract_title("<h2>not a title</h2>"), None);
    }

    #[test]
    fn image_resolution() {
        let config = Config::default();

        let page = extract(r#"<img src="/images/cube.jpg">"#, &config);
        assert_eq!(
            page.image_url.as_deref(),
            Some("https://nurdspace.nl/images/cube.jpg")
        );

        let page = extract(r#"<img alt="x" src="//cdn.example/cube.jpg">"#, &config);
        assert_eq!(page.image_url.as_deref(), Some("https://cdn.example/cube.jpg"));

        let page = extract(r#"<img src="https://cdn.example/cube.jpg">"#, &config);
        assert_eq!(page.image_url.as_deref(), Some("https://cdn.example/cube.jpg"));
    }

    #[test]
    fn first_image_wins() {
        let config = Config::default();
        let html = r#"<img src="/first.png"><img src="/second.png">"#;
        assert_eq!(
            extract(html, &config).image_url.as_deref(),
            Some("https://nurdspace.nl/first.png")
        );
    }

    #[test]
    fn absent_fields() {
        let page = extract("<p>plain text, no structure</p>", &Config::default());
        assert_eq!(page, PageSummary::default());
    }

    #[test]
    fn strip_tags_removes_markup() {
        assert_eq!(strip_tags("  <b>LED</b> <i>Cube</i>  "), "LED Cube");
        assert_eq!(strip_tags("plain"), "plain");
    }
}

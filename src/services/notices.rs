// src/services/notices.rs

//! Notice page fetcher and announcement extractor.
//!
//! Downloads the notice page and turns its leading entries into
//! [`Announcement`] values using the configured CSS selector.

use reqwest::Client;
use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Announcement, Config, ExtractConfig, Extraction};
use crate::utils::{http, join_link};

/// Service for reading the latest announcements off the notice page.
pub struct NoticeFetcher {
    config: Config,
    client: Client,
}

impl NoticeFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: Config) -> Result<Self> {
        let client = http::create_client(&config.fetch)?;
        Ok(Self { config, client })
    }

    /// Create a fetcher around an existing client.
    pub fn with_client(config: Config, client: Client) -> Self {
        Self { config, client }
    }

    /// Download the notice page as raw text.
    pub async fn fetch_page(&self) -> Result<String> {
        log::debug!("Fetching notice page {}", self.config.fetch.url);
        http::fetch_text(&self.client, &self.config.fetch.url).await
    }

    /// Download the notice page and extract its announcements.
    pub async fn fetch_latest(&self) -> Result<Extraction> {
        let html = self.fetch_page().await?;
        let extraction = extract_announcements(&html, &self.config.extract)?;
        log::info!(
            "Extracted {} announcement(s) from {}",
            extraction.len(),
            self.config.fetch.url
        );
        Ok(extraction)
    }
}

/// Extract the first `max_items` announcements from a raw document.
pub fn extract_announcements(html: &str, config: &ExtractConfig) -> Result<Extraction> {
    let document = Html::parse_document(html);
    let item_sel = parse_selector(&config.item_selector)?;

    let extraction = document
        .select(&item_sel)
        .take(config.max_items)
        .map(|item| {
            let heading: String = item.text().collect();
            let href = item.value().attr("href").unwrap_or("");
            Announcement::new(heading.trim(), join_link(&config.link_base, href))
        })
        .collect();

    Ok(extraction)
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(count: usize) -> String {
        let items: String = (1..=count)
            .map(|i| {
                format!(
                    r#"<div class="news-item"><a href="notice/{i}.pdf">
                        Notice {i}
                    </a></div>"#
                )
            })
            .collect();
        format!("<html><body><div class=\"news\">{items}</div></body></html>")
    }

    #[test]
    fn test_parse_selector_valid() {
        assert!(parse_selector(".news-item a").is_ok());
        assert!(parse_selector("div:has(a)").is_ok());
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(parse_selector("[[invalid").is_err());
    }

    #[test]
    fn test_takes_first_ten_in_document_order() {
        let extraction = extract_announcements(&board(12), &ExtractConfig::default()).unwrap();

        assert_eq!(extraction.len(), 10);
        let first = &extraction.announcements()[0];
        assert_eq!(first.heading, "Notice 1");
        assert_eq!(first.link, "https://www.nu.ac.bd/notice/1.pdf");
        assert_eq!(extraction.announcements()[9].heading, "Notice 10");
    }

    #[test]
    fn test_heading_joins_nested_text() {
        let html = r#"<div class="news-item"><a href="x.php?id=7"> <b>Exam</b> routine <span>2026</span> </a></div>"#;
        let extraction = extract_announcements(html, &ExtractConfig::default()).unwrap();

        assert_eq!(extraction.announcements()[0].heading, "Exam routine 2026");
        assert_eq!(
            extraction.announcements()[0].link,
            "https://www.nu.ac.bd/x.php?id=7"
        );
    }

    #[test]
    fn test_missing_href_concatenates_nothing() {
        let html = r#"<div class="news-item"><a>Untitled</a></div>"#;
        let extraction = extract_announcements(html, &ExtractConfig::default()).unwrap();
        assert_eq!(extraction.announcements()[0].link, "https://www.nu.ac.bd/");
    }

    #[test]
    fn test_links_outside_news_items_are_ignored() {
        let html = r#"<a href="home.php">Home</a><div class="news-item"><a href="n.pdf">N</a></div>"#;
        let extraction = extract_announcements(html, &ExtractConfig::default()).unwrap();
        assert_eq!(extraction.len(), 1);
        assert_eq!(extraction.headings().collect::<Vec<_>>(), vec!["N"]);
    }
}

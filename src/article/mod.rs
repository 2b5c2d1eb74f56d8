//! Article download and paragraph text extraction.


use std::sync::{Arc, LazyLock};

use scraper::{Html, Selector};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::providers::{PageFetcher, ProviderError};

static PARAGRAPH_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("static selector is valid"));
static OG_TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:title"]"#).expect("static selector is valid")
});
static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("static selector is valid"));

/// A fetched article reduced to its title and paragraph text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub text: String,
}

impl Article {
    pub fn from_html(url: impl Into<String>, html: &str) -> Self {
        let document = Html::parse_document(html);
        Self {
            url: url.into(),
            title: title_of(&document),
            text: paragraph_text_of(&document),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Text of every `<p>` element, joined by single spaces.
pub fn extract_paragraph_text(html: &str) -> String {
    paragraph_text_of(&Html::parse_document(html))
}

/// `og:title` when present, else `<title>`, else empty.
pub fn extract_title(html: &str) -> String {
    title_of(&Html::parse_document(html))
}

/// First `limit` Unicode scalar values of `text`.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

fn paragraph_text_of(document: &Html) -> String {
    document
        .select(&PARAGRAPH_SELECTOR)
        .map(|p| p.text().collect::<String>())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_of(document: &Html) -> String {
    let og_title = document
        .select(&OG_TITLE_SELECTOR)
        .filter_map(|meta| meta.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty());

    if let Some(title) = og_title {
        return title.to_string();
    }

    document
        .select(&TITLE_SELECTOR)
        .map(|t| t.text().collect::<String>().trim().to_string())
        .find(|t| !t.is_empty())
        .unwrap_or_default()
}

/// Fetches pages through a [`PageFetcher`] and parses them into [`Article`]s.
#[derive(Clone)]
pub struct ArticleReader {
    fetcher: Arc<dyn PageFetcher>,
}

impl std::fmt::Debug for ArticleReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleReader").finish_non_exhaustive()
    }
}

impl ArticleReader {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    #[instrument(skip(self))]
    pub async fn read(&self, url: &str) -> Result<Article, ProviderError> {
        let html = self.fetcher.fetch(url).await?;
        let article = Article::from_html(url, &html);

        debug!(
            title = %article.title,
            text_len = article.text.len(),
            "Parsed article"
        );

        Ok(article)
    }
}

//! Shared harness: a real server on an ephemeral port backed by mock providers.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use credence::gateway::{HandlerState, create_router_with_state};
use credence::providers::{MockLanguageModel, MockPageFetcher, MockSearchProvider, MockSocialStats};
use credence::ratelimit::TokenBucket;
use credence::sources::ReliabilityDataset;
use tokio::net::TcpListener;

pub const ARTICLE_URL: &str = "https://local.news/article";
pub const EVIDENCE_URLS: [&str; 2] = ["https://reuters.com/a", "https://apnews.com/b"];

pub const ARTICLE_HTML: &str = r#"<html>
<head><meta property="og:title" content="Health Agency Publishes Study"></head>
<body>
<p>The national health agency published a large study on Tuesday.</p>
<p>The study followed two million children over ten years.</p>
</body></html>"#;

pub const DATASET_CSV: &str = "\
Domain,Name,MBFC Fact,MBFC Bias,Media Bias/Fact Check
conspiracy.example,Conspiracy Daily,Very Low,Conspiracy-Pseudoscience,https://mediabiasfactcheck.com/conspiracy-daily/
";

pub struct TestServer {
    pub addr: SocketAddr,
    pub model: Arc<MockLanguageModel>,
    pub search: Arc<MockSearchProvider>,
    pub fetcher: Arc<MockPageFetcher>,
    pub social: Arc<MockSocialStats>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Extraction prompts get two claims for the article and one fragment per
/// evidence page; verdict prompts get a score derived from the claim.
pub fn scripted_model() -> MockLanguageModel {
    MockLanguageModel::new(|prompt| {
        if let Some(rest) = prompt.strip_prefix("Claim: ") {
            let claim = rest.lines().next().unwrap_or_default();
            let score = if claim.contains("autism") { 97 } else { 5 };
            return Ok(format!("Misinformation Score: {score}/100 - checked against evidence"));
        }
        if prompt.contains("Evidence page") {
            return Ok("Researchers found no such link.".to_string());
        }
        Ok("The agency published a study on Tuesday.\nThe study followed two million children.".to_string())
    })
}

pub async fn spawn_test_server(model: MockLanguageModel) -> TestServer {
    let fetcher = Arc::new(MockPageFetcher::new().with_page(ARTICLE_URL, ARTICLE_HTML));
    for url in EVIDENCE_URLS {
        fetcher.insert(url, format!("<p>Evidence page {url}</p>"));
    }
    let search = Arc::new(MockSearchProvider::with_results(EVIDENCE_URLS));
    let model = Arc::new(model);
    let social = Arc::new(MockSocialStats::with_mentions(12));
    let dataset = ReliabilityDataset::from_reader(DATASET_CSV.as_bytes(), "fixture")
        .expect("fixture dataset parses");

    let state = HandlerState::new(
        dataset,
        fetcher.clone(),
        search.clone(),
        model.clone(),
        social.clone(),
        TokenBucket::unlimited(),
    );
    let app = create_router_with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server runs");
    });

    TestServer {
        addr,
        model,
        search,
        fetcher,
        social,
    }
}

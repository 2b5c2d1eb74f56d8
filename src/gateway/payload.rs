//! Request and response bodies of the HTTP surface.

use serde::{Deserialize, Serialize, Serializer};

use crate::claims::Claim;
use crate::constants::EXTRACTION_ERROR_TITLE;
use crate::scoring::RawMetrics;
use crate::sources::DomainRecord;
use crate::verifier::VerificationReport;

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRequest {
    pub url: String,
    #[serde(default)]
    pub reference_summary: Option<String>,
}

/// Raw component values plus the aggregate. Absent metrics are reported as `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub url: String,
    pub title: String,
    pub domain: String,
    pub source_reliability_score: f64,
    pub sentiment_score: f64,
    pub readability_score: f64,
    pub rouge_score: f64,
    pub cosine_similarity: f64,
    pub tfidf_score: f64,
    pub bias_score: f64,
    pub overall_score: f64,
}

impl ScoreResponse {
    pub fn from_metrics(
        url: String,
        title: String,
        domain: String,
        raw: &RawMetrics,
        overall_score: f64,
    ) -> Self {
        Self {
            url,
            title,
            domain,
            source_reliability_score: raw.source_reliability,
            sentiment_score: raw.sentiment,
            readability_score: raw.readability,
            rouge_score: raw.rouge.unwrap_or(0.0),
            cosine_similarity: raw.cosine_similarity.unwrap_or(0.0),
            tfidf_score: raw.tfidf,
            bias_score: raw.bias,
            overall_score,
        }
    }

    /// Response for an article that could not be fetched or had no text.
    pub fn extraction_error(url: String) -> Self {
        Self::from_metrics(
            url,
            EXTRACTION_ERROR_TITLE.to_string(),
            String::new(),
            &RawMetrics::default(),
            0.0,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UrlQuery {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyTextRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_url: Option<String>,
    pub extracted_claims: Vec<Claim>,
    pub verification_results: VerificationReport,
}

/// Body of the verify endpoints: either results or the "no claims" message.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum VerifyOutcome {
    Verified(VerifyResponse),
    NoClaims { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckNewsResponse {
    pub is_reliable: bool,
    pub message: String,
    pub domain: String,
    /// Dataset row for listed domains; `{}` otherwise.
    #[serde(serialize_with = "record_or_empty_object")]
    pub media_details: Option<DomainRecord>,
    pub social_media_stats: SocialMediaStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SocialMediaStats {
    pub reddit_mentions: u64,
}

fn record_or_empty_object<S: Serializer>(
    record: &Option<DomainRecord>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match record {
        Some(record) => record.serialize(serializer),
        None => serde_json::Map::new().serialize(serializer),
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub dataset: &'static str,
    pub dataset_entries: usize,
    pub search: &'static str,
    pub model: String,
    pub cached_verdicts: usize,
}

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::constants::{NO_CLAIMS_MESSAGE, RELIABLE_SOURCE_MESSAGE, UNRELIABLE_SOURCE_MESSAGE};
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{
    CheckNewsResponse, ScoreRequest, ScoreResponse, SocialMediaStats, UrlQuery, VerifyOutcome,
    VerifyResponse, VerifyTextRequest,
};
use crate::gateway::state::HandlerState;
use crate::metrics::compute_signals;
use crate::scoring::overall_score;
use crate::sources::extract_domain;

/// Accepts absolute `http`/`https` URLs with a host; everything else is rejected
/// before any work is done.
pub fn validate_article_url(raw: &str) -> Result<Url, GatewayError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid URL provided: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(GatewayError::InvalidRequest(format!(
            "Invalid URL provided: unsupported scheme '{}'",
            url.scheme()
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(GatewayError::InvalidRequest(
            "Invalid URL provided: missing host".to_string(),
        ));
    }

    Ok(url)
}

#[instrument(skip(state, payload), fields(url = tracing::field::Empty))]
pub async fn score_handler(
    State(state): State<HandlerState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, GatewayError> {
    let Json(request) = payload?;
    tracing::Span::current().record("url", tracing::field::display(&request.url));
    let url = validate_article_url(&request.url)?;

    let article = match state.reader.read(url.as_str()).await {
        Ok(article) if !article.is_empty() => article,
        Ok(_) => {
            warn!("Article has no paragraph text");
            return Ok(Json(ScoreResponse::extraction_error(request.url)));
        }
        Err(e) => {
            warn!(error = %e, kind = e.kind(), "Article extraction failed");
            return Ok(Json(ScoreResponse::extraction_error(request.url)));
        }
    };

    let domain = extract_domain(url.as_str()).unwrap_or_default();
    let source_reliability = state.dataset.source_reliability(&domain);
    let raw = compute_signals(
        &article.text,
        request.reference_summary.as_deref(),
        source_reliability,
    );
    let overall = overall_score(&raw);

    info!(domain = %domain, overall, "Article scored");
    Ok(Json(ScoreResponse::from_metrics(
        request.url,
        article.title,
        domain,
        &raw,
        overall,
    )))
}

#[instrument(skip(state, query), fields(url = tracing::field::Empty))]
pub async fn verify_url_handler(
    State(state): State<HandlerState>,
    query: Result<Query<UrlQuery>, QueryRejection>,
) -> Result<Json<VerifyOutcome>, GatewayError> {
    let Query(query) = query?;
    tracing::Span::current().record("url", tracing::field::display(&query.url));
    let url = validate_article_url(&query.url)?;

    let text = match state.reader.read(url.as_str()).await {
        Ok(article) => article.text,
        Err(e) => {
            warn!(error = %e, kind = e.kind(), "Article extraction failed");
            String::new()
        }
    };

    Ok(Json(run_verification(&state, &text, Some(query.url)).await))
}

#[instrument(skip(state, payload), fields(text_len = tracing::field::Empty))]
pub async fn verify_text_handler(
    State(state): State<HandlerState>,
    payload: Result<Json<VerifyTextRequest>, JsonRejection>,
) -> Result<Json<VerifyOutcome>, GatewayError> {
    let Json(request) = payload?;
    tracing::Span::current().record("text_len", request.text.len());
    Ok(Json(run_verification(&state, &request.text, None).await))
}

async fn run_verification(
    state: &HandlerState,
    text: &str,
    article_url: Option<String>,
) -> VerifyOutcome {
    let claims = state.extractor.extract(text).await;
    if claims.is_empty() {
        debug!("No claims extracted");
        return VerifyOutcome::NoClaims {
            error: NO_CLAIMS_MESSAGE.to_string(),
        };
    }

    let report = state.verifier.verify(&claims).await;
    VerifyOutcome::Verified(VerifyResponse {
        article_url,
        extracted_claims: claims,
        verification_results: report,
    })
}

#[instrument(skip(state, query), fields(url = tracing::field::Empty))]
pub async fn check_news_handler(
    State(state): State<HandlerState>,
    query: Result<Query<UrlQuery>, QueryRejection>,
) -> Result<Json<CheckNewsResponse>, GatewayError> {
    let Query(query) = query?;
    tracing::Span::current().record("url", tracing::field::display(&query.url));
    let url = validate_article_url(&query.url)?;
    let domain = extract_domain(url.as_str()).unwrap_or_default();
    let social_media_stats = social_media_stats(&state, &query.url).await;

    let response = match state.dataset.lookup(&domain) {
        Some(record) => CheckNewsResponse {
            is_reliable: false,
            message: UNRELIABLE_SOURCE_MESSAGE.to_string(),
            domain,
            media_details: Some(record.clone()),
            social_media_stats,
        },
        None => CheckNewsResponse {
            is_reliable: true,
            message: RELIABLE_SOURCE_MESSAGE.to_string(),
            domain,
            media_details: None,
            social_media_stats,
        },
    };

    info!(
        domain = %response.domain,
        is_reliable = response.is_reliable,
        reddit_mentions = response.social_media_stats.reddit_mentions,
        "Source checked"
    );
    Ok(Json(response))
}

/// Unavailable counts are reported as zero.
async fn social_media_stats(state: &HandlerState, url: &str) -> SocialMediaStats {
    let reddit_mentions = match state.social.mentions(url).await {
        Ok(count) => count,
        Err(e) => {
            warn!(
                error = %e,
                kind = e.kind(),
                provider = state.social.name(),
                "Mention count unavailable"
            );
            0
        }
    };

    SocialMediaStats { reddit_mentions }
}

//! Handler for short link expansion.

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::dto::{ExpandParams, ExpandResponse};
use crate::error::{AppError, JSON_CONTENT_TYPE};
use crate::infrastructure::cache::CacheStatus;
use crate::state::AppState;
use crate::utils::extract_domain::extract_domain_from_headers;

/// Reports whether the response came from the cache.
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Expands a short link to its final destination.
///
/// # Endpoint
///
/// `GET /?shorturl=<urlencoded link>[&nocache=1]`
///
/// # Request Flow
///
/// 1. Validate that `shorturl` is present
/// 2. Derive the cache key from the service host and the link
/// 3. On cache hit, return the stored result unchanged
/// 4. On miss (or `nocache=1`), resolve the redirect chain, canonicalize
///    platform URLs and store the result
///
/// # Response
///
/// ```json
/// {
///   "original_url": "https://b23.tv/xYz12",
///   "expanded_url": "https://www.bilibili.com/video/BV1xx411c7mD"
/// }
/// ```
///
/// Sent with `Cache-Control: max-age=<client max-age>` and
/// `X-Cache: HIT | MISS | BYPASS`.
///
/// # Errors
///
/// Returns 400 Bad Request (plain text) if `shorturl` is missing.
/// Returns 500 Internal Server Error (`{"error": ...}`) if resolution fails.
pub async fn expand_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let request = ExpandParams::from_pairs(pairs).into_request()?;

    let service_host =
        extract_domain_from_headers(&headers).unwrap_or_else(|| state.public_host.clone());

    let (result, status) = state
        .expansion_service
        .expand(&request, &service_host)
        .await?;

    Ok(expansion_response(
        ExpandResponse::from(result),
        status,
        state.client_max_age_seconds,
    ))
}

fn expansion_response(body: ExpandResponse, status: CacheStatus, max_age: u64) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, JSON_CONTENT_TYPE.to_string()),
            (header::CACHE_CONTROL, format!("max-age={}", max_age)),
            (X_CACHE, status.as_str().to_string()),
        ],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expansion_response_headers() {
        let response = expansion_response(
            ExpandResponse {
                original_url: "https://t.co/abc".to_string(),
                expanded_url: "https://example.com/".to_string(),
            },
            CacheStatus::Hit,
            1800,
        );

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            JSON_CONTENT_TYPE
        );
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "max-age=1800"
        );
        assert_eq!(response.headers().get(X_CACHE).unwrap(), "HIT");
    }
}

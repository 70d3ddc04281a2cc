//! Canonical video URLs for the platform.
//!
//! Strips tracking parameters and share decorations, keeping only the video
//! identifier. Identifier extraction, first match wins:
//!
//! 1. `BV…` identifier in the path (`/video/BV1xx411c7mD`)
//! 2. legacy `av<digits>` identifier in the path (`/video/av170001`)
//! 3. `bvid` query parameter, then numeric `aid` (emitted as `av<aid>`)
//! 4. any `BV` + 10 character substring anywhere in the URL
//!
//! When nothing matches, the input is returned unchanged.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};
use url::Url;

use crate::domain::platform::Platform;

static PRIMARY_PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/video/(BV[0-9A-Za-z_]+)").unwrap());

static LEGACY_PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/video/(av[0-9]+)").unwrap());

static NUMERIC_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

static ANYWHERE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(BV[0-9A-Za-z_]{10})").unwrap());

/// Rewrites platform URLs into their minimal canonical form.
///
/// Pure and total: never fails, and URLs outside the platform pass through
/// untouched. Idempotent: emitted URLs are re-checked against the path
/// rules before being returned.
#[derive(Debug, Clone, Default)]
pub struct PlatformCanonicalizer {
    platform: Platform,
}

impl PlatformCanonicalizer {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Returns the canonical URL for `url`, or `url` itself when it is not a
    /// platform URL or carries no recognizable identifier.
    pub fn canonicalize(&self, url: &str) -> String {
        if !self.platform.matches(url) {
            return url.to_string();
        }
        let Ok(parsed) = Url::parse(url) else {
            return url.to_string();
        };

        match self.extract_id(url, &parsed) {
            Some(id) => {
                let canonical = self.settle(self.platform.video_url(&id));
                debug!("Canonicalized {} -> {}", url, canonical);
                canonical
            }
            None => {
                warn!("No video identifier found in platform URL: {}", url);
                url.to_string()
            }
        }
    }

    /// A free-form `bvid` can embed an identifier the path rules would pick
    /// up on the next pass; apply them once more so the output is stable.
    fn settle(&self, canonical: String) -> String {
        Url::parse(&canonical)
            .ok()
            .and_then(|parsed| self.extract_id(&canonical, &parsed))
            .map(|id| self.platform.video_url(&id))
            .unwrap_or(canonical)
    }

    fn extract_id(&self, raw: &str, url: &Url) -> Option<String> {
        let path = url.path();

        if let Some(caps) = PRIMARY_PATH_REGEX.captures(path) {
            return Some(caps[1].to_string());
        }

        if let Some(caps) = LEGACY_PATH_REGEX.captures(path) {
            return Some(caps[1].to_string());
        }

        let query_value = |key: &str| {
            url.query_pairs()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
        };

        if let Some(bvid) = query_value("bvid").filter(|v| !v.is_empty()) {
            return Some(urlencoding::encode(&bvid).into_owned());
        }

        if let Some(aid) = query_value("aid").filter(|v| NUMERIC_ID_REGEX.is_match(v)) {
            return Some(format!("av{}", aid));
        }

        ANYWHERE_REGEX
            .captures(raw)
            .map(|caps| caps[1].to_string())
    }
}

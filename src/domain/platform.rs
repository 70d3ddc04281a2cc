//! Descriptor of the one video platform that gets special treatment.

use url::Url;

/// Browser-like headers sent on every hop of a platform redirect chain.
///
/// The platform serves different responses to clients without them.
pub const PLATFORM_HEADERS: &[(&str, &str)] = &[
    (
        "User-Agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    ),
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
    ),
    ("Accept-Language", "zh-CN,zh;q=0.9,en;q=0.8"),
    ("Cache-Control", "no-cache"),
    ("Pragma", "no-cache"),
];

/// Recognition and canonicalization parameters for a video platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Substrings that identify the platform in a URL host.
    pub domain_markers: Vec<String>,
    /// Host used when emitting canonical URLs.
    pub canonical_host: String,
    /// Referer sent with platform-profile requests.
    pub referer: String,
}

impl Platform {
    /// Bilibili and its `b23.tv` short host.
    pub fn bilibili() -> Self {
        Self {
            domain_markers: vec!["bilibili".to_string(), "b23.tv".to_string()],
            canonical_host: "www.bilibili.com".to_string(),
            referer: "https://www.bilibili.com/".to_string(),
        }
    }

    /// Replaces the host markers, keeping the canonical host and referer.
    pub fn with_domain_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domain_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if the host of `url` carries one of the domain markers.
    ///
    /// Unparsable URLs never match.
    pub fn matches(&self, url: &str) -> bool {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
            .is_some_and(|host| self.matches_host(&host))
    }

    /// Returns true if `host` carries one of the domain markers.
    pub fn matches_host(&self, host: &str) -> bool {
        self.domain_markers
            .iter()
            .any(|marker| host.contains(marker.as_str()))
    }

    /// Canonical video URL for `id`.
    pub fn video_url(&self, id: &str) -> String {
        format!("https://{}/video/{}", self.canonical_host, id)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::bilibili()
    }
}

//! Domain extraction from HTTP request headers.

use axum::http::{HeaderMap, header};

/// Extracts the domain name this service was addressed as.
///
/// Used as the host part of cache keys.
///
/// Parses the `Host` header to extract the domain name, handling:
/// - IPv4 addresses (e.g., `192.168.1.1`)
/// - IPv6 addresses (e.g., `[::1]`)
/// - Hostnames with ports (e.g., `example.com:3000`)
/// - Plain hostnames (e.g., `example.com`)
///
/// Port numbers are stripped from the result.
///
/// Returns `None` if the `Host` header is missing, empty or not valid UTF-8;
/// callers fall back to the configured public host.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "example.com:8080".parse().unwrap());
///
/// let domain = extract_domain_from_headers(&headers).unwrap();
/// assert_eq!(domain, "example.com");
/// ```
pub fn extract_domain_from_headers(headers: &HeaderMap) -> Option<String> {
    let host = headers
        .get(header::HOST)?
        .to_str()
        .ok()
        .filter(|h| !h.is_empty())?;

    let domain = if host.starts_with('[') {
        // IPv6 address (e.g., [::1] or [::1]:8080)
        if let Some(end_bracket) = host.find(']') {
            host[..=end_bracket].to_string()
        } else {
            host.to_string()
        }
    } else {
        // IPv4, hostname, or localhost - strip port if present
        host.split(':').next().unwrap_or(host).to_string()
    };

    Some(domain.to_ascii_lowercase())
}

//! Origin and hostname helpers.
//!
//! Hostname matching is boundary-correct: a hostname matches a domain only
//! when it equals the domain or ends with `"." + domain`.  Bare substring
//! tests would hand `mydiscordapp.com` to the Discord adapter, so they are
//! never used anywhere in the engine.

use thiserror::Error;
use tracing::trace;

/// Error type for origin parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OriginError {
    /// The origin string has no `scheme://` separator.
    #[error("origin has no scheme: {0:?}")]
    MissingScheme(String),
    /// The origin string has a scheme but no host part.
    #[error("origin has no host: {0:?}")]
    MissingHost(String),
}

/// Returns `true` when `hostname` is `domain` itself or a subdomain of it.
///
/// ```
/// use chatkey_core::hostname_matches_domain;
///
/// assert!(hostname_matches_domain("discord.com", "discord.com"));
/// assert!(hostname_matches_domain("ptb.discord.com", "discord.com"));
/// assert!(!hostname_matches_domain("mydiscordapp.com", "discord.com"));
/// assert!(!hostname_matches_domain("discordapp.com", "discord.com"));
/// ```
pub fn hostname_matches_domain(hostname: &str, domain: &str) -> bool {
    hostname == domain
        || hostname
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Extracts the hostname from an origin string such as
/// `https://app.slack.com` or `https://example.com:8080`.
///
/// # Errors
///
/// Returns [`OriginError`] when the string is not `scheme://host[:port]`.
pub fn hostname_of_origin(origin: &str) -> Result<String, OriginError> {
    let (_, rest) = origin
        .split_once("://")
        .ok_or_else(|| OriginError::MissingScheme(origin.to_string()))?;
    let host = rest
        .split(['/', ':'])
        .next()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| OriginError::MissingHost(origin.to_string()))?;
    Ok(host.to_string())
}

/// Normalizes an origin by stripping a leading `www.` from its hostname.
///
/// Unparseable origins are returned unchanged; the settings layer treats
/// them as opaque keys rather than failing a lookup over them.
pub fn normalize_origin(origin: &str) -> String {
    let Some((scheme, rest)) = origin.split_once("://") else {
        trace!(origin, "unparseable origin left as-is");
        return origin.to_string();
    };
    let host = rest.split(['/', ':']).next().unwrap_or(rest);
    let normalized_host = host.strip_prefix("www.").unwrap_or(host);
    format!("{scheme}://{normalized_host}")
}

/// Returns the normalized origin plus its `www.` twin.
///
/// Explicit per-origin writes fan out to both so a user toggling
/// `https://example.com` also covers `https://www.example.com`.
pub fn www_variants(normalized_origin: &str) -> Vec<String> {
    let Some((scheme, host)) = normalized_origin.split_once("://") else {
        return vec![normalized_origin.to_string()];
    };
    let mut variants = vec![normalized_origin.to_string()];
    if !host.starts_with("www.") {
        variants.push(format!("{scheme}://www.{host}"));
    }
    variants
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Domain matching ───────────────────────────────────────────────────────

    #[test]
    fn test_exact_hostname_matches() {
        assert!(hostname_matches_domain("claude.ai", "claude.ai"));
    }

    #[test]
    fn test_subdomain_matches() {
        assert!(hostname_matches_domain("app.slack.com", "slack.com"));
        assert!(hostname_matches_domain("ptb.discord.com", "discord.com"));
    }

    #[test]
    fn test_brand_lookalike_does_not_match() {
        assert!(!hostname_matches_domain("mydiscordapp.com", "discord.com"));
        assert!(!hostname_matches_domain("discordapp.com", "discord.com"));
        assert!(!hostname_matches_domain("notslack.com", "slack.com"));
    }

    #[test]
    fn test_domain_does_not_match_its_own_subdomain_pattern() {
        assert!(!hostname_matches_domain("slack.com", "app.slack.com"));
    }

    // ── Origin parsing ────────────────────────────────────────────────────────

    #[test]
    fn test_hostname_of_origin_strips_scheme_and_port() {
        assert_eq!(
            hostname_of_origin("https://example.com").unwrap(),
            "example.com"
        );
        assert_eq!(
            hostname_of_origin("https://example.com:8080").unwrap(),
            "example.com"
        );
    }

    #[test]
    fn test_hostname_of_origin_rejects_schemeless_input() {
        assert_eq!(
            hostname_of_origin("example.com"),
            Err(OriginError::MissingScheme("example.com".to_string()))
        );
    }

    #[test]
    fn test_hostname_of_origin_rejects_empty_host() {
        assert_eq!(
            hostname_of_origin("https://"),
            Err(OriginError::MissingHost("https://".to_string()))
        );
    }

    // ── Normalization ─────────────────────────────────────────────────────────

    #[test]
    fn test_normalize_origin_removes_www_prefix() {
        assert_eq!(
            normalize_origin("https://www.example.com"),
            "https://example.com"
        );
    }

    #[test]
    fn test_normalize_origin_preserves_non_www_origins() {
        assert_eq!(
            normalize_origin("https://example.com"),
            "https://example.com"
        );
    }

    #[test]
    fn test_normalize_origin_returns_garbage_unchanged() {
        assert_eq!(normalize_origin("not an origin"), "not an origin");
    }

    #[test]
    fn test_www_variants_cover_both_spellings() {
        assert_eq!(
            www_variants("https://example.com"),
            vec![
                "https://example.com".to_string(),
                "https://www.example.com".to_string()
            ]
        );
    }

    #[test]
    fn test_www_variants_of_www_origin_is_just_itself() {
        assert_eq!(
            www_variants("https://www.example.com"),
            vec!["https://www.example.com".to_string()]
        );
    }
}

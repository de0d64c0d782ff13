//! App Store link recognition and identifier extraction.

use std::sync::LazyLock;

use regex::Regex;

/// Hosts that serve App Store product pages.
pub const APP_STORE_DOMAINS: [&str; 4] = [
    "apps.apple.com",
    "itunes.apple.com",
    "app-store.com",
    "appstore.com",
];

static APP_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)id(\d+)").expect("app id pattern is valid"));

/// Whether `text` looks like a link to an App Store product.
///
/// Matches known store hosts, or any `id<digits>` token for short links.
pub fn is_app_store_url(text: &str) -> bool {
    let lower = text.to_lowercase();
    if APP_STORE_DOMAINS.iter().any(|domain| lower.contains(domain)) {
        return true;
    }
    APP_ID_PATTERN.is_match(text)
}

/// Extract the numeric application identifier from a store link.
///
/// Uses the last `id<digits>` token so app names containing "id" in the
/// path (e.g. `/app/idle-miner/id1116645064`) resolve correctly.
pub fn extract_app_id(link: &str) -> Option<i64> {
    APP_ID_PATTERN
        .captures_iter(link)
        .last()
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_id_before_query() {
        let link = "https://apps.apple.com/us/app/some-app/id544007664?platform=iphone";
        assert_eq!(extract_app_id(link), Some(544_007_664));
    }

    #[test]
    fn test_extracts_last_id_when_name_contains_id() {
        let link = "https://apps.apple.com/us/app/idle-miner/id1116645064";
        assert_eq!(extract_app_id(link), Some(1_116_645_064));
    }

    #[test]
    fn test_no_id_yields_none() {
        assert_eq!(extract_app_id("https://example.com/app"), None);
        assert_eq!(extract_app_id("id"), None);
    }

    #[test]
    fn test_overflowing_id_yields_none() {
        assert_eq!(extract_app_id("id99999999999999999999999"), None);
    }

    #[test]
    fn test_recognizes_store_hosts_case_insensitively() {
        assert!(is_app_store_url("HTTPS://APPS.APPLE.COM/us/app/x"));
        assert!(is_app_store_url("https://itunes.apple.com/app/x"));
    }

    #[test]
    fn test_recognizes_bare_id_token() {
        assert!(is_app_store_url("ID123456"));
        assert!(!is_app_store_url("identity"));
        assert!(!is_app_store_url("just some text"));
    }
}

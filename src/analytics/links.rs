//! URL extraction and domain frequency.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;
use url::{ParseError, Url};

use super::{Selection, rank, selected_text};
use crate::Entry;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("valid URL regex"));

/// Returns every URL-looking run in the text, in order.
pub fn extract_urls(text: &str) -> Vec<&str> {
    URL_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Domain recorded for links that cannot be parsed as URLs.
pub const UNKNOWN_DOMAIN: &str = "unknown_domain";

/// Returns the network location of a URL: its host, plus `:port` when the
/// port is not the scheme's default.
///
/// Links without a scheme (`www.example.com/page`) have no network location
/// and yield an empty string. Other unparsable links yield
/// [`UNKNOWN_DOMAIN`].
///
/// ```
/// use chatlens::analytics::links::netloc;
///
/// assert_eq!(netloc("https://Example.com:8443/a"), "example.com:8443");
/// assert_eq!(netloc("www.example.com/page"), "");
/// ```
pub fn netloc(link: &str) -> String {
    match Url::parse(link) {
        Ok(url) => {
            let host = url.host_str().unwrap_or_default();
            match url.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            }
        }
        Err(ParseError::RelativeUrlWithoutBase) => String::new(),
        Err(e) => {
            debug!(link, error = %e, "unparsable link");
            UNKNOWN_DOMAIN.to_string()
        }
    }
}

/// A domain and how many links pointed to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainCount {
    pub domain: String,
    pub count: usize,
}

/// Counts link domains in non-media entries, most frequent first.
///
/// A leading `www.` is stripped from each domain.
pub fn url_domains(selection: &Selection, entries: &[Entry]) -> Vec<DomainCount> {
    let domains = selected_text(selection, entries)
        .flat_map(|e| extract_urls(e.body()))
        .map(|link| {
            let host = netloc(link);
            match host.strip_prefix("www.") {
                Some(stripped) => stripped.to_string(),
                None => host,
            }
        });

    rank(domains)
        .into_iter()
        .map(|(domain, count)| DomainCount { domain, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::entry_at;

    #[test]
    fn test_extract_urls() {
        let urls = extract_urls("see https://a.com/x and www.b.org, also http://c.net");
        assert_eq!(urls, vec!["https://a.com/x", "www.b.org,", "http://c.net"]);
        assert!(extract_urls("no links here").is_empty());
    }

    #[test]
    fn test_netloc() {
        assert_eq!(netloc("https://www.example.com/path?q=1"), "www.example.com");
        assert_eq!(netloc("http://host:8080#frag"), "host:8080");
        assert_eq!(netloc("https://example.com"), "example.com");
        assert_eq!(netloc("www.example.com/page"), "");
    }

    #[test]
    fn test_netloc_follows_url_standard() {
        assert_eq!(netloc("https://example.com\\evil"), "example.com");
        assert_eq!(netloc("ftp+x://a.b/c"), "a.b");
        assert_eq!(netloc("HTTPS://WWW.Example.COM/"), "www.example.com");
        assert_eq!(netloc("https://example.com:443/x"), "example.com");
        assert_eq!(netloc("http://[::1"), UNKNOWN_DOMAIN);
    }

    #[test]
    fn test_url_domains_unparsable_and_schemeless() {
        let entries = vec![entry_at(
            0,
            "Alice",
            "www.site.org and http://[oops and https://www.site.org",
        )];
        let domains = url_domains(&Selection::Overall, &entries);
        assert_eq!(
            domains,
            vec![
                DomainCount { domain: String::new(), count: 1 },
                DomainCount { domain: UNKNOWN_DOMAIN.to_string(), count: 1 },
                DomainCount { domain: "site.org".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_url_domains_counts_and_strips_www() {
        let entries = vec![
            entry_at(0, "Alice", "https://www.youtube.com/watch?v=1"),
            entry_at(1, "Bob", "https://youtube.com/shorts/2 and https://rust-lang.org"),
            entry_at(2, "Alice", "<Media omitted> https://ignored.com"),
        ];

        let domains = url_domains(&Selection::Overall, &entries);
        assert_eq!(
            domains,
            vec![
                DomainCount { domain: "youtube.com".to_string(), count: 2 },
                DomainCount { domain: "rust-lang.org".to_string(), count: 1 },
            ]
        );

        let alice = url_domains(&Selection::user("Alice"), &entries);
        assert_eq!(alice.len(), 1);
    }

    #[test]
    fn test_url_domains_empty() {
        assert!(url_domains(&Selection::Overall, &[]).is_empty());
    }
}

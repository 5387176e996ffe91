use std::fmt::Display;

use miette::Diagnostic;
use thiserror::Error;
use percent_encoding::percent_decode_str;
use url::Url;

use crate::my_regex::find_fragment_timestamp;

/// Hosts recognized as video links, in lower case.
/// A link with an explicit port, even the default one, is not recognized.
///
/// Keep the `UnsupportedHost` help text in sync.
pub const ALLOWED_HOSTS: [&str; 3] = [
    "www.example-video.com",
    "example-video.com",
    "short.example-video.com",
];

/// The query parameter holding the start timestamp
const TIMESTAMP_QUERY_KEY: &str = "t";

#[derive(Debug, Error, Diagnostic)]
pub enum LinkError {
    #[error("'{input}' is not a valid URL")]
    #[diagnostic(
        code(clipmark::link::parse),
        help("A link looks like https://example-video.com/watch?v=...")
    )]
    Parse {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("'{input}' is not a video link (host '{host}' is not supported)")]
    #[diagnostic(
        code(clipmark::link::unsupported_host),
        help("Supported hosts: www.example-video.com, example-video.com, short.example-video.com")
    )]
    UnsupportedHost { input: String, host: String },
}

/// Outcome of a loose link check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkCheck {
    pub is_video_url: bool,

    /// The timestamp found in the link, verbatim.
    /// Empty when the link carries none or is not a video link.
    pub timestamp: String,
}

/// Check whether the link points to a supported host and extract its
/// embedded timestamp if any.
///
/// Only an unparseable string is an error. A well-formed URL to another host
/// is reported with `is_video_url == false`.
///
/// The timestamp is not validated here: any value of the `t` query parameter
/// is returned as-is for the user to fix in the form.
pub fn validate(link: &str) -> Result<LinkCheck, LinkError> {
    let url = parse_url(link)?;

    if !is_allowed_host(link, &url) {
        return Ok(LinkCheck::default());
    }

    Ok(LinkCheck {
        is_video_url: true,
        timestamp: extract_timestamp(&url),
    })
}

/// A link whose host is in [`ALLOWED_HOSTS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoLink(String);

impl VideoLink {
    /// Strict version of [`validate`], where an unknown host is an error
    pub fn parse(link: &str) -> Result<Self, LinkError> {
        let url = parse_url(link)?;

        if is_allowed_host(link, &url) {
            return Ok(Self(link.to_owned()));
        }

        let host = url.host_str().unwrap_or_default();
        let host = match explicit_port(link) {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        };
        Err(LinkError::UnsupportedHost {
            input: link.to_owned(),
            host,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VideoLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_url(link: &str) -> Result<Url, LinkError> {
    Url::parse(link).map_err(|source| LinkError::Parse {
        input: link.to_owned(),
        source,
    })
}

fn is_allowed_host(link: &str, url: &Url) -> bool {
    if url.port().is_some() || explicit_port(link).is_some() {
        return false;
    }

    url.host_str()
        .map(str::to_lowercase)
        .is_some_and(|host| ALLOWED_HOSTS.contains(&host.as_str()))
}

/// The port written in the link authority, if any.
///
/// [`Url`] drops a default port such as `:443`, so the raw text is read.
fn explicit_port(link: &str) -> Option<&str> {
    let (_, rest) = link.split_once("://")?;
    let authority = rest.split(['/', '\\', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
    // Skip an IPv6 address, its colons are not a port separator
    let tail = host_port.rsplit_once(']').map_or(host_port, |(_, tail)| tail);
    tail.split_once(':').map(|(_, port)| port)
}

/// Look for the timestamp in the query first, then in the fragment
fn extract_timestamp(url: &Url) -> String {
    if let Some((_, value)) = url
        .query_pairs()
        .find(|(key, _)| key == TIMESTAMP_QUERY_KEY)
    {
        return value.into_owned();
    }

    let Some(fragment) = url.fragment() else {
        return String::new();
    };
    let fragment = percent_decode_str(fragment).decode_utf8_lossy();
    find_fragment_timestamp(&fragment)
        .map(str::to_owned)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(is_video_url: bool, timestamp: &str) -> LinkCheck {
        LinkCheck {
            is_video_url,
            timestamp: timestamp.to_owned(),
        }
    }

    #[test]
    fn timestamp_from_query() {
        let res = validate("https://example-video.com/watch?v=x&t=42").unwrap();
        assert_eq!(res, check(true, "42"));
    }

    #[test]
    fn timestamp_from_fragment() {
        let res = validate("https://short.example-video.com/x#t=75s").unwrap();
        assert_eq!(res, check(true, "75"));
    }

    #[test]
    fn timestamp_from_encoded_fragment() {
        let res = validate("https://short.example-video.com/x#t%3D75s").unwrap();
        assert_eq!(res, check(true, "75"));
    }

    #[test]
    fn query_wins_over_fragment() {
        let res = validate("https://example-video.com/watch?t=10#t=20s").unwrap();
        assert_eq!(res, check(true, "10"));
    }

    #[test]
    fn first_query_value_is_used() {
        let res = validate("https://example-video.com/watch?t=1&t=2").unwrap();
        assert_eq!(res, check(true, "1"));
    }

    #[test]
    fn query_timestamp_is_not_validated() {
        let res = validate("https://www.example-video.com/watch?v=x&t=1m30s").unwrap();
        assert_eq!(res, check(true, "1m30s"));
    }

    #[test]
    fn no_timestamp_is_empty() {
        let res = validate("https://www.example-video.com/watch?v=x").unwrap();
        assert_eq!(res, check(true, ""));
    }

    #[test]
    fn host_is_case_insensitive() {
        let res = validate("https://WWW.Example-Video.COM/watch?v=x&t=3").unwrap();
        assert_eq!(res, check(true, "3"));
    }

    #[test]
    fn other_hosts_are_not_errors() {
        for link in [
            "https://example.org/watch?v=x&t=42",
            "https://video.example-video.com/x#t=5",
            "mailto:someone@example-video.com",
            "file:///tmp/example-video.com",
        ] {
            assert_eq!(validate(link).unwrap(), check(false, ""), "{link}");
        }
    }

    #[test]
    fn hosts_with_a_port_are_not_video_links() {
        for link in [
            "https://example-video.com:8080/watch?v=x&t=42",
            "https://example-video.com:443/watch?v=x&t=42",
            "http://www.example-video.com:80/watch?v=x",
            "https://user@short.example-video.com:443/x#t=5",
        ] {
            assert_eq!(validate(link).unwrap(), check(false, ""), "{link}");
        }
    }

    #[test]
    fn explicit_port_is_read_from_the_authority() {
        assert_eq!(explicit_port("https://example-video.com:443/x"), Some("443"));
        assert_eq!(explicit_port("https://example-video.com/x?a=b:c#d:e"), None);
        assert_eq!(explicit_port("https://u:pw@example-video.com/x"), None);
        assert_eq!(explicit_port("http://[::1]/x"), None);
        assert_eq!(explicit_port("http://[::1]:8080/x"), Some("8080"));
        assert_eq!(explicit_port("mailto:someone@example-video.com"), None);
    }

    #[test]
    fn non_urls_are_parse_errors() {
        for link in ["", "hello world", "example-video.com/watch?v=x", "https://", "http://[::1"] {
            assert!(
                matches!(validate(link), Err(LinkError::Parse { .. })),
                "{link}"
            );
        }
    }

    #[test]
    fn strict_parse_rejects_other_hosts() {
        let err = VideoLink::parse("https://example.org/x").unwrap_err();
        match err {
            LinkError::UnsupportedHost { input, host } => {
                assert_eq!(input, "https://example.org/x");
                assert_eq!(host, "example.org");
            }
            err => panic!("unexpected error {err:?}"),
        }
    }

    #[test]
    fn strict_parse_rejects_ports() {
        for (link, expected) in [
            ("https://example-video.com:8080/watch?v=x", "example-video.com:8080"),
            ("https://example-video.com:443/watch?v=x", "example-video.com:443"),
        ] {
            match VideoLink::parse(link) {
                Err(LinkError::UnsupportedHost { host, .. }) => assert_eq!(host, expected),
                res => panic!("unexpected result {res:?} for {link}"),
            }
        }
    }

    #[test]
    fn help_lists_every_allowed_host() {
        let err = VideoLink::parse("https://example.org/x").unwrap_err();
        let help = err.help().unwrap().to_string();
        for host in ALLOWED_HOSTS {
            assert!(help.contains(host), "{host} missing from {help:?}");
        }
    }

    #[test]
    fn strict_parse_keeps_link_verbatim() {
        let link = VideoLink::parse("https://short.example-video.com/abc?t=4").unwrap();
        assert_eq!(link.as_str(), "https://short.example-video.com/abc?t=4");
        assert_eq!(link.to_string(), link.as_str());
    }
}

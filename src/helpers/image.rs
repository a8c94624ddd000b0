//! Image URL rewriting
//!
//! Gallery images are often hosted on plain `http://` origins, which a page
//! served over TLS cannot embed. These helpers map such URLs to a secure
//! address using one of a few interchangeable strategies.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Same reserved set as JavaScript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Default local relay endpoint
pub const DEFAULT_RELAY_ENDPOINT: &str = "/api/proxy-image";

/// Default third-party resize/proxy service
pub const DEFAULT_RESIZE_SERVICE: &str = "https://images.weserv.nl/";

/// How insecure image URLs are rewritten
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum ImageStrategy {
    /// Leave the URL untouched
    Direct,
    /// Hand the URL to a resize/proxy service
    Resize {
        #[serde(default = "default_resize_service")]
        service: String,
    },
    /// Route the URL through a relay endpoint on the same origin
    Relay {
        #[serde(default = "default_relay_endpoint")]
        endpoint: String,
    },
}

fn default_resize_service() -> String {
    DEFAULT_RESIZE_SERVICE.to_string()
}

fn default_relay_endpoint() -> String {
    DEFAULT_RELAY_ENDPOINT.to_string()
}

impl Default for ImageStrategy {
    fn default() -> Self {
        ImageStrategy::Relay {
            endpoint: default_relay_endpoint(),
        }
    }
}

impl ImageStrategy {
    /// Rewrite an image URL so it can be embedded in a secure page
    ///
    /// # Examples
    /// ```ignore
    /// strategy.rewrite("http://cdn.test/a.jpg") // -> "/api/proxy-image?url=http%3A%2F%2Fcdn.test%2Fa.jpg"
    /// ```
    pub fn rewrite(&self, url: &str) -> String {
        if url.is_empty() {
            return String::new();
        }
        if url.starts_with("https://") {
            return url.to_string();
        }

        match self {
            ImageStrategy::Direct => url.to_string(),
            ImageStrategy::Resize { service } => with_url_param(service, url),
            ImageStrategy::Relay { endpoint } => with_url_param(endpoint, url),
        }
    }
}

fn with_url_param(base: &str, url: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}url={}", base, separator, encode_uri_component(url))
}

/// Percent-encode a string the way `encodeURIComponent` does
pub fn encode_uri_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// Recover the source URL from a rewritten one
///
/// Used as the retry path when a proxied image fails to load. Returns
/// `None` when the URL carries no `url` query parameter.
pub fn original_url(rewritten: &str) -> Option<String> {
    let (_, query) = rewritten.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();

    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "url")
        .and_then(|(_, value)| percent_decode_str(value).decode_utf8().ok())
        .map(|value| value.into_owned())
}

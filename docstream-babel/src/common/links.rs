//! Hyperlink target normalization.
//!
//! `href` values arrive in every shape markup allows: absolute URLs, relative
//! paths, fragments, `mailto:` and the occasional `javascript:` pseudo-URL. The
//! editing API wants a URL string, so this module decides what survives:
//!
//! - absolute URLs are parsed and re-serialized (normalizing case and escapes)
//! - relative targets are joined onto a base URL when one is configured, and
//!   passed through untouched otherwise
//! - empty targets and script URLs are dropped

use tracing::trace;
use url::Url;

/// Resolves raw `href` values into link targets.
#[derive(Debug, Clone, Default)]
pub struct LinkResolver {
    base: Option<Url>,
}

impl LinkResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver that joins relative targets onto `base`.
    ///
    /// An unparsable base is ignored, leaving relative targets verbatim.
    pub fn with_base(base: &str) -> Self {
        let base = match Url::parse(base.trim()) {
            Ok(url) => Some(url),
            Err(err) => {
                trace!(base, %err, "ignoring unparsable base url");
                None
            }
        };
        Self { base }
    }

    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    /// Returns the link target for `href`, or `None` if it should not link.
    pub fn resolve(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }

        match Url::parse(href) {
            Ok(url) if url.scheme() == "javascript" => None,
            Ok(url) => Some(url.to_string()),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base {
                Some(base) => base.join(href).ok().map(|url| url.to_string()),
                None => Some(href.to_string()),
            },
            Err(err) => {
                trace!(href, %err, "keeping unparsable href verbatim");
                Some(href.to_string())
            }
        }
    }
}

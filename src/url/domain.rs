use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

/// The root of the site being crawled
///
/// Holds the root URL with any trailing slash removed, which is the form
/// relative hrefs are appended to. A URL is same-site when it starts with the
/// root followed by a path, query or fragment boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRoot {
    base: String,
    host: String,
}

impl SiteRoot {
    /// Parses and validates a root URL
    ///
    /// # Examples
    ///
    /// ```
    /// use site_sweep::url::SiteRoot;
    ///
    /// let root = SiteRoot::parse("https://financialaid.arizona.edu/").unwrap();
    /// assert_eq!(root.as_str(), "https://financialaid.arizona.edu");
    /// assert_eq!(root.host(), "financialaid.arizona.edu");
    /// ```
    pub fn parse(root: &str) -> UrlResult<Self> {
        let root = root.trim();
        let url = Url::parse(root).map_err(|e| UrlError::Parse(e.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        let host = extract_domain(&url).ok_or(UrlError::MissingHost)?;
        let base = root.strip_suffix('/').unwrap_or(root).to_string();

        Ok(Self { base, host })
    }

    /// The root URL without a trailing slash
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// The lowercase host of the root URL
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns true if `url` belongs to this site and may be crawled as a page
    ///
    /// ```
    /// use site_sweep::url::SiteRoot;
    ///
    /// let root = SiteRoot::parse("https://x.edu").unwrap();
    /// assert!(root.contains("https://x.edu/apply"));
    /// assert!(!root.contains("https://x.edu.evil.com/apply"));
    /// assert!(!root.contains("https://other.org/apply"));
    /// ```
    pub fn contains(&self, url: &str) -> bool {
        match url.strip_prefix(self.base.as_str()) {
            Some(rest) => {
                rest.is_empty()
                    || rest.starts_with('/')
                    || rest.starts_with('?')
                    || rest.starts_with('#')
            }
            None => false,
        }
    }
}

impl fmt::Display for SiteRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

/// Extracts the lowercase host from a URL
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

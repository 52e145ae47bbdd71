use std::fmt;

/// Why a link was not probed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The URL contains a configured non-HTML marker (extension, scheme, domain)
    Marker(String),
    /// The URL points at an anchor on the page it was found on
    SamePageAnchor,
    /// The URL has already been fetched as a page
    Visited,
    /// The URL already has a probe result, or a probe for it is in flight
    AlreadyProbed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Marker(marker) => write!(f, "matches skip marker '{}'", marker),
            Self::SamePageAnchor => write!(f, "same-page anchor"),
            Self::Visited => write!(f, "already visited"),
            Self::AlreadyProbed => write!(f, "already probed"),
        }
    }
}

/// Outcome of classifying a canonical URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDecision {
    Probe,
    Skip(SkipReason),
}

impl LinkDecision {
    pub fn is_probe(&self) -> bool {
        matches!(self, Self::Probe)
    }
}

/// Decides which canonical URLs are worth an HTTP probe
///
/// This is the stateless half of link classification: skip markers and
/// same-page anchors. Whether a URL was already visited or probed is known
/// only to the crawl frontier, which consults this classifier first.
#[derive(Debug, Clone)]
pub struct LinkClassifier {
    markers: Vec<String>,
}

impl LinkClassifier {
    /// Creates a classifier skipping any URL containing one of `markers`
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// Classifies a canonical URL found on `page_url`
    ///
    /// # Examples
    ///
    /// ```
    /// use site_sweep::url::{LinkClassifier, LinkDecision};
    ///
    /// let classifier = LinkClassifier::new([".pdf", "@", "tel:"]);
    /// assert!(classifier.classify("https://x.edu/apply", "https://x.edu").is_probe());
    /// assert!(!classifier.classify("https://x.edu/form.pdf", "https://x.edu").is_probe());
    /// assert!(!classifier.classify("https://x.edu/foo#top", "https://x.edu/foo").is_probe());
    /// ```
    pub fn classify(&self, url: &str, page_url: &str) -> LinkDecision {
        if let Some(marker) = self.markers.iter().find(|m| url.contains(m.as_str())) {
            return LinkDecision::Skip(SkipReason::Marker(marker.clone()));
        }

        if is_same_page_anchor(url, page_url) {
            return LinkDecision::Skip(SkipReason::SamePageAnchor);
        }

        LinkDecision::Probe
    }
}

/// Returns true if `url` is an anchor reference into `page_url`
pub fn is_same_page_anchor(url: &str, page_url: &str) -> bool {
    let page = page_url.strip_suffix('/').unwrap_or(page_url);
    url.contains('#') && url.starts_with(page)
}

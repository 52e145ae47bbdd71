use crate::url::SiteRoot;
use url::Url;

/// Turns a raw href into an absolute, comparable URL
///
/// # Resolution Rules
///
/// The first matching rule wins:
///
/// 1. `/path` - appended to the site root
/// 2. `#anchor` - appended to the page the href was found on
/// 3. no `.` and not already absolute - treated as `root/href`
/// 4. anything else is taken as already absolute and returned unchanged
///
/// No percent-decoding, query canonicalization or scheme normalization is
/// done: `http` and `https` variants of a URL stay distinct.
///
/// # Arguments
///
/// * `href` - The raw `href` attribute value
/// * `page_url` - The canonical URL of the page the href appeared on
/// * `root` - The site being crawled
///
/// # Examples
///
/// ```
/// use site_sweep::url::{normalize_href, SiteRoot};
///
/// let root = SiteRoot::parse("https://x.edu").unwrap();
/// assert_eq!(normalize_href("/apply", "https://x.edu/foo", &root), "https://x.edu/apply");
/// assert_eq!(normalize_href("#top", "https://x.edu/foo", &root), "https://x.edu/foo#top");
/// assert_eq!(normalize_href("contact", "https://x.edu/foo", &root), "https://x.edu/contact");
/// ```
pub fn normalize_href(href: &str, page_url: &str, root: &SiteRoot) -> String {
    let href = href.trim();

    if href.starts_with('/') && !href.starts_with("//") {
        return format!("{}{}", root.as_str(), href);
    }

    if href.starts_with('#') {
        return format!("{}{}", page_url.strip_suffix('/').unwrap_or(page_url), href);
    }

    if !href.contains('.') && !is_absolute(href) {
        return format!("{}/{}", root.as_str(), href);
    }

    href.to_string()
}

/// Returns true if the href carries its own scheme or is protocol-relative
fn is_absolute(href: &str) -> bool {
    href.starts_with("//") || Url::parse(href).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> SiteRoot {
        SiteRoot::parse("https://x.edu").unwrap()
    }

    #[test]
    fn test_root_relative_path() {
        assert_eq!(
            normalize_href("/apply", "https://x.edu/foo", &root()),
            "https://x.edu/apply"
        );
    }

    #[test]
    fn test_root_relative_path_with_trailing_slash_root() {
        let root = SiteRoot::parse("https://x.edu/").unwrap();
        assert_eq!(
            normalize_href("/apply", "https://x.edu/foo", &root),
            "https://x.edu/apply"
        );
    }

    #[test]
    fn test_root_relative_path_with_extension() {
        assert_eq!(
            normalize_href("/forms/aid.pdf", "https://x.edu/foo", &root()),
            "https://x.edu/forms/aid.pdf"
        );
    }

    #[test]
    fn test_anchor_resolves_against_current_page() {
        assert_eq!(
            normalize_href("#top", "https://x.edu/foo", &root()),
            "https://x.edu/foo#top"
        );
    }

    #[test]
    fn test_anchor_strips_page_trailing_slash() {
        assert_eq!(
            normalize_href("#top", "https://x.edu/foo/", &root()),
            "https://x.edu/foo#top"
        );
    }

    #[test]
    fn test_fragment_duplicates_collapse() {
        let a = normalize_href("#top", "https://x.edu/foo/", &root());
        let b = normalize_href("#top", "https://x.edu/foo", &root());
        assert_eq!(a, b);
    }

    #[test]
    fn test_bare_relative_path() {
        assert_eq!(
            normalize_href("contact-us", "https://x.edu/foo", &root()),
            "https://x.edu/contact-us"
        );
        assert_eq!(
            normalize_href("types/grants", "https://x.edu/foo", &root()),
            "https://x.edu/types/grants"
        );
    }

    #[test]
    fn test_absolute_passes_through() {
        for href in [
            "https://x.edu/foo",
            "https://other.org/page",
            "http://localhost/status",
            "mailto:aid@x.edu",
            "tel:5205550100",
            "//cdn.x.edu/lib.js",
            "www.other.org/page",
        ] {
            assert_eq!(normalize_href(href, "https://x.edu/foo", &root()), href);
        }
    }

    #[test]
    fn test_idempotent_on_normalized_output() {
        for href in ["/apply", "#top", "contact", "https://other.org/x"] {
            let once = normalize_href(href, "https://x.edu/foo", &root());
            let twice = normalize_href(&once, "https://x.edu/foo", &root());
            assert_eq!(once, twice, "not idempotent for {}", href);
        }
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(
            normalize_href("  /apply\n", "https://x.edu/foo", &root()),
            "https://x.edu/apply"
        );
    }

    #[test]
    fn test_scheme_not_normalized() {
        assert_eq!(
            normalize_href("http://x.edu/apply", "https://x.edu/foo", &root()),
            "http://x.edu/apply"
        );
    }
}

use serde::Deserialize;

/// User agent sent when the config does not override it; some sites reject
/// default client identifiers
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/74.0.3729.169 Safari/537.36";

/// Substrings marking links that are never probed
pub const DEFAULT_SKIP_MARKERS: &[&str] = &[
    ".pdf",
    ".xlsx",
    ".png",
    ".ppt",
    ".xls",
    ".doc",
    "@",
    "bit.ly",
    "tel:",
    ".aspx",
    "javascript:",
];

/// Main configuration structure for Site-Sweep
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// What to crawl and what to look for
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteConfig {
    /// Root URL of the site; the CLI argument takes precedence
    pub root: Option<String>,

    /// Keyword to count whole-word occurrences of (empty disables scanning)
    pub keyword: String,

    /// Substrings that mark a link as not worth probing
    pub skip_markers: Vec<String>,

    /// Element id of the site-wide header region (scanned on the root only)
    pub header_section: String,

    /// Element id of the per-page content region
    pub main_section: String,

    /// Element id of the site-wide footer region (scanned on the root only)
    pub footer_section: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: None,
            keyword: "UA".to_string(),
            skip_markers: DEFAULT_SKIP_MARKERS.iter().map(|m| m.to_string()).collect(),
            header_section: "header_site".to_string(),
            main_section: "main".to_string(),
            footer_section: "footer_site".to_string(),
        }
    }
}

/// Order in which pending pages are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Traversal {
    /// Most recently discovered page first (LIFO)
    #[default]
    DepthFirst,
    /// Oldest discovered page first (FIFO)
    BreadthFirst,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    pub traversal: Traversal,

    /// Maximum number of link probes in flight at once
    pub max_concurrent_probes: u32,

    /// Maximum redirect hops followed while probing
    pub max_redirects: u32,

    /// Whole-request timeout (seconds)
    pub request_timeout_secs: u64,

    /// Connection timeout (seconds)
    pub connect_timeout_secs: u64,

    /// Extra attempts for a page whose fetch fails when popped
    pub page_fetch_retries: u32,

    /// Delay before the first retry; doubles on each further attempt (milliseconds)
    pub retry_backoff_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            traversal: Traversal::DepthFirst,
            max_concurrent_probes: 8,
            max_redirects: 10,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            page_fetch_retries: 2,
            retry_backoff_ms: 500,
        }
    }
}

/// User agent configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Full User-Agent header value
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory the report files are written into
    pub directory: String,

    /// Broken-link report file name
    pub broken_links_file: String,

    /// Keyword report file name
    pub keywords_file: String,

    /// File receiving every URL accepted into the pending queue
    pub frontier_log_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            broken_links_file: "broken-links.md".to_string(),
            keywords_file: "keywords.md".to_string(),
            frontier_log_file: "frontier.log".to_string(),
        }
    }
}

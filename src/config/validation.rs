use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    if let Some(root) = &config.root {
        validate_root_url(root)?;
    }

    for (name, id) in [
        ("header-section", &config.header_section),
        ("main-section", &config.main_section),
        ("footer-section", &config.footer_section),
    ] {
        if id.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    if config.skip_markers.iter().any(|m| m.is_empty()) {
        return Err(ConfigError::Validation(
            "skip-markers cannot contain an empty marker".to_string(),
        ));
    }

    if config.keyword.trim() != config.keyword {
        return Err(ConfigError::Validation(format!(
            "keyword cannot have leading or trailing whitespace, got '{}'",
            config.keyword
        )));
    }

    Ok(())
}

/// Validates a root URL: absolute http(s), no query, no fragment
pub fn validate_root_url(root: &str) -> Result<(), ConfigError> {
    let url =
        Url::parse(root).map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", root, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "root URL '{}' must use http or https",
            root
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "root URL '{}' has no host",
            root
        )));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidUrl(format!(
            "root URL '{}' cannot carry a query or fragment",
            root
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_probes < 1 || config.max_concurrent_probes > 64 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-probes must be between 1 and 64, got {}",
            config.max_concurrent_probes
        )));
    }

    if config.max_redirects > 20 {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be <= 20, got {}",
            config.max_redirects
        )));
    }

    if config.page_fetch_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "page-fetch-retries must be <= 10, got {}",
            config.page_fetch_retries
        )));
    }

    if config.retry_backoff_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "retry-backoff-ms must be <= 60000, got {}",
            config.retry_backoff_ms
        )));
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent value cannot be empty".to_string(),
        ));
    }

    if config.value.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(
            "user-agent value cannot contain control characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    for (name, file) in [
        ("broken-links-file", &config.broken_links_file),
        ("keywords-file", &config.keywords_file),
        ("frontier-log-file", &config.frontier_log_file),
    ] {
        if file.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
        if file.contains('/') || file.contains('\\') {
            return Err(ConfigError::Validation(format!(
                "{} must be a plain file name, got '{}'",
                name, file
            )));
        }
    }

    Ok(())
}

use serde::Deserialize;

/// Site crawled when neither the CLI nor the config file names one
pub const DEFAULT_BASE_URL: &str = "https://www.pennnationalinsurance.com/";

/// Browser-like identification sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Site-Scribe
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// The site root; its authority bounds the crawl
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Number of fetches allowed in flight at once
    #[serde(default = "default_workers")]
    pub workers: u32,

    /// Minimum spacing between any two requests (milliseconds)
    #[serde(rename = "polite-delay-ms", default = "default_polite_delay_ms")]
    pub polite_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Extensions that mark a URL as a binary asset
    #[serde(rename = "excluded-extensions", default = "default_excluded_extensions")]
    pub excluded_extensions: Vec<String>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Full `User-Agent` header value
    #[serde(default = "default_user_agent")]
    pub value: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving one text file per page
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Prefix of every generated filename
    #[serde(rename = "site-tag", default = "default_site_tag")]
    pub site_tag: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            workers: default_workers(),
            polite_delay_ms: default_polite_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            excluded_extensions: default_excluded_extensions(),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: default_user_agent(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            site_tag: default_site_tag(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_workers() -> u32 {
    1
}

fn default_polite_delay_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_excluded_extensions() -> Vec<String> {
    ["pdf", "jpg", "jpeg", "png", "gif"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_directory() -> String {
    "scraped_pages".to_string()
}

fn default_site_tag() -> String {
    "penn".to_string()
}

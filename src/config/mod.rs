pub mod tables;

use crate::cli::Args;
use crate::error::ChefError;
use std::time::Duration;
use url::Url;

pub use tables::{ TableNames, TableNaming };

pub const DEFAULT_API_URL: &str = "https://haix.ai/api";
pub const DEFAULT_CONVERSATION_TITLE: &str = "New Cooking Chat";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub tables: TableNames,
    pub request_timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: &str, naming: &TableNaming, request_timeout: Duration) -> Result<Self, ChefError> {
        let parsed = Url::parse(base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ChefError::Config(format!("unsupported scheme '{}' in {}", parsed.scheme(), base_url)));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tables: naming.resolve()?,
            request_timeout,
        })
    }

    pub fn from_args(args: &Args) -> Result<Self, ChefError> {
        Self::new(
            &args.api_url,
            &TableNaming::from_option(args.table_suffix.clone()),
            Duration::from_secs(args.request_timeout_secs)
        )
    }

    pub fn endpoint(&self, route: &str) -> String {
        format!("{}/{}", self.base_url, route.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed() -> TableNaming {
        TableNaming::Fixed("t1".into())
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let cfg = ApiConfig::new("http://localhost:8080/api/", &fixed(), Duration::from_secs(5)).unwrap();
        assert_eq!(cfg.endpoint("/ai/chef/ask"), "http://localhost:8080/api/ai/chef/ask");
        assert_eq!(cfg.endpoint("conversations_t1"), "http://localhost:8080/api/conversations_t1");
    }

    #[test]
    fn rejects_unparseable_or_non_http_urls() {
        assert!(matches!(
            ApiConfig::new("not a url", &fixed(), Duration::from_secs(5)),
            Err(ChefError::Config(_))
        ));
        assert!(ApiConfig::new("ftp://example.com", &fixed(), Duration::from_secs(5)).is_err());
    }
}

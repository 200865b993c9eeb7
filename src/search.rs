//! Web search provider: DuckDuckGo HTML scraping.

use async_trait::async_trait;
use serde::Serialize;

/// Maximum number of results returned for one query.
const MAX_RESULTS: usize = 10;

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub excerpt: String,
}

/// Provider of web search results.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a search and return up to ten results, best first.
    async fn search(&self, query: &str) -> anyhow::Result<Vec<SearchResult>>;
}

/// DuckDuckGo HTML search (no API key needed).
pub struct DuckDuckGoSearch {
    http: reqwest::Client,
}

impl DuckDuckGoSearch {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for DuckDuckGoSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    async fn search(&self, query: &str) -> anyhow::Result<Vec<SearchResult>> {
        let encoded_query = urlencoding::encode(query);
        let url = format!("https://html.duckduckgo.com/html/?q={}", encoded_query);

        let response = self
            .http
            .get(&url)
            .header(
                reqwest::header::USER_AGENT,
                "Mozilla/5.0 (compatible; Modelref/1.0)",
            )
            .timeout(std::time::Duration::from_secs(30))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("search request returned HTTP {}", status);
        }

        let html = response.text().await?;
        Ok(extract_ddg_results(&html))
    }
}

/// Extract search results from DuckDuckGo HTML.
fn extract_ddg_results(html: &str) -> Vec<SearchResult> {
    let mut results = Vec::new();

    for chunk in html.split("class=\"result__body\"").skip(1) {
        if results.len() >= MAX_RESULTS {
            break;
        }

        let title = chunk
            .split("class=\"result__a\"")
            .nth(1)
            .and_then(|s| s.split('>').nth(1))
            .and_then(|s| s.split('<').next())
            .unwrap_or("");

        let excerpt = chunk
            .split("class=\"result__snippet\"")
            .nth(1)
            .and_then(|s| s.split('>').nth(1))
            .and_then(|s| s.split('<').next())
            .unwrap_or("");

        if !title.is_empty() {
            results.push(SearchResult {
                title: html_decode(title),
                excerpt: html_decode(excerpt),
            });
        }
    }

    results
}

/// Basic HTML entity decoding.
fn html_decode(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}

//! DuckDuckGo HTML search provider.

use super::SearchProvider;
use crate::config::WebSearchSettings;
use crate::error::{KursError, Result};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Returned when a query yields no snippets.
pub const NO_RESULTS: &str = "No good DuckDuckGo Search Result was found";

const ENDPOINT: &str = "https://html.duckduckgo.com/html/";
const USER_AGENT: &str = concat!("kurs/", env!("CARGO_PKG_VERSION"));

/// Scrapes result snippets from the DuckDuckGo HTML endpoint.
pub struct DuckDuckGoProvider {
    client: Client,
    region: String,
    max_results: usize,
    snippet_selector: Selector,
}

impl DuckDuckGoProvider {
    pub fn from_settings(settings: &WebSearchSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        let snippet_selector = Selector::parse(".result__snippet")
            .map_err(|e| KursError::Config(format!("Invalid snippet selector: {}", e)))?;

        Ok(Self {
            client,
            region: settings.region.clone(),
            max_results: settings.max_results,
            snippet_selector,
        })
    }

    fn search_url(&self, query: &str) -> Result<Url> {
        Url::parse_with_params(ENDPOINT, &[("q", query), ("kl", self.region.as_str())])
            .map_err(|e| KursError::WebSearch(format!("Invalid search URL: {}", e)))
    }

    /// Pull plain-text snippets out of a result page.
    fn extract_snippets(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let snippets = document
            .select(&self.snippet_selector)
            .map(|element| element.text().collect::<String>())
            .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|s| !s.is_empty())
            .take(self.max_results)
            .collect();
        snippets
    }

    fn digest(&self, html: &str) -> String {
        let snippets = self.extract_snippets(html);
        if snippets.is_empty() {
            NO_RESULTS.to_string()
        } else {
            snippets.join(" ")
        }
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<String> {
        let url = self.search_url(query)?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(KursError::WebSearch(format!(
                "DuckDuckGo returned HTTP {}",
                status
            )));
        }

        let html = response.text().await?;
        let digest = self.digest(&html);
        debug!("Web search digest: {}", digest.chars().take(200).collect::<String>());
        Ok(digest)
    }

    fn name(&self) -> &str {
        "duckduckgo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULT_PAGE: &str = r#"
<div class="result results_links">
  <h2 class="result__title"><a class="result__a" href="https://example.com/a">Seed Store</a></h2>
  <a class="result__snippet" href="https://example.com/a">Buy <b>vegetable seeds</b> in Whitefield &amp; Marathahalli.</a>
</div>
<div class="result results_links">
  <a class="result__snippet" href="https://example.com/b">Nursery open daily, &quot;organic&quot; range.</a>
</div>
<div class="result results_links">
  <a class="result__snippet" href="https://example.com/c">Third result.</a>
</div>
"#;

    fn provider(max_results: usize) -> DuckDuckGoProvider {
        DuckDuckGoProvider::from_settings(&WebSearchSettings {
            max_results,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_extracts_and_cleans_snippets() {
        let snippets = provider(5).extract_snippets(RESULT_PAGE);
        assert_eq!(
            snippets,
            vec![
                "Buy vegetable seeds in Whitefield & Marathahalli.",
                "Nursery open daily, \"organic\" range.",
                "Third result.",
            ]
        );
    }

    #[test]
    fn test_digest_respects_max_results() {
        let digest = provider(2).digest(RESULT_PAGE);
        assert_eq!(
            digest,
            "Buy vegetable seeds in Whitefield & Marathahalli. Nursery open daily, \"organic\" range."
        );
    }

    #[test]
    fn test_decodes_numeric_and_named_entities() {
        let page = r#"<a class="result__snippet" href="https://example.com/m">Farmer&#8217;s market &hellip; open &mdash; daily</a>"#;
        assert_eq!(
            provider(5).digest(page),
            "Farmer\u{2019}s market \u{2026} open \u{2014} daily"
        );
    }

    #[test]
    fn test_snippet_in_table_cell() {
        let page = r#"<table><tr><td class="result__snippet">Seeds <b>&amp;</b> saplings</td></tr></table>"#;
        assert_eq!(provider(5).digest(page), "Seeds & saplings");
    }

    #[test]
    fn test_empty_page_reports_no_results() {
        assert_eq!(provider(5).digest("<html><body>No results.</body></html>"), NO_RESULTS);
    }

    #[test]
    fn test_search_url_carries_query_and_region() {
        let url = provider(5).search_url("seeds in Whitefield").unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "seeds in Whitefield".to_string()),
                ("kl".to_string(), "wt-wt".to_string()),
            ]
        );
    }
}

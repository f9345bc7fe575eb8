// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Confluence REST API client.

use std::sync::LazyLock;
use std::time::Duration;

use helpline_core::HelplineError;
use helpline_tools::SearchResult;
use regex::Regex;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

/// Characters kept in a search excerpt before the trailing `...`.
const EXCERPT_CHARS: usize = 200;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Removes every `<...>` tag, leaving text and entities untouched.
pub fn strip_html(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// Tag-stripped text cut to 200 characters, always followed by `...`.
pub fn excerpt(html: &str) -> String {
    let text: String = strip_html(html).chars().take(EXCERPT_CHARS).collect();
    format!("{text}...")
}

/// Connection settings read from the environment.
#[derive(Clone)]
pub struct ConfluenceCredentials {
    /// Wiki root, e.g. `https://example.atlassian.net/wiki`. No trailing slash.
    pub base_url: String,
    pub username: String,
    pub api_token: SecretString,
    /// Restricts searches to one space key.
    pub space: Option<String>,
}

impl std::fmt::Debug for ConfluenceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfluenceCredentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("api_token", &"[REDACTED]")
            .field("space", &self.space)
            .finish()
    }
}

impl ConfluenceCredentials {
    pub const BASE_URL_VAR: &'static str = "CONFLUENCE_BASE_URL";
    pub const USERNAME_VAR: &'static str = "ATLASSIAN_USERNAME";
    pub const TOKEN_VAR: &'static str = "ATLASSIAN_API_TOKEN";
    pub const SPACE_VAR: &'static str = "CONFLUENCE_SPACE";

    /// Reads credentials from the process environment.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads credentials through `lookup`. Any blank required value yields `None`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Some(Self {
            base_url: get(Self::BASE_URL_VAR)?.trim_end_matches('/').to_string(),
            username: get(Self::USERNAME_VAR)?,
            api_token: SecretString::from(get(Self::TOKEN_VAR)?),
            space: get(Self::SPACE_VAR),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ContentItem>,
}

#[derive(Debug, Deserialize)]
struct ContentItem {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: Option<ContentBody>,
    #[serde(rename = "_links", default)]
    links: Links,
}

impl ContentItem {
    fn html(&self) -> &str {
        self.body
            .as_ref()
            .and_then(|b| b.view.as_ref())
            .map(|v| v.value.as_str())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ContentBody {
    #[serde(default)]
    view: Option<BodyView>,
}

#[derive(Debug, Deserialize)]
struct BodyView {
    #[serde(default)]
    value: String,
}

#[derive(Debug, Default, Deserialize)]
struct Links {
    #[serde(default)]
    webui: Option<String>,
}

/// Authenticated client for `/rest/api/content`.
#[derive(Debug, Clone)]
pub struct ConfluenceClient {
    client: reqwest::Client,
    credentials: ConfluenceCredentials,
}

impl ConfluenceClient {
    pub fn new(credentials: ConfluenceCredentials) -> Result<Self, HelplineError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| HelplineError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            credentials,
        })
    }

    /// CQL site search, optionally limited to the configured space.
    pub fn cql(&self, query: &str) -> String {
        let quoted = query.replace('\\', "\\\\").replace('"', "\\\"");
        match &self.credentials.space {
            Some(space) => format!("siteSearch ~ \"{quoted}\" and space = \"{space}\""),
            None => format!("siteSearch ~ \"{quoted}\""),
        }
    }

    /// Documents matching `query`, most relevant first.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, HelplineError> {
        let url = self.url(
            "rest/api/content/search",
            &[("cql", self.cql(query).as_str()), ("expand", "body.view")],
        )?;
        let response: SearchResponse = self.get_json(url).await?;
        debug!(hits = response.results.len(), "confluence search complete");

        Ok(response
            .results
            .into_iter()
            .map(|item| SearchResult {
                url: format!(
                    "{}{}",
                    self.credentials.base_url,
                    item.links.webui.as_deref().unwrap_or_default()
                ),
                excerpt: excerpt(item.html()),
                id: item.id,
                title: item.title,
            })
            .collect())
    }

    /// Tag-stripped body of page `page_id`.
    pub async fn page_content(&self, page_id: &str) -> Result<String, HelplineError> {
        if page_id.is_empty() || !page_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(HelplineError::RemoteApi {
                message: format!("invalid page ID: {page_id:?}"),
                source: None,
            });
        }
        let url = self.url(
            &format!("rest/api/content/{page_id}"),
            &[("expand", "body.view")],
        )?;
        let item: ContentItem = self.get_json(url).await?;
        Ok(strip_html(item.html()))
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, HelplineError> {
        Url::parse_with_params(&format!("{}/{path}", self.credentials.base_url), params)
            .map_err(|e| HelplineError::Config(format!("invalid Confluence base URL: {e}")))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, HelplineError> {
        let response = self
            .client
            .get(url)
            .basic_auth(
                &self.credentials.username,
                Some(self.credentials.api_token.expose_secret()),
            )
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| HelplineError::RemoteApi {
                message: format!("request to Confluence failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HelplineError::RemoteApi {
                message: format!("Request failed with status code {}", status.as_u16()),
                source: None,
            });
        }

        response.json().await.map_err(|e| HelplineError::RemoteApi {
            message: format!("unexpected Confluence response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

//! Prismic REST API v2 client
//!
//! Every search is pinned to the repository's current master ref, read from
//! the API root before the search is issued. Follow-up pages are fetched from
//! the literal `next_page` URL the API returned.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::post::{ApiPage, PostDetail, PostDetailData, PostSummaryData};
use super::source::{ContentSource, Predicate, Query};
use crate::config::ApiConfig;
use crate::error::ContentError;

/// API root metadata, only the refs are read
#[derive(Debug, Deserialize)]
struct ApiInfo {
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}

/// Content source backed by a Prismic repository
pub struct PrismicClient {
    client: Client,
    endpoint: Url,
    access_token: Option<String>,
}

impl PrismicClient {
    /// Create a client for `endpoint` with a 30 second request timeout
    ///
    /// # Errors
    ///
    /// Returns `ContentError::InvalidUrl` if the endpoint is empty or not an
    /// absolute URL, `ContentError::Network` if the HTTP client cannot be built
    pub fn new(endpoint: &str, access_token: Option<String>) -> Result<Self, ContentError> {
        Self::with_timeout(endpoint, access_token, Duration::from_secs(30))
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(
        endpoint: &str,
        access_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ContentError> {
        if endpoint.trim().is_empty() {
            return Err(ContentError::InvalidUrl(
                "api.endpoint is not configured".to_string(),
            ));
        }

        let endpoint = Url::parse(endpoint.trim_end_matches('/'))
            .map_err(|e| ContentError::InvalidUrl(format!("{}: {}", endpoint, e)))?;

        let client = Client::builder().timeout(timeout).gzip(true).build()?;

        Ok(Self {
            client,
            endpoint,
            access_token,
        })
    }

    /// Create a client from the `api` section of the site config
    pub fn from_config(api: &ApiConfig) -> Result<Self, ContentError> {
        Self::new(&api.endpoint, api.access_token.clone())
    }

    fn search_url(&self) -> String {
        format!(
            "{}/documents/search",
            self.endpoint.as_str().trim_end_matches('/')
        )
    }

    fn with_token(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.query(&[("access_token", token)]),
            None => request,
        }
    }

    /// Read the current master ref from the API root
    async fn master_ref(&self) -> Result<String, ContentError> {
        let request = self.with_token(self.client.get(self.endpoint.clone()));
        let info: ApiInfo = send_json(request).await?;

        info.refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
            .ok_or_else(|| ContentError::Api {
                status: 200,
                body: "API root lists no master ref".to_string(),
            })
    }

    async fn search<D: DeserializeOwned>(&self, query: &Query) -> Result<ApiPage<D>, ContentError> {
        let master_ref = self.master_ref().await?;

        let mut params: Vec<(&str, String)> = vec![
            ("ref", master_ref),
            ("q", query.predicate_string()),
        ];
        if !query.fetch.is_empty() {
            params.push(("fetch", query.fetch.join(",")));
        }
        if let Some(size) = query.page_size {
            params.push(("pageSize", size.to_string()));
        }

        tracing::debug!("Prismic search q={}", query.predicate_string());
        let request = self.with_token(self.client.get(self.search_url()).query(&params));
        send_json(request).await
    }

    /// Reject cursors that point anywhere but the configured API host
    fn check_origin(&self, url: &Url) -> Result<(), ContentError> {
        let same = url.scheme() == self.endpoint.scheme()
            && url.host_str() == self.endpoint.host_str()
            && url.port_or_known_default() == self.endpoint.port_or_known_default();
        if same {
            Ok(())
        } else {
            Err(ContentError::InvalidUrl(format!(
                "{} is not on the content API host",
                url
            )))
        }
    }
}

#[async_trait]
impl ContentSource for PrismicClient {
    async fn query(&self, query: &Query) -> Result<ApiPage<PostSummaryData>, ContentError> {
        self.search(query).await
    }

    async fn fetch_page(&self, url: &str) -> Result<ApiPage<PostSummaryData>, ContentError> {
        let parsed =
            Url::parse(url).map_err(|e| ContentError::InvalidUrl(format!("{}: {}", url, e)))?;
        self.check_origin(&parsed)?;

        tracing::debug!("Fetching next page: {}", url);
        send_json(self.client.get(parsed)).await
    }

    async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<PostDetail, ContentError> {
        let query = Query::new(vec![Predicate::uid(doc_type, uid)]).page_size(1);
        let page: ApiPage<PostDetailData> = self.search(&query).await?;

        page.results
            .into_iter()
            .next()
            .ok_or_else(|| ContentError::NotFound {
                doc_type: doc_type.to_string(),
                uid: uid.to_string(),
            })
    }
}

/// Send a request and decode a JSON body, mapping non-2xx to `Api`
async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ContentError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ContentError::Api {
            status: status.as_u16(),
            body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

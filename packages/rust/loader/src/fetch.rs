//! Resource fetching primitives and transport collaborators.

use std::future::Future;
use std::path::PathBuf;

use chrono::Utc;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use docindex_shared::{DocIndexError, Result};

/// User-Agent string for document requests.
const USER_AGENT: &str = concat!("docindex/", env!("CARGO_PKG_VERSION"));

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// FetchedResource
// ---------------------------------------------------------------------------

/// A fetched resource, shaped by the response content type.
///
/// JSON-typed responses arrive parsed; anything else is handed through as
/// raw text for conversion.
#[derive(Debug, Clone)]
pub enum FetchedResource {
    Json(serde_json::Value),
    Text(String),
}

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

/// Transport collaborator: resolves a urlpath to resource content.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedResource>> + Send;
}

/// HTTP transport backed by `reqwest`, with an optional base URL that
/// relative urlpaths resolve against (the manifest's own location).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base: Option<Url>,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base: None,
        })
    }

    /// Resolve relative urlpaths against this base.
    pub fn with_base(mut self, base: Url) -> Self {
        self.base = Some(base);
        self
    }

    fn resolve(&self, url: &str) -> Result<Url> {
        let resolved = match &self.base {
            Some(base) => base.join(url),
            None => Url::parse(url),
        };
        resolved.map_err(|e| DocIndexError::Fetch(format!("{url}: not a fetchable URL: {e}")))
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResource> {
        let resolved = self.resolve(url)?;
        fetch_resource(&self.client, resolved.as_str()).await
    }
}

/// Local-tree transport: urlpaths resolve against a base directory.
///
/// Any cache-busting query suffix is stripped before path resolution, since
/// file paths carry no query. `.json` files arrive parsed, mirroring the
/// HTTP content-type distinction.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    base: PathBuf,
}

impl FileFetcher {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl Fetcher for FileFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResource> {
        let path_part = url.split('?').next().unwrap_or(url);
        let path = self.base.join(path_part);
        debug!(path = %path.display(), "reading local document");

        let content = std::fs::read_to_string(&path)
            .map_err(|e| DocIndexError::Fetch(format!("{}: {e}", path.display())))?;

        if content.is_empty() {
            return Err(DocIndexError::Load(format!(
                "{}: empty document",
                path.display()
            )));
        }

        if path.extension().is_some_and(|ext| ext == "json") {
            let value = serde_json::from_str(&content).map_err(|e| {
                DocIndexError::Fetch(format!("{}: invalid JSON: {e}", path.display()))
            })?;
            return Ok(FetchedResource::Json(value));
        }

        Ok(FetchedResource::Text(content))
    }
}

// ---------------------------------------------------------------------------
// Fetch primitives
// ---------------------------------------------------------------------------

/// Build a reqwest client with appropriate settings.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .map_err(|e| DocIndexError::Fetch(format!("failed to build HTTP client: {e}")))
}

/// Append a millisecond-timestamp query parameter to defeat client caching.
pub fn cache_busted(url: &str) -> String {
    let ms = Utc::now().timestamp_millis();
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}t={ms}")
}

/// GET a resource, distinguishing JSON responses from raw text.
///
/// Non-success statuses are fetch errors; a successful response with an
/// empty text body is a load error. No retries, no fallback.
#[instrument(skip(client))]
pub async fn fetch_resource(client: &Client, url: &str) -> Result<FetchedResource> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| DocIndexError::Fetch(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DocIndexError::Fetch(format!("{url}: HTTP {status}")));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if content_type.contains("json") {
        let value = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| DocIndexError::Fetch(format!("{url}: invalid JSON body: {e}")))?;
        debug!(%url, "fetched JSON resource");
        return Ok(FetchedResource::Json(value));
    }

    let body = response
        .text()
        .await
        .map_err(|e| DocIndexError::Fetch(format!("{url}: failed to read body: {e}")))?;

    if body.is_empty() {
        return Err(DocIndexError::Load(format!("{url}: empty document")));
    }

    debug!(%url, bytes = body.len(), "fetched text resource");
    Ok(FetchedResource::Text(body))
}

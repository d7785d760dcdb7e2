//! Object storage URL resolution (REST API, no SDK dependency)

use std::time::Duration;

use serde::Deserialize;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const PUBLIC_OBJECT_PATH: &str = "/storage/v1/object/public";

fn is_absolute(src: &str) -> bool {
    let lower = src.get(..8).unwrap_or(src).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Public URL for a stored value
///
/// Blank → `None`; absolute or protocol-relative URLs pass through; a
/// `/storage...` path gets the base URL prepended; anything else is taken
/// as a path inside the public `bucket`.
pub fn resolve_public_url(base_url: &str, src: &str, bucket: &str) -> Option<String> {
    let trimmed = src.trim();
    if trimmed.is_empty() {
        return None;
    }
    if is_absolute(trimmed) || trimmed.starts_with("//") {
        return Some(trimmed.to_string());
    }
    let base = base_url.trim_end_matches('/');
    if trimmed.starts_with("/storage") {
        return Some(format!("{base}{trimmed}"));
    }
    Some(format!("{base}{PUBLIC_OBJECT_PATH}/{bucket}/{trimmed}"))
}

/// What a signed URL can be requested for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectRef {
    /// Absolute URL outside the bucket; served as-is
    External(String),
    /// Object path inside the bucket
    Path(String),
}

pub fn object_ref(src: &str, bucket: &str) -> Option<ObjectRef> {
    let trimmed = src.trim();
    if trimmed.is_empty() {
        return None;
    }
    let marker = format!("{PUBLIC_OBJECT_PATH}/{bucket}/");
    if let Some(pos) = trimmed.find(&marker) {
        let path = &trimmed[pos + marker.len()..];
        return (!path.is_empty()).then(|| ObjectRef::Path(path.to_string()));
    }
    if is_absolute(trimmed) {
        return Some(ObjectRef::External(trimmed.to_string()));
    }
    Some(ObjectRef::Path(trimmed.trim_start_matches('/').to_string()))
}

#[derive(Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL")]
    signed_url: String,
}

#[derive(Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    pub default_bucket: String,
    signed_url_ttl: Duration,
}

impl StorageClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        default_bucket: impl Into<String>,
        signed_url_ttl: Duration,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            default_bucket: default_bucket.into(),
            signed_url_ttl,
        }
    }

    pub fn public_url(&self, src: &str, bucket: Option<&str>) -> Option<String> {
        resolve_public_url(&self.base_url, src, bucket.unwrap_or(&self.default_bucket))
    }

    /// Public URL if it loads, otherwise a short-lived signed URL
    pub async fn resolve_with_fallback(&self, src: &str, bucket: Option<&str>) -> Option<String> {
        let bucket = bucket.unwrap_or(&self.default_bucket);
        let public = resolve_public_url(&self.base_url, src, bucket)?;
        if self.is_reachable(&public).await {
            return Some(public);
        }

        match object_ref(src, bucket)? {
            ObjectRef::External(url) => Some(url),
            ObjectRef::Path(path) => match self.create_signed_url(bucket, &path).await {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::warn!(bucket, path = %path, error = %e, "Signed URL request failed");
                    None
                }
            },
        }
    }

    async fn is_reachable(&self, url: &str) -> bool {
        match self.http.head(url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::debug!(url, error = %e, "Public object not reachable");
                false
            }
        }
    }

    async fn create_signed_url(&self, bucket: &str, path: &str) -> Result<String, BoxError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or("STORAGE_API_KEY is not configured")?;
        let endpoint = format!("{}/storage/v1/object/sign/{bucket}/{path}", self.base_url);

        let resp = self
            .http
            .post(&endpoint)
            .header("apikey", api_key)
            .bearer_auth(api_key)
            .json(&serde_json::json!({ "expiresIn": self.signed_url_ttl.as_secs() }))
            .send()
            .await?
            .error_for_status()?;
        let body: SignResponse = resp.json().await?;

        Ok(format!("{}/storage/v1{}", self.base_url, body.signed_url))
    }
}

//! Supabase REST and Storage client.

use async_trait::async_trait;
use reqwest::{Client, Request, RequestBuilder, Response, Url, header::CONTENT_TYPE};
use tracing::{debug, warn};

use crate::{
    backend::{BackendError, CertificateBackend, SupabaseConfig},
    domain::certificates::{
        data::{NewCertificate, SearchField, SearchTerm},
        records::{CertificateRecord, CertificateUuid},
    },
};

const SELECT_ALL_COLUMNS: (&str, &str) = ("select", "*");
const NEWEST_FIRST: (&str, &str) = ("order", "created_at.desc");

/// Largest object body read back from the bucket.
pub const MAX_OBJECT_BYTES: u64 = 10 * 1024 * 1024;

/// HTTP client for the hosted certificates table and image bucket.
#[derive(Debug, Clone)]
pub struct SupabaseBackend {
    config: SupabaseConfig,
    http: Client,
}

impl SupabaseBackend {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: SupabaseConfig) -> Result<Self, BackendError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.config.url, self.config.table)
    }

    fn object_url(&self, name: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{name}",
            self.config.url, self.config.bucket
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
    }

    pub(crate) fn insert_request(&self, certificate: &NewCertificate) -> Result<Request, BackendError> {
        Ok(self
            .authorized(self.http.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&[certificate])
            .build()?)
    }

    pub(crate) fn select_by_id_request(&self, id: CertificateUuid) -> Result<Request, BackendError> {
        let filter = format!("eq.{id}");

        Ok(self
            .authorized(self.http.get(self.table_url()))
            .query(&[SELECT_ALL_COLUMNS, ("id", filter.as_str())])
            .build()?)
    }

    pub(crate) fn select_all_request(&self) -> Result<Request, BackendError> {
        Ok(self
            .authorized(self.http.get(self.table_url()))
            .query(&[SELECT_ALL_COLUMNS, NEWEST_FIRST])
            .build()?)
    }

    pub(crate) fn select_matching_request(
        &self,
        field: SearchField,
        term: &SearchTerm,
    ) -> Result<Request, BackendError> {
        let pattern = format!("ilike.*{}*", escape_like(term.as_str()));

        Ok(self
            .authorized(self.http.get(self.table_url()))
            .query(&[
                SELECT_ALL_COLUMNS,
                (field.column(), pattern.as_str()),
                NEWEST_FIRST,
            ])
            .build()?)
    }

    pub(crate) fn delete_request(&self, id: CertificateUuid) -> Result<Request, BackendError> {
        let filter = format!("eq.{id}");

        Ok(self
            .authorized(self.http.delete(self.table_url()))
            .query(&[("id", filter.as_str())])
            .build()?)
    }

    pub(crate) fn upload_request(
        &self,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Request, BackendError> {
        Ok(self
            .authorized(self.http.post(self.object_url(name)))
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .build()?)
    }

    /// Object reads go to the public bucket only; the URL is parsed first so
    /// dot segments cannot climb out of it.
    pub(crate) fn download_request(&self, url: &str) -> Result<Request, BackendError> {
        let bucket = self.public_url("");

        let url = Url::parse(url)
            .ok()
            .filter(|parsed| parsed.as_str().starts_with(&bucket))
            .ok_or_else(|| BackendError::ForeignObject(url.to_string()))?;

        Ok(self.http.get(url).build()?)
    }

    async fn execute(&self, request: Request) -> Result<Response, BackendError> {
        debug!(method = %request.method(), url = %request.url(), "backend request");

        let response = self.http.execute(request).await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(BackendError::UnexpectedResponse(format!(
                "request failed with status {status}: {text}"
            )));
        }

        Ok(response)
    }

    async fn fetch_rows(&self, request: Request) -> Result<Vec<CertificateRecord>, BackendError> {
        Ok(self.execute(request).await?.json().await?)
    }
}

#[async_trait]
impl CertificateBackend for SupabaseBackend {
    async fn insert(&self, certificate: &NewCertificate) -> Result<CertificateRecord, BackendError> {
        let request = self.insert_request(certificate)?;

        self.fetch_rows(request)
            .await?
            .into_iter()
            .next()
            .ok_or(BackendError::EmptyResponse)
    }

    async fn select_by_id(
        &self,
        id: CertificateUuid,
    ) -> Result<Option<CertificateRecord>, BackendError> {
        let request = self.select_by_id_request(id)?;

        Ok(self.fetch_rows(request).await?.into_iter().next())
    }

    async fn select_all(&self) -> Result<Vec<CertificateRecord>, BackendError> {
        let request = self.select_all_request()?;

        self.fetch_rows(request).await
    }

    async fn select_matching(
        &self,
        field: SearchField,
        term: &SearchTerm,
    ) -> Result<Vec<CertificateRecord>, BackendError> {
        let request = self.select_matching_request(field, term)?;

        self.fetch_rows(request).await
    }

    async fn delete_by_id(&self, id: CertificateUuid) -> Result<(), BackendError> {
        let request = self.delete_request(id)?;

        self.execute(request).await?;

        Ok(())
    }

    async fn upload_object(
        &self,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), BackendError> {
        let request = self.upload_request(name, content_type, bytes)?;

        self.execute(request).await?;

        Ok(())
    }

    async fn download_object(&self, url: &str) -> Result<Vec<u8>, BackendError> {
        let request = self.download_request(url).inspect_err(|error| warn!("{error}"))?;

        read_capped(self.execute(request).await?, MAX_OBJECT_BYTES).await
    }

    fn public_url(&self, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{name}",
            self.config.url, self.config.bucket
        )
    }
}

async fn read_capped(mut response: Response, limit: u64) -> Result<Vec<u8>, BackendError> {
    if response.content_length().is_some_and(|length| length > limit) {
        return Err(BackendError::ObjectTooLarge { limit });
    }

    let mut body = Vec::new();

    while let Some(chunk) = response.chunk().await? {
        let length = u64::try_from(body.len().saturating_add(chunk.len())).unwrap_or(u64::MAX);

        if length > limit {
            return Err(BackendError::ObjectTooLarge { limit });
        }

        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

/// Escape `ilike` wildcards so `%` and `_` match themselves.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }

        escaped.push(c);
    }

    escaped
}

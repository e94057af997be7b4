//! Backend connection settings.

use std::time::Duration;

/// Default table and bucket name.
pub const DEFAULT_CERTIFICATES_RESOURCE: &str = "certificates";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for connecting to the hosted backend.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `"https://abc.supabase.co"`.
    pub url: String,

    /// Anonymous access key.
    pub anon_key: String,

    /// Table holding certificate rows.
    pub table: String,

    /// Public bucket holding uploaded images.
    pub bucket: String,

    /// Upper bound for any single backend request.
    pub timeout: Duration,
}

impl SupabaseConfig {
    /// Build a configuration with default table, bucket and timeout.
    #[must_use]
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            table: DEFAULT_CERTIFICATES_RESOURCE.to_string(),
            bucket: DEFAULT_CERTIFICATES_RESOURCE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build a configuration only when both the URL and key are present and
    /// non-blank.
    #[must_use]
    pub fn from_parts(url: Option<String>, anon_key: Option<String>) -> Option<Self> {
        let url = url.filter(|url| !url.trim().is_empty())?;
        let anon_key = anon_key.filter(|key| !key.trim().is_empty())?;

        Some(Self::new(url.trim().trim_end_matches('/'), anon_key.trim()))
    }
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .field("table", &self.table)
            .field("bucket", &self.bucket)
            .field("timeout", &self.timeout)
            .finish()
    }
}

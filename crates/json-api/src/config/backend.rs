//! Backend Config

use std::time::Duration;

use clap::Args;

use healthcert_app::backend::{DEFAULT_CERTIFICATES_RESOURCE, SupabaseConfig};

/// Hosted backend settings. Storage features are disabled unless both the
/// URL and key are set.
#[derive(Debug, Args)]
pub struct BackendConfig {
    /// Hosted backend project URL
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<String>,

    /// Hosted backend anonymous key
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub supabase_anon_key: Option<String>,

    /// Table holding certificate rows
    #[arg(long, env = "CERTIFICATES_TABLE", default_value = DEFAULT_CERTIFICATES_RESOURCE)]
    pub certificates_table: String,

    /// Public bucket holding certificate images
    #[arg(long, env = "CERTIFICATES_BUCKET", default_value = DEFAULT_CERTIFICATES_RESOURCE)]
    pub certificates_bucket: String,

    /// Per-request backend timeout in seconds
    #[arg(long, env = "BACKEND_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub backend_timeout_seconds: u64,
}

impl BackendConfig {
    /// Backend connection, if configured.
    #[must_use]
    pub fn supabase(&self) -> Option<SupabaseConfig> {
        let mut config =
            SupabaseConfig::from_parts(self.supabase_url.clone(), self.supabase_anon_key.clone())?;

        config.table.clone_from(&self.certificates_table);
        config.bucket.clone_from(&self.certificates_bucket);
        config.timeout = Duration::from_secs(self.backend_timeout_seconds);

        Some(config)
    }
}

use std::{sync::Arc, time::Duration};

use clap::Args;
use healthcert_app::{
    backend::{DEFAULT_CERTIFICATES_RESOURCE, SupabaseBackend, SupabaseConfig},
    domain::certificates::StoreCertificatesService,
};

#[derive(Debug, Args)]
pub(crate) struct BackendArgs {
    /// Hosted backend project URL
    #[arg(long, env = "SUPABASE_URL")]
    supabase_url: String,

    /// Anonymous access key
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    supabase_anon_key: String,

    /// Table holding certificate rows
    #[arg(long, env = "CERTIFICATES_TABLE", default_value = DEFAULT_CERTIFICATES_RESOURCE)]
    table: String,

    /// Bucket holding certificate images
    #[arg(long, env = "CERTIFICATES_BUCKET", default_value = DEFAULT_CERTIFICATES_RESOURCE)]
    bucket: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "BACKEND_TIMEOUT_SECONDS", default_value_t = 10)]
    timeout_seconds: u64,
}

impl BackendArgs {
    pub(crate) fn service(self) -> Result<StoreCertificatesService, String> {
        let mut config = SupabaseConfig::from_parts(Some(self.supabase_url), Some(self.supabase_anon_key))
            .ok_or_else(|| "SUPABASE_URL and SUPABASE_ANON_KEY must not be blank".to_string())?;

        config.table = self.table;
        config.bucket = self.bucket;
        config.timeout = Duration::from_secs(self.timeout_seconds);

        let backend = SupabaseBackend::new(config)
            .map_err(|error| format!("failed to build backend client: {error}"))?;

        Ok(StoreCertificatesService::new(Some(Arc::new(backend))))
    }
}

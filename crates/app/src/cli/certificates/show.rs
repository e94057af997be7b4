use clap::Args;
use healthcert_app::domain::certificates::{CertificatesService, records::CertificateUuid};

use crate::cli::backend::BackendArgs;

#[derive(Debug, Args)]
pub(crate) struct ShowCertificateArgs {
    /// Certificate UUID
    id: CertificateUuid,

    #[command(flatten)]
    backend: BackendArgs,
}

pub(crate) async fn run(args: ShowCertificateArgs) -> Result<(), String> {
    let service = args.backend.service()?;

    let certificate = service
        .get_certificate(args.id)
        .await
        .map_err(|error| format!("failed to fetch certificate {}: {error}", args.id))?;

    let json = serde_json::to_string_pretty(&certificate)
        .map_err(|error| format!("failed to format certificate: {error}"))?;

    println!("{json}");

    Ok(())
}

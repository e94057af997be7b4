use clap::Args;
use healthcert_app::domain::certificates::{CertificatesService, records::CertificateUuid};

use crate::cli::backend::BackendArgs;

#[derive(Debug, Args)]
pub(crate) struct DeleteCertificateArgs {
    /// Certificate UUID
    id: CertificateUuid,

    #[command(flatten)]
    backend: BackendArgs,
}

pub(crate) async fn run(args: DeleteCertificateArgs) -> Result<(), String> {
    let service = args.backend.service()?;

    let deleted = service
        .delete_certificate(args.id)
        .await
        .map_err(|error| format!("failed to delete certificate {}: {error}", args.id))?;

    if !deleted {
        return Err(format!("backend refused to delete certificate {}", args.id));
    }

    println!("deleted: {}", args.id);

    Ok(())
}

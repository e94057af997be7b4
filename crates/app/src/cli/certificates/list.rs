use clap::Args;
use healthcert_app::domain::certificates::CertificatesService;

use crate::cli::backend::BackendArgs;

#[derive(Debug, Args)]
pub(crate) struct ListCertificatesArgs {
    #[command(flatten)]
    backend: BackendArgs,
}

pub(crate) async fn run(args: ListCertificatesArgs) -> Result<(), String> {
    let service = args.backend.service()?;
    let certificates = service.list_certificates().await;

    if certificates.is_empty() {
        println!("no certificates found");
    }

    certificates.iter().for_each(super::print_summary);

    Ok(())
}

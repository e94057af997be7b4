use clap::{Args, ValueEnum};
use healthcert_app::domain::certificates::{CertificatesService, data::SearchField};

use crate::cli::backend::BackendArgs;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Field {
    CertificateNumber,
    IdNumber,
}

impl From<Field> for SearchField {
    fn from(field: Field) -> Self {
        match field {
            Field::CertificateNumber => Self::CertificateNumber,
            Field::IdNumber => Self::IdNumber,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct SearchCertificatesArgs {
    /// Field to match against
    #[arg(long, value_enum, default_value_t = Field::CertificateNumber)]
    field: Field,

    /// Case-insensitive partial match
    #[arg(long)]
    term: String,

    #[command(flatten)]
    backend: BackendArgs,
}

pub(crate) async fn run(args: SearchCertificatesArgs) -> Result<(), String> {
    let service = args.backend.service()?;

    let certificates = service
        .search_certificates(args.field.into(), &args.term)
        .await
        .map_err(|error| format!("search failed: {error}"))?;

    if certificates.is_empty() {
        println!("no matching certificates");
    }

    certificates.iter().for_each(super::print_summary);

    Ok(())
}

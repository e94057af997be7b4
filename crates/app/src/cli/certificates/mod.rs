use clap::{Args, Subcommand};
use healthcert_app::domain::certificates::records::CertificateRecord;

mod delete;
mod list;
mod search;
mod show;

#[derive(Debug, Args)]
pub(crate) struct CertificatesCommand {
    #[command(subcommand)]
    command: CertificatesSubcommand,
}

#[derive(Debug, Subcommand)]
enum CertificatesSubcommand {
    List(list::ListCertificatesArgs),
    Show(show::ShowCertificateArgs),
    Search(search::SearchCertificatesArgs),
    Delete(delete::DeleteCertificateArgs),
}

pub(crate) async fn run(command: CertificatesCommand) -> Result<(), String> {
    match command.command {
        CertificatesSubcommand::List(args) => list::run(args).await,
        CertificatesSubcommand::Show(args) => show::run(args).await,
        CertificatesSubcommand::Search(args) => search::run(args).await,
        CertificatesSubcommand::Delete(args) => delete::run(args).await,
    }
}

fn print_summary(certificate: &CertificateRecord) {
    println!(
        "{}\t{}\t{}\t{}\t{}",
        certificate.id,
        certificate.details.certificate_number,
        certificate.details.id_number,
        certificate.details.name,
        certificate.created_at
    );
}

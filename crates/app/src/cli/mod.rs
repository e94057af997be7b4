use clap::{Parser, Subcommand};

mod backend;
mod certificates;

#[derive(Debug, Parser)]
#[command(name = "healthcert-app", about = "Health certificate admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Certificates(certificates::CertificatesCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Certificates(command) => certificates::run(command).await,
        }
    }
}

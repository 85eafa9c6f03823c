mod args;
mod logging;
mod output;

use anyhow::{Context, Result, bail};
use mailprobe::{InputError, Verifier};
use tracing::info;

use crate::args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    output::check_format(cli.format)?;

    let config = cli.config()?;
    let addresses = match cli.input_sources().collect() {
        Ok(addresses) => addresses,
        Err(InputError::Empty) => {
            Cli::clap_command().print_help()?;
            println!();
            bail!("aucune adresse e-mail fournie");
        }
        Err(err) => return Err(err).context("lecture des adresses"),
    };
    info!(count = addresses.len(), "addresses to verify");

    let mut verifier =
        Verifier::system(&config.dns, config.smtp).context("initialisation du résolveur DNS")?;
    let results = verifier.verify_all(&addresses);

    // sortie
    output::write_reports(&results, &cli)
}

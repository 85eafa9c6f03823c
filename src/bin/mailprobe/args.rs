use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use mailprobe::{InputSources, VerifierConfig};

#[derive(Parser)]
#[command(
    name = "mailprobe",
    version,
    about = "Vérifie des adresses e-mail via DNS MX + handshake SMTP (sans envoyer de message)",
    after_help = "Exemple: mailprobe user@gmail.com admin@example.org -f liste.txt"
)]
pub struct Cli {
    /// adresses e-mail à vérifier
    pub emails: Vec<String>,

    /// fichier d'adresses (une par ligne, `#` pour commenter)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// lit des adresses depuis stdin (une par ligne)
    #[arg(long)]
    pub stdin: bool,

    /// sortie détaillée (DEBUG)
    #[arg(short, long)]
    pub verbose: bool,

    /// n'affiche que les avertissements
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// format: human|json|ndjson|csv
    #[arg(long, value_enum, default_value_t = Format::Human)]
    pub format: Format,

    /// écrit le rapport dans un fichier au lieu de stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// fichier de configuration TOML (sections [smtp] et [dns])
    #[cfg(feature = "with-config")]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// nom utilisé pour EHLO
    #[arg(long)]
    pub helo: Option<String>,

    /// enveloppe MAIL FROM (vide = `<>`)
    #[arg(long = "from")]
    pub mail_from: Option<String>,

    /// timeout par opération SMTP (ms, 0 = aucun)
    #[arg(long = "timeout-ms")]
    pub timeout_ms: Option<u64>,

    /// port SMTP
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Human,
    Json,
    Ndjson,
    Csv,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    pub fn input_sources(&self) -> InputSources {
        InputSources {
            args: self.emails.clone(),
            file: self.file.clone(),
            stdin: self.stdin,
        }
    }

    /// Fichier de config (si présent) puis options de ligne de commande,
    /// qui ont priorité.
    pub fn config(&self) -> Result<VerifierConfig> {
        let mut config = self.base_config()?;
        if let Some(helo) = &self.helo {
            config.smtp.helo_domain = helo.clone();
        }
        if let Some(from) = &self.mail_from {
            config.smtp.mail_from = from.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.smtp.timeout_ms = timeout_ms;
        }
        if let Some(port) = self.port {
            config.smtp.port = port;
        }
        Ok(config)
    }

    #[cfg(feature = "with-config")]
    fn base_config(&self) -> Result<VerifierConfig> {
        use anyhow::Context;

        match &self.config {
            Some(path) => VerifierConfig::from_path(path)
                .with_context(|| format!("chargement de la config {}", path.display())),
            None => Ok(VerifierConfig::default()),
        }
    }

    #[cfg(not(feature = "with-config"))]
    fn base_config(&self) -> Result<VerifierConfig> {
        Ok(VerifierConfig::default())
    }
}

//! Collecting the addresses to verify.
//!
//! Sources are merged in order (arguments, file, stdin) and de-duplicated
//! case-insensitively, keeping the first occurrence.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("address file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read standard input: {source}")]
    Stdin {
        #[source]
        source: io::Error,
    },
    #[error("no email addresses supplied")]
    Empty,
}

/// One address per line; blank lines and `#` comments are skipped.
pub fn parse_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        out.push(trimmed.to_string());
    }
    Ok(out)
}

pub fn read_address_file(path: &Path) -> Result<Vec<String>, InputError> {
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => InputError::NotFound {
            path: path.to_path_buf(),
        },
        _ => InputError::Read {
            path: path.to_path_buf(),
            source: err,
        },
    })?;
    parse_lines(BufReader::new(file)).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_stdin() -> Result<Vec<String>, InputError> {
    parse_lines(io::stdin().lock()).map_err(|source| InputError::Stdin { source })
}

/// Trims and lower-cases every address, dropping repeats after the first.
pub fn dedup_addresses<I, S>(addresses: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for address in addresses {
        let folded = address.as_ref().trim().to_lowercase();
        if seen.insert(folded.clone()) {
            unique.push(folded);
        }
    }
    unique
}

/// Where to collect addresses from.
#[derive(Debug, Default, Clone)]
pub struct InputSources {
    pub args: Vec<String>,
    pub file: Option<PathBuf>,
    pub stdin: bool,
}

impl InputSources {
    /// Reads every source and returns the de-duplicated batch.
    ///
    /// Fails when a named file is missing or unreadable, or when nothing at
    /// all was supplied.
    pub fn collect(&self) -> Result<Vec<String>, InputError> {
        let mut all: Vec<String> = self
            .args
            .iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        if let Some(path) = &self.file {
            all.extend(read_address_file(path)?);
        }
        if self.stdin {
            all.extend(read_stdin()?);
        }

        let unique = dedup_addresses(all);
        if unique.is_empty() {
            return Err(InputError::Empty);
        }
        Ok(unique)
    }
}

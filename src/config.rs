//! Run configuration: SMTP identity/timing and resolver knobs.
//!
//! Defaults are the fixed probe constants. With the `with-config` feature a
//! TOML file can override any of them:
//!
//! ```toml
//! [smtp]
//! helo_domain = "verify.example.org"
//! mail_from = ""            # null reverse-path
//! timeout_ms = 5000
//!
//! [dns]
//! timeout_ms = 2000
//! ```

use crate::mx::DnsOptions;
use crate::smtp_verify::SmtpProbeOptions;

#[cfg_attr(feature = "with-config", derive(serde::Deserialize))]
#[cfg_attr(feature = "with-config", serde(default, deny_unknown_fields))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifierConfig {
    pub smtp: SmtpProbeOptions,
    pub dns: DnsOptions,
}

#[cfg(feature = "with-config")]
mod file {
    use std::path::{Path, PathBuf};

    use thiserror::Error;

    use super::VerifierConfig;

    #[derive(Debug, Error)]
    pub enum ConfigError {
        #[error("cannot read config {}: {source}", path.display())]
        Read {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },
        #[error("invalid config: {source}")]
        Parse {
            #[source]
            source: toml::de::Error,
        },
    }

    impl VerifierConfig {
        pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
            toml::from_str(text).map_err(|source| ConfigError::Parse { source })
        }

        pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
            let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml_str(&text)
        }
    }
}

#[cfg(feature = "with-config")]
pub use file::ConfigError;

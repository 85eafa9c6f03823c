use thiserror::Error;

/// Host-level failures. They never leave the probe: the host is skipped and
/// the next candidate tried.
#[derive(Debug, Error)]
pub enum SmtpVerifyError {
    #[error("connection to {host} failed: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no address found for {host}")]
    NoAddress { host: String },
    #[error("I/O error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
    #[error("{host} refused the session with greeting {code}")]
    Greeting { host: String, code: u16 },
    /// A reply line that does not parse; holds the raw line.
    #[error("malformed reply: {0}")]
    Protocol(String),
}

impl SmtpVerifyError {
    pub(crate) fn connect(host: impl Into<String>, source: std::io::Error) -> Self {
        Self::Connect {
            host: host.into(),
            source,
        }
    }

    pub(crate) fn io(source: std::io::Error) -> Self {
        Self::Io { source }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Connect { source, .. } | Self::Io { source } => matches!(
                source.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            ),
            _ => false,
        }
    }
}

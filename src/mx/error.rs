use thiserror::Error;
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::op::ResponseCode;

/// Fatal resolver set-up errors. Query failures never surface as `MxError`.
#[derive(Debug, Error)]
pub enum MxError {
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: std::io::Error,
    },
}

impl MxError {
    pub(crate) fn resolver_init(source: std::io::Error) -> Self {
        Self::ResolverInit { source }
    }
}

/// Outcome of a single failed DNS query, as seen by [`DnsLookup`](super::DnsLookup).
#[derive(Debug, Error)]
pub enum LookupError {
    /// The name exists but holds no record of the requested type.
    #[error("no records found")]
    NoRecords,
    #[error("domain does not exist")]
    NxDomain,
    #[error("DNS lookup failed: {source}")]
    Failed {
        #[source]
        source: ResolveError,
    },
}

impl LookupError {
    pub fn failed(source: impl Into<ResolveError>) -> Self {
        Self::Failed {
            source: source.into(),
        }
    }
}

impl From<ResolveError> for LookupError {
    fn from(err: ResolveError) -> Self {
        match err.kind() {
            ResolveErrorKind::NoRecordsFound { response_code, .. } => {
                if *response_code == ResponseCode::NXDomain {
                    Self::NxDomain
                } else {
                    Self::NoRecords
                }
            }
            _ => Self::Failed { source: err },
        }
    }
}

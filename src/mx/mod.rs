//! DNS mail-routing resolution.
//!
//! [`DomainResolver::resolve`] looks up MX records (falling back to the A
//! record of the domain itself), orders the exchanges by preference and
//! memoizes the [`DomainResolution`] for the rest of the run.

mod cache;
mod error;
mod options;
mod resolver;
mod types;

pub use cache::ResolutionCache;
pub use error::{LookupError, MxError};
pub use options::DnsOptions;
pub use resolver::{DnsLookup, DomainResolver};
pub use types::{DomainResolution, DomainStatus, MxRecord};

//! SMTP mailbox probing.
//!
//! [`SmtpProbe::probe`] runs a minimal dialogue against the exchangers of a
//! domain and classifies the reply to `RCPT TO` into an [`SmtpStatus`].
//! The transport is pluggable through [`Connector`]; [`TcpConnector`] is the
//! real thing.

mod error;
mod options;
mod probe;
mod session;
mod types;

pub use error::SmtpVerifyError;
pub use options::SmtpProbeOptions;
pub use probe::SmtpProbe;
pub use session::{Connector, SmtpSession, TcpConnector};
pub use types::{SmtpProbeResult, SmtpReply, SmtpStatus};

#![forbid(unsafe_code)]
//! Email deliverability probing without sending mail.
//!
//! Each address goes through three stages, each one only when the previous
//! gave something usable:
//!
//! 1. format check ([`parse_email`]),
//! 2. DNS mail routing ([`DomainResolver`], MX with A fallback, cached per run),
//! 3. SMTP handshake up to `RCPT TO` ([`SmtpProbe`]).
//!
//! [`Verifier`] strings them together.

pub mod config;
pub mod input;
pub mod mx;
pub mod smtp_verify;
pub mod validator;
pub mod verify;

#[cfg(feature = "with-config")]
pub use config::ConfigError;
pub use config::VerifierConfig;
pub use input::{InputError, InputSources, dedup_addresses};
pub use mx::{
    DnsLookup, DnsOptions, DomainResolution, DomainResolver, DomainStatus, LookupError, MxError,
    MxRecord, ResolutionCache,
};
pub use smtp_verify::{
    Connector, SmtpProbe, SmtpProbeOptions, SmtpProbeResult, SmtpReply, SmtpStatus,
    SmtpVerifyError, TcpConnector,
};
pub use validator::{EmailAddress, FormatError, is_valid_format, parse_email};
pub use verify::{VerificationResult, Verifier};

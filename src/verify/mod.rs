//! Address-by-address verification: format, then DNS, then SMTP.

mod types;

pub use types::VerificationResult;

use tracing::{info, warn};
use trust_dns_resolver::Resolver;

use crate::mx::{DnsLookup, DnsOptions, DomainResolver, MxError};
use crate::smtp_verify::{Connector, SmtpProbe, SmtpProbeOptions, SmtpProbeResult, TcpConnector};
use crate::validator::parse_email;

/// Owns the per-run resolution cache and the probe configuration; one
/// `Verifier` per batch.
#[derive(Debug)]
pub struct Verifier<L = Resolver, C = TcpConnector> {
    resolver: DomainResolver<L>,
    probe: SmtpProbe<C>,
}

impl Verifier<Resolver, TcpConnector> {
    /// System DNS and plain TCP on the configured port.
    pub fn system(dns: &DnsOptions, smtp: SmtpProbeOptions) -> Result<Self, MxError> {
        Ok(Self::new(
            DomainResolver::with_options(dns)?,
            SmtpProbe::tcp(smtp),
        ))
    }
}

impl<L: DnsLookup, C: Connector> Verifier<L, C> {
    pub fn new(resolver: DomainResolver<L>, probe: SmtpProbe<C>) -> Self {
        Self { resolver, probe }
    }

    pub fn resolver(&self) -> &DomainResolver<L> {
        &self.resolver
    }

    /// Verifies one address. Each stage only runs when the previous one gave
    /// something usable; nothing here is retried.
    pub fn verify(&mut self, raw: &str) -> VerificationResult {
        let address = match parse_email(raw) {
            Ok(address) => address,
            Err(err) => {
                warn!(email = raw, error = %err, "invalid format");
                return VerificationResult::invalid(raw);
            }
        };

        info!(email = %address.full(), "verifying");
        let domain = self.resolver.resolve(&address.domain);
        if !domain.is_valid() {
            info!(
                domain = %domain.domain,
                status = domain.status.as_str(),
                "domain unusable, SMTP skipped"
            );
            return VerificationResult {
                input: raw.to_string(),
                address: Some(address),
                domain,
                smtp: SmtpProbeResult::skipped(),
            };
        }

        info!(hosts = %domain.hosts.join(", "), "mail exchangers");
        let smtp = self.probe.probe(&address.full(), &domain.hosts);
        info!(status = smtp.status.as_str(), code = smtp.code, "SMTP");

        VerificationResult {
            input: raw.to_string(),
            address: Some(address),
            domain,
            smtp,
        }
    }

    /// Verifies `addresses` one after the other, keeping their order.
    pub fn verify_all<I, S>(&mut self, addresses: I) -> Vec<VerificationResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        addresses
            .into_iter()
            .map(|address| self.verify(address.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests;

use std::net::Ipv4Addr;

use tracing::{debug, info, warn};
use trust_dns_resolver::Resolver;
use trust_dns_resolver::system_conf::read_system_conf;

use super::{DnsOptions, DomainResolution, LookupError, MxError, MxRecord, ResolutionCache};

/// DNS queries the resolver depends on. Implemented for the system
/// [`Resolver`]; tests plug in stubs.
pub trait DnsLookup {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, LookupError>;
    fn lookup_a(&self, domain: &str) -> Result<Vec<Ipv4Addr>, LookupError>;
}

impl DnsLookup for Resolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, LookupError> {
        let lookup = Resolver::mx_lookup(self, domain)?;
        Ok(lookup
            .iter()
            .map(|mx| MxRecord::new(mx.preference(), mx.exchange().to_utf8()))
            .collect())
    }

    fn lookup_a(&self, domain: &str) -> Result<Vec<Ipv4Addr>, LookupError> {
        let lookup = Resolver::ipv4_lookup(self, domain)?;
        Ok(lookup.iter().map(|a| a.0).collect())
    }
}

impl<T: DnsLookup + ?Sized> DnsLookup for &T {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, LookupError> {
        (**self).lookup_mx(domain)
    }

    fn lookup_a(&self, domain: &str) -> Result<Vec<Ipv4Addr>, LookupError> {
        (**self).lookup_a(domain)
    }
}

/// Resolves the mail routing of domains, memoizing every answer for the
/// lifetime of the resolver.
///
/// Query failures are folded into [`DomainStatus`](super::DomainStatus)
/// values; [`resolve`](Self::resolve) never fails.
#[derive(Debug)]
pub struct DomainResolver<L = Resolver> {
    lookup: L,
    cache: ResolutionCache,
}

impl DomainResolver<Resolver> {
    /// System configuration (`/etc/resolv.conf` or the platform equivalent)
    /// with the per-query timeout and attempt count taken from `options`.
    pub fn with_options(options: &DnsOptions) -> Result<Self, MxError> {
        let (config, mut opts) = read_system_conf().map_err(MxError::resolver_init)?;
        opts.timeout = options.timeout();
        opts.attempts = options.attempts.max(1);
        let resolver = Resolver::new(config, opts).map_err(MxError::resolver_init)?;
        Ok(Self::new(resolver))
    }
}

impl<L: DnsLookup> DomainResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            cache: ResolutionCache::new(),
        }
    }

    pub fn resolve(&mut self, domain: &str) -> DomainResolution {
        if let Some(hit) = self.cache.get(domain) {
            debug!(domain, status = hit.status.as_str(), "resolution cache hit");
            return hit.clone();
        }

        let resolution = resolve_uncached(&self.lookup, domain);
        self.cache.insert(resolution).clone()
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }
}

pub(crate) fn resolve_uncached<L: DnsLookup + ?Sized>(lookup: &L, domain: &str) -> DomainResolution {
    match lookup.lookup_mx(domain) {
        Ok(records) if !records.is_empty() => from_mx_records(domain, records),
        Ok(_) | Err(LookupError::NoRecords) => {
            debug!(domain, "no MX records, trying A record");
            fallback_to_a(lookup, domain)
        }
        Err(LookupError::NxDomain) => {
            debug!(domain, "NXDOMAIN");
            DomainResolution::not_found(domain)
        }
        Err(err) => {
            warn!(domain, error = %err, "MX lookup failed");
            DomainResolution::no_usable_record(domain)
        }
    }
}

fn from_mx_records(domain: &str, mut records: Vec<MxRecord>) -> DomainResolution {
    // stable: equal preferences keep the order the resolver returned
    records.sort_by_key(|r| r.preference);
    let hosts: Vec<String> = records
        .into_iter()
        .map(|r| normalize_exchange(&r.exchange))
        .filter(|host| !host.is_empty())
        .collect();

    if hosts.is_empty() {
        // RFC 7505 null MX: the domain explicitly accepts no mail.
        debug!(domain, "null MX record");
        return DomainResolution::no_usable_record(domain);
    }
    debug!(domain, hosts = ?hosts, "MX records resolved");
    DomainResolution::valid(domain, hosts)
}

fn fallback_to_a<L: DnsLookup + ?Sized>(lookup: &L, domain: &str) -> DomainResolution {
    match lookup.lookup_a(domain) {
        Ok(addrs) if !addrs.is_empty() => {
            info!(domain, "no MX but A record found, using the domain directly");
            DomainResolution::valid(domain, vec![domain.to_string()])
        }
        Ok(_) | Err(LookupError::NoRecords) | Err(LookupError::NxDomain) => {
            debug!(domain, "no A record either");
            DomainResolution::no_usable_record(domain)
        }
        Err(err) => {
            warn!(domain, error = %err, "A lookup failed");
            DomainResolution::no_usable_record(domain)
        }
    }
}

pub(crate) fn normalize_exchange(exchange: &str) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}

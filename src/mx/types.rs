#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainStatus {
    /// At least one host (MX exchange or the domain itself) can take mail.
    Valid,
    /// Authoritative NXDOMAIN.
    NotFound,
    /// The domain exists but offers no MX and no A record, or the lookup failed.
    NoUsableRecord,
}

impl DomainStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::NotFound => "not_found",
            Self::NoUsableRecord => "no_usable_record",
        }
    }
}

/// Mail routing of a domain, as seen once per run.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainResolution {
    pub domain: String,
    pub status: DomainStatus,
    /// SMTP connect targets by ascending preference. Empty unless `Valid`.
    pub hosts: Vec<String>,
}

impl DomainResolution {
    pub fn valid(domain: impl Into<String>, hosts: Vec<String>) -> Self {
        Self {
            domain: domain.into(),
            status: DomainStatus::Valid,
            hosts,
        }
    }

    pub fn not_found(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            status: DomainStatus::NotFound,
            hosts: Vec::new(),
        }
    }

    pub fn no_usable_record(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            status: DomainStatus::NoUsableRecord,
            hosts: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == DomainStatus::Valid
    }

    pub fn primary_host(&self) -> Option<&str> {
        self.hosts.first().map(String::as_str)
    }
}

impl Default for DomainResolution {
    fn default() -> Self {
        Self::not_found(String::new())
    }
}

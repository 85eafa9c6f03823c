use crate::mx::DomainResolution;
use crate::smtp_verify::SmtpProbeResult;
use crate::validator::EmailAddress;

/// Everything learned about one input address.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub input: String,
    /// `None` when the input did not match the address grammar.
    pub address: Option<EmailAddress>,
    pub domain: DomainResolution,
    pub smtp: SmtpProbeResult,
}

impl VerificationResult {
    pub(crate) fn invalid(input: &str) -> Self {
        Self {
            input: input.to_string(),
            address: None,
            domain: DomainResolution::default(),
            smtp: SmtpProbeResult::skipped(),
        }
    }

    pub fn format_valid(&self) -> bool {
        self.address.is_some()
    }
}

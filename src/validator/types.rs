use thiserror::Error;

/// An address that matched the grammar, split into its normalized parts.
///
/// `local` and `domain` are trimmed and lower-cased; `raw` keeps the input as
/// it was handed to [`parse_email`](super::parse_email).
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress {
    pub raw: String,
    pub local: String,
    pub domain: String,
}

impl EmailAddress {
    /// `local@domain`, as sent in `RCPT TO`.
    pub fn full(&self) -> String {
        format!("{}@{}", self.local, self.domain)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("empty address")]
    Empty,
    #[error("invalid format")]
    InvalidFormat,
}

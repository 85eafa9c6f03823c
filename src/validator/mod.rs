mod types;

pub use types::{EmailAddress, FormatError};

use std::sync::LazyLock;

use regex::Regex;

// Matched against the case-folded input, hence no upper-case ranges.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}$").expect("email grammar compiles")
});

/// Trim, lower-case and match `raw` against the address grammar.
///
/// On success the address is split at its last `@` into local-part and domain.
pub fn parse_email(raw: &str) -> Result<EmailAddress, FormatError> {
    let folded = raw.trim().to_lowercase();
    if folded.is_empty() {
        return Err(FormatError::Empty);
    }
    if !EMAIL_RE.is_match(&folded) {
        return Err(FormatError::InvalidFormat);
    }

    let (local, domain) = folded.rsplit_once('@').ok_or(FormatError::InvalidFormat)?;
    Ok(EmailAddress {
        raw: raw.to_string(),
        local: local.to_string(),
        domain: domain.to_string(),
    })
}

/// Shorthand for `parse_email(raw).is_ok()`.
pub fn is_valid_format(raw: &str) -> bool {
    parse_email(raw).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_basic() {
        let addr = parse_email("alice@example.com").unwrap();
        assert_eq!(addr.local, "alice");
        assert_eq!(addr.domain, "example.com");
        assert_eq!(addr.full(), "alice@example.com");
    }

    #[test]
    fn trims_and_lowercases() {
        let addr = parse_email("  John.Doe+Tag@Mail.Example.ORG \n").unwrap();
        assert_eq!(addr.local, "john.doe+tag");
        assert_eq!(addr.domain, "mail.example.org");
        assert_eq!(addr.raw, "  John.Doe+Tag@Mail.Example.ORG \n");
    }

    #[test]
    fn rejects_double_at() {
        assert_eq!(parse_email("a@@b.com"), Err(FormatError::InvalidFormat));
        assert_eq!(parse_email("a@b@c.com"), Err(FormatError::InvalidFormat));
    }

    #[test]
    fn rejects_short_or_numeric_tld() {
        assert!(!is_valid_format("user@example.c"));
        assert!(!is_valid_format("user@example.c0m"));
        assert!(!is_valid_format("user@localhost"));
    }

    #[test]
    fn rejects_missing_parts() {
        assert_eq!(parse_email(""), Err(FormatError::Empty));
        assert_eq!(parse_email("   "), Err(FormatError::Empty));
        assert!(!is_valid_format("@example.com"));
        assert!(!is_valid_format("user@"));
        assert!(!is_valid_format("user.example.com"));
    }

    #[test]
    fn rejects_chars_outside_grammar() {
        assert!(!is_valid_format("us er@example.com"));
        assert!(!is_valid_format("user!@example.com"));
        assert!(!is_valid_format("user@exa_mple.com"));
        assert!(!is_valid_format("jösé@example.com"));
    }

    proptest! {
        #[test]
        fn generated_addresses_parse_lowercased(
            local in "[A-Za-z0-9._%+-]{1,20}",
            label in "[A-Za-z0-9-]{1,20}",
            tld in "[A-Za-z]{2,6}",
        ) {
            let raw = format!("{local}@{label}.{tld}");
            let addr = parse_email(&raw).unwrap();
            prop_assert_eq!(addr.local, local.to_lowercase());
            prop_assert_eq!(addr.domain, format!("{label}.{tld}").to_lowercase());
        }

        #[test]
        fn addresses_without_at_never_parse(s in "[a-z0-9.]{0,30}") {
            prop_assert!(parse_email(&s).is_err());
        }
    }
}

use std::time::Duration;

/// Identity and timing of the handshake run by [`SmtpProbe`](super::SmtpProbe).
#[cfg_attr(feature = "with-config", derive(serde::Deserialize))]
#[cfg_attr(feature = "with-config", serde(default, deny_unknown_fields))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpProbeOptions {
    pub helo_domain: String,
    /// Envelope sender. Empty means the null reverse-path `MAIL FROM:<>`.
    pub mail_from: String,
    pub timeout_ms: u64,
    pub port: u16,
}

impl Default for SmtpProbeOptions {
    fn default() -> Self {
        Self {
            helo_domain: "verify.local".to_string(),
            mail_from: "verify@verify.local".to_string(),
            timeout_ms: 10_000,
            port: 25,
        }
    }
}

impl SmtpProbeOptions {
    /// Return the timeout as a [`Duration`]. A zero timeout disables the
    /// connection/read deadline.
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.timeout_ms))
        }
    }

    pub fn ehlo_command(&self) -> String {
        let helo = self.helo_domain.trim();
        if helo.is_empty() {
            "EHLO localhost".to_string()
        } else {
            format!("EHLO {helo}")
        }
    }

    pub fn mail_from_command(&self) -> String {
        format!("MAIL FROM:<{}>", self.mail_from.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_probe_identity() {
        let options = SmtpProbeOptions::default();
        assert_eq!(options.ehlo_command(), "EHLO verify.local");
        assert_eq!(options.mail_from_command(), "MAIL FROM:<verify@verify.local>");
        assert_eq!(options.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(options.port, 25);
    }

    #[test]
    fn empty_sender_is_null_reverse_path() {
        let options = SmtpProbeOptions {
            mail_from: String::new(),
            timeout_ms: 0,
            ..SmtpProbeOptions::default()
        };
        assert_eq!(options.mail_from_command(), "MAIL FROM:<>");
        assert_eq!(options.timeout(), None);
    }
}

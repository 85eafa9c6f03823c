/// A raw SMTP reply, preserving the numeric status code and message text.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpReply {
    pub code: u16,
    pub message: String,
}

impl SmtpReply {
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

/// Classification of a mailbox after the handshake.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmtpStatus {
    /// `RCPT TO` answered 250.
    UserExists,
    /// `RCPT TO` answered 550, 551 or 553.
    UserNotFound,
    /// Reserved. Telling a catch-all server apart needs a second `RCPT TO`
    /// against a random local-part, which the handshake does not send, so
    /// this is never produced.
    CatchAll,
    /// Any other 4xx reply to `RCPT TO`.
    Greylisted,
    /// Every candidate host failed before a conclusive reply.
    ConnectionFailed,
    /// The handshake was not attempted.
    Skipped,
    UnknownResponse,
}

impl SmtpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserExists => "user_exists",
            Self::UserNotFound => "user_not_found",
            Self::CatchAll => "catch_all",
            Self::Greylisted => "greylisted",
            Self::ConnectionFailed => "connection_failed",
            Self::Skipped => "skipped",
            Self::UnknownResponse => "unknown_response",
        }
    }

    /// Maps the reply to `RCPT TO` onto a terminal status.
    pub fn from_rcpt_code(code: u16) -> Self {
        match code {
            250 => Self::UserExists,
            550 | 551 | 553 => Self::UserNotFound,
            400..=499 => Self::Greylisted,
            _ => Self::UnknownResponse,
        }
    }
}

pub(crate) const CONNECTION_FAILED_MESSAGE: &str = "could not connect to any mail exchanger";

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpProbeResult {
    pub status: SmtpStatus,
    /// Reply code behind `status`, 0 when none applies.
    pub code: u16,
    pub message: String,
    /// Exchange that gave the conclusive answer.
    pub host: Option<String>,
    pub hosts_tried: Vec<String>,
}

impl SmtpProbeResult {
    pub fn skipped() -> Self {
        Self {
            status: SmtpStatus::Skipped,
            code: 0,
            message: String::new(),
            host: None,
            hosts_tried: Vec::new(),
        }
    }

    pub fn connection_failed(hosts_tried: Vec<String>) -> Self {
        Self {
            status: SmtpStatus::ConnectionFailed,
            code: 0,
            message: CONNECTION_FAILED_MESSAGE.to_string(),
            host: None,
            hosts_tried,
        }
    }

    /// `RCPT TO` got an answer that is not a well-formed reply. `message`
    /// keeps the offending line.
    pub(crate) fn unparsed_rcpt(line: String, host: &str, hosts_tried: Vec<String>) -> Self {
        Self {
            status: SmtpStatus::UnknownResponse,
            code: 0,
            message: line,
            host: Some(host.to_string()),
            hosts_tried,
        }
    }

    pub(crate) fn from_rcpt(reply: SmtpReply, host: &str, hosts_tried: Vec<String>) -> Self {
        Self {
            status: SmtpStatus::from_rcpt_code(reply.code),
            code: reply.code,
            message: reply.message,
            host: Some(host.to_string()),
            hosts_tried,
        }
    }
}

impl Default for SmtpProbeResult {
    fn default() -> Self {
        Self::skipped()
    }
}

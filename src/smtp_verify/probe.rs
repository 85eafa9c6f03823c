use tracing::{debug, info, warn};

use crate::smtp_verify::error::SmtpVerifyError;
use crate::smtp_verify::options::SmtpProbeOptions;
use crate::smtp_verify::session::{Connector, SmtpSession, TcpConnector};
use crate::smtp_verify::types::{SmtpProbeResult, SmtpReply};

/// Runs `EHLO → MAIL FROM → RCPT TO → QUIT` against mail exchangers, one
/// host at a time, without ever sending `DATA`.
#[derive(Debug, Clone, Default)]
pub struct SmtpProbe<C = TcpConnector> {
    connector: C,
    options: SmtpProbeOptions,
}

impl SmtpProbe<TcpConnector> {
    pub fn tcp(options: SmtpProbeOptions) -> Self {
        Self::new(TcpConnector, options)
    }
}

impl<C: Connector> SmtpProbe<C> {
    pub fn new(connector: C, options: SmtpProbeOptions) -> Self {
        Self { connector, options }
    }

    /// Tries `hosts` in order. The first reply to `RCPT TO` is conclusive and
    /// ends the probe; host-level failures move on to the next host.
    pub fn probe(&self, address: &str, hosts: &[String]) -> SmtpProbeResult {
        let mut hosts_tried = Vec::new();

        for host in hosts {
            hosts_tried.push(host.clone());
            info!(host = %host, port = self.options.port, "connecting");
            match self.probe_host(host, address) {
                Ok(HostOutcome::Conclusive(reply)) => {
                    debug!(host = %host, code = reply.code, "RCPT TO answered");
                    return SmtpProbeResult::from_rcpt(reply, host, hosts_tried);
                }
                Ok(HostOutcome::Unparsed(line)) => {
                    warn!(host = %host, reply = %line, "unreadable reply to RCPT TO");
                    return SmtpProbeResult::unparsed_rcpt(line, host, hosts_tried);
                }
                Ok(HostOutcome::SenderRejected(reply)) => {
                    warn!(host = %host, code = reply.code, "MAIL FROM rejected, trying next host");
                }
                Err(err) if err.is_timeout() => {
                    warn!(host = %host, error = %err, "timed out, trying next host");
                }
                Err(err) => {
                    warn!(host = %host, error = %err, "host failed, trying next host");
                }
            }
        }

        SmtpProbeResult::connection_failed(hosts_tried)
    }

    fn probe_host(&self, host: &str, address: &str) -> Result<HostOutcome, SmtpVerifyError> {
        let stream = self
            .connector
            .connect(host, self.options.port, self.options.timeout())?;
        let mut session = SmtpSession::new(host, stream);

        let outcome = self.handshake(&mut session, address);
        session.quit();
        outcome
    }

    fn handshake<S>(
        &self,
        session: &mut SmtpSession<S>,
        address: &str,
    ) -> Result<HostOutcome, SmtpVerifyError>
    where
        S: std::io::Read + std::io::Write,
    {
        let banner = session.read_banner()?;
        if banner.code != 220 {
            return Err(SmtpVerifyError::Greeting {
                host: session.host().to_string(),
                code: banner.code,
            });
        }

        match session.send_command(&self.options.ehlo_command()) {
            Ok(ehlo) if !ehlo.is_positive_completion() => {
                debug!(host = session.host(), code = ehlo.code, "EHLO not accepted, continuing");
            }
            Ok(_) => {}
            Err(SmtpVerifyError::Protocol(line)) => {
                debug!(host = session.host(), reply = %line, "unreadable EHLO reply, continuing");
            }
            Err(err) => return Err(err),
        }

        let mail = session.send_command(&self.options.mail_from_command())?;
        if mail.code != 250 {
            return Ok(HostOutcome::SenderRejected(mail));
        }

        match session.send_command(&format!("RCPT TO:<{address}>")) {
            Ok(rcpt) => Ok(HostOutcome::Conclusive(rcpt)),
            Err(SmtpVerifyError::Protocol(line)) => Ok(HostOutcome::Unparsed(line)),
            Err(err) => Err(err),
        }
    }
}

enum HostOutcome {
    Conclusive(SmtpReply),
    SenderRejected(SmtpReply),
    /// Reached `RCPT TO` but its reply did not parse.
    Unparsed(String),
}

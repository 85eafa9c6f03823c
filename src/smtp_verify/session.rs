use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::trace;

use crate::smtp_verify::error::SmtpVerifyError;
use crate::smtp_verify::types::SmtpReply;

// RFC 5321 caps reply lines at 512 octets; leave room for sloppy servers.
const MAX_LINE_LEN: usize = 4096;

/// Opens the byte stream a handshake runs over.
pub trait Connector {
    type Stream: Read + Write;

    fn connect(
        &self,
        host: &str,
        port: u16,
        timeout: Option<Duration>,
    ) -> Result<Self::Stream, SmtpVerifyError>;
}

impl<T: Connector + ?Sized> Connector for &T {
    type Stream = T::Stream;

    fn connect(
        &self,
        host: &str,
        port: u16,
        timeout: Option<Duration>,
    ) -> Result<Self::Stream, SmtpVerifyError> {
        (**self).connect(host, port, timeout)
    }
}

/// Plain TCP. Every resolved address of the host is tried in turn; the
/// timeout applies to the connect and to each later read/write.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn connect(
        &self,
        host: &str,
        port: u16,
        timeout: Option<Duration>,
    ) -> Result<TcpStream, SmtpVerifyError> {
        let addrs: Vec<SocketAddr> = (host, port)
            .to_socket_addrs()
            .map_err(|err| SmtpVerifyError::connect(host, err))?
            .collect();
        if addrs.is_empty() {
            return Err(SmtpVerifyError::NoAddress {
                host: host.to_string(),
            });
        }

        let mut last_err = None;
        for addr in &addrs {
            let attempt = match timeout {
                Some(timeout) => TcpStream::connect_timeout(addr, timeout),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(stream) => {
                    stream.set_read_timeout(timeout).map_err(SmtpVerifyError::io)?;
                    stream.set_write_timeout(timeout).map_err(SmtpVerifyError::io)?;
                    return Ok(stream);
                }
                Err(err) => last_err = Some(err),
            }
        }
        Err(SmtpVerifyError::connect(
            host,
            last_err.unwrap_or_else(|| {
                io::Error::new(io::ErrorKind::AddrNotAvailable, "no socket address available")
            }),
        ))
    }
}

/// Command/reply exchange over one connection.
pub struct SmtpSession<S> {
    host: String,
    stream: S,
    buffer: Vec<u8>,
}

impl<S: Read + Write> SmtpSession<S> {
    pub fn new(host: impl Into<String>, stream: S) -> Self {
        Self {
            host: host.into(),
            stream,
            buffer: Vec::new(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn read_banner(&mut self) -> Result<SmtpReply, SmtpVerifyError> {
        let reply = self.read_reply()?;
        trace!(host = %self.host, code = reply.code, "S: banner");
        Ok(reply)
    }

    pub fn send_command(&mut self, command: &str) -> Result<SmtpReply, SmtpVerifyError> {
        trace!(host = %self.host, "C: {command}");
        let mut data = command.as_bytes().to_vec();
        data.extend_from_slice(b"\r\n");
        self.stream.write_all(&data).map_err(SmtpVerifyError::io)?;
        self.stream.flush().map_err(SmtpVerifyError::io)?;

        let reply = self.read_reply()?;
        trace!(host = %self.host, "S: {} {}", reply.code, reply.message);
        Ok(reply)
    }

    /// Best effort: the connection is going away either way.
    pub fn quit(&mut self) {
        if let Err(err) = self.send_command("QUIT") {
            trace!(host = %self.host, error = %err, "QUIT not acknowledged");
        }
    }

    pub fn read_reply(&mut self) -> Result<SmtpReply, SmtpVerifyError> {
        let mut lines = Vec::new();
        let mut code: Option<u16> = None;
        loop {
            let line = self.read_line()?;
            let Some(parsed_code) = line
                .get(..3)
                .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|digits| digits.parse::<u16>().ok())
            else {
                return Err(SmtpVerifyError::Protocol(line));
            };
            if let Some(existing) = code {
                if existing != parsed_code {
                    return Err(SmtpVerifyError::Protocol(line));
                }
            } else {
                code = Some(parsed_code);
            }
            let is_last = line.as_bytes().get(3) != Some(&b'-');
            let text = line.get(4..).unwrap_or_default().to_string();
            lines.push(text);
            if is_last {
                break;
            }
        }
        Ok(SmtpReply {
            code: code.unwrap_or(0),
            message: lines.join("\n"),
        })
    }

    fn read_line(&mut self) -> Result<String, SmtpVerifyError> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|byte| *byte == b'\n') {
                let mut line = self.buffer.drain(..=pos).collect::<Vec<_>>();
                if line.ends_with(b"\r\n") {
                    line.truncate(line.len() - 2);
                } else {
                    line.truncate(line.len() - 1);
                }
                return Ok(String::from_utf8_lossy(&line).into_owned());
            }

            if self.buffer.len() > MAX_LINE_LEN {
                return Err(SmtpVerifyError::Protocol(format!(
                    "reply line longer than {MAX_LINE_LEN} bytes"
                )));
            }

            let mut buf = [0u8; 512];
            let read = self.stream.read(&mut buf).map_err(SmtpVerifyError::io)?;
            if read == 0 {
                return Err(SmtpVerifyError::io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed",
                )));
            }
            self.buffer.extend_from_slice(&buf[..read]);
        }
    }
}

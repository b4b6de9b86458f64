use super::icmp::{IcmpMessage, build_echo_request, get_identifier, parse_icmp};
use super::socket::{IcmpSocket, IcmpTransport, MIN_READ_TIMEOUT, SocketKind, is_timeout};
use crate::probe::{LossCause, Outcome};
use std::net::IpAddr;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

const RECV_BUFFER_SIZE: usize = 1500;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to open ICMP socket: {0}")]
    SocketOpen(#[source] std::io::Error),
    #[error("failed to build echo request for sequence {sequence}")]
    Build { sequence: u64 },
}

/// Sends one echo request per call and classifies what comes back.
pub struct ProbeClient<T: IcmpTransport> {
    transport: T,
    target: IpAddr,
    timeout: Duration,
    identifier: u16,
    buffer: Vec<u8>,
}

impl ProbeClient<IcmpSocket> {
    pub fn open(target: IpAddr, timeout: Duration) -> Result<Self, EngineError> {
        let socket = IcmpSocket::open(target.is_ipv6()).map_err(EngineError::SocketOpen)?;
        debug!(kind = ?socket.kind(), %target, "ICMP socket ready");
        Ok(Self::with_transport(socket, target, timeout))
    }
}

impl<T: IcmpTransport> ProbeClient<T> {
    pub fn with_transport(transport: T, target: IpAddr, timeout: Duration) -> Self {
        Self {
            transport,
            target,
            timeout,
            identifier: get_identifier(),
            buffer: vec![0u8; RECV_BUFFER_SIZE],
        }
    }

    pub fn target(&self) -> IpAddr {
        self.target
    }

    /// Runs one BUILD → SEND → AWAIT_REPLY → CLASSIFY cycle.
    ///
    /// Only a failure to build the request is returned as an error; every
    /// network condition is folded into the outcome.
    pub fn probe(&mut self, sequence: u64) -> Result<Outcome, EngineError> {
        let ipv6 = self.target.is_ipv6();
        let wire_sequence = sequence as u16;
        let packet = build_echo_request(self.identifier, wire_sequence, ipv6)
            .ok_or(EngineError::Build { sequence })?;

        match self.transport.send_to(&packet, self.target) {
            Ok(sent) if sent != packet.len() => {
                warn!(sequence, sent, expected = packet.len(), "short ICMP write");
            }
            Ok(_) => {}
            Err(err) => {
                warn!(sequence, error = %err, "failed to send echo request");
                return Ok(Outcome::Lost(LossCause::SendFailed));
            }
        }
        let sent_at = Instant::now();

        let outcome = self.await_reply(sequence, wire_sequence, sent_at);
        match outcome {
            Outcome::Latency(ms) if ms > self.timeout.as_secs_f64() * 1000.0 => {
                warn!(
                    sequence,
                    latency_ms = ms,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "reply arrived after the timeout budget"
                );
            }
            Outcome::Latency(ms) => debug!(sequence, latency_ms = ms, "echo reply"),
            Outcome::Lost(cause) => debug!(sequence, cause = cause.label(), "probe lost"),
        }
        Ok(outcome)
    }

    fn await_reply(&mut self, sequence: u64, wire_sequence: u16, sent_at: Instant) -> Outcome {
        let deadline = sent_at + self.timeout;
        let ipv6 = self.target.is_ipv6();
        let has_ip_header = !ipv6 && self.transport.kind() == SocketKind::Raw;
        let check_identifier = self.transport.kind() == SocketKind::Raw;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining < MIN_READ_TIMEOUT {
                return Outcome::Lost(LossCause::Timeout);
            }

            let len = match self.transport.recv(&mut self.buffer, remaining) {
                Ok(len) => len,
                Err(err) if is_timeout(&err) => return Outcome::Lost(LossCause::Timeout),
                Err(err) => {
                    warn!(sequence, error = %err, "failed to receive ICMP reply");
                    return Outcome::Lost(LossCause::RecvFailed);
                }
            };
            let received_at = Instant::now();

            match parse_icmp(&self.buffer[..len], ipv6, has_ip_header) {
                None => {
                    debug!(sequence, len, "unparseable ICMP packet");
                    return Outcome::Lost(LossCause::Malformed);
                }
                Some(IcmpMessage::EchoReply {
                    identifier,
                    sequence: reply_sequence,
                }) => {
                    let ours = reply_sequence == wire_sequence
                        && (!check_identifier || identifier == self.identifier);
                    if ours {
                        let rtt = received_at.duration_since(sent_at);
                        return Outcome::Latency(rtt.as_secs_f64() * 1000.0);
                    }
                    debug!(
                        sequence,
                        identifier, reply_sequence, "ignoring echo reply for another request"
                    );
                }
                Some(IcmpMessage::EchoRequest) => {}
                Some(IcmpMessage::Error {
                    icmp_type,
                    code,
                    identifier,
                    sequence: quoted_sequence,
                }) => {
                    let ours = quoted_sequence == wire_sequence
                        && (!check_identifier || identifier == self.identifier);
                    if ours {
                        debug!(sequence, icmp_type, code, "ICMP error for this request");
                        return Outcome::Lost(LossCause::UnexpectedType);
                    }
                    debug!(
                        sequence,
                        icmp_type, quoted_sequence, "ignoring ICMP error for another request"
                    );
                }
                Some(IcmpMessage::Other { icmp_type, code }) => {
                    debug!(sequence, icmp_type, code, "ignoring unrelated ICMP message");
                }
            }
        }
    }
}

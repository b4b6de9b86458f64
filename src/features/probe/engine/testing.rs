use super::icmp::{ECHO_REPLY_V4, build_echo_packet};
use super::socket::{IcmpTransport, SocketKind};
use std::collections::VecDeque;
use std::io;
use std::net::IpAddr;
use std::time::Duration;

pub(crate) enum Step {
    Packet(Vec<u8>),
    PacketAfter(Duration, Vec<u8>),
    Timeout,
    Error(io::ErrorKind),
}

pub(crate) struct ScriptedTransport {
    pub(crate) kind: SocketKind,
    pub(crate) steps: VecDeque<Step>,
    pub(crate) sent: Vec<Vec<u8>>,
    /// Timeout handed to every `recv` call, in order.
    pub(crate) budgets: Vec<Duration>,
    pub(crate) fail_send: bool,
}

impl ScriptedTransport {
    pub(crate) fn new(kind: SocketKind, steps: Vec<Step>) -> Self {
        Self {
            kind,
            steps: steps.into(),
            sent: Vec::new(),
            budgets: Vec::new(),
            fail_send: false,
        }
    }
}

impl IcmpTransport for ScriptedTransport {
    fn kind(&self) -> SocketKind {
        self.kind
    }

    fn send_to(&mut self, packet: &[u8], _target: IpAddr) -> io::Result<usize> {
        if self.fail_send {
            return Err(io::Error::from(io::ErrorKind::NetworkUnreachable));
        }
        self.sent.push(packet.to_vec());
        Ok(packet.len())
    }

    fn recv(&mut self, buffer: &mut [u8], timeout: Duration) -> io::Result<usize> {
        self.budgets.push(timeout);
        let packet = match self.steps.pop_front() {
            Some(Step::Packet(packet)) => packet,
            Some(Step::PacketAfter(delay, packet)) => {
                std::thread::sleep(delay);
                packet
            }
            Some(Step::Error(kind)) => return Err(io::Error::from(kind)),
            Some(Step::Timeout) | None => return Err(io::Error::from(io::ErrorKind::WouldBlock)),
        };
        buffer[..packet.len()].copy_from_slice(&packet);
        Ok(packet.len())
    }
}

pub(crate) fn v4_reply(identifier: u16, sequence: u16) -> Vec<u8> {
    build_echo_packet(ECHO_REPLY_V4, identifier, sequence, 56, false).expect("reply")
}


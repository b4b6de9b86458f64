use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io::{self, Read};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Smallest read timeout the socket can honour. `SO_RCVTIMEO` has microsecond
/// resolution and a zero timeval means "block forever".
pub(crate) const MIN_READ_TIMEOUT: Duration = Duration::from_micros(1);

/// Socket capability level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketKind {
    /// Raw ICMP socket. IPv4 reads include the IP header.
    Raw,
    /// Unprivileged ICMP socket. The kernel owns the echo identifier and
    /// only delivers replies addressed to this socket.
    Dgram,
}

/// The send/receive surface the probe client needs from an ICMP socket.
pub trait IcmpTransport: Send {
    fn kind(&self) -> SocketKind;

    fn send_to(&mut self, packet: &[u8], target: IpAddr) -> io::Result<usize>;

    /// Blocks for at most `timeout`. Expiry surfaces as `WouldBlock` or
    /// `TimedOut` depending on the platform. Callers never pass a timeout
    /// below `MIN_READ_TIMEOUT`.
    fn recv(&mut self, buffer: &mut [u8], timeout: Duration) -> io::Result<usize>;
}

pub struct IcmpSocket {
    socket: Socket,
    kind: SocketKind,
}

impl IcmpSocket {
    /// Opens a raw ICMP socket, falling back to an unprivileged one.
    pub fn open(ipv6: bool) -> io::Result<Self> {
        match create_icmp_socket(ipv6, Type::RAW) {
            Ok(socket) => Ok(Self {
                socket,
                kind: SocketKind::Raw,
            }),
            Err(raw_err) => {
                tracing::debug!(error = %raw_err, "raw ICMP socket unavailable, trying datagram");
                let socket = create_icmp_socket(ipv6, Type::DGRAM).map_err(|_| {
                    io::Error::new(
                        raw_err.kind(),
                        format!(
                            "{raw_err}; run as root, grant cap_net_raw, or widen net.ipv4.ping_group_range"
                        ),
                    )
                })?;
                Ok(Self {
                    socket,
                    kind: SocketKind::Dgram,
                })
            }
        }
    }
}

fn create_icmp_socket(ipv6: bool, ty: Type) -> io::Result<Socket> {
    let (domain, protocol) = if ipv6 {
        (Domain::IPV6, Protocol::ICMPV6)
    } else {
        (Domain::IPV4, Protocol::ICMPV4)
    };
    let socket = Socket::new(domain, ty, Some(protocol))?;
    socket.set_nonblocking(false)?;
    Ok(socket)
}

impl IcmpTransport for IcmpSocket {
    fn kind(&self) -> SocketKind {
        self.kind
    }

    fn send_to(&mut self, packet: &[u8], target: IpAddr) -> io::Result<usize> {
        let addr = SockAddr::from(SocketAddr::new(target, 0));
        self.socket.send_to(packet, &addr)
    }

    fn recv(&mut self, buffer: &mut [u8], timeout: Duration) -> io::Result<usize> {
        if timeout < MIN_READ_TIMEOUT {
            return Err(io::Error::from(io::ErrorKind::TimedOut));
        }
        self.socket.set_read_timeout(Some(timeout))?;
        self.socket.read(buffer)
    }
}

pub(crate) fn is_timeout(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}

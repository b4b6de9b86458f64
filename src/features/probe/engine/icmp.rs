use pnet::packet::icmp::echo_reply::EchoReplyPacket;
use pnet::packet::icmp::echo_request::{EchoRequestPacket, MutableEchoRequestPacket};
use pnet::packet::icmp::{IcmpCode, IcmpPacket, IcmpType, checksum};
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::packet::ipv4::Ipv4Packet;
use pnet::packet::ipv6::Ipv6Packet;
use pnet::packet::{MutablePacket, Packet};

/// ICMP header size (fixed)
pub const ICMP_HEADER_SIZE: usize = 8;
/// Default payload size (standard ping)
pub const DEFAULT_PAYLOAD_SIZE: usize = 56;

pub const ECHO_REPLY_V4: u8 = 0;
pub const ECHO_REQUEST_V4: u8 = 8;
pub const ECHO_REQUEST_V6: u8 = 128;
pub const ECHO_REPLY_V6: u8 = 129;

/// Destination unreachable, time exceeded, parameter problem.
const ERROR_TYPES_V4: [u8; 3] = [3, 11, 12];
/// Destination unreachable, packet too big, time exceeded, parameter problem.
const ERROR_TYPES_V6: [u8; 4] = [1, 2, 3, 4];
const IPV6_HEADER_SIZE: usize = 40;

/// Identifier stamped on every request of this process.
pub fn get_identifier() -> u16 {
    std::process::id() as u16
}

pub fn echo_request_type(ipv6: bool) -> u8 {
    if ipv6 { ECHO_REQUEST_V6 } else { ECHO_REQUEST_V4 }
}

/// Builds an echo message of the given ICMP type with a pattern-filled payload.
///
/// Returns `None` when the packet cannot be laid out in the buffer. The
/// checksum is only computed for ICMPv4; the kernel fills it for ICMPv6.
pub fn build_echo_packet(
    icmp_type: u8,
    identifier: u16,
    sequence: u16,
    payload_size: usize,
    ipv6: bool,
) -> Option<Vec<u8>> {
    let mut buffer = vec![0u8; ICMP_HEADER_SIZE + payload_size];

    let mut packet = MutableEchoRequestPacket::new(&mut buffer)?;
    packet.set_icmp_type(IcmpType::new(icmp_type));
    packet.set_icmp_code(IcmpCode::new(0));
    packet.set_identifier(identifier);
    packet.set_sequence_number(sequence);
    for (i, byte) in packet.payload_mut().iter_mut().enumerate() {
        *byte = (i & 0xFF) as u8;
    }

    if !ipv6 {
        let cksum = checksum(&IcmpPacket::new(&buffer)?);
        MutableEchoRequestPacket::new(&mut buffer)?.set_checksum(cksum);
    }

    Some(buffer)
}

pub fn build_echo_request(identifier: u16, sequence: u16, ipv6: bool) -> Option<Vec<u8>> {
    build_echo_packet(
        echo_request_type(ipv6),
        identifier,
        sequence,
        DEFAULT_PAYLOAD_SIZE,
        ipv6,
    )
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IcmpMessage {
    EchoReply { identifier: u16, sequence: u16 },
    EchoRequest,
    /// Error report quoting one of our echo requests.
    Error {
        icmp_type: u8,
        code: u8,
        identifier: u16,
        sequence: u16,
    },
    /// Anything else: informational types, errors about other traffic.
    Other { icmp_type: u8, code: u8 },
}

/// Parses an ICMP message, skipping the IPv4 header raw sockets deliver.
pub fn parse_icmp(data: &[u8], ipv6: bool, has_ip_header: bool) -> Option<IcmpMessage> {
    if has_ip_header {
        let ip = Ipv4Packet::new(data)?;
        let header_len = ip.get_header_length() as usize * 4;
        if header_len < 20 || data.len() < header_len {
            return None;
        }
        return parse_icmp_body(&data[header_len..], ipv6);
    }
    parse_icmp_body(data, ipv6)
}

fn parse_icmp_body(data: &[u8], ipv6: bool) -> Option<IcmpMessage> {
    let icmp = IcmpPacket::new(data)?;
    let icmp_type = icmp.get_icmp_type().0;
    let (reply, request) = if ipv6 {
        (ECHO_REPLY_V6, ECHO_REQUEST_V6)
    } else {
        (ECHO_REPLY_V4, ECHO_REQUEST_V4)
    };

    if icmp_type == reply {
        let echo = EchoReplyPacket::new(icmp.packet())?;
        Some(IcmpMessage::EchoReply {
            identifier: echo.get_identifier(),
            sequence: echo.get_sequence_number(),
        })
    } else if icmp_type == request {
        Some(IcmpMessage::EchoRequest)
    } else {
        let code = icmp.get_icmp_code().0;
        let error_types: &[u8] = if ipv6 { &ERROR_TYPES_V6 } else { &ERROR_TYPES_V4 };
        let quoted = if error_types.contains(&icmp_type) {
            icmp.packet()
                .get(ICMP_HEADER_SIZE..)
                .and_then(|quote| quoted_echo_request(quote, ipv6))
        } else {
            None
        };
        Some(match quoted {
            Some((identifier, sequence)) => IcmpMessage::Error {
                icmp_type,
                code,
                identifier,
                sequence,
            },
            None => IcmpMessage::Other { icmp_type, code },
        })
    }
}

/// Identifier and sequence of the echo request quoted after an error header.
fn quoted_echo_request(quote: &[u8], ipv6: bool) -> Option<(u16, u16)> {
    let (inner, request) = if ipv6 {
        let ip = Ipv6Packet::new(quote)?;
        if ip.get_next_header() != IpNextHeaderProtocols::Icmpv6 {
            return None;
        }
        (&quote[IPV6_HEADER_SIZE..], ECHO_REQUEST_V6)
    } else {
        let ip = Ipv4Packet::new(quote)?;
        let header_len = ip.get_header_length() as usize * 4;
        if ip.get_next_level_protocol() != IpNextHeaderProtocols::Icmp
            || header_len < 20
            || quote.len() < header_len
        {
            return None;
        }
        (&quote[header_len..], ECHO_REQUEST_V4)
    };

    let echo = EchoRequestPacket::new(inner)?;
    if echo.get_icmp_type().0 != request {
        return None;
    }
    Some((echo.get_identifier(), echo.get_sequence_number()))
}

#[cfg(test)]
pub(crate) fn wrap_in_ipv4_header(icmp: &[u8]) -> Vec<u8> {
    let mut packet = vec![0u8; 20];
    packet[0] = 0x45;
    let total = (20 + icmp.len()) as u16;
    packet[2..4].copy_from_slice(&total.to_be_bytes());
    packet[8] = 64;
    packet[9] = 1;
    packet.extend_from_slice(icmp);
    packet
}

/// ICMP error of `icmp_type` quoting `original` behind a minimal IP header.
#[cfg(test)]
pub(crate) fn error_quoting(icmp_type: u8, original: &[u8], ipv6: bool) -> Vec<u8> {
    let mut packet = vec![icmp_type, 1, 0, 0, 0, 0, 0, 0];
    if ipv6 {
        let mut header = vec![0u8; IPV6_HEADER_SIZE];
        header[0] = 0x60;
        header[4..6].copy_from_slice(&(original.len() as u16).to_be_bytes());
        header[6] = 58;
        header[7] = 64;
        packet.extend_from_slice(&header);
        packet.extend_from_slice(original);
    } else {
        packet.extend_from_slice(&wrap_in_ipv4_header(original));
    }
    packet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_request_v4_layout() {
        let packet = build_echo_request(1234, 5678, false).expect("packet");
        assert_eq!(packet.len(), ICMP_HEADER_SIZE + DEFAULT_PAYLOAD_SIZE);
        assert_eq!(packet[0], ECHO_REQUEST_V4);
        assert_eq!(packet[1], 0);
        assert_eq!(u16::from_be_bytes([packet[4], packet[5]]), 1234);
        assert_eq!(u16::from_be_bytes([packet[6], packet[7]]), 5678);
        let icmp = IcmpPacket::new(&packet).expect("icmp");
        assert_eq!(checksum(&icmp), icmp.get_checksum());
    }

    #[test]
    fn echo_request_v6_layout() {
        let packet = build_echo_request(1, 2, true).expect("packet");
        assert_eq!(packet[0], ECHO_REQUEST_V6);
        assert_eq!(&packet[2..4], &[0, 0]);
    }

    #[test]
    fn payload_is_fixed_between_requests() {
        let first = build_echo_request(7, 1, false).expect("packet");
        let second = build_echo_request(7, 2, false).expect("packet");
        assert_eq!(first[ICMP_HEADER_SIZE..], second[ICMP_HEADER_SIZE..]);
    }

    #[test]
    fn parse_reply_without_ip_header() {
        let reply = build_echo_packet(ECHO_REPLY_V4, 42, 9, 16, false).expect("reply");
        assert_eq!(
            parse_icmp(&reply, false, false),
            Some(IcmpMessage::EchoReply {
                identifier: 42,
                sequence: 9
            })
        );
    }

    #[test]
    fn parse_reply_behind_ipv4_header() {
        let reply = build_echo_packet(ECHO_REPLY_V4, 42, 9, 16, false).expect("reply");
        let wrapped = wrap_in_ipv4_header(&reply);
        assert_eq!(
            parse_icmp(&wrapped, false, true),
            Some(IcmpMessage::EchoReply {
                identifier: 42,
                sequence: 9
            })
        );
    }

    #[test]
    fn parse_v6_reply_and_request() {
        let reply = build_echo_packet(ECHO_REPLY_V6, 3, 4, 8, true).expect("reply");
        assert_eq!(
            parse_icmp(&reply, true, false),
            Some(IcmpMessage::EchoReply {
                identifier: 3,
                sequence: 4
            })
        );
        let request = build_echo_request(3, 4, true).expect("request");
        assert_eq!(parse_icmp(&request, true, false), Some(IcmpMessage::EchoRequest));
    }

    #[test]
    fn parse_other_types() {
        let unreachable = [3u8, 1, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            parse_icmp(&unreachable, false, false),
            Some(IcmpMessage::Other {
                icmp_type: 3,
                code: 1
            })
        );
    }

    #[test]
    fn parse_errors_quoting_an_echo_request() {
        let request = build_echo_request(11, 22, false).expect("request");
        assert_eq!(
            parse_icmp(&error_quoting(11, &request, false), false, false),
            Some(IcmpMessage::Error {
                icmp_type: 11,
                code: 1,
                identifier: 11,
                sequence: 22
            })
        );

        let request = build_echo_request(33, 44, true).expect("request");
        assert_eq!(
            parse_icmp(&error_quoting(1, &request, true), true, false),
            Some(IcmpMessage::Error {
                icmp_type: 1,
                code: 1,
                identifier: 33,
                sequence: 44
            })
        );
    }

    #[test]
    fn errors_about_other_traffic_are_not_attributed() {
        // port unreachable quoting a UDP datagram
        let mut quote = wrap_in_ipv4_header(&[0u8; 8]);
        quote[9] = 17;
        let mut unreachable = vec![3u8, 3, 0, 0, 0, 0, 0, 0];
        unreachable.extend_from_slice(&quote);
        assert_eq!(
            parse_icmp(&unreachable, false, false),
            Some(IcmpMessage::Other {
                icmp_type: 3,
                code: 3
            })
        );

        // neighbour solicitation is informational
        let solicitation = [135u8, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            parse_icmp(&solicitation, true, false),
            Some(IcmpMessage::Other {
                icmp_type: 135,
                code: 0
            })
        );

        // too short to carry a quote
        assert_eq!(
            parse_icmp(&[3u8, 1, 0, 0], false, false),
            Some(IcmpMessage::Other {
                icmp_type: 3,
                code: 1
            })
        );
    }

    #[test]
    fn parse_rejects_truncated_data() {
        assert_eq!(parse_icmp(&[0u8, 0], false, false), None);
        assert_eq!(parse_icmp(&[0x45u8, 0, 0], false, true), None);
        // reply type with a header too short for identifier/sequence
        assert_eq!(parse_icmp(&[0u8, 0, 0, 0], false, false), None);
    }
}

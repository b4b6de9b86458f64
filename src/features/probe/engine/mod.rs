mod client;
mod icmp;
mod socket;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{EngineError, ProbeClient};
pub use socket::{IcmpSocket, IcmpTransport, SocketKind};

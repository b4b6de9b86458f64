use crate::config::AddressFamily;
use std::io;
use std::net::{IpAddr, ToSocketAddrs};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("could not resolve host {host}: {source}")]
    Lookup {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("no {family} address found for host {host}")]
    NoAddress { host: String, family: AddressFamily },
}

/// Resolves `host` to the first address of `family` reported by the
/// system resolver. Literal addresses are accepted as-is.
pub fn resolve_host(host: &str, family: AddressFamily) -> Result<IpAddr, ResolveError> {
    let trimmed = host.trim();
    let candidates = (trimmed, 0)
        .to_socket_addrs()
        .map_err(|source| ResolveError::Lookup {
            host: trimmed.to_string(),
            source,
        })?;

    first_of_family(candidates.map(|addr| addr.ip()), family).ok_or_else(|| {
        ResolveError::NoAddress {
            host: trimmed.to_string(),
            family,
        }
    })
}

fn first_of_family(
    candidates: impl IntoIterator<Item = IpAddr>,
    family: AddressFamily,
) -> Option<IpAddr> {
    candidates.into_iter().find(|ip| match family {
        AddressFamily::V4 => ip.is_ipv4(),
        AddressFamily::V6 => ip.is_ipv6(),
    })
}

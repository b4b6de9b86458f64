pub use crate::common::net::{ResolveError, resolve_host};
pub use crate::features::probe::engine::{
    EngineError, IcmpSocket, IcmpTransport, ProbeClient, SocketKind,
};

//! Error kinds for the resolver core (spec §7).

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Lookup completed negatively: WINS rcode 0x03, empty result sets,
    /// exhaustion of all backends.
    #[error("name not found")]
    NotFound,

    /// A target address had an unsupported family for the operation
    /// (e.g. IPv6 for a NetBIOS transaction).
    #[error("unsupported address family")]
    InvalidAddress,

    /// Name type incompatible with the method, NBT disabled, or
    /// resolve order is `["NULL"]`.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Deadline elapsed before any accepted reply.
    #[error("timed out waiting for a reply")]
    Timeout,

    /// Underlying socket or getaddrinfo error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed packet, or the packet builder itself failed.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// DC list assembly produced zero entries.
    #[error("no logon servers found")]
    NoLogonServers,

    /// A caller-supplied capacity bound was exceeded.
    #[error("out of memory")]
    OutOfMemory,
}

/// rcode table used when logging a negative NMB name-query reply (spec §4.E).
pub fn rcode_description(rcode: u8) -> &'static str {
    match rcode {
        0x01 => "format error",
        0x02 => "server problem",
        0x03 => "name does not exist",
        0x04 => "unsupported request",
        0x05 => "refused",
        _ => "unknown error",
    }
}

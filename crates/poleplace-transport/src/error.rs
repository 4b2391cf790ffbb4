use std::net::SocketAddr;

/// Errors that can occur in plant transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to create the listening socket.
    #[error("failed to create socket: {0}")]
    Socket(std::io::Error),

    /// Failed to restrict the socket to a network interface.
    #[error("failed to bind socket to interface {interface}: {source}")]
    BindDevice {
        interface: String,
        source: std::io::Error,
    },

    /// The interface name does not fit the platform limit.
    #[error("interface name too long ({len} bytes, max {max}): {interface}")]
    InterfaceNameTooLong {
        interface: String,
        len: usize,
        max: usize,
    },

    /// Failed to bind to the specified address.
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// Failed to start listening on the bound socket.
    #[error("failed to listen on {addr}: {source}")]
    Listen {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// Failed to connect to the specified address.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// Failed to accept an incoming connection.
    #[error("failed to accept connection: {0}")]
    Accept(std::io::Error),

    /// An I/O error occurred on the transport stream.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested socket capability is not available on this platform.
    #[error("unsupported on this platform: {0}")]
    Unsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, TransportError>;

use std::net::{IpAddr, Ipv4Addr, SocketAddr, TcpListener};

use tracing::{debug, info};

use crate::error::{Result, TransportError};
use crate::stream::PlantStream;

/// Well-known port the plant connects to.
pub const DEFAULT_PORT: u16 = 8000;
/// Pending connection queue length passed to `listen(2)`.
pub const DEFAULT_BACKLOG: i32 = 5;
/// Interface the plant link (SLIP) is attached to.
pub const DEFAULT_INTERFACE: &str = "sl0";

/// `IFNAMSIZ` minus the trailing NUL, identical on Linux and the BSDs.
const MAX_INTERFACE_NAME_LEN: usize = 15;

/// Network parameters of the plant listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    /// Local address to bind. Default: all IPv4 addresses.
    pub address: IpAddr,
    /// Local port to bind. Port 0 selects an ephemeral port.
    pub port: u16,
    /// Restrict send/receive to this interface. `None` accepts on every interface.
    pub interface: Option<String>,
    /// Listen backlog.
    pub backlog: i32,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            interface: Some(DEFAULT_INTERFACE.to_string()),
            backlog: DEFAULT_BACKLOG,
        }
    }
}

impl ListenerConfig {
    /// Loopback listener on an ephemeral port with no interface restriction.
    pub fn loopback() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            interface: None,
            ..Self::default()
        }
    }

    pub fn with_address(mut self, address: IpAddr) -> Self {
        self.address = address;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_interface(mut self, interface: Option<String>) -> Self {
        self.interface = interface;
        self
    }

    pub fn with_backlog(mut self, backlog: i32) -> Self {
        self.backlog = backlog;
        self
    }

    /// The socket address this configuration binds.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

/// A listening TCP socket for plant connections.
///
/// Setup is done step by step (socket, interface restriction, bind, listen)
/// so each failure is reported with its own error variant. `SO_REUSEADDR` is
/// left unset: binding a port that already has a listener fails.
pub struct PlantListener {
    listener: TcpListener,
    local_addr: SocketAddr,
    interface: Option<String>,
}

impl PlantListener {
    /// Create, restrict, bind and listen according to `config`.
    pub fn bind(config: &ListenerConfig) -> Result<Self> {
        if let Some(interface) = &config.interface {
            validate_interface_name(interface)?;
        }

        let addr = config.socket_addr();
        let listener = sys::listen(addr, config.interface.as_deref(), config.backlog)?;
        let local_addr = listener.local_addr()?;

        info!(
            %local_addr,
            interface = config.interface.as_deref().unwrap_or("*"),
            backlog = config.backlog,
            "listening for plant connections"
        );

        Ok(Self {
            listener,
            local_addr,
            interface: config.interface.clone(),
        })
    }

    /// Accept an incoming connection (blocking).
    pub fn accept(&self) -> Result<PlantStream> {
        let (stream, peer) = self.listener.accept().map_err(TransportError::Accept)?;
        debug!(%peer, "accepted plant connection");
        Ok(PlantStream::from_tcp(stream))
    }

    /// The address actually bound (resolves port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// The interface this listener is restricted to, if any.
    pub fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }
}

impl std::fmt::Debug for PlantListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlantListener")
            .field("local_addr", &self.local_addr)
            .field("interface", &self.interface)
            .finish()
    }
}

fn validate_interface_name(interface: &str) -> Result<()> {
    if interface.is_empty() {
        return Err(TransportError::BindDevice {
            interface: String::new(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "interface name must not be empty",
            ),
        });
    }
    if interface.len() > MAX_INTERFACE_NAME_LEN {
        return Err(TransportError::InterfaceNameTooLong {
            interface: interface.to_string(),
            len: interface.len(),
            max: MAX_INTERFACE_NAME_LEN,
        });
    }
    Ok(())
}

#[cfg(unix)]
mod sys {
    use std::io;
    use std::mem::size_of;
    use std::net::{SocketAddr, TcpListener};
    use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

    use crate::error::{Result, TransportError};

    pub(super) fn listen(
        addr: SocketAddr,
        interface: Option<&str>,
        backlog: i32,
    ) -> Result<TcpListener> {
        let domain = match addr {
            SocketAddr::V4(_) => libc::AF_INET,
            SocketAddr::V6(_) => libc::AF_INET6,
        };

        // SAFETY: socket(2) with constant arguments; the return value is checked below.
        let raw = unsafe { libc::socket(domain, libc::SOCK_STREAM, 0) };
        if raw < 0 {
            return Err(TransportError::Socket(io::Error::last_os_error()));
        }
        // SAFETY: `raw` is a freshly created descriptor that nothing else owns.
        let fd = unsafe { OwnedFd::from_raw_fd(raw) };

        // SAFETY: `fd` is an open descriptor owned by this function.
        if unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_SETFD, libc::FD_CLOEXEC) } < 0 {
            return Err(TransportError::Socket(io::Error::last_os_error()));
        }

        if let Some(interface) = interface {
            bind_device(&fd, interface)?;
        }

        bind_addr(&fd, addr).map_err(|source| TransportError::Bind { addr, source })?;

        // SAFETY: `fd` is a bound stream socket.
        if unsafe { libc::listen(fd.as_raw_fd(), backlog) } < 0 {
            return Err(TransportError::Listen {
                addr,
                source: io::Error::last_os_error(),
            });
        }

        Ok(TcpListener::from(fd))
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    fn bind_device(fd: &OwnedFd, interface: &str) -> Result<()> {
        let name = interface.as_bytes();

        // SAFETY: `name` is valid for `name.len()` bytes for the duration of the call,
        // and `fd` is an open socket descriptor.
        let rc = unsafe {
            libc::setsockopt(
                fd.as_raw_fd(),
                libc::SOL_SOCKET,
                libc::SO_BINDTODEVICE,
                name.as_ptr().cast::<libc::c_void>(),
                name.len() as libc::socklen_t,
            )
        };

        if rc < 0 {
            return Err(TransportError::BindDevice {
                interface: interface.to_string(),
                source: io::Error::last_os_error(),
            });
        }
        tracing::debug!(interface, "socket restricted to interface");
        Ok(())
    }

    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    fn bind_device(_fd: &OwnedFd, _interface: &str) -> Result<()> {
        Err(TransportError::Unsupported(
            "binding a socket to a named interface requires SO_BINDTODEVICE (Linux)",
        ))
    }

    fn bind_addr(fd: &OwnedFd, addr: SocketAddr) -> io::Result<()> {
        let rc = match addr {
            SocketAddr::V4(v4) => {
                // SAFETY: an all-zero `sockaddr_in` is a valid value.
                let mut sin: libc::sockaddr_in = unsafe { std::mem::zeroed() };
                sin.sin_family = libc::AF_INET as libc::sa_family_t;
                sin.sin_port = v4.port().to_be();
                sin.sin_addr.s_addr = u32::from(*v4.ip()).to_be();
                #[cfg(any(
                    target_os = "macos",
                    target_os = "ios",
                    target_os = "freebsd",
                    target_os = "openbsd",
                    target_os = "netbsd",
                    target_os = "dragonfly"
                ))]
                {
                    sin.sin_len = size_of::<libc::sockaddr_in>() as u8;
                }

                // SAFETY: `sin` is a fully initialized `sockaddr_in` and the length matches.
                unsafe {
                    libc::bind(
                        fd.as_raw_fd(),
                        (&sin as *const libc::sockaddr_in).cast::<libc::sockaddr>(),
                        size_of::<libc::sockaddr_in>() as libc::socklen_t,
                    )
                }
            }
            SocketAddr::V6(v6) => {
                // SAFETY: an all-zero `sockaddr_in6` is a valid value.
                let mut sin6: libc::sockaddr_in6 = unsafe { std::mem::zeroed() };
                sin6.sin6_family = libc::AF_INET6 as libc::sa_family_t;
                sin6.sin6_port = v6.port().to_be();
                sin6.sin6_flowinfo = v6.flowinfo();
                sin6.sin6_addr.s6_addr = v6.ip().octets();
                sin6.sin6_scope_id = v6.scope_id();
                #[cfg(any(
                    target_os = "macos",
                    target_os = "ios",
                    target_os = "freebsd",
                    target_os = "openbsd",
                    target_os = "netbsd",
                    target_os = "dragonfly"
                ))]
                {
                    sin6.sin6_len = size_of::<libc::sockaddr_in6>() as u8;
                }

                // SAFETY: `sin6` is a fully initialized `sockaddr_in6` and the length matches.
                unsafe {
                    libc::bind(
                        fd.as_raw_fd(),
                        (&sin6 as *const libc::sockaddr_in6).cast::<libc::sockaddr>(),
                        size_of::<libc::sockaddr_in6>() as libc::socklen_t,
                    )
                }
            }
        };

        if rc < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(())
        }
    }
}

#[cfg(not(unix))]
mod sys {
    use std::net::{SocketAddr, TcpListener};

    use crate::error::{Result, TransportError};

    pub(super) fn listen(
        addr: SocketAddr,
        interface: Option<&str>,
        _backlog: i32,
    ) -> Result<TcpListener> {
        if interface.is_some() {
            return Err(TransportError::Unsupported(
                "binding a socket to a named interface requires SO_BINDTODEVICE (Linux)",
            ));
        }
        TcpListener::bind(addr).map_err(|source| TransportError::Bind { addr, source })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::io::{Read, Write};
    use std::thread;

    use super::*;

    #[test]
    fn default_config_matches_plant_link() {
        let config = ListenerConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.backlog, 5);
        assert_eq!(config.interface.as_deref(), Some("sl0"));
        assert_eq!(config.address, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }

    #[test]
    fn bind_accept_connect_loopback() {
        let listener =
            PlantListener::bind(&ListenerConfig::loopback()).expect("listener should bind");
        let addr = listener.local_addr();
        assert_ne!(addr.port(), 0);

        let client = thread::spawn(move || {
            let mut stream = PlantStream::connect(addr).expect("client should connect");
            stream.write_all(&[1, 2]).expect("client should write");
        });

        let mut server = listener.accept().expect("listener should accept");
        let mut buf = [0u8; 2];
        server.read_exact(&mut buf).expect("server should read");
        assert_eq!(buf, [1, 2]);

        client.join().expect("client thread should finish");
    }

    #[test]
    fn bind_rejects_port_with_active_listener() {
        let first = PlantListener::bind(&ListenerConfig::loopback()).expect("first bind");
        let config = ListenerConfig::loopback().with_port(first.local_addr().port());

        let err = PlantListener::bind(&config).expect_err("second bind should fail");
        match err {
            TransportError::Bind { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::AddrInUse)
            }
            other => panic!("expected bind error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_overlong_interface_name() {
        let config = ListenerConfig::loopback().with_interface(Some("x".repeat(32)));
        let err = PlantListener::bind(&config).expect_err("bind should fail");
        assert!(matches!(
            err,
            TransportError::InterfaceNameTooLong { len: 32, max: 15, .. }
        ));
    }

    #[test]
    fn rejects_empty_interface_name() {
        let config = ListenerConfig::loopback().with_interface(Some(String::new()));
        let err = PlantListener::bind(&config).expect_err("bind should fail");
        assert!(matches!(err, TransportError::BindDevice { .. }));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn unknown_interface_fails_explicitly() {
        let config = ListenerConfig::loopback().with_interface(Some("ppmissing0".to_string()));
        let err = PlantListener::bind(&config).expect_err("bind should fail");
        assert!(matches!(err, TransportError::BindDevice { .. }));
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn interface_binding_is_unsupported() {
        let config = ListenerConfig::loopback().with_interface(Some("en0".to_string()));
        let err = PlantListener::bind(&config).expect_err("bind should fail");
        assert!(matches!(err, TransportError::Unsupported(_)));
    }
}

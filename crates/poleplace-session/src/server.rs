use std::net::SocketAddr;

use poleplace_control::{Controller, Exchange};
use poleplace_transport::{ListenerConfig, PlantListener, PlantStream};
use tracing::{debug, warn};

use crate::error::Result;
use crate::session::{SessionConfig, SessionHandler};
use crate::sink::LogSink;

/// Everything needed to run the control server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    pub listener: ListenerConfig,
    pub session: SessionConfig,
    /// Stop after this many accepted connections. `None` serves forever.
    pub max_sessions: Option<usize>,
}

/// Session counters returned when [`Server::serve`] stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeSummary {
    pub accepted: usize,
    pub completed: usize,
    pub failed: usize,
}

/// Sequential accept loop: one connection, one session, then the next.
pub struct Server<S> {
    listener: PlantListener,
    handler: SessionHandler<S>,
    config: ServerConfig,
}

impl<S: LogSink> Server<S> {
    /// Set up the listener. Any failure here is fatal to the caller.
    pub fn bind(config: ServerConfig, controller: Controller, sink: S) -> Result<Self> {
        let listener = PlantListener::bind(&config.listener)?;
        Ok(Self {
            listener,
            handler: SessionHandler::new(controller, sink),
            config,
        })
    }

    /// The address actually bound.
    pub fn local_addr(&self) -> SocketAddr {
        self.listener.local_addr()
    }

    pub fn handler(&self) -> &SessionHandler<S> {
        &self.handler
    }

    pub fn into_sink(self) -> S {
        self.handler.into_sink()
    }

    /// Accept and serve connections one at a time.
    ///
    /// Returns `Err` on the first accept failure. A failed session is logged
    /// and the loop moves on to the next connection.
    pub fn serve(&mut self, mut report: impl FnMut(&Exchange)) -> Result<ServeSummary> {
        let mut summary = ServeSummary::default();
        loop {
            if let Some(max) = self.config.max_sessions {
                if summary.accepted >= max {
                    debug!(?summary, "session limit reached");
                    return Ok(summary);
                }
            }

            let stream = self.listener.accept()?;
            summary.accepted += 1;

            let peer = stream.peer_addr().ok();
            match self.serve_one(stream, &mut report) {
                Ok(_) => summary.completed += 1,
                Err(err) => {
                    summary.failed += 1;
                    warn!(?peer, error = %err, "session failed");
                }
            }
        }
    }

    fn serve_one(
        &mut self,
        stream: PlantStream,
        report: impl FnMut(&Exchange),
    ) -> Result<Exchange> {
        stream.set_read_timeout(self.config.session.read_timeout)?;
        stream.set_write_timeout(self.config.session.write_timeout)?;
        self.handler.handle(stream, report)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpStream;
    use std::thread;
    use std::time::Duration;

    use poleplace_codec::{Request, Response};

    use super::*;
    use crate::client::exchange;
    use crate::error::SessionError;
    use crate::sink::{CsvFileSink, MemorySink};

    fn loopback_config(max_sessions: usize) -> ServerConfig {
        ServerConfig {
            listener: ListenerConfig::loopback(),
            session: SessionConfig::default(),
            max_sessions: Some(max_sessions),
        }
    }

    #[test]
    fn sequential_clients_are_served_in_isolation() {
        let mut server =
            Server::bind(loopback_config(2), Controller::default(), MemorySink::new())
                .expect("server should bind");
        let addr = server.local_addr();

        let handle = thread::spawn(move || {
            let summary = server.serve(|_| {}).expect("serve should stop cleanly");
            (summary, server.into_sink())
        });

        assert_eq!(exchange(addr, Request::new(25, 0)).unwrap(), Response::new(-72));
        assert_eq!(exchange(addr, Request::new(0, 0)).unwrap(), Response::new(0));

        let (summary, sink) = handle.join().expect("server thread should finish");
        assert_eq!(
            summary,
            ServeSummary {
                accepted: 2,
                completed: 2,
                failed: 0
            }
        );
        assert_eq!(
            sink.records(),
            ["1.000000,0.000000\n", "0.000000,0.000000\n"]
        );
    }

    #[test]
    fn short_request_is_dropped_and_server_continues() {
        let mut server =
            Server::bind(loopback_config(2), Controller::default(), MemorySink::new())
                .expect("server should bind");
        let addr = server.local_addr();

        let handle = thread::spawn(move || {
            let summary = server.serve(|_| {}).expect("serve should stop cleanly");
            (summary, server.into_sink())
        });

        let mut short = PlantStream::connect(addr).expect("connect");
        short.write_all(&[25]).expect("write one byte");
        short.shutdown_write().expect("half close");
        let mut rest = Vec::new();
        short.read_to_end(&mut rest).expect("server should close");
        assert!(rest.is_empty(), "no response for a short request");

        assert_eq!(exchange(addr, Request::new(-25, 0)).unwrap(), Response::new(72));

        let (summary, sink) = handle.join().expect("server thread should finish");
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.completed, 1);
        assert_eq!(sink.records(), ["-1.000000,0.000000\n"]);
    }

    #[test]
    fn read_timeout_cuts_off_silent_peer() {
        let mut config = loopback_config(2);
        config.session.read_timeout = Some(Duration::from_millis(100));
        let mut server = Server::bind(config, Controller::default(), MemorySink::new())
            .expect("server should bind");
        let addr = server.local_addr();

        let handle = thread::spawn(move || server.serve(|_| {}).expect("serve"));

        let _silent = TcpStream::connect(addr).expect("silent client connects");
        assert_eq!(exchange(addr, Request::new(0, 25)).unwrap(), Response::new(0));

        let summary = handle.join().expect("server thread should finish");
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.completed, 1);
    }

    #[test]
    fn csv_log_gains_one_line_per_session() {
        let dir = std::env::temp_dir().join(format!(
            "poleplace-server-csv-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
        let path = dir.join("data.csv");

        let mut server = Server::bind(
            loopback_config(1),
            Controller::default(),
            CsvFileSink::new(&path),
        )
        .expect("server should bind");
        let addr = server.local_addr();
        let handle = thread::spawn(move || server.serve(|_| {}).expect("serve"));

        let response = exchange(addr, Request::new(25, -1)).unwrap();
        assert_eq!(response.vi, -72);
        handle.join().expect("server thread should finish");

        let contents = std::fs::read_to_string(&path).expect("log should exist");
        assert_eq!(contents, "1.000000,-0.040000\n");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn bind_failure_is_reported() {
        let first = Server::bind(loopback_config(1), Controller::default(), MemorySink::new())
            .expect("first bind");
        let mut config = loopback_config(1);
        config.listener.port = first.local_addr().port();

        let err = Server::bind(config, Controller::default(), MemorySink::new())
            .err()
            .expect("second bind should fail");
        assert!(matches!(err, SessionError::Transport(_)));
    }
}

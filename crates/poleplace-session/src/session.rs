use std::io::{Read, Write};
use std::time::Duration;

use poleplace_codec::{WireReader, WireWriter};
use poleplace_control::{Controller, Exchange, PlantState};
use tracing::debug;

use crate::error::Result;
use crate::sink::LogSink;

/// Per-connection I/O limits.
///
/// Both default to `None`: a silent peer blocks the server indefinitely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub read_timeout: Option<Duration>,
    pub write_timeout: Option<Duration>,
}

/// Runs one request/response cycle per connection.
///
/// Holds no plant state between sessions; only the sink sees every session.
pub struct SessionHandler<S> {
    controller: Controller,
    sink: S,
}

impl<S: LogSink> SessionHandler<S> {
    pub fn new(controller: Controller, sink: S) -> Self {
        Self { controller, sink }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Handle one session on `stream` and close it.
    ///
    /// Order: read 2 bytes, decode, compute, `report`, write 1 byte, log.
    /// A short read aborts before anything is written or logged. A failed
    /// write still logs the received state, then returns the error. Sink
    /// failures are swallowed. The stream is dropped on every path.
    pub fn handle<T: Read + Write>(
        &mut self,
        stream: T,
        mut report: impl FnMut(&Exchange),
    ) -> Result<Exchange> {
        let mut reader = WireReader::new(stream);
        let request = reader.read_request()?;

        let exchange = self.controller.evaluate(request);
        report(&exchange);

        let mut writer = WireWriter::new(reader.into_inner());
        let written = writer.write_response(&exchange.response);
        self.record(&exchange.state);
        written?;

        debug!(
            vo = exchange.state.vo,
            v1 = exchange.state.v1,
            vi = exchange.vi,
            "session complete"
        );
        Ok(exchange)
    }

    fn record(&mut self, state: &PlantState) {
        if let Err(err) = self.sink.append(state) {
            debug!(error = %err, "log record skipped");
        }
    }
}

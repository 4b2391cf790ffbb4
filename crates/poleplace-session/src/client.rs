use std::net::SocketAddr;
use std::time::Duration;

use poleplace_codec::{Request, Response, WireReader, WireWriter};
use poleplace_transport::PlantStream;
use tracing::debug;

use crate::error::Result;

/// Plant side of one session: connect, send the request, read the response.
pub fn exchange(addr: SocketAddr, request: Request) -> Result<Response> {
    exchange_with_timeout(addr, request, None)
}

/// Like [`exchange`], with `timeout` applied to connect, write and read.
pub fn exchange_with_timeout(
    addr: SocketAddr,
    request: Request,
    timeout: Option<Duration>,
) -> Result<Response> {
    let stream = match timeout {
        Some(timeout) => PlantStream::connect_timeout(addr, timeout)?,
        None => PlantStream::connect(addr)?,
    };
    stream.set_read_timeout(timeout)?;
    stream.set_write_timeout(timeout)?;

    let mut writer = WireWriter::new(stream);
    writer.write_request(&request)?;

    let mut reader = WireReader::new(writer.into_inner());
    let response = reader.read_response()?;
    debug!(%addr, vo = request.vo, v1 = request.v1, vi = response.vi, "exchange complete");
    Ok(response)
}

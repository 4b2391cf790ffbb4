use std::io::{ErrorKind, Read};

use bytes::BytesMut;

use crate::error::{CodecError, Result};
use crate::wire::{
    decode_request, decode_response, Request, Response, REQUEST_SIZE, RESPONSE_SIZE,
};

/// Reads complete fixed-size messages from any `Read` stream.
///
/// Handles partial reads internally. EOF before a message is complete is a
/// [`CodecError::ShortRead`]; a partially filled message is never decoded.
pub struct WireReader<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Read> WireReader<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(REQUEST_SIZE),
        }
    }

    /// Read the next request (blocking).
    pub fn read_request(&mut self) -> Result<Request> {
        self.fill(REQUEST_SIZE)?;
        decode_request(&mut self.buf).ok_or(CodecError::ShortRead {
            expected: REQUEST_SIZE,
            received: self.buf.len(),
        })
    }

    /// Read the next response (blocking).
    pub fn read_response(&mut self) -> Result<Response> {
        self.fill(RESPONSE_SIZE)?;
        decode_response(&mut self.buf).ok_or(CodecError::ShortRead {
            expected: RESPONSE_SIZE,
            received: self.buf.len(),
        })
    }

    // Reads no further than `want` so bytes past the message stay in the stream.
    fn fill(&mut self, want: usize) -> Result<()> {
        while self.buf.len() < want {
            let mut chunk = [0u8; REQUEST_SIZE];
            let missing = want - self.buf.len();
            let read = match self.inner.read(&mut chunk[..missing]) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(CodecError::Io(err)),
            };

            if read == 0 {
                return Err(CodecError::ShortRead {
                    expected: want,
                    received: self.buf.len(),
                });
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
        Ok(())
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

use std::io::{ErrorKind, Write};

use bytes::BytesMut;

use crate::error::{CodecError, Result};
use crate::wire::{encode_request, encode_response, Request, Response, REQUEST_SIZE};

/// Writes complete fixed-size messages to any `Write` stream.
pub struct WireWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> WireWriter<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(REQUEST_SIZE),
        }
    }

    /// Write a complete request (blocking).
    pub fn write_request(&mut self, request: &Request) -> Result<()> {
        self.buf.clear();
        encode_request(request, &mut self.buf);
        self.write_buffered()
    }

    /// Write a complete response (blocking).
    pub fn write_response(&mut self, response: &Response) -> Result<()> {
        self.buf.clear();
        encode_response(response, &mut self.buf);
        self.write_buffered()
    }

    fn write_buffered(&mut self) -> Result<()> {
        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => {
                    return Err(CodecError::ShortWrite {
                        expected: self.buf.len(),
                        written: offset,
                    })
                }
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(CodecError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(CodecError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

//! Signed-byte sample quantization and the fixed-size plant wire format.
//!
//! The plant link carries physical quantities as single signed bytes scaled
//! by a fixed gain:
//! - request: 2 bytes, `Vo` then `V1`
//! - response: 1 byte, `Vi`
//!
//! There is no header, length or version byte. Readers and writers here
//! transfer exactly the expected number of bytes or fail.

pub mod error;
pub mod quantizer;
pub mod reader;
pub mod wire;
pub mod writer;

pub use error::{CodecError, Result};
pub use quantizer::{dequantize, quantize, Quantizer, DEFAULT_Q_GAIN};
pub use reader::WireReader;
pub use wire::{
    decode_request, decode_response, encode_request, encode_response, Request, Response,
    REQUEST_SIZE, RESPONSE_SIZE,
};
pub use writer::WireWriter;

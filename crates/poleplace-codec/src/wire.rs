use bytes::{Buf, BufMut, BytesMut};

/// Request size: `Vo` (1) + `V1` (1).
pub const REQUEST_SIZE: usize = 2;

/// Response size: `Vi` (1).
pub const RESPONSE_SIZE: usize = 1;

/// Quantized plant state sent by the plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Request {
    /// Quantized plant output `Vo`.
    pub vo: i8,
    /// Quantized secondary state `V1`.
    pub v1: i8,
}

impl Request {
    pub fn new(vo: i8, v1: i8) -> Self {
        Self { vo, v1 }
    }

    /// The request as it appears on the wire.
    pub fn to_bytes(self) -> [u8; REQUEST_SIZE] {
        [self.vo as u8, self.v1 as u8]
    }

    pub fn from_bytes(bytes: [u8; REQUEST_SIZE]) -> Self {
        Self {
            vo: bytes[0] as i8,
            v1: bytes[1] as i8,
        }
    }
}

/// Quantized control output returned to the plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    /// Quantized control input `Vi`.
    pub vi: i8,
}

impl Response {
    pub fn new(vi: i8) -> Self {
        Self { vi }
    }

    pub fn to_bytes(self) -> [u8; RESPONSE_SIZE] {
        [self.vi as u8]
    }

    pub fn from_bytes(bytes: [u8; RESPONSE_SIZE]) -> Self {
        Self { vi: bytes[0] as i8 }
    }
}

/// Encode a request into the wire format.
///
/// ```text
/// ┌───────────┬───────────┐
/// │ Vo (i8)   │ V1 (i8)   │
/// └───────────┴───────────┘
/// ```
pub fn encode_request(request: &Request, dst: &mut BytesMut) {
    dst.reserve(REQUEST_SIZE);
    dst.put_i8(request.vo);
    dst.put_i8(request.v1);
}

/// Decode a request from a buffer.
///
/// Returns `None` if the buffer doesn't hold a complete request yet.
/// On success, consumes the request bytes from the buffer.
pub fn decode_request(src: &mut BytesMut) -> Option<Request> {
    if src.len() < REQUEST_SIZE {
        return None;
    }
    let vo = src.get_i8();
    let v1 = src.get_i8();
    Some(Request { vo, v1 })
}

/// Encode a response into the wire format (a single `Vi` byte).
pub fn encode_response(response: &Response, dst: &mut BytesMut) {
    dst.reserve(RESPONSE_SIZE);
    dst.put_i8(response.vi);
}

/// Decode a response from a buffer.
pub fn decode_response(src: &mut BytesMut) -> Option<Response> {
    if src.len() < RESPONSE_SIZE {
        return None;
    }
    Some(Response { vi: src.get_i8() })
}

use crate::error::{CodecError, Result};

/// Scale between physical units and one quantization step.
pub const DEFAULT_Q_GAIN: f64 = 25.0;

/// Lossy conversion between a physical value and a signed byte.
///
/// `quantize(x) = trunc(x * gain)` reduced to its low byte, `dequantize(b) = b / gain`.
/// The two are inverses only up to one step (`1 / gain`).
///
/// Decoded values are stored as `f32`, so `quantize(dequantize(b))` can land
/// one step toward zero. The loss compounds when the round trip is repeated:
/// with the default gain, `-128` becomes `-127`, then `-126`. Samples whose
/// decoded value is exact in `f32` (e.g. `25` → `1.0`) come back unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    gain: f64,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self {
            gain: DEFAULT_Q_GAIN,
        }
    }
}

impl Quantizer {
    /// Create a quantizer with an explicit gain.
    pub fn new(gain: f64) -> Result<Self> {
        if !gain.is_finite() || gain == 0.0 {
            return Err(CodecError::InvalidGain(gain));
        }
        Ok(Self { gain })
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Size of one quantization step in physical units.
    pub fn resolution(&self) -> f64 {
        1.0 / self.gain.abs()
    }

    /// Encode a physical value as a signed byte.
    ///
    /// Truncates toward zero. Values whose scaled magnitude leaves the `i8`
    /// range wrap around (two's complement) instead of saturating: `6.0`
    /// scales to `150` and is sent as `-106`. NaN encodes as `0`.
    pub fn quantize(&self, value: f32) -> i8 {
        wrap_to_i8(f64::from(value) * self.gain)
    }

    /// Decode a signed byte into a physical value.
    pub fn dequantize(&self, sample: i8) -> f32 {
        (f64::from(sample) / self.gain) as f32
    }
}

/// Quantize with the default gain.
pub fn quantize(value: f32) -> i8 {
    Quantizer::default().quantize(value)
}

/// Dequantize with the default gain.
pub fn dequantize(sample: i8) -> f32 {
    Quantizer::default().dequantize(sample)
}

// `as i64` truncates toward zero (saturating, NaN -> 0); `as i8` then keeps the low byte.
fn wrap_to_i8(scaled: f64) -> i8 {
    (scaled as i64) as i8
}

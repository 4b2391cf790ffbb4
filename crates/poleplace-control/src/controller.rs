use poleplace_codec::{Quantizer, Request, Response};
use tracing::trace;

use crate::error::Result;
use crate::gains::ControlGains;

/// Decoded plant state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlantState {
    /// Plant output.
    pub vo: f32,
    /// Secondary (previous) state.
    pub v1: f32,
}

impl PlantState {
    pub fn new(vo: f32, v1: f32) -> Self {
        Self { vo, v1 }
    }
}

/// Everything one control step produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exchange {
    /// Bytes received from the plant.
    pub request: Request,
    /// Dequantized plant state.
    pub state: PlantState,
    /// Control output before quantization.
    pub vi: f32,
    /// Byte returned to the plant.
    pub response: Response,
}

/// Quantizer plus feedback law. Holds no state between steps.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Controller {
    quantizer: Quantizer,
    gains: ControlGains,
}

impl Controller {
    pub fn new(quantizer: Quantizer, gains: ControlGains) -> Self {
        Self { quantizer, gains }
    }

    /// Build from raw constants, validating each.
    pub fn from_constants(q_gain: f64, k_output: f64, k_state: f64) -> Result<Self> {
        Ok(Self::new(
            Quantizer::new(q_gain)?,
            ControlGains::new(k_output, k_state)?,
        ))
    }

    pub fn quantizer(&self) -> &Quantizer {
        &self.quantizer
    }

    pub fn gains(&self) -> &ControlGains {
        &self.gains
    }

    /// Decode the two request bytes independently.
    pub fn decode(&self, request: Request) -> PlantState {
        PlantState {
            vo: self.quantizer.dequantize(request.vo),
            v1: self.quantizer.dequantize(request.v1),
        }
    }

    /// Evaluate the feedback law.
    pub fn control(&self, state: PlantState) -> f32 {
        self.gains.apply(state)
    }

    /// Quantize a control output for transmission.
    pub fn encode(&self, vi: f32) -> Response {
        Response::new(self.quantizer.quantize(vi))
    }

    /// Run one full step: decode, control, encode.
    pub fn evaluate(&self, request: Request) -> Exchange {
        let state = self.decode(request);
        let vi = self.control(state);
        let response = self.encode(vi);
        trace!(
            vo = state.vo,
            v1 = state.v1,
            vi,
            response = response.vi,
            "control step evaluated"
        );
        Exchange {
            request,
            state,
            vi,
            response,
        }
    }

    /// Quantize physical values the way the plant would, then evaluate.
    pub fn evaluate_values(&self, vo: f32, v1: f32) -> Exchange {
        self.evaluate(Request::new(
            self.quantizer.quantize(vo),
            self.quantizer.quantize(v1),
        ))
    }
}

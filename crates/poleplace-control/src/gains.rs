use crate::controller::PlantState;
use crate::error::{ControlError, Result};

/// Feedback gain on the plant output `Vo`.
pub const K_OUTPUT: f64 = -2.9145;
/// Feedback gain on the secondary state `V1`.
pub const K_STATE: f64 = -0.0043;

/// Gains of the linear state-feedback law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlGains {
    pub k_output: f64,
    pub k_state: f64,
}

impl Default for ControlGains {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ControlGains {
    /// The pole-placement design values.
    pub const DEFAULT: Self = Self {
        k_output: K_OUTPUT,
        k_state: K_STATE,
    };

    /// Override the gains. Both must be finite.
    pub fn new(k_output: f64, k_state: f64) -> Result<Self> {
        let gains = Self { k_output, k_state };
        for (name, value) in gains.iter() {
            if !value.is_finite() {
                return Err(ControlError::NonFiniteGain { name, value });
            }
        }
        Ok(gains)
    }

    /// Named gains in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [("k_output", self.k_output), ("k_state", self.k_state)].into_iter()
    }

    /// Evaluate `Vi = k_output * Vo + k_state * V1`.
    ///
    /// Computed in double precision, narrowed to `f32` like the plant values.
    pub fn apply(&self, state: PlantState) -> f32 {
        (self.k_output * f64::from(state.vo) + self.k_state * f64::from(state.v1)) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_state_gives_zero_output() {
        let vi = ControlGains::DEFAULT.apply(PlantState::new(0.0, 0.0));
        assert_eq!(vi, 0.0);
    }

    #[test]
    fn unit_output_gives_output_gain() {
        let vi = ControlGains::DEFAULT.apply(PlantState::new(1.0, 0.0));
        assert_eq!(vi, -2.9145f64 as f32);
    }

    #[test]
    fn secondary_state_contributes() {
        let vi = ControlGains::DEFAULT.apply(PlantState::new(0.0, 1.0));
        assert_eq!(vi, -0.0043f64 as f32);

        let vi = ControlGains::DEFAULT.apply(PlantState::new(2.0, -4.0));
        let expected = (-2.9145 * 2.0 - 0.0043 * -4.0) as f32;
        assert_eq!(vi, expected);
    }

    #[test]
    fn iter_lists_gains_in_order() {
        let named: Vec<_> = ControlGains::DEFAULT.iter().collect();
        assert_eq!(named, vec![("k_output", -2.9145), ("k_state", -0.0043)]);
    }

    #[test]
    fn new_rejects_non_finite() {
        assert!(matches!(
            ControlGains::new(f64::NAN, 0.0),
            Err(ControlError::NonFiniteGain {
                name: "k_output",
                ..
            })
        ));
        assert!(matches!(
            ControlGains::new(1.0, f64::INFINITY),
            Err(ControlError::NonFiniteGain { name: "k_state", .. })
        ));
        assert_eq!(
            ControlGains::new(-1.0, 0.5).unwrap(),
            ControlGains {
                k_output: -1.0,
                k_state: 0.5
            }
        );
    }

    #[test]
    fn output_is_not_saturated() {
        let vi = ControlGains::DEFAULT.apply(PlantState::new(100.0, 0.0));
        assert!(vi < -290.0);
    }
}

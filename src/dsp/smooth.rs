/*
Parameter Smoothing
===================

Control values arrive as integer steps (0..100 percent). Jumping straight to
a new value produces an audible click or zipper noise, so the value is eased
towards its target with a one-pole lowpass:

    value = value × λ + target × (1 − λ)

λ close to 1.0 moves slowly, λ = 0.0 jumps immediately. The voice updates its
smoothed values once per buffer, so the glide takes a few buffers.
*/

pub const DEFAULT_LAMBDA: f32 = 0.9;

/// One-pole smoothed control value.
#[derive(Debug, Clone, Copy)]
pub struct SmoothedValue {
    value: f32,
    lambda: f32,
}

impl SmoothedValue {
    pub fn new(initial: f32) -> Self {
        Self::with_lambda(initial, DEFAULT_LAMBDA)
    }

    pub fn with_lambda(initial: f32, lambda: f32) -> Self {
        Self {
            value: initial,
            lambda: lambda.clamp(0.0, 1.0),
        }
    }

    /// Move one step towards `target` and return the new value.
    #[inline]
    pub fn update(&mut self, target: f32) -> f32 {
        self.value = self.value * self.lambda + target * (1.0 - self.lambda);
        self.value
    }

    /// Skip the glide.
    pub fn reset(&mut self, value: f32) {
        self.value = value;
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }
}

impl Default for SmoothedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_to_target() {
        let mut smooth = SmoothedValue::new(0.0);
        for _ in 0..200 {
            smooth.update(1.0);
        }
        assert!((smooth.value() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn first_step_is_partial() {
        let mut smooth = SmoothedValue::new(0.0);
        let first = smooth.update(1.0);
        assert!((first - 0.1).abs() < 1e-6, "got {first}");
    }

    #[test]
    fn steady_target_holds_exactly() {
        let mut smooth = SmoothedValue::new(0.0);
        for _ in 0..10 {
            assert_eq!(smooth.update(0.0), 0.0);
        }
    }

    #[test]
    fn zero_lambda_jumps() {
        let mut smooth = SmoothedValue::with_lambda(0.0, 0.0);
        assert_eq!(smooth.update(0.75), 0.75);
    }
}

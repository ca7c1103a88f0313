use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InterpolateError {
    #[error("interpolation needs at least two control points, got {0}")]
    TooFewPoints(usize),
    #[error("control points must be strictly increasing, got {prev} then {next}")]
    NotIncreasing { prev: f64, next: f64 },
    #[error("control values must be finite, got {0}")]
    NonFinite(f64),
}

/// Piecewise-linear curve through `N` control points, clamped at both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Piecewise<const N: usize> {
    inputs: [f64; N],
    outputs: [f64; N],
}

impl<const N: usize> Piecewise<N> {
    pub fn new(inputs: [f64; N], outputs: [f64; N]) -> Result<Self, InterpolateError> {
        if N < 2 {
            return Err(InterpolateError::TooFewPoints(N));
        }
        if let Some(&bad) = inputs.iter().chain(&outputs).find(|v| !v.is_finite()) {
            return Err(InterpolateError::NonFinite(bad));
        }
        if let Some(w) = inputs.windows(2).find(|w| w[0] >= w[1]) {
            return Err(InterpolateError::NotIncreasing {
                prev: w[0],
                next: w[1],
            });
        }
        Ok(Self { inputs, outputs })
    }

    pub fn sample(&self, x: f64) -> f64 {
        let last = N - 1;
        if x.is_nan() || x <= self.inputs[0] {
            return self.outputs[0];
        }
        if x >= self.inputs[last] {
            return self.outputs[last];
        }

        let seg = self
            .inputs
            .windows(2)
            .position(|w| x < w[1])
            .unwrap_or(last - 1);
        let (x0, x1) = (self.inputs[seg], self.inputs[seg + 1]);
        let (y0, y1) = (self.outputs[seg], self.outputs[seg + 1]);
        let t = (x - x0) / (x1 - x0);
        y0 + t * (y1 - y0)
    }
}

/// The logistic sigmoid, the only nonlinearity the network uses.
pub struct Sigmoid;

impl Sigmoid {
    /// σ(x) = 1 / (1 + e^-x)
    ///
    /// Strictly inside (0, 1) for moderate `x`; in f64 the result rounds to
    /// exactly 0.0 or 1.0 once |x| exceeds roughly 37.
    pub fn function(x: f64) -> f64 {
        1.0 / (1.0 + (-x).exp())
    }

    /// Derivative expressed on the already-activated value `y = σ(x)`:
    /// σ'(x) = y · (1 - y).
    pub fn derivative_from_output(y: f64) -> f64 {
        y * (1.0 - y)
    }

    /// Applies σ element-wise in place.
    pub fn apply(values: &mut [f64]) {
        for v in values.iter_mut() {
            *v = Sigmoid::function(*v);
        }
    }
}

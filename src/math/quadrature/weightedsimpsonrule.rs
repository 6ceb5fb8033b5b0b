use crate::math::integrand::integrand::Integrand;

use super::quadratureerror::{
    QuadratureError,
    QuadratureResult,
    finite_sum
};

// ─────────────────────────────────────────────────────────────────────────────
// WeightedSimpsonRule
// ─────────────────────────────────────────────────────────────────────────────
//
//   ∫_a^b e^(−x)·f(x) dx ≈ Σ_i (h/6)·(g(x0) + 4·g(x1) + g(x2)),  g(x) = e^(−x)·f(x)
//
// Each of the n panels [x0, x0+h] is closed on its own: x1 is the panel
// midpoint, so n does not need to be even. The weight is evaluated at every
// sample point rather than folded in at the interval ends.

pub struct WeightedSimpsonRule;

impl WeightedSimpsonRule {
    pub fn evaluate<F>(f: &F, a: f64, b: f64, n: usize) -> QuadratureResult<f64> where
        F: Integrand + ?Sized {
        if !a.is_finite() || !b.is_finite() {
            return Err(QuadratureError::invalid_parameter("a, b", format!("bounds must be finite, got [{}, {}]", a, b)));
        }
        if a >= b {
            return Err(QuadratureError::invalid_parameter("a, b", format!("interval [{}, {}] must satisfy a < b", a, b)));
        }
        if n == 0 {
            return Err(QuadratureError::invalid_parameter("n", "at least one subinterval is required"));
        }

        let h = (b - a) / n as f64;
        let mut result = 0.0;
        for i in 0..n {
            let x0 = a + i as f64 * h;
            let x1 = x0 + 0.5 * h;
            let x2 = x0 + h;
            let panel = finite_sum(weighted_sample(f, x0)? + 4.0 * weighted_sample(f, x1)? + weighted_sample(f, x2)?, x0)?;
            result = finite_sum(result + h / 6.0 * panel, x2)?;
        }
        Ok(result)
    }
}

/// e^(−x)·f(x), rejecting values that would poison the running sum.
fn weighted_sample<F>(f: &F, x: f64) -> QuadratureResult<f64> where
    F: Integrand + ?Sized {
    let value = (-x).exp() * f.value(x);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(QuadratureError::IntegrandEvaluation { x, value })
    }
}

use thiserror::Error;

pub type QuadratureResult<T> = Result<T, QuadratureError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadratureError {
    /// Gauss–Laguerre rules exist only for the tabulated node counts.
    #[error("unsupported Gauss-Laguerre node count {0} (supported: 2, 3, 4, 5)")]
    InvalidNodeCount(usize),
    #[error("integrand produced non-finite value {value} at x = {x}")]
    IntegrandEvaluation { x: f64, value: f64 },
    /// Every sample was finite but their weighted sum was not.
    #[error("accumulated sum became non-finite ({value}) at x = {x}")]
    NonFiniteSum { x: f64, value: f64 },
    #[error("invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: &'static str, reason: String }
}

impl QuadratureError {
    pub fn invalid_parameter(parameter: &'static str, reason: impl Into<String>) -> QuadratureError {
        QuadratureError::InvalidParameter { parameter, reason: reason.into() }
    }
}

/// Passes `sum` through when finite; `x` names the point the sum had reached.
pub(crate) fn finite_sum(sum: f64, x: f64) -> QuadratureResult<f64> {
    if sum.is_finite() {
        Ok(sum)
    } else {
        Err(QuadratureError::NonFiniteSum { x, value: sum })
    }
}

/// A real-valued function of one real argument, integrated against the
/// e^(−x) weight on [0, ∞).
///
/// Implementations must be pure: the engines may evaluate the same point
/// more than once and expect the same answer.
pub trait Integrand: Send + Sync {
    fn value(&self, x: f64) -> f64;
}

impl<F> Integrand for F where
    F: Fn(f64) -> f64 + Send + Sync {
    fn value(&self, x: f64) -> f64 {
        self(x)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_is_an_integrand() {
        let square = |x: f64| x * x;
        assert_eq!(square.value(3.0), 9.0);

        let boxed: Box<dyn Integrand> = Box::new(f64::sin);
        assert_eq!(boxed.value(0.0), 0.0);
    }
}

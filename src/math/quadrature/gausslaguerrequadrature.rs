use crate::math::integrand::integrand::Integrand;

use super::quadratureerror::{
    QuadratureError,
    QuadratureResult,
    finite_sum
};

// ─────────────────────────────────────────────────────────────────────────────
// QuadratureTable
// ─────────────────────────────────────────────────────────────────────────────
//
// Nodes are the roots of the Laguerre polynomial L_n; the weights already
// contain the e^(−x) factor:
//
//   ∫_0^∞ e^(−x)·f(x) dx ≈ Σ_i w_i·f(x_i)
//
// exact for polynomials of degree ≤ 2n − 1.

static NODES_2: [f64; 2] = [0.585786437626905, 3.414213562373095];
static WEIGHTS_2: [f64; 2] = [0.853553390593274, 0.146446609406726];

static NODES_3: [f64; 3] = [0.415774556783479, 2.294280360279042, 6.289945082937479];
static WEIGHTS_3: [f64; 3] = [0.711093009929173, 0.278517733569241, 0.010389256501586];

static NODES_4: [f64; 4] = [0.322547689619392, 1.745761101158346, 4.536620296921128, 9.395070912301133];
static WEIGHTS_4: [f64; 4] = [0.603154104341634, 0.357418692437800, 0.038887908515005, 0.000539294705561];

static NODES_5: [f64; 5] = [0.263560319718141, 1.413403059106517, 3.596425771040722, 7.085810005858837, 12.640800844275783];
static WEIGHTS_5: [f64; 5] = [0.521755610582809, 0.398666811083176, 0.075942449681708, 0.003611758679922, 0.000023369972386];

/// Nodes and weights of one Gauss–Laguerre rule, always of equal length.
#[derive(Debug, Clone, Copy)]
pub struct LaguerreRule {
    nodes: &'static [f64],
    weights: &'static [f64]
}

impl LaguerreRule {
    pub fn nodes(&self) -> &'static [f64] {
        self.nodes
    }

    pub fn weights(&self) -> &'static [f64] {
        self.weights
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

pub struct QuadratureTable;

impl QuadratureTable {
    const SUPPORTED: [usize; 4] = [2, 3, 4, 5];

    pub fn supported_node_counts() -> &'static [usize] {
        &Self::SUPPORTED
    }

    pub fn rule(n: usize) -> QuadratureResult<LaguerreRule> {
        let (nodes, weights): (&'static [f64], &'static [f64]) = match n {
            2 => (&NODES_2[..], &WEIGHTS_2[..]),
            3 => (&NODES_3[..], &WEIGHTS_3[..]),
            4 => (&NODES_4[..], &WEIGHTS_4[..]),
            5 => (&NODES_5[..], &WEIGHTS_5[..]),
            _ => return Err(QuadratureError::InvalidNodeCount(n))
        };
        Ok(LaguerreRule { nodes, weights })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GaussLaguerreQuadrature
// ─────────────────────────────────────────────────────────────────────────────

pub struct GaussLaguerreQuadrature;

impl GaussLaguerreQuadrature {
    /// `f` is sampled unweighted; the weight lives in the table.
    pub fn evaluate<F>(f: &F, n: usize) -> QuadratureResult<f64> where
        F: Integrand + ?Sized {
        let rule = QuadratureTable::rule(n)?;
        let mut result = 0.0;
        for (&x, &w) in rule.nodes().iter().zip(rule.weights()) {
            let value = f.value(x);
            if !value.is_finite() {
                return Err(QuadratureError::IntegrandEvaluation { x, value });
            }
            result = finite_sum(result + w * value, x)?;
        }
        Ok(result)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lengths_match_node_count() {
        for &n in QuadratureTable::supported_node_counts() {
            let rule = QuadratureTable::rule(n).unwrap();
            assert_eq!(rule.nodes().len(), n);
            assert_eq!(rule.weights().len(), n);
            assert!(rule.nodes().windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn constant_integrates_to_one() {
        let one = |_x: f64| 1.0;
        for &n in QuadratureTable::supported_node_counts() {
            let result = GaussLaguerreQuadrature::evaluate(&one, n).unwrap();
            assert!((result - 1.0).abs() < 1e-4, "n = {}: {}", n, result);
        }
    }

    #[test]
    fn exact_for_polynomials_up_to_degree_2n_minus_1() {
        // ∫_0^∞ e^(−x)·x^k dx = k!
        for &n in QuadratureTable::supported_node_counts() {
            let mut factorial = 1.0;
            for k in 0..(2 * n) {
                if k > 0 {
                    factorial *= k as f64;
                }
                let monomial = move |x: f64| x.powi(k as i32);
                let result = GaussLaguerreQuadrature::evaluate(&monomial, n).unwrap();
                assert!((result - factorial).abs() / factorial < 1e-9, "n = {}, k = {}: {}", n, k, result);
            }
        }
    }

    #[test]
    fn unsupported_node_counts_fail() {
        let one = |_x: f64| 1.0;
        for n in [0, 1, 6, 10] {
            assert_eq!(GaussLaguerreQuadrature::evaluate(&one, n), Err(QuadratureError::InvalidNodeCount(n)));
        }
    }

    #[test]
    fn non_finite_values_fail() {
        let f = |x: f64| if x > 10.0 { f64::NAN } else { x };
        assert!(GaussLaguerreQuadrature::evaluate(&f, 4).is_ok());
        assert!(matches!(
            GaussLaguerreQuadrature::evaluate(&f, 5),
            Err(QuadratureError::IntegrandEvaluation { .. })
        ));
    }
}

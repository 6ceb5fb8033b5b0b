use std::fmt::Display;

use thiserror::Error;
use tracing::info;

use crate::configuration::{
    ConfigurationError,
    IntegrationConfiguration
};
use crate::math::integrand::integrandregistry::{
    IntegrandRegistry,
    RegistryError
};
use crate::math::quadrature::gausslaguerrequadrature::GaussLaguerreQuadrature;
use crate::math::quadrature::infiniteintervalaccumulator::{
    Accumulation,
    Termination
};
use crate::math::quadrature::quadratureerror::QuadratureError;


#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Quadrature(#[from] QuadratureError)
}

/// Both estimates of ∫_0^∞ e^(−x)·f(x) dx for one integrand, side by side.
#[derive(Debug, Clone)]
pub struct MethodComparison {
    integrand_label: String,
    simpson: Accumulation,
    gauss: f64,
    gauss_node_count: usize
}

impl MethodComparison {
    pub fn run(configuration: &IntegrationConfiguration,
               registry: &IntegrandRegistry) -> Result<MethodComparison, ComparisonError> {
        configuration.validate()?;
        let entry = registry.entry(&configuration.integrand)?;
        let integrand = entry.integrand();

        let simpson = configuration.accumulator().integrate(integrand.as_ref())?;
        let gauss = GaussLaguerreQuadrature::evaluate(integrand.as_ref(), configuration.gauss_node_count)?;
        info!(
            integrand = entry.label().as_str(),
            simpson = simpson.total(),
            gauss,
            blocks = simpson.blocks(),
            "comparison finished"
        );

        Ok(MethodComparison {
            integrand_label: entry.label().to_owned(),
            simpson,
            gauss,
            gauss_node_count: configuration.gauss_node_count
        })
    }

    pub fn integrand_label(&self) -> &String {
        &self.integrand_label
    }

    pub fn simpson(&self) -> f64 {
        self.simpson.total()
    }

    pub fn simpson_accumulation(&self) -> &Accumulation {
        &self.simpson
    }

    pub fn gauss(&self) -> f64 {
        self.gauss
    }

    pub fn gauss_node_count(&self) -> usize {
        self.gauss_node_count
    }

    pub fn difference(&self) -> f64 {
        (self.simpson() - self.gauss).abs()
    }
}

impl Display for MethodComparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Integrand: {}", self.integrand_label)?;
        writeln!(f, "[Simpson, weight e^(-x)] result: {:.10}", self.simpson())?;
        writeln!(f, "[Gauss-Laguerre, {} nodes] result: {:.10}", self.gauss_node_count, self.gauss)?;
        writeln!(f, "Difference between results: {:.10e}", self.difference())?;
        write!(f, "Max subdivisions per block: {} over {} blocks", self.simpson.max_subdivisions(), self.simpson.blocks())?;
        if self.simpson.termination() == Termination::BlockLimitReached {
            write!(f, "\nWarning: block limit reached before the tail became negligible")?;
        }
        if self.simpson.unconverged_blocks() > 0 {
            write!(f, "\nWarning: {} block(s) stopped at the subdivision cap", self.simpson.unconverged_blocks())?;
        }
        Ok(())
    }
}

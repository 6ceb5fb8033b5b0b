use std::io::{
    self,
    BufRead,
    Write
};
use std::path::PathBuf;

use anyhow::{
    Context,
    Result,
    bail
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use laguerrequad::configuration::IntegrationConfiguration;
use laguerrequad::math::integrand::integrandregistry::IntegrandRegistry;
use laguerrequad::report::comparison::MethodComparison;
use laguerrequad::report::weightsampler::WeightSampler;


#[derive(Parser)]
#[command(name = "laguerrequad")]
#[command(about = "Compare weighted Simpson and Gauss-Laguerre estimates of the integral of e^(-x) f(x) over [0, inf)", long_about = None)]
struct Cli {
    /// JSON configuration file; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Integrand key or label (see --list)
    #[arg(short, long)]
    function: Option<String>,

    /// Convergence tolerance of the Simpson path
    #[arg(short, long)]
    tolerance: Option<f64>,

    #[arg(long)]
    initial_subdivisions: Option<usize>,

    #[arg(long)]
    max_subdivisions: Option<usize>,

    #[arg(long)]
    block_width: Option<f64>,

    /// Gauss-Laguerre node count (2-5)
    #[arg(short = 'n', long)]
    gauss_nodes: Option<usize>,

    /// Consecutive negligible blocks required before the walk stops
    #[arg(long)]
    negligible_blocks: Option<usize>,

    /// List the available integrands and exit
    #[arg(long, default_value_t = false)]
    list: bool,

    /// Print e^(-x) f(x) sampled over [0, 10) as x,y rows
    #[arg(long, default_value_t = false)]
    samples: bool,

    /// With --samples, print the points as a JSON array instead of rows
    #[arg(long, default_value_t = false, requires = "samples")]
    json: bool,

    /// Ask for the integrand, tolerance and node count on stdin
    #[arg(short, long, default_value_t = false)]
    interactive: bool,
}

impl Cli {
    fn apply_overrides(&self, configuration: &mut IntegrationConfiguration) {
        if let Some(function) = &self.function {
            configuration.integrand = function.clone();
        }
        if let Some(tolerance) = self.tolerance {
            configuration.tolerance = tolerance;
        }
        if let Some(initial_subdivisions) = self.initial_subdivisions {
            configuration.initial_subdivisions = initial_subdivisions;
        }
        if let Some(max_subdivisions) = self.max_subdivisions {
            configuration.max_subdivisions = max_subdivisions;
        }
        if let Some(block_width) = self.block_width {
            configuration.block_width = block_width;
        }
        if let Some(gauss_nodes) = self.gauss_nodes {
            configuration.gauss_node_count = gauss_nodes;
        }
        if let Some(negligible_blocks) = self.negligible_blocks {
            configuration.negligible_blocks = negligible_blocks;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = IntegrandRegistry::with_builtins();

    if cli.list {
        print_menu(&registry);
        return Ok(());
    }

    let mut configuration = match &cli.config {
        Some(path) => IntegrationConfiguration::from_reader(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => IntegrationConfiguration::default(),
    };
    cli.apply_overrides(&mut configuration);

    if cli.interactive {
        let stdin = io::stdin();
        prompt_configuration(&mut stdin.lock(), &registry, &mut configuration)?;
    }

    if cli.samples {
        let integrand = registry
            .get(&configuration.integrand)
            .with_context(|| format!("selecting integrand '{}'", configuration.integrand))?;
        let points = WeightSampler::default().sample(integrand.as_ref());
        if cli.json {
            println!("{}", serde_json::to_string(&points).context("serialising samples")?);
        } else {
            println!("x,weighted");
            for point in points {
                println!("{:.1},{:.10}", point.x(), point.y());
            }
        }
        return Ok(());
    }

    println!("--- Computing ---");
    let comparison = MethodComparison::run(&configuration, &registry)
        .context("integration failed")?;
    println!("{}", comparison);
    Ok(())
}

fn print_menu(registry: &IntegrandRegistry) {
    println!("Available integrands:");
    for entry in registry.entries() {
        println!("{}: {}", entry.key(), entry.label());
    }
}

fn read_answer<R: BufRead>(input: &mut R, question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed while waiting for: {}", question.trim());
    }
    Ok(line.trim().to_owned())
}

/// Mirrors the classic menu: an unknown choice falls back to the first
/// integrand, the numeric answers must parse.
fn prompt_configuration<R: BufRead>(input: &mut R,
                                    registry: &IntegrandRegistry,
                                    configuration: &mut IntegrationConfiguration) -> Result<()> {
    println!("Choose a function to integrate:");
    for entry in registry.entries() {
        println!("{}: {}", entry.key(), entry.label());
    }
    let choice = read_answer(input, "Your choice: ")?;
    configuration.integrand = match registry.entry(&choice) {
        Ok(entry) => entry.key().to_owned(),
        Err(_) => registry
            .entries()
            .first()
            .map(|entry| entry.key().to_owned())
            .context("no integrands registered")?,
    };

    let tolerance = read_answer(input, "Tolerance for the Simpson method (e.g. 1e-6): ")?;
    configuration.tolerance = tolerance
        .parse()
        .with_context(|| format!("'{}' is not a number", tolerance))?;

    let nodes = read_answer(input, "Number of Gauss-Laguerre nodes (2-5): ")?;
    configuration.gauss_node_count = nodes
        .parse()
        .with_context(|| format!("'{}' is not a node count", nodes))?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn prompt_fills_configuration() {
        let registry = IntegrandRegistry::with_builtins();
        let mut configuration = IntegrationConfiguration::default();
        let mut input = Cursor::new("3\n1e-8\n4\n");
        prompt_configuration(&mut input, &registry, &mut configuration).unwrap();
        assert_eq!(configuration.integrand, "3");
        assert_eq!(configuration.tolerance, 1e-8);
        assert_eq!(configuration.gauss_node_count, 4);
    }

    #[test]
    fn prompt_falls_back_to_first_integrand() {
        let registry = IntegrandRegistry::with_builtins();
        let mut configuration = IntegrationConfiguration { integrand: "4".to_owned(), ..IntegrationConfiguration::default() };
        let mut input = Cursor::new("9\n1e-6\n5\n");
        prompt_configuration(&mut input, &registry, &mut configuration).unwrap();
        assert_eq!(configuration.integrand, "1");
    }

    #[test]
    fn prompt_rejects_garbage_and_eof() {
        let registry = IntegrandRegistry::with_builtins();
        let mut configuration = IntegrationConfiguration::default();
        assert!(prompt_configuration(&mut Cursor::new("1\nsmall\n5\n"), &registry, &mut configuration).is_err());
        assert!(prompt_configuration(&mut Cursor::new("1\n"), &registry, &mut configuration).is_err());
    }
}

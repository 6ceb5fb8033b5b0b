use tracing::{
    debug,
    warn
};

use crate::math::integrand::integrand::Integrand;

use super::adaptiverefiner::AdaptiveRefiner;
use super::quadratureerror::{
    QuadratureError,
    QuadratureResult,
    finite_sum
};

// ─────────────────────────────────────────────────────────────────────────────
// InfiniteIntervalAccumulator
// ─────────────────────────────────────────────────────────────────────────────
//
// [0, ∞) is cut into blocks [a, a + width]. Each block is refined with a
// tenth of the global tolerance and summed until the run of negligible
// blocks (|block| < tolerance) reaches `negligible_blocks`. Those trailing
// blocks are the tail and are not added. A negligible block followed by a
// significant one is interior and does count.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    NegligibleBlock,
    BlockLimitReached
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulation {
    total: f64,
    max_subdivisions: usize,
    blocks: usize,
    unconverged_blocks: usize,
    termination: Termination
}

impl Accumulation {
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Largest subdivision count any accepted block needed.
    pub fn max_subdivisions(&self) -> usize {
        self.max_subdivisions
    }

    /// Number of blocks added to the total.
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    pub fn unconverged_blocks(&self) -> usize {
        self.unconverged_blocks
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn is_converged(&self) -> bool {
        self.termination == Termination::NegligibleBlock && self.unconverged_blocks == 0
    }
}

/// Loop state of one walk. `lower_bound` only ever moves right by one block.
struct AccumulationState {
    lower_bound: f64,
    running_total: f64,
    max_subdivisions_seen: usize,
    accepted_blocks: usize,
    unconverged_blocks: usize
}

impl AccumulationState {
    fn new() -> AccumulationState {
        AccumulationState {
            lower_bound: 0.0,
            running_total: 0.0,
            max_subdivisions_seen: 0,
            accepted_blocks: 0,
            unconverged_blocks: 0
        }
    }

    fn accept(&mut self, estimate: f64, subdivisions: usize, converged: bool) -> QuadratureResult<()> {
        self.running_total = finite_sum(self.running_total + estimate, self.lower_bound)?;
        self.max_subdivisions_seen = self.max_subdivisions_seen.max(subdivisions);
        self.accepted_blocks += 1;
        if !converged {
            self.unconverged_blocks += 1;
        }
        Ok(())
    }

    fn finish(self, termination: Termination) -> Accumulation {
        Accumulation {
            total: self.running_total,
            max_subdivisions: self.max_subdivisions_seen,
            blocks: self.accepted_blocks,
            unconverged_blocks: self.unconverged_blocks,
            termination
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfiniteIntervalAccumulator {
    tolerance: f64,
    block_width: f64,
    initial_subdivisions: usize,
    max_subdivisions: usize,
    max_blocks: usize,
    negligible_blocks: usize
}

impl InfiniteIntervalAccumulator {
    pub const DEFAULT_BLOCK_WIDTH: f64 = 1.0;
    pub const DEFAULT_INITIAL_SUBDIVISIONS: usize = 2;
    pub const DEFAULT_MAX_SUBDIVISIONS: usize = 4096;
    pub const DEFAULT_MAX_BLOCKS: usize = 100_000;
    pub const DEFAULT_NEGLIGIBLE_BLOCKS: usize = 1;

    /// Ratio between the global tolerance and the per-block refinement
    /// tolerance.
    const BLOCK_TOLERANCE_DIVISOR: f64 = 10.0;

    pub fn new(tolerance: f64) -> InfiniteIntervalAccumulator {
        InfiniteIntervalAccumulator {
            tolerance,
            block_width: Self::DEFAULT_BLOCK_WIDTH,
            initial_subdivisions: Self::DEFAULT_INITIAL_SUBDIVISIONS,
            max_subdivisions: Self::DEFAULT_MAX_SUBDIVISIONS,
            max_blocks: Self::DEFAULT_MAX_BLOCKS,
            negligible_blocks: Self::DEFAULT_NEGLIGIBLE_BLOCKS
        }
    }

    pub fn with_block_width(mut self, block_width: f64) -> Self {
        self.block_width = block_width;
        self
    }

    pub fn with_subdivisions(mut self, initial_subdivisions: usize, max_subdivisions: usize) -> Self {
        self.initial_subdivisions = initial_subdivisions;
        self.max_subdivisions = max_subdivisions;
        self
    }

    pub fn with_max_blocks(mut self, max_blocks: usize) -> Self {
        self.max_blocks = max_blocks;
        self
    }

    pub fn with_negligible_blocks(mut self, negligible_blocks: usize) -> Self {
        self.negligible_blocks = negligible_blocks;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn block_width(&self) -> f64 {
        self.block_width
    }

    pub fn initial_subdivisions(&self) -> usize {
        self.initial_subdivisions
    }

    pub fn max_subdivisions(&self) -> usize {
        self.max_subdivisions
    }

    pub fn max_blocks(&self) -> usize {
        self.max_blocks
    }

    pub fn negligible_blocks(&self) -> usize {
        self.negligible_blocks
    }

    fn validate(&self) -> QuadratureResult<()> {
        if !(self.tolerance > 0.0) || !self.tolerance.is_finite() {
            return Err(QuadratureError::invalid_parameter("tolerance", format!("must be positive and finite, got {}", self.tolerance)));
        }
        if !(self.block_width > 0.0) || !self.block_width.is_finite() {
            return Err(QuadratureError::invalid_parameter("block_width", format!("must be positive and finite, got {}", self.block_width)));
        }
        if self.max_blocks == 0 {
            return Err(QuadratureError::invalid_parameter("max_blocks", "at least one block is required"));
        }
        if self.negligible_blocks == 0 {
            return Err(QuadratureError::invalid_parameter("negligible_blocks", "at least one negligible block must end the walk"));
        }
        Ok(())
    }

    pub fn integrate<F>(&self, f: &F) -> QuadratureResult<Accumulation> where
        F: Integrand + ?Sized {
        self.validate()?;
        let block_tolerance = self.tolerance / Self::BLOCK_TOLERANCE_DIVISOR;
        let mut state = AccumulationState::new();
        // negligible blocks not yet known to be tail: (estimate, subdivisions, converged)
        let mut pending: Vec<(f64, usize, bool)> = Vec::new();

        for block in 0..self.max_blocks {
            // a multiple of the width keeps the bounds free of accumulated drift
            let a = block as f64 * self.block_width;
            let b = a + self.block_width;
            state.lower_bound = a;
            let refinement = AdaptiveRefiner::refine(
                f,
                a,
                b,
                block_tolerance,
                self.initial_subdivisions,
                self.max_subdivisions
            )?;
            let estimate = refinement.estimate();
            debug!(block, a, b, estimate, subdivisions = refinement.subdivisions(), converged = refinement.is_converged(), "block refined");

            if estimate.abs() < self.tolerance {
                pending.push((estimate, refinement.subdivisions(), refinement.is_converged()));
                if pending.len() >= self.negligible_blocks {
                    debug!(lower_bound = state.lower_bound, total = state.running_total, "negligible tail reached");
                    return Ok(self.finish(state, Termination::NegligibleBlock));
                }
                continue;
            }

            for (interior, subdivisions, converged) in pending.drain(..) {
                state.accept(interior, subdivisions, converged)?;
            }
            state.accept(estimate, refinement.subdivisions(), refinement.is_converged())?;
        }

        warn!(max_blocks = self.max_blocks, total = state.running_total, "block limit reached before a negligible tail");
        Ok(self.finish(state, Termination::BlockLimitReached))
    }

    fn finish(&self, state: AccumulationState, termination: Termination) -> Accumulation {
        if state.unconverged_blocks > 0 {
            warn!(unconverged = state.unconverged_blocks, max_subdivisions = self.max_subdivisions, "some blocks stopped at the subdivision cap");
        }
        state.finish(termination)
    }
}

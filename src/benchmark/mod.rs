//! Benchmark module for the vector bench
//!
//! This module contains the runnable benchmark units, the case that drives
//! both kernel paths, result verification and the sequential runner that
//! nests everything under one root timing node.

pub mod case;
pub mod compare;
mod suite;

#[cfg(test)]
mod tests;

pub use case::{BenchmarkCase, Phase};
pub use compare::compare;
pub use suite::VectorizationSuite;

use crate::config::BenchConfig;
use crate::error::Result;
use crate::timing::TimingNode;

/// A runnable benchmark unit
pub trait Benchmark {
    /// Display name of the unit
    fn name(&self) -> &str;

    /// Runs the unit, recording its phases under `root`
    fn run(&self, root: &mut TimingNode) -> Result<()>;
}

/// The statically-known benchmark units
pub fn registry(config: &BenchConfig) -> Vec<Box<dyn Benchmark>> {
    vec![Box::new(VectorizationSuite::new(config.clone()))]
}

/// One process-wide run: a root timing node and the units executed under it
#[derive(Debug)]
pub struct BenchmarkRun {
    root: TimingNode,
}

impl BenchmarkRun {
    /// Starts the run's root timer
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            root: TimingNode::start(label),
        }
    }

    /// Runs `units` in order, stopping at the first failure
    ///
    /// Timings recorded before the failure remain in the tree.
    pub fn execute(&mut self, units: &[Box<dyn Benchmark>]) -> Result<()> {
        for unit in units {
            log::info!("Running {}", unit.name());
            if let Err(err) = unit.run(&mut self.root) {
                log::error!("{} failed: {}", unit.name(), err);
                return Err(err);
            }
        }
        Ok(())
    }

    /// The tree recorded so far
    pub fn root(&self) -> &TimingNode {
        &self.root
    }

    /// Stops the root timer and hands back the finished tree
    pub fn finish(mut self) -> TimingNode {
        self.root.stop();
        self.root
    }
}

//! Benchmarks hardware-vectorized elementwise arithmetic against scalar
//! reference kernels.
//!
//! For each numeric kind and array size, a run generates two non-zero operand
//! arrays, computes sum, difference, product and quotient with a lane-width
//! vectorized kernel and with a one-element-at-a-time scalar kernel, and
//! verifies the two agree. Every phase is recorded in a hierarchical
//! [`timing::TimingNode`] tree that renders as tab-indented text.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod benchmark;
pub mod config;
pub mod error;
pub mod timing;
pub mod vector;

pub use benchmark::{registry, Benchmark, BenchmarkRun};
pub use config::BenchConfig;
pub use error::{Error, Result};
pub use timing::TimingNode;

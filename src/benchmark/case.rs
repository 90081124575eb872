//! One numeric kind at one array size: create, run both kernels, verify.

use rand::Rng;
use std::fmt;

use crate::benchmark::compare::compare;
use crate::error::Result;
use crate::timing::{Label, TimingNode};
use crate::vector::{ArithmeticKernel, Element, OperandArray, Operation, HARDWARE_ACCELERATED};

/// The timed phases of a case, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Filling both operand arrays
    CreateData,
    /// The vectorized kernel pass
    Vectorized,
    /// The scalar kernel pass
    Conventional,
    /// Verifying one operation's outputs
    CompareResults(Operation),
}

impl Phase {
    /// Timing node name for the phase
    pub fn label(self) -> &'static str {
        match self {
            Phase::CreateData => "Create Data",
            Phase::Vectorized => "Vectorized",
            Phase::Conventional => "Conventional",
            Phase::CompareResults(_) => "Compare Results",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::CompareResults(op) => write!(f, "{} ({op})", self.label()),
            other => f.write_str(other.label()),
        }
    }
}

/// Postfix recorded on the vectorized phase
pub fn acceleration_postfix() -> &'static str {
    if HARDWARE_ACCELERATED {
        "(On)"
    } else {
        "(Off)"
    }
}

/// A single benchmark case over `2^exponent` elements
#[derive(Debug)]
pub struct BenchmarkCase<'k, K> {
    exponent: u32,
    kernel: &'k K,
}

impl<'k, K: ArithmeticKernel> BenchmarkCase<'k, K> {
    /// Creates a case that runs `kernel` on arrays of `2^exponent` elements
    pub fn new(exponent: u32, kernel: &'k K) -> Self {
        Self { exponent, kernel }
    }

    /// Number of elements in each operand array
    pub fn len(&self) -> usize {
        1usize << self.exponent
    }

    /// Runs the case for element type `T` under a new child of `parent`
    ///
    /// Any failure aborts the case. The error carries the case label and
    /// the phase it came from; the timing nodes opened so far stay in the
    /// tree, stopped.
    pub fn run<T: Element, R: Rng + ?Sized>(
        &self,
        parent: &mut TimingNode,
        rng: &mut R,
    ) -> Result<()> {
        let prefix = format!("{} ", T::KIND);
        let postfix = format!(" (2^{})", self.exponent);
        let mut node = parent.child(Label::new("Run").prefix(&prefix).postfix(&postfix));
        let case = node.label().to_string();
        let len = self.len();
        log::info!("{}: {} elements per operand, {} lanes", case, len, T::LANES);

        let (input1, input2) = {
            let _phase = node.child(Phase::CreateData.label());
            log::debug!("{}: generating operands", case);
            (
                OperandArray::<T>::random(len, rng),
                OperandArray::<T>::random(len, rng),
            )
        };

        let vectorized = {
            let label = Label::new(Phase::Vectorized.label()).postfix(acceleration_postfix());
            let _phase = node.child(label);
            self.kernel.vectorized(&input1, &input2)
        }
        .map_err(|e| e.in_case(&case, Phase::Vectorized))?;

        let scalar = {
            let _phase = node.child(Phase::Conventional.label());
            self.kernel.scalar(&input1, &input2)
        }
        .map_err(|e| e.in_case(&case, Phase::Conventional))?;

        let _phase = node.child(Phase::CompareResults(Operation::Sum).label());
        for op in Operation::ALL {
            compare(scalar.get(op), vectorized.get(op))
                .map_err(|e| e.in_case(&case, Phase::CompareResults(op)))?;
        }
        log::debug!("{}: all {} results match", case, Operation::ALL.len());
        Ok(())
    }

    /// Size exponent of this case
    pub fn exponent(&self) -> u32 {
        self.exponent
    }
}

//! Operand arrays, result sets and the arithmetic kernels that fill them.

use rand::Rng;
use std::fmt;
use std::ops::Range;

use crate::error::Result;

pub mod element;
pub mod scalar;
pub mod simd;

pub use element::{Element, NumericKind, HARDWARE_ACCELERATED, VECTOR_BYTES};
pub use scalar::run_scalar;
pub use simd::run_vectorized;

/// An owned, fixed-length operand sequence of one element type
#[derive(Debug, Clone, PartialEq)]
pub struct OperandArray<T> {
    data: Vec<T>,
}

impl<T: Element> OperandArray<T> {
    /// Create a new array with a specific length and fill value
    pub fn with_length(length: usize, value: T) -> Self {
        Self {
            data: vec![value; length],
        }
    }

    /// Fill a new array with non-zero random values
    pub fn random<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        Self {
            data: (0..length).map(|_| T::random(rng)).collect(),
        }
    }

    /// Get the length of the array
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the array holds no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a reference to the underlying data
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> From<Vec<T>> for OperandArray<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T: fmt::Display> fmt::Display for OperandArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}

/// The four elementwise operations every kernel computes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `a + b`
    Sum,
    /// `a - b`
    Difference,
    /// `a * b`
    Product,
    /// `a / b`
    Quotient,
}

impl Operation {
    /// Every operation, in result-set order
    pub const ALL: [Operation; 4] = [
        Operation::Sum,
        Operation::Difference,
        Operation::Product,
        Operation::Quotient,
    ];
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Sum => "sum",
            Operation::Difference => "difference",
            Operation::Product => "product",
            Operation::Quotient => "quotient",
        })
    }
}

/// The four output arrays of one kernel pass
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet<T> {
    /// `input1[i] + input2[i]`
    pub sum: Vec<T>,
    /// `input1[i] - input2[i]`
    pub difference: Vec<T>,
    /// `input1[i] * input2[i]`
    pub product: Vec<T>,
    /// `input1[i] / input2[i]`
    pub quotient: Vec<T>,
}

impl<T: Element> ResultSet<T> {
    /// Four default-filled outputs of `length` elements
    pub fn zeroed(length: usize) -> Self {
        Self {
            sum: vec![T::default(); length],
            difference: vec![T::default(); length],
            product: vec![T::default(); length],
            quotient: vec![T::default(); length],
        }
    }

    /// Length of each output
    pub fn len(&self) -> usize {
        self.sum.len()
    }

    /// Whether the outputs are empty
    pub fn is_empty(&self) -> bool {
        self.sum.is_empty()
    }

    /// The output for one operation
    pub fn get(&self, op: Operation) -> &[T] {
        match op {
            Operation::Sum => &self.sum,
            Operation::Difference => &self.difference,
            Operation::Product => &self.product,
            Operation::Quotient => &self.quotient,
        }
    }

    /// Mutable views of the same window in all four outputs
    pub fn window_mut(&mut self, range: Range<usize>) -> LanesMut<'_, T> {
        LanesMut {
            sum: &mut self.sum[range.clone()],
            difference: &mut self.difference[range.clone()],
            product: &mut self.product[range.clone()],
            quotient: &mut self.quotient[range],
        }
    }
}

/// Disjoint mutable windows into a [`ResultSet`]
#[derive(Debug)]
pub struct LanesMut<'a, T> {
    /// Window of the sum output
    pub sum: &'a mut [T],
    /// Window of the difference output
    pub difference: &'a mut [T],
    /// Window of the product output
    pub product: &'a mut [T],
    /// Window of the quotient output
    pub quotient: &'a mut [T],
}

/// A pair of code paths computing the same four operations
///
/// Both methods expect equal-length inputs.
pub trait ArithmeticKernel {
    /// Processes the inputs in lane-width chunks
    fn vectorized<T: Element>(
        &self,
        input1: &OperandArray<T>,
        input2: &OperandArray<T>,
    ) -> Result<ResultSet<T>>;

    /// Processes the inputs one element at a time
    fn scalar<T: Element>(
        &self,
        input1: &OperandArray<T>,
        input2: &OperandArray<T>,
    ) -> Result<ResultSet<T>>;
}

/// The production kernel pair: [`run_vectorized`] and [`run_scalar`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LaneKernel;

impl ArithmeticKernel for LaneKernel {
    fn vectorized<T: Element>(
        &self,
        input1: &OperandArray<T>,
        input2: &OperandArray<T>,
    ) -> Result<ResultSet<T>> {
        run_vectorized(input1, input2)
    }

    fn scalar<T: Element>(
        &self,
        input1: &OperandArray<T>,
        input2: &OperandArray<T>,
    ) -> Result<ResultSet<T>> {
        run_scalar(input1, input2)
    }
}

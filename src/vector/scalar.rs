use std::ops::Range;

use crate::error::{Error, Result};
use crate::vector::{Element, OperandArray, ResultSet};

/// Scalar reference kernel: one element at a time
///
/// Integer results wrap on overflow and integer division truncates toward
/// zero. A zero integer divisor aborts with [`Error::DivideByZero`].
///
/// # Examples
/// ```
/// use vector_bench::vector::{run_scalar, OperandArray};
///
/// let a = OperandArray::from(vec![7i32, -7]);
/// let b = OperandArray::from(vec![2i32, 2]);
/// let out = run_scalar(&a, &b).unwrap();
/// assert_eq!(out.quotient, vec![3, -3]);
/// ```
pub fn run_scalar<T: Element>(
    input1: &OperandArray<T>,
    input2: &OperandArray<T>,
) -> Result<ResultSet<T>> {
    let len = input1.len();
    let mut out = ResultSet::zeroed(len);
    fill_span(input1.as_slice(), input2.as_slice(), &mut out, 0..len)?;
    Ok(out)
}

/// Computes `range` of all four outputs element by element
pub(crate) fn fill_span<T: Element>(
    a: &[T],
    b: &[T],
    out: &mut ResultSet<T>,
    range: Range<usize>,
) -> Result<()> {
    for i in range {
        out.sum[i] = a[i].add(b[i]);
        out.difference[i] = a[i].sub(b[i]);
        out.product[i] = a[i].mul(b[i]);
        out.quotient[i] = a[i].div(b[i]).ok_or_else(|| Error::DivideByZero {
            operand: "input2",
            index: i,
        })?;
    }
    Ok(())
}

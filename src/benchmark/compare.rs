use crate::error::{Error, Result};
use crate::vector::Element;

/// Checks that `actual` matches `expected` element by element
///
/// Fails with [`Error::LengthMismatch`] when the lengths differ, otherwise
/// with [`Error::ValueMismatch`] at the first index where the values are
/// not the same under [`Element::same`].
pub fn compare<T: Element>(expected: &[T], actual: &[T]) -> Result<()> {
    if expected.len() != actual.len() {
        return Err(Error::LengthMismatch {
            expected: expected.len(),
            actual: actual.len(),
        });
    }

    match expected
        .iter()
        .zip(actual)
        .position(|(e, a)| !e.same(*a))
    {
        Some(index) => Err(Error::ValueMismatch {
            index,
            expected: expected[index].to_string(),
            actual: actual[index].to_string(),
        }),
        None => Ok(()),
    }
}

use crate::error::{Error, Result};
use crate::vector::scalar::fill_span;
#[cfg(all(target_arch = "x86_64", target_feature = "sse2", not(feature = "disable-simd")))]
use crate::vector::LanesMut;
use crate::vector::{Element, OperandArray, ResultSet};

/// Vectorized kernel: lane-width blocks, then a scalar tail
///
/// Every block of `T::LANES` elements is handed to [`Element::lanewise`].
/// Whatever is left after the last full block goes through the scalar
/// algorithm so that every output index is written.
///
/// Inputs must have equal length; a shorter `input2` panics on slicing.
pub fn run_vectorized<T: Element>(
    input1: &OperandArray<T>,
    input2: &OperandArray<T>,
) -> Result<ResultSet<T>> {
    let a = input1.as_slice();
    let b = input2.as_slice();
    let len = a.len();
    let width = T::LANES;
    let aligned = len - len % width;

    let mut out = ResultSet::zeroed(len);
    for offset in (0..aligned).step_by(width) {
        let lanes = offset..offset + width;
        T::lanewise(&a[lanes.clone()], &b[lanes.clone()], out.window_mut(lanes)).map_err(
            |lane| Error::DivideByZero {
                operand: "input2",
                index: offset + lane,
            },
        )?;
    }
    fill_span(a, b, &mut out, aligned..len)?;
    Ok(out)
}

/// SSE lane block for `f32`: four elements per register
#[cfg(all(target_arch = "x86_64", target_feature = "sse2", not(feature = "disable-simd")))]
pub(crate) fn lanewise_f32(a: &[f32], b: &[f32], out: LanesMut<'_, f32>) {
    use std::arch::x86_64::*;
    const STEP: usize = 4;

    let LanesMut {
        sum,
        difference,
        product,
        quotient,
    } = out;
    let len = a.len();
    assert!(
        b.len() == len
            && sum.len() == len
            && difference.len() == len
            && product.len() == len
            && quotient.len() == len,
        "lane block slices must have equal length"
    );

    let mut offset = 0;
    while offset + STEP <= len {
        // SAFETY: sse2 is enabled at compile time and `offset + STEP <= len`
        // keeps every unaligned load and store inside the slices.
        unsafe {
            let av = _mm_loadu_ps(a.as_ptr().add(offset));
            let bv = _mm_loadu_ps(b.as_ptr().add(offset));
            _mm_storeu_ps(sum.as_mut_ptr().add(offset), _mm_add_ps(av, bv));
            _mm_storeu_ps(difference.as_mut_ptr().add(offset), _mm_sub_ps(av, bv));
            _mm_storeu_ps(product.as_mut_ptr().add(offset), _mm_mul_ps(av, bv));
            _mm_storeu_ps(quotient.as_mut_ptr().add(offset), _mm_div_ps(av, bv));
        }
        offset += STEP;
    }
    for i in offset..len {
        sum[i] = a[i] + b[i];
        difference[i] = a[i] - b[i];
        product[i] = a[i] * b[i];
        quotient[i] = a[i] / b[i];
    }
}

/// SSE2 lane block for `f64`: two elements per register
#[cfg(all(target_arch = "x86_64", target_feature = "sse2", not(feature = "disable-simd")))]
pub(crate) fn lanewise_f64(a: &[f64], b: &[f64], out: LanesMut<'_, f64>) {
    use std::arch::x86_64::*;
    const STEP: usize = 2;

    let LanesMut {
        sum,
        difference,
        product,
        quotient,
    } = out;
    let len = a.len();
    assert!(
        b.len() == len
            && sum.len() == len
            && difference.len() == len
            && product.len() == len
            && quotient.len() == len,
        "lane block slices must have equal length"
    );

    let mut offset = 0;
    while offset + STEP <= len {
        // SAFETY: sse2 is enabled at compile time and `offset + STEP <= len`
        // keeps every unaligned load and store inside the slices.
        unsafe {
            let av = _mm_loadu_pd(a.as_ptr().add(offset));
            let bv = _mm_loadu_pd(b.as_ptr().add(offset));
            _mm_storeu_pd(sum.as_mut_ptr().add(offset), _mm_add_pd(av, bv));
            _mm_storeu_pd(difference.as_mut_ptr().add(offset), _mm_sub_pd(av, bv));
            _mm_storeu_pd(product.as_mut_ptr().add(offset), _mm_mul_pd(av, bv));
            _mm_storeu_pd(quotient.as_mut_ptr().add(offset), _mm_div_pd(av, bv));
        }
        offset += STEP;
    }
    for i in offset..len {
        sum[i] = a[i] + b[i];
        difference[i] = a[i] - b[i];
        product[i] = a[i] * b[i];
        quotient[i] = a[i] / b[i];
    }
}

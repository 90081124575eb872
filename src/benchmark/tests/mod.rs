//! End-to-end tests for benchmark runs
//!
//! These tests drive whole cases and runs through the public API:
//! - Vectorized and scalar results agreeing for hand-picked operands
//! - A faulty vectorized kernel being caught and aborting the run
//! - The shape of the rendered time tree

use crate::benchmark::{compare, Benchmark, BenchmarkRun, VectorizationSuite};
use crate::config::BenchConfig;
use crate::error::{Error, Result};
use crate::vector::{
    run_scalar, run_vectorized, ArithmeticKernel, Element, NumericKind, OperandArray, Operation,
    ResultSet,
};

/// Vectorized kernel that stores quotients one slot late from index `from` on
struct SkewedDivide {
    from: usize,
}

impl ArithmeticKernel for SkewedDivide {
    fn vectorized<T: Element>(
        &self,
        input1: &OperandArray<T>,
        input2: &OperandArray<T>,
    ) -> Result<ResultSet<T>> {
        let mut out = run_vectorized(input1, input2)?;
        for i in (self.from.max(1)..out.quotient.len()).rev() {
            out.quotient[i] = out.quotient[i - 1];
        }
        Ok(out)
    }

    fn scalar<T: Element>(
        &self,
        input1: &OperandArray<T>,
        input2: &OperandArray<T>,
    ) -> Result<ResultSet<T>> {
        run_scalar(input1, input2)
    }
}

fn small_config(kinds: impl IntoIterator<Item = NumericKind>) -> BenchConfig {
    BenchConfig::new().exponent(6).kinds(kinds).seed(42)
}

/// Lane-aligned i32 operands: 16 elements, 1..=16 plus ones
#[test]
fn test_i32_lane_aligned_sum() -> Result<()> {
    let input1 = OperandArray::from((1..=16).collect::<Vec<i32>>());
    let input2 = OperandArray::with_length(16, 1i32);

    let vectorized = run_vectorized(&input1, &input2)?;
    let scalar = run_scalar(&input1, &input2)?;

    let expected: Vec<i32> = (2..=17).collect();
    assert_eq!(vectorized.sum, expected);
    assert_eq!(scalar.sum, expected);
    for op in Operation::ALL {
        compare(scalar.get(op), vectorized.get(op))?;
    }
    Ok(())
}

/// Three f64 elements: shorter than or misaligned with any lane block
#[test]
fn test_f64_tail_only_quotient() -> Result<()> {
    let input1 = OperandArray::from(vec![1.5f64, -2.0, 0.25]);
    let input2 = OperandArray::from(vec![0.5f64, 4.0, 0.25]);

    let vectorized = run_vectorized(&input1, &input2)?;
    let scalar = run_scalar(&input1, &input2)?;

    assert_eq!(vectorized.quotient, vec![3.0, -0.5, 1.0]);
    assert_eq!(scalar.quotient, vec![3.0, -0.5, 1.0]);
    compare(&scalar.quotient, &vectorized.quotient)
}

/// The skewed divide is caught at the first misaligned index
#[test]
fn test_skewed_divide_detected_at_first_misaligned_index() -> Result<()> {
    let from = <i32 as Element>::LANES;
    let kernel = SkewedDivide { from };
    let input1 = OperandArray::from((1..=32).collect::<Vec<i32>>());
    let input2 = OperandArray::with_length(32, 1i32);

    let vectorized = kernel.vectorized(&input1, &input2)?;
    let scalar = kernel.scalar(&input1, &input2)?;

    compare(&scalar.sum, &vectorized.sum)?;
    match compare(&scalar.quotient, &vectorized.quotient) {
        Err(Error::ValueMismatch {
            index,
            expected,
            actual,
        }) => {
            assert_eq!(index, from);
            assert_eq!(expected, (from + 1).to_string());
            assert_eq!(actual, from.to_string());
        }
        other => panic!("expected ValueMismatch, got {other:?}"),
    }
    Ok(())
}

/// A mismatch aborts the whole run before the next case starts
#[test]
fn test_mismatch_aborts_run() {
    let suite = VectorizationSuite::with_kernel(
        small_config([NumericKind::F64, NumericKind::I32]),
        SkewedDivide {
            from: <f64 as Element>::LANES,
        },
    );
    let units: Vec<Box<dyn Benchmark>> = vec![Box::new(suite)];

    let mut run = BenchmarkRun::start("Main");
    let err = run.execute(&units).unwrap_err();
    let root = run.finish();

    match &err {
        Error::Case { case, phase, .. } => {
            assert_eq!(case, "Main.f64 Run (2^6)");
            assert_eq!(phase, "Compare Results (quotient)");
        }
        other => panic!("expected case context, got {other:?}"),
    }
    assert!(matches!(
        err.root_cause(),
        Error::ValueMismatch { index, .. } if *index >= <f64 as Element>::LANES
    ));

    // Only the failed f64 case was recorded, with all four phases, all stopped.
    assert_eq!(root.children().len(), 1);
    let case = &root.children()[0];
    assert_eq!(case.children().len(), 4);
    assert!(case.is_stopped());
    assert!(case.children().iter().all(|n| n.is_stopped()));
}

/// Every kind and every swept size runs clean with the production kernels
#[test]
fn test_full_sweep_passes() -> Result<()> {
    let config = BenchConfig::new()
        .exponents(0, 10, 5)
        .kinds(NumericKind::ALL)
        .seed(7);
    let units: Vec<Box<dyn Benchmark>> = vec![Box::new(VectorizationSuite::new(config))];

    let mut run = BenchmarkRun::start("Main");
    run.execute(&units)?;
    let root = run.finish();

    // Six kinds, three exponents each (0, 5, 10).
    assert_eq!(root.children().len(), 18);
    assert_eq!(root.children()[0].label(), "Main.u8 Run (2^0)");
    assert_eq!(root.children()[2].label(), "Main.u8 Run (2^10)");
    assert_eq!(root.children()[17].label(), "Main.f32 Run (2^10)");
    Ok(())
}

/// Rendered tree: one line per node, pre-order, one tab per level
#[test]
fn test_rendered_tree_shape() -> Result<()> {
    let units: Vec<Box<dyn Benchmark>> = vec![Box::new(VectorizationSuite::new(small_config([
        NumericKind::U8,
        NumericKind::I64,
    ])))];
    let mut run = BenchmarkRun::start("Main");
    run.execute(&units)?;
    let text = run.finish().to_string();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1 + 2 * 5);
    assert!(text.ends_with('\n'));

    let depth = |line: &str| line.chars().take_while(|&c| c == '\t').count();
    let depths: Vec<usize> = lines.iter().map(|&l| depth(l)).collect();
    assert_eq!(depths, vec![0, 1, 2, 2, 2, 2, 1, 2, 2, 2, 2]);

    assert!(lines[0].starts_with("Main\t"));
    assert!(lines[1].starts_with("\tMain.u8 Run (2^6)\t"));
    assert!(lines[2].starts_with("\t\tMain.u8 Run (2^6).Create Data\t"));
    assert!(lines[5].starts_with("\t\tMain.u8 Run (2^6).Compare Results\t"));
    assert!(lines[6].starts_with("\tMain.i64 Run (2^6)\t"));

    for line in &lines {
        let seconds = line.rsplit('\t').next().unwrap_or_default();
        let (_, decimals) = seconds.split_once('.').unwrap_or_default();
        assert_eq!(decimals.len(), 4, "bad seconds field in {line:?}");
        assert!(seconds.parse::<f64>().map(|s| s >= 0.0).unwrap_or(false));
    }
    Ok(())
}

/// Seeded runs see identical operands
#[test]
fn test_seeded_runs_are_reproducible() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let mut a = StdRng::seed_from_u64(5);
    let mut b = StdRng::seed_from_u64(5);
    assert_eq!(
        OperandArray::<i64>::random(100, &mut a),
        OperandArray::<i64>::random(100, &mut b)
    );
}

/// An invalid configuration fails before any case is recorded
#[test]
fn test_invalid_config_records_nothing() {
    let suite = VectorizationSuite::new(BenchConfig::new().exponents(5, 4, 1));
    let mut run = BenchmarkRun::start("Main");
    let units: Vec<Box<dyn Benchmark>> = vec![Box::new(suite)];
    assert!(matches!(
        run.execute(&units),
        Err(Error::InvalidArgument(_))
    ));
    assert!(run.root().children().is_empty());
}

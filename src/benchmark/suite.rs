use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::benchmark::case::BenchmarkCase;
use crate::benchmark::Benchmark;
use crate::config::BenchConfig;
use crate::error::Result;
use crate::timing::TimingNode;
use crate::vector::{ArithmeticKernel, Element, LaneKernel, NumericKind};

/// Vectorized-vs-scalar arithmetic for every configured kind and size
#[derive(Debug, Clone)]
pub struct VectorizationSuite<K = LaneKernel> {
    config: BenchConfig,
    kernel: K,
}

impl VectorizationSuite {
    /// Suite using the production kernels
    pub fn new(config: BenchConfig) -> Self {
        Self::with_kernel(config, LaneKernel)
    }
}

impl<K: ArithmeticKernel> VectorizationSuite<K> {
    /// Suite using a custom kernel pair
    pub fn with_kernel(config: BenchConfig, kernel: K) -> Self {
        Self { config, kernel }
    }

    /// The configuration this suite runs
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    fn run_kind<T: Element, R: Rng + ?Sized>(
        &self,
        root: &mut TimingNode,
        rng: &mut R,
    ) -> Result<()> {
        for exponent in self.config.exponent_sweep() {
            BenchmarkCase::new(exponent, &self.kernel).run::<T, R>(root, rng)?;
        }
        Ok(())
    }
}

impl<K: ArithmeticKernel> Benchmark for VectorizationSuite<K> {
    fn name(&self) -> &str {
        "Vectorization Test"
    }

    fn run(&self, root: &mut TimingNode) -> Result<()> {
        self.config.validate()?;
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        for kind in &self.config.kinds {
            match kind {
                NumericKind::U8 => self.run_kind::<u8, _>(root, &mut rng)?,
                NumericKind::I16 => self.run_kind::<i16, _>(root, &mut rng)?,
                NumericKind::I32 => self.run_kind::<i32, _>(root, &mut rng)?,
                NumericKind::I64 => self.run_kind::<i64, _>(root, &mut rng)?,
                NumericKind::F32 => self.run_kind::<f32, _>(root, &mut rng)?,
                NumericKind::F64 => self.run_kind::<f64, _>(root, &mut rng)?,
            }
        }
        Ok(())
    }
}

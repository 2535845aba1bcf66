//! Random number generation provider abstraction.
//!
//! Failure injection draws from a [`RandomProvider`] instead of a global RNG,
//! so a run can use real randomness, a seeded reproducible stream, or a fixed
//! script of samples that forces a particular success/failure path.

use rand::distr::uniform::SampleUniform;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cell::{Cell, RefCell};
use std::ops::Range;
use std::rc::Rc;

/// Provider trait for random number generation.
pub trait RandomProvider: Clone {
    /// Generate a random f64 in `[0.0, 1.0)`.
    fn random_ratio(&self) -> f64;

    /// Generate a random value within a specified range.
    ///
    /// The range is exclusive of the upper bound (start..end).
    fn random_range<T>(&self, range: Range<T>) -> T
    where
        T: SampleUniform + PartialOrd;

    /// Generate a random bool with the given probability of being true.
    ///
    /// A probability of `0.0` never fires and `1.0` always fires, since
    /// [`random_ratio`](Self::random_ratio) never returns `1.0`.
    fn random_bool(&self, probability: f64) -> bool {
        debug_assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be between 0.0 and 1.0, got {}",
            probability
        );
        self.random_ratio() < probability
    }
}

/// Production random provider using the thread-local RNG.
#[derive(Debug, Clone, Default)]
pub struct TokioRandomProvider;

impl TokioRandomProvider {
    /// Create a new production random provider.
    pub fn new() -> Self {
        Self
    }
}

impl RandomProvider for TokioRandomProvider {
    fn random_ratio(&self) -> f64 {
        rand::rng().random()
    }

    fn random_range<T>(&self, range: Range<T>) -> T
    where
        T: SampleUniform + PartialOrd,
    {
        rand::rng().random_range(range)
    }
}

/// Seeded random provider for reproducible runs.
///
/// Clones share the same underlying ChaCha8 stream, so every component
/// handed a clone consumes one deterministic sequence.
#[derive(Debug, Clone)]
pub struct SeededRandomProvider {
    rng: Rc<RefCell<ChaCha8Rng>>,
}

impl SeededRandomProvider {
    /// Create a provider whose stream is fully determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rc::new(RefCell::new(ChaCha8Rng::seed_from_u64(seed))),
        }
    }
}

impl RandomProvider for SeededRandomProvider {
    fn random_ratio(&self) -> f64 {
        self.rng.borrow_mut().random()
    }

    fn random_range<T>(&self, range: Range<T>) -> T
    where
        T: SampleUniform + PartialOrd,
    {
        self.rng.borrow_mut().random_range(range)
    }
}

/// Random provider replaying a fixed list of ratios.
///
/// Samples cycle once the list is exhausted. Each ratio must lie in
/// `[0.0, 1.0)`. An empty list behaves like a constant `0.0`.
///
/// ```rust
/// use mockfetch::{RandomProvider, ScriptedRandomProvider};
///
/// // First draw passes a 0.2 failure gate, second draw fails it
/// let random = ScriptedRandomProvider::new(vec![0.9, 0.1]);
/// assert!(!random.random_bool(0.2));
/// assert!(random.random_bool(0.2));
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedRandomProvider {
    ratios: Rc<[f64]>,
    cursor: Rc<Cell<usize>>,
}

impl ScriptedRandomProvider {
    /// Create a provider replaying `ratios` in order.
    pub fn new(ratios: Vec<f64>) -> Self {
        Self {
            ratios: ratios.into(),
            cursor: Rc::new(Cell::new(0)),
        }
    }

    /// Number of samples drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor.get()
    }
}

impl RandomProvider for ScriptedRandomProvider {
    fn random_ratio(&self) -> f64 {
        if self.ratios.is_empty() {
            return 0.0;
        }
        let index = self.cursor.get();
        self.cursor.set(index + 1);
        self.ratios[index % self.ratios.len()]
    }

    fn random_range<T>(&self, range: Range<T>) -> T
    where
        T: SampleUniform + PartialOrd,
    {
        // Scripted runs only control failure gates; ranges fall back to the start
        range.start
    }
}

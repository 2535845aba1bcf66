//! Provider traits and bundles.
//!
//! A fetcher needs two capabilities from its environment: a way to wait
//! ([`TimeProvider`]) and a way to roll dice ([`RandomProvider`]). The
//! [`Providers`] trait bundles both behind one type parameter.
//!
//! | Bundle | Time | Random | Use |
//! |--------|------|--------|-----|
//! | [`TokioProviders`] | tokio timer | thread-local RNG | default binary run |
//! | [`SimProviders`] | tokio timer | any [`RandomProvider`] | seeded runs and tests |

mod random;
mod time;

pub use random::{
    RandomProvider, ScriptedRandomProvider, SeededRandomProvider, TokioRandomProvider,
};
pub use time::{TimeProvider, TokioTimeProvider};

/// Bundle of provider types for a runtime environment.
pub trait Providers: Clone + 'static {
    /// Time provider type for simulated latency.
    type Time: TimeProvider + 'static;

    /// Random provider type for failure injection.
    type Random: RandomProvider + 'static;

    /// Get the time provider instance.
    fn time(&self) -> &Self::Time;

    /// Get the random provider instance.
    fn random(&self) -> &Self::Random;
}

/// Production providers using the tokio timer and real randomness.
#[derive(Debug, Clone, Default)]
pub struct TokioProviders {
    time: TokioTimeProvider,
    random: TokioRandomProvider,
}

impl TokioProviders {
    /// Create a new production providers bundle.
    pub fn new() -> Self {
        Self {
            time: TokioTimeProvider::new(),
            random: TokioRandomProvider::new(),
        }
    }
}

impl Providers for TokioProviders {
    type Time = TokioTimeProvider;
    type Random = TokioRandomProvider;

    fn time(&self) -> &Self::Time {
        &self.time
    }

    fn random(&self) -> &Self::Random {
        &self.random
    }
}

/// Providers with a caller-chosen random source.
///
/// ```rust
/// use mockfetch::{Providers, RandomProvider, SimProviders};
///
/// let a = SimProviders::seeded(42);
/// let b = SimProviders::seeded(42);
/// assert_eq!(a.random().random_ratio(), b.random().random_ratio());
/// ```
#[derive(Debug, Clone)]
pub struct SimProviders<R> {
    time: TokioTimeProvider,
    random: R,
}

impl<R: RandomProvider + 'static> SimProviders<R> {
    /// Create a bundle around the given random provider.
    pub fn new(random: R) -> Self {
        Self {
            time: TokioTimeProvider::new(),
            random,
        }
    }
}

impl SimProviders<SeededRandomProvider> {
    /// Create a bundle with a ChaCha8 stream seeded from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SeededRandomProvider::new(seed))
    }
}

impl SimProviders<ScriptedRandomProvider> {
    /// Create a bundle replaying the given failure-gate samples.
    pub fn scripted(ratios: Vec<f64>) -> Self {
        Self::new(ScriptedRandomProvider::new(ratios))
    }
}

impl<R: RandomProvider + 'static> Providers for SimProviders<R> {
    type Time = TokioTimeProvider;
    type Random = R;

    fn time(&self) -> &Self::Time {
        &self.time
    }

    fn random(&self) -> &Self::Random {
        &self.random
    }
}

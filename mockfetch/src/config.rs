//! # Fetch Simulation Configuration
//!
//! Latency and fault injection settings for each simulated operation.
//!
//! ## Reference Parameters
//!
//! | Operation | Latency | Failure probability |
//! |-----------|---------|---------------------|
//! | Profile | 1000ms | 20% |
//! | Posts | 1500ms | 20% |
//! | Comments | 2000ms | 20% |
//!
//! ## Configuration Examples
//!
//! ### Fast Local Testing (No Chaos)
//! ```rust
//! use mockfetch::FetchConfiguration;
//!
//! let config = FetchConfiguration::fast_local();
//! // No latency, no faults
//! ```
//!
//! ### Forcing a Single Stage to Fail
//! ```rust
//! use mockfetch::FetchConfiguration;
//!
//! let mut config = FetchConfiguration::reliable();
//! config.posts.failure_probability = 1.0;
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use crate::error::ConfigError;
use crate::fetch::Operation;
use crate::providers::RandomProvider;

/// Latency and failure probability of one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationConfig {
    /// Simulated network latency applied before every call.
    pub latency: Duration,

    /// Probability of the call failing (0.0 - 1.0).
    ///
    /// The gate is evaluated after the latency and before the lookup, so a
    /// failed draw errors even when the key exists.
    pub failure_probability: f64,
}

impl OperationConfig {
    /// Create an operation config from a latency in milliseconds.
    pub fn new(latency_ms: u64, failure_probability: f64) -> Self {
        Self {
            latency: Duration::from_millis(latency_ms),
            failure_probability,
        }
    }
}

/// Configuration for all three simulated operations.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfiguration {
    /// Profile lookup settings.
    pub profile: OperationConfig,
    /// Posts lookup settings.
    pub posts: OperationConfig,
    /// Comments lookup settings.
    pub comments: OperationConfig,
}

/// Failure probability shared by every operation in the reference setup.
pub const REFERENCE_FAILURE_PROBABILITY: f64 = 0.2;

impl Default for FetchConfiguration {
    fn default() -> Self {
        Self {
            profile: OperationConfig::new(1000, REFERENCE_FAILURE_PROBABILITY),
            posts: OperationConfig::new(1500, REFERENCE_FAILURE_PROBABILITY),
            comments: OperationConfig::new(2000, REFERENCE_FAILURE_PROBABILITY),
        }
    }
}

impl FetchConfiguration {
    /// Reference latencies with fault injection disabled.
    pub fn reliable() -> Self {
        Self::default().with_failure_probability(0.0)
    }

    /// No latency and no faults, for fast deterministic tests.
    pub fn fast_local() -> Self {
        Self::reliable().without_latency()
    }

    /// Create a randomized configuration for chaos runs.
    ///
    /// Latencies vary between 100ms and 2500ms and failure probabilities
    /// between 0% and 50%, drawn from the given provider.
    pub fn random_for_seed<R: RandomProvider>(random: &R) -> Self {
        let draw = || OperationConfig {
            latency: Duration::from_millis(random.random_range(100..2500)),
            failure_probability: f64::from(random.random_range(0u32..50)) / 100.0,
        };
        Self {
            profile: draw(),
            posts: draw(),
            comments: draw(),
        }
    }

    /// Set the same failure probability on every operation.
    pub fn with_failure_probability(mut self, probability: f64) -> Self {
        self.profile.failure_probability = probability;
        self.posts.failure_probability = probability;
        self.comments.failure_probability = probability;
        self
    }

    /// Drop the simulated latency of every operation to zero.
    pub fn without_latency(mut self) -> Self {
        self.profile.latency = Duration::ZERO;
        self.posts.latency = Duration::ZERO;
        self.comments.latency = Duration::ZERO;
        self
    }

    /// Settings for a single operation.
    pub fn operation(&self, operation: Operation) -> &OperationConfig {
        match operation {
            Operation::Profile => &self.profile,
            Operation::Posts => &self.posts,
            Operation::Comments => &self.comments,
        }
    }

    /// Mutable settings for a single operation.
    pub fn operation_mut(&mut self, operation: Operation) -> &mut OperationConfig {
        match operation {
            Operation::Profile => &mut self.profile,
            Operation::Posts => &mut self.posts,
            Operation::Comments => &mut self.comments,
        }
    }

    /// Check that every failure probability lies in `0.0..=1.0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for operation in Operation::ALL {
            let value = self.operation(operation).failure_probability;
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability {
                    operation: operation.name(),
                    value,
                });
            }
        }
        Ok(())
    }
}

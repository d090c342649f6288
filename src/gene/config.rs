//! Gene operator configuration.
//!
//! [`GeneOperators`] selects how a gene mutates and how it recombines with a
//! peer. Every gene carries its own copy, so a genotype can mix policies.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mutation policy for a single gene.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mutation {
    /// Draw a fresh value uniformly from the gene's bounds.
    ///
    /// The draw excludes the current value whenever the bounds hold another
    /// one.
    Resample,

    /// Bounded random step around the current value.
    ///
    /// - Real: Gaussian step, standard deviation `scale * (upper - lower)`
    /// - Integer: same step rounded, never smaller than one unit
    /// - Flag: flip
    /// - Choice: move to a neighbouring option
    ///
    /// Steps that overshoot a bound are reflected back into the range.
    Perturb {
        /// Step size as a fraction of the bound width. Must be positive.
        scale: f64,
    },
}

impl Default for Mutation {
    fn default() -> Self {
        Mutation::Perturb { scale: 0.1 }
    }
}

/// Recombination policy used when a gene crosses with its peer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Crossover {
    /// Parameterized uniform crossover.
    ///
    /// Keeps its own value with probability `bias`, otherwise takes the
    /// peer's. `bias = 0.5` is the classic fair coin.
    ///
    /// Reference: Goncalves & Resende (2011), biased random-key GAs.
    Uniform {
        /// Probability of keeping the own value (0.0–1.0).
        bias: f64,
    },

    /// Arithmetic mean of both values.
    ///
    /// Integer genes round half away from zero. Flag and choice genes have no
    /// meaningful mean and fall back to a fair coin between the two parents.
    Arithmetic,

    /// Blend crossover (BLX-α).
    ///
    /// Samples uniformly from the parents' interval widened by
    /// `alpha * |a - b|` on both sides, then clamps into bounds.
    ///
    /// Reference: Eshelman & Schaffer (1993), "Real-Coded Genetic Algorithms
    /// and Interval-Schemata"
    Blend {
        /// Interval extension factor. Must be non-negative.
        alpha: f64,
    },
}

impl Default for Crossover {
    fn default() -> Self {
        Crossover::Arithmetic
    }
}

/// Operator settings carried by each gene.
///
/// # Defaults
///
/// ```
/// use u_genotype::gene::{Crossover, GeneOperators, Mutation};
///
/// let ops = GeneOperators::default();
/// assert_eq!(ops.mutation, Mutation::Perturb { scale: 0.1 });
/// assert_eq!(ops.crossover, Crossover::Arithmetic);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_genotype::gene::{Crossover, GeneOperators, Mutation};
///
/// let ops = GeneOperators::default()
///     .with_mutation(Mutation::Resample)
///     .with_crossover(Crossover::Blend { alpha: 0.5 });
/// assert!(ops.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneOperators {
    /// How the gene perturbs itself.
    pub mutation: Mutation,

    /// How the gene combines with a peer.
    pub crossover: Crossover,
}

impl GeneOperators {
    /// Sets the mutation policy.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the crossover policy.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Shorthand for `Mutation::Perturb { scale }`.
    pub fn with_perturb_scale(self, scale: f64) -> Self {
        self.with_mutation(Mutation::Perturb { scale })
    }

    /// Shorthand for `Crossover::Uniform { bias }` with `bias` clamped to [0, 1].
    pub fn with_uniform_bias(self, bias: f64) -> Self {
        self.with_crossover(Crossover::Uniform {
            bias: bias.clamp(0.0, 1.0),
        })
    }

    /// Validates the operator parameters.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if let Mutation::Perturb { scale } = self.mutation {
            if !scale.is_finite() || scale <= 0.0 {
                return Err("perturb scale must be finite and positive".into());
            }
        }
        match self.crossover {
            Crossover::Uniform { bias } if !(0.0..=1.0).contains(&bias) => {
                Err("uniform bias must be within [0, 1]".into())
            }
            Crossover::Blend { alpha } if !alpha.is_finite() || alpha < 0.0 => {
                Err("blend alpha must be finite and non-negative".into())
            }
            _ => Ok(()),
        }
    }
}

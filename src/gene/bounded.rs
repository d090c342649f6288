//! Generic bounded value gene.

use super::allele::Allele;
use super::config::{Crossover, GeneOperators, Mutation};
use crate::error::{GenotypeError, Result};
use rand::Rng;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named value of type `T` kept within `[lower, upper]`.
///
/// The value is in bounds after construction and after every
/// [`mutate`](Self::mutate), [`cross`](Self::cross) or
/// [`set_value`](Self::set_value). Operators keep their results inside the
/// bounds; they never report an out-of-bounds result. Deserialized genes
/// are checked the same way as constructed ones.
///
/// # Examples
///
/// ```
/// use u_genotype::gene::BoundedGene;
/// use u_genotype::random::create_rng;
///
/// let mut rng = create_rng(42);
/// let mut weight = BoundedGene::new("weight", 0.5, -1.0, 1.0).unwrap();
/// for _ in 0..100 {
///     weight.mutate(&mut rng);
///     assert!((-1.0..=1.0).contains(&weight.value()));
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "BoundedGeneRecord<T>")
)]
pub struct BoundedGene<T: Allele> {
    name: String,
    value: T,
    lower: T,
    upper: T,
    operators: GeneOperators,
}

impl<T: Allele> BoundedGene<T> {
    /// Creates a gene with default operators.
    ///
    /// Fails with [`GenotypeError::InvalidGene`] if `lower > upper`, any of
    /// the three values is not valid for `T` (e.g. NaN), the bound width is
    /// not finite, or `value` lies outside the bounds.
    pub fn new(name: impl Into<String>, value: T, lower: T, upper: T) -> Result<Self> {
        let name = name.into();
        check_bounds(&name, value, lower, upper)?;
        Ok(Self {
            name,
            value,
            lower,
            upper,
            operators: GeneOperators::default(),
        })
    }

    /// Replaces the operator settings.
    ///
    /// Fails with [`GenotypeError::InvalidGene`] if the settings do not
    /// pass [`GeneOperators::validate`].
    pub fn with_operators(mut self, operators: GeneOperators) -> Result<Self> {
        operators
            .validate()
            .map_err(|reason| GenotypeError::invalid_gene(&self.name, reason))?;
        self.operators = operators;
        Ok(self)
    }

    /// The gene's identity key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current value.
    pub fn value(&self) -> T {
        self.value
    }

    pub fn lower(&self) -> T {
        self.lower
    }

    pub fn upper(&self) -> T {
        self.upper
    }

    pub fn operators(&self) -> &GeneOperators {
        &self.operators
    }

    /// Assigns a value, rejecting it if it falls outside the bounds.
    pub fn set_value(&mut self, value: T) -> Result<()> {
        check_bounds(&self.name, value, self.lower, self.upper)?;
        self.value = value;
        Ok(())
    }

    /// Applies the configured mutation policy in place.
    ///
    /// The value changes whenever the bounds leave room for another value,
    /// including when it sits on a bound.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let next = match self.operators.mutation {
            Mutation::Resample => T::resample(self.value, self.lower, self.upper, rng),
            Mutation::Perturb { scale } => {
                T::perturb(self.value, self.lower, self.upper, scale, rng)
            }
        };
        self.value = next.clamp_into(self.lower, self.upper);
    }

    /// Recombines with `other`'s value using this gene's crossover policy.
    ///
    /// `other` is only read. Fails with [`GenotypeError::IncompatiblePeer`]
    /// if the bounds differ; `self` is then left unchanged.
    pub fn cross<R: Rng + ?Sized>(&mut self, other: &Self, rng: &mut R) -> Result<()> {
        self.check_peer(other)?;
        let (a, b) = (self.value, other.value);
        let next = match self.operators.crossover {
            Crossover::Uniform { bias } => {
                if rng.random_bool(bias) {
                    a
                } else {
                    b
                }
            }
            Crossover::Arithmetic => T::mean(a, b, rng),
            Crossover::Blend { alpha } => T::blend(a, b, self.lower, self.upper, alpha, rng),
        };
        self.value = next.clamp_into(self.lower, self.upper);
        Ok(())
    }

    /// Verifies that `other` has the same bounds.
    pub(crate) fn check_peer(&self, other: &Self) -> Result<()> {
        if self.lower != other.lower || self.upper != other.upper {
            return Err(GenotypeError::incompatible(
                &self.name,
                format!(
                    "bounds [{}, {}] differ from peer bounds [{}, {}]",
                    self.lower, self.upper, other.lower, other.upper
                ),
            ));
        }
        Ok(())
    }
}

impl<T: Allele> fmt::Display for BoundedGene<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Wire form of a [`BoundedGene`], checked on the way in.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct BoundedGeneRecord<T> {
    name: String,
    value: T,
    lower: T,
    upper: T,
    #[serde(default)]
    operators: GeneOperators,
}

#[cfg(feature = "serde")]
impl<T: Allele> TryFrom<BoundedGeneRecord<T>> for BoundedGene<T> {
    type Error = GenotypeError;

    fn try_from(record: BoundedGeneRecord<T>) -> Result<Self> {
        BoundedGene::new(record.name, record.value, record.lower, record.upper)?
            .with_operators(record.operators)
    }
}

fn check_bounds<T: Allele>(name: &str, value: T, lower: T, upper: T) -> Result<()> {
    if !lower.is_valid() || !upper.is_valid() || !value.is_valid() {
        return Err(GenotypeError::invalid_gene(name, "bounds and value must be finite"));
    }
    if lower > upper {
        return Err(GenotypeError::invalid_gene(
            name,
            format!("lower bound {lower} exceeds upper bound {upper}"),
        ));
    }
    if !T::width(lower, upper).is_finite() {
        return Err(GenotypeError::invalid_gene(name, "bound width overflows"));
    }
    if value < lower || value > upper {
        return Err(GenotypeError::invalid_gene(
            name,
            format!("value {value} outside [{lower}, {upper}]"),
        ));
    }
    Ok(())
}

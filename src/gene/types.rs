//! The closed set of gene kinds and the uniform [`Gene`] contract.

use super::allele::Allele;
use super::bounded::BoundedGene;
use super::choice::ChoiceGene;
use super::config::GeneOperators;
use crate::error::{GenotypeError, Result};
use rand::Rng;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Discriminant of a [`Gene`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneKind {
    Real,
    Integer,
    Flag,
    Choice,
}

impl fmt::Display for GeneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GeneKind::Real => "real",
            GeneKind::Integer => "integer",
            GeneKind::Flag => "flag",
            GeneKind::Choice => "choice",
        })
    }
}

/// A single bounded, typed value within a genotype.
///
/// Every variant supports the same operations: [`mutate`](Self::mutate),
/// [`cross`](Self::cross), deep copy via [`Clone`], [`name`](Self::name) and
/// string rendering via [`Display`](fmt::Display). Code holding a `Gene`
/// does not need to know which variant it is.
///
/// # Examples
///
/// ```
/// use u_genotype::gene::Gene;
/// use u_genotype::random::create_rng;
///
/// let mut rng = create_rng(42);
/// let mut dropout = Gene::real("dropout", 0.25, 0.0, 1.0).unwrap();
/// let peer = Gene::real("dropout", 0.75, 0.0, 1.0).unwrap();
/// dropout.cross(&peer, &mut rng).unwrap();
/// assert_eq!(dropout.to_string(), "0.5");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Gene {
    Real(BoundedGene<f64>),
    Integer(BoundedGene<i64>),
    Flag(BoundedGene<bool>),
    Choice(ChoiceGene),
}

impl Gene {
    /// Bounded real-valued gene.
    pub fn real(name: impl Into<String>, value: f64, lower: f64, upper: f64) -> Result<Self> {
        BoundedGene::new(name, value, lower, upper).map(Gene::Real)
    }

    /// Bounded integer gene.
    pub fn integer(name: impl Into<String>, value: i64, lower: i64, upper: i64) -> Result<Self> {
        BoundedGene::new(name, value, lower, upper).map(Gene::Integer)
    }

    /// On/off flag gene over `[false, true]`.
    pub fn flag(name: impl Into<String>, value: bool) -> Result<Self> {
        BoundedGene::new(name, value, false, true).map(Gene::Flag)
    }

    /// Enumerated choice gene starting at the label `initial`.
    pub fn choice<I, S>(name: impl Into<String>, options: I, initial: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ChoiceGene::new(name, options, initial).map(Gene::Choice)
    }

    /// Replaces the operator settings of whichever variant this is.
    pub fn with_operators(self, operators: GeneOperators) -> Result<Self> {
        match self {
            Gene::Real(g) => g.with_operators(operators).map(Gene::Real),
            Gene::Integer(g) => g.with_operators(operators).map(Gene::Integer),
            Gene::Flag(g) => g.with_operators(operators).map(Gene::Flag),
            Gene::Choice(g) => g.with_operators(operators).map(Gene::Choice),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Gene::Real(g) => g.name(),
            Gene::Integer(g) => g.name(),
            Gene::Flag(g) => g.name(),
            Gene::Choice(g) => g.name(),
        }
    }

    pub fn kind(&self) -> GeneKind {
        match self {
            Gene::Real(_) => GeneKind::Real,
            Gene::Integer(_) => GeneKind::Integer,
            Gene::Flag(_) => GeneKind::Flag,
            Gene::Choice(_) => GeneKind::Choice,
        }
    }

    pub fn operators(&self) -> &GeneOperators {
        match self {
            Gene::Real(g) => g.operators(),
            Gene::Integer(g) => g.operators(),
            Gene::Flag(g) => g.operators(),
            Gene::Choice(g) => g.operators(),
        }
    }

    /// Applies the variant's mutation policy in place.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self {
            Gene::Real(g) => g.mutate(rng),
            Gene::Integer(g) => g.mutate(rng),
            Gene::Flag(g) => g.mutate(rng),
            Gene::Choice(g) => g.mutate(rng),
        }
    }

    /// Recombines this gene's value with `other`'s.
    ///
    /// Fails with [`GenotypeError::TypeMismatch`] if `other` is another kind
    /// and [`GenotypeError::IncompatiblePeer`] if its bounds or options
    /// differ. `other` is never modified.
    pub fn cross<R: Rng + ?Sized>(&mut self, other: &Gene, rng: &mut R) -> Result<()> {
        match (self, other) {
            (Gene::Real(a), Gene::Real(b)) => a.cross(b, rng),
            (Gene::Integer(a), Gene::Integer(b)) => a.cross(b, rng),
            (Gene::Flag(a), Gene::Flag(b)) => a.cross(b, rng),
            (Gene::Choice(a), Gene::Choice(b)) => a.cross(b, rng),
            (a, b) => Err(a.mismatch(b)),
        }
    }

    /// Checks, without drawing randomness, whether [`cross`](Self::cross)
    /// with `other` would be accepted.
    pub fn check_peer(&self, other: &Gene) -> Result<()> {
        match (self, other) {
            (Gene::Real(a), Gene::Real(b)) => a.check_peer(b),
            (Gene::Integer(a), Gene::Integer(b)) => a.check_peer(b),
            (Gene::Flag(a), Gene::Flag(b)) => a.check_peer(b),
            (Gene::Choice(a), Gene::Choice(b)) => a.check_peer(b),
            (a, b) => Err(a.mismatch(b)),
        }
    }

    /// Deep copy. Equivalent to [`Clone::clone`].
    pub fn copy(&self) -> Gene {
        self.clone()
    }

    fn mismatch(&self, other: &Gene) -> GenotypeError {
        GenotypeError::TypeMismatch {
            name: self.name().to_string(),
            expected: self.kind(),
            actual: other.kind(),
        }
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gene::Real(g) => fmt::Display::fmt(g, f),
            Gene::Integer(g) => fmt::Display::fmt(g, f),
            Gene::Flag(g) => fmt::Display::fmt(g, f),
            Gene::Choice(g) => fmt::Display::fmt(g, f),
        }
    }
}

impl<T: Allele> From<BoundedGene<T>> for Gene {
    fn from(gene: BoundedGene<T>) -> Self {
        T::into_gene(gene)
    }
}

impl From<ChoiceGene> for Gene {
    fn from(gene: ChoiceGene) -> Self {
        Gene::Choice(gene)
    }
}

/// A concrete gene type that can be borrowed out of a [`Gene`].
///
/// Used by typed lookups such as
/// [`Genotype::get_gene_as`](crate::genotype::Genotype::get_gene_as) to
/// check the variant instead of casting blindly.
pub trait GeneVariant: Sized {
    /// The variant this type corresponds to.
    const KIND: GeneKind;

    fn from_gene(gene: &Gene) -> Option<&Self>;

    fn from_gene_mut(gene: &mut Gene) -> Option<&mut Self>;
}

impl<T: Allele> GeneVariant for BoundedGene<T> {
    const KIND: GeneKind = T::KIND;

    fn from_gene(gene: &Gene) -> Option<&Self> {
        T::from_gene(gene)
    }

    fn from_gene_mut(gene: &mut Gene) -> Option<&mut Self> {
        T::from_gene_mut(gene)
    }
}

impl GeneVariant for ChoiceGene {
    const KIND: GeneKind = GeneKind::Choice;

    fn from_gene(gene: &Gene) -> Option<&Self> {
        match gene {
            Gene::Choice(g) => Some(g),
            _ => None,
        }
    }

    fn from_gene_mut(gene: &mut Gene) -> Option<&mut Self> {
        match gene {
            Gene::Choice(g) => Some(g),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene::Mutation;
    use crate::random::create_rng;

    #[test]
    fn test_constructors_and_kind() {
        assert_eq!(Gene::real("a", 0.0, -1.0, 1.0).unwrap().kind(), GeneKind::Real);
        assert_eq!(Gene::integer("b", 2, 0, 4).unwrap().kind(), GeneKind::Integer);
        assert_eq!(Gene::flag("c", true).unwrap().kind(), GeneKind::Flag);
        assert_eq!(
            Gene::choice("d", ["x", "y"], "y").unwrap().kind(),
            GeneKind::Choice
        );
    }

    #[test]
    fn test_display_renders_value() {
        assert_eq!(Gene::real("a", 0.5, 0.0, 1.0).unwrap().to_string(), "0.5");
        assert_eq!(Gene::integer("b", -3, -5, 5).unwrap().to_string(), "-3");
        assert_eq!(Gene::flag("c", false).unwrap().to_string(), "false");
        assert_eq!(Gene::choice("d", ["x", "y"], "y").unwrap().to_string(), "y");
    }

    #[test]
    fn test_name() {
        let g = Gene::integer("layers", 3, 1, 8).unwrap();
        assert_eq!(g.name(), "layers");
    }

    #[test]
    fn test_cross_kind_mismatch() {
        let mut rng = create_rng(0);
        let mut a = Gene::real("x", 0.5, 0.0, 1.0).unwrap();
        let b = Gene::integer("x", 1, 0, 1).unwrap();
        let err = a.cross(&b, &mut rng).unwrap_err();
        match err {
            GenotypeError::TypeMismatch {
                name,
                expected,
                actual,
            } => {
                assert_eq!(name, "x");
                assert_eq!(expected, GeneKind::Real);
                assert_eq!(actual, GeneKind::Integer);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(a.check_peer(&b).is_err());
    }

    #[test]
    fn test_check_peer_same_kind() {
        let a = Gene::integer("x", 1, 0, 10).unwrap();
        let b = Gene::integer("x", 7, 0, 10).unwrap();
        let c = Gene::integer("x", 7, 0, 20).unwrap();
        assert!(a.check_peer(&b).is_ok());
        assert!(a.check_peer(&c).is_err());
    }

    #[test]
    fn test_with_operators_dispatch() {
        let ops = GeneOperators::default().with_mutation(Mutation::Resample);
        let g = Gene::choice("d", ["x", "y"], "x")
            .unwrap()
            .with_operators(ops)
            .unwrap();
        assert_eq!(g.operators().mutation, Mutation::Resample);
    }

    #[test]
    fn test_copy_shares_nothing() {
        let mut rng = create_rng(11);
        let original = Gene::flag("f", false).unwrap();
        let mut copy = original.copy();
        copy.mutate(&mut rng);
        assert_eq!(original.to_string(), "false");
        assert_eq!(copy.to_string(), "true");
    }

    #[test]
    fn test_variant_lookup() {
        let g = Gene::integer("n", 4, 0, 9).unwrap();
        assert!(BoundedGene::<i64>::from_gene(&g).is_some());
        assert!(BoundedGene::<f64>::from_gene(&g).is_none());
        assert!(ChoiceGene::from_gene(&g).is_none());
        assert_eq!(<BoundedGene<i64> as GeneVariant>::KIND, GeneKind::Integer);
    }

    #[test]
    fn test_from_bounded() {
        let g: Gene = BoundedGene::new("w", 1.0, 0.0, 2.0).unwrap().into();
        assert_eq!(g.kind(), GeneKind::Real);
    }
}

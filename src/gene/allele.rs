//! Value domains a [`BoundedGene`] can hold.
//!
//! [`Allele`] supplies the numeric semantics of mutation and crossover for
//! one value type. The generic gene code only orchestrates: it picks the
//! operator from its configuration and hands the bounds to these functions,
//! which are responsible for returning an in-bounds value.

use super::bounded::BoundedGene;
use super::types::{Gene, GeneKind};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::fmt::{Debug, Display};

/// A value type that can live inside a [`BoundedGene`].
///
/// Implemented for `f64` (real), `i64` (integer) and `bool` (flag). The
/// set is closed: each implementation maps to one [`Gene`] variant.
pub trait Allele: Copy + PartialOrd + Debug + Display + Send + Sync + 'static {
    /// The gene variant this value type is stored under.
    const KIND: GeneKind;

    /// Whether the value can take part in ordering (rejects NaN and infinities).
    fn is_valid(self) -> bool {
        true
    }

    /// Width of `[lower, upper]` as `f64`.
    fn width(lower: Self, upper: Self) -> f64;

    /// Uniform draw from `[lower, upper]`.
    fn sample<R: Rng + ?Sized>(lower: Self, upper: Self, rng: &mut R) -> Self;

    /// Uniform draw from `[lower, upper]` other than `value`.
    ///
    /// Returns `value` only when it is the sole value in the bounds.
    fn resample<R: Rng + ?Sized>(value: Self, lower: Self, upper: Self, rng: &mut R) -> Self;

    /// Bounded random step around `value`.
    ///
    /// Differs from `value` whenever the bounds leave room to move.
    fn perturb<R: Rng + ?Sized>(
        value: Self,
        lower: Self,
        upper: Self,
        scale: f64,
        rng: &mut R,
    ) -> Self;

    /// Arithmetic mean of `a` and `b`.
    fn mean<R: Rng + ?Sized>(a: Self, b: Self, rng: &mut R) -> Self;

    /// BLX-α draw between `a` and `b`, clamped into `[lower, upper]`.
    fn blend<R: Rng + ?Sized>(
        a: Self,
        b: Self,
        lower: Self,
        upper: Self,
        alpha: f64,
        rng: &mut R,
    ) -> Self;

    /// Clamps `self` into `[lower, upper]`.
    fn clamp_into(self, lower: Self, upper: Self) -> Self {
        if self < lower {
            lower
        } else if self > upper {
            upper
        } else {
            self
        }
    }

    /// Wraps a gene of this value type into the matching [`Gene`] variant.
    fn into_gene(gene: BoundedGene<Self>) -> Gene;

    /// Borrows the bounded gene out of `gene` if it is the matching variant.
    fn from_gene(gene: &Gene) -> Option<&BoundedGene<Self>>;

    /// Mutable counterpart of [`from_gene`](Allele::from_gene).
    fn from_gene_mut(gene: &mut Gene) -> Option<&mut BoundedGene<Self>>;
}

/// Gaussian step with standard deviation `scale * width`.
///
/// Returns `None` when the deviation is not representable, in which case the
/// caller resamples instead.
fn gaussian_step<R: Rng + ?Sized>(width: f64, scale: f64, rng: &mut R) -> Option<f64> {
    let normal = Normal::new(0.0, scale * width).ok()?;
    Some(normal.sample(rng))
}

/// Folds `x` back into `[lower, upper]` by reflecting it off the bounds.
fn reflect_real(x: f64, lower: f64, upper: f64) -> f64 {
    let width = upper - lower;
    let period = 2.0 * width;
    if !period.is_finite() || !x.is_finite() {
        return x.clamp(lower, upper);
    }
    let offset = (x - lower).rem_euclid(period);
    let folded = if offset > width { period - offset } else { offset };
    (lower + folded).clamp(lower, upper)
}

/// Integer counterpart of [`reflect_real`]; `i128` holds any `i64` sum.
fn reflect_integer(x: i128, lower: i64, upper: i64) -> i64 {
    let (lower, upper) = (lower as i128, upper as i128);
    let width = upper - lower;
    let offset = (x - lower).rem_euclid(2 * width);
    let folded = if offset > width { 2 * width - offset } else { offset };
    (lower + folded) as i64
}

impl Allele for f64 {
    const KIND: GeneKind = GeneKind::Real;

    fn is_valid(self) -> bool {
        self.is_finite()
    }

    fn width(lower: Self, upper: Self) -> f64 {
        upper - lower
    }

    fn sample<R: Rng + ?Sized>(lower: Self, upper: Self, rng: &mut R) -> Self {
        if lower >= upper {
            return lower;
        }
        rng.random_range(lower..=upper)
    }

    fn resample<R: Rng + ?Sized>(value: Self, lower: Self, upper: Self, rng: &mut R) -> Self {
        let drawn = Self::sample(lower, upper, rng);
        if drawn != value || lower >= upper {
            drawn
        } else if value < upper {
            upper
        } else {
            lower
        }
    }

    fn perturb<R: Rng + ?Sized>(
        value: Self,
        lower: Self,
        upper: Self,
        scale: f64,
        rng: &mut R,
    ) -> Self {
        if lower >= upper {
            return lower;
        }
        let Some(step) = gaussian_step(upper - lower, scale, rng) else {
            return Self::resample(value, lower, upper, rng);
        };
        let mut next = value + step;
        if next < lower || next > upper {
            next = reflect_real(next, lower, upper);
        }
        if next == value {
            // Step lost to rounding.
            return Self::resample(value, lower, upper, rng);
        }
        next
    }

    fn mean<R: Rng + ?Sized>(a: Self, b: Self, _rng: &mut R) -> Self {
        a + (b - a) / 2.0
    }

    fn blend<R: Rng + ?Sized>(
        a: Self,
        b: Self,
        lower: Self,
        upper: Self,
        alpha: f64,
        rng: &mut R,
    ) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let extension = alpha * (hi - lo);
        let from = (lo - extension).max(lower);
        let to = (hi + extension).min(upper);
        if from >= to || !extension.is_finite() {
            return lo.clamp(lower, upper);
        }
        rng.random_range(from..=to)
    }

    fn into_gene(gene: BoundedGene<Self>) -> Gene {
        Gene::Real(gene)
    }

    fn from_gene(gene: &Gene) -> Option<&BoundedGene<Self>> {
        match gene {
            Gene::Real(g) => Some(g),
            _ => None,
        }
    }

    fn from_gene_mut(gene: &mut Gene) -> Option<&mut BoundedGene<Self>> {
        match gene {
            Gene::Real(g) => Some(g),
            _ => None,
        }
    }
}

impl Allele for i64 {
    const KIND: GeneKind = GeneKind::Integer;

    fn width(lower: Self, upper: Self) -> f64 {
        upper as f64 - lower as f64
    }

    fn sample<R: Rng + ?Sized>(lower: Self, upper: Self, rng: &mut R) -> Self {
        if lower >= upper {
            return lower;
        }
        rng.random_range(lower..=upper)
    }

    fn resample<R: Rng + ?Sized>(value: Self, lower: Self, upper: Self, rng: &mut R) -> Self {
        if lower >= upper {
            return lower;
        }
        // Draw among the other values of the range.
        let drawn = rng.random_range(lower..upper);
        if drawn >= value {
            drawn + 1
        } else {
            drawn
        }
    }

    fn perturb<R: Rng + ?Sized>(
        value: Self,
        lower: Self,
        upper: Self,
        scale: f64,
        rng: &mut R,
    ) -> Self {
        if lower >= upper {
            return lower;
        }
        let Some(raw) = gaussian_step(Self::width(lower, upper), scale, rng) else {
            return Self::resample(value, lower, upper, rng);
        };
        let step = raw.round().clamp(i64::MIN as f64, i64::MAX as f64) as i128;
        let next = reflect_integer(value as i128 + step, lower, upper);
        if next != value {
            return next;
        }
        // Always move at least one unit, toward a side that has room.
        if value >= upper {
            value - 1
        } else if value <= lower || rng.random_bool(0.5) {
            value + 1
        } else {
            value - 1
        }
    }

    fn mean<R: Rng + ?Sized>(a: Self, b: Self, _rng: &mut R) -> Self {
        // Round half away from zero; i128 avoids overflow on the sum.
        let sum = a as i128 + b as i128;
        let mid = if sum >= 0 { (sum + 1) / 2 } else { (sum - 1) / 2 };
        mid as i64
    }

    fn blend<R: Rng + ?Sized>(
        a: Self,
        b: Self,
        lower: Self,
        upper: Self,
        alpha: f64,
        rng: &mut R,
    ) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if lo == hi {
            return lo.clamp(lower, upper);
        }
        let extension = alpha * Self::width(lo, hi);
        let from = (lo as f64 - extension).max(lower as f64);
        let to = (hi as f64 + extension).min(upper as f64);
        if from >= to || !extension.is_finite() {
            return lo.clamp(lower, upper);
        }
        let drawn = rng.random_range(from..=to).round();
        (drawn as i64).clamp(lower, upper)
    }

    fn into_gene(gene: BoundedGene<Self>) -> Gene {
        Gene::Integer(gene)
    }

    fn from_gene(gene: &Gene) -> Option<&BoundedGene<Self>> {
        match gene {
            Gene::Integer(g) => Some(g),
            _ => None,
        }
    }

    fn from_gene_mut(gene: &mut Gene) -> Option<&mut BoundedGene<Self>> {
        match gene {
            Gene::Integer(g) => Some(g),
            _ => None,
        }
    }
}

impl Allele for bool {
    const KIND: GeneKind = GeneKind::Flag;

    fn width(lower: Self, upper: Self) -> f64 {
        if lower == upper {
            0.0
        } else {
            1.0
        }
    }

    fn sample<R: Rng + ?Sized>(lower: Self, upper: Self, rng: &mut R) -> Self {
        if lower == upper {
            return lower;
        }
        rng.random_bool(0.5)
    }

    fn resample<R: Rng + ?Sized>(value: Self, lower: Self, upper: Self, _rng: &mut R) -> Self {
        (!value).clamp_into(lower, upper)
    }

    fn perturb<R: Rng + ?Sized>(
        value: Self,
        lower: Self,
        upper: Self,
        _scale: f64,
        _rng: &mut R,
    ) -> Self {
        (!value).clamp_into(lower, upper)
    }

    fn mean<R: Rng + ?Sized>(a: Self, b: Self, rng: &mut R) -> Self {
        if a == b {
            a
        } else {
            rng.random_bool(0.5)
        }
    }

    fn blend<R: Rng + ?Sized>(
        a: Self,
        b: Self,
        _lower: Self,
        _upper: Self,
        _alpha: f64,
        rng: &mut R,
    ) -> Self {
        Self::mean(a, b, rng)
    }

    fn into_gene(gene: BoundedGene<Self>) -> Gene {
        Gene::Flag(gene)
    }

    fn from_gene(gene: &Gene) -> Option<&BoundedGene<Self>> {
        match gene {
            Gene::Flag(g) => Some(g),
            _ => None,
        }
    }

    fn from_gene_mut(gene: &mut Gene) -> Option<&mut BoundedGene<Self>> {
        match gene {
            Gene::Flag(g) => Some(g),
            _ => None,
        }
    }
}

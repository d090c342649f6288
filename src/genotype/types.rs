//! Name-keyed gene collection.

use crate::error::{GenotypeError, Result};
use crate::gene::{Allele, BoundedGene, Gene, GeneVariant};
use log::{debug, trace, warn};
use rand::Rng;
use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One candidate solution: an ordered set of uniquely named genes plus an
/// externally assigned fitness score.
///
/// Genes keep the order they were given at construction. That order drives
/// iteration, [`Display`](fmt::Display) output and the order in which
/// random samples are drawn.
///
/// A genotype owns its genes outright. [`cross`](Self::cross) only reads
/// the peer, and [`Clone`] / [`copy`](Self::copy) deep-copy every gene.
///
/// # Examples
///
/// ```
/// use u_genotype::gene::Gene;
/// use u_genotype::genotype::Genotype;
/// use u_genotype::random::create_rng;
///
/// let mut rng = create_rng(42);
/// let mut g = Genotype::new([
///     Gene::real("weight", 0.5, -1.0, 1.0).unwrap(),
///     Gene::integer("layers", 2, 1, 8).unwrap(),
/// ])
/// .unwrap();
/// assert_eq!(g.to_string(), "weight:0.5,layers:2,");
///
/// let survivor = g.copy();
/// g.mutate(1.0, &mut rng);
/// assert_eq!(survivor.to_string(), "weight:0.5,layers:2,");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "GenotypeRecord", into = "GenotypeRecord")
)]
pub struct Genotype {
    genes: Vec<Gene>,
    index: HashMap<String, usize>,
    score: f64,
}

impl Genotype {
    /// Builds a genotype with a score of 0.
    ///
    /// Fails with [`GenotypeError::DuplicateKey`] on the first repeated name;
    /// no genotype is produced in that case.
    pub fn new(genes: impl IntoIterator<Item = Gene>) -> Result<Self> {
        Self::with_score(genes, 0.0)
    }

    /// Builds a genotype with an initial score.
    pub fn with_score(genes: impl IntoIterator<Item = Gene>, score: f64) -> Result<Self> {
        let genes: Vec<Gene> = genes.into_iter().collect();
        let mut index = HashMap::with_capacity(genes.len());
        for (i, gene) in genes.iter().enumerate() {
            if index.insert(gene.name().to_string(), i).is_some() {
                return Err(GenotypeError::DuplicateKey(gene.name().to_string()));
            }
        }
        Ok(Self {
            genes,
            index,
            score,
        })
    }

    /// Returns the gene named `name`.
    pub fn get_gene(&self, name: &str) -> Result<&Gene> {
        self.index
            .get(name)
            .map(|&i| &self.genes[i])
            .ok_or_else(|| GenotypeError::NotFound(name.to_string()))
    }

    /// Mutable counterpart of [`get_gene`](Self::get_gene).
    pub fn get_gene_mut(&mut self, name: &str) -> Result<&mut Gene> {
        match self.index.get(name) {
            Some(&i) => Ok(&mut self.genes[i]),
            None => Err(GenotypeError::NotFound(name.to_string())),
        }
    }

    /// Returns the gene named `name` as the concrete type `T`.
    ///
    /// Fails with [`GenotypeError::NotFound`] if absent and
    /// [`GenotypeError::TypeMismatch`] if the stored gene is another kind.
    ///
    /// ```
    /// use u_genotype::gene::{BoundedGene, Gene};
    /// use u_genotype::genotype::Genotype;
    ///
    /// let g = Genotype::new([Gene::integer("layers", 3, 1, 8).unwrap()]).unwrap();
    /// let layers: &BoundedGene<i64> = g.get_gene_as("layers").unwrap();
    /// assert_eq!(layers.value(), 3);
    /// assert!(g.get_gene_as::<BoundedGene<f64>>("layers").is_err());
    /// ```
    pub fn get_gene_as<T: GeneVariant>(&self, name: &str) -> Result<&T> {
        let gene = self.get_gene(name)?;
        T::from_gene(gene).ok_or_else(|| GenotypeError::TypeMismatch {
            name: name.to_string(),
            expected: T::KIND,
            actual: gene.kind(),
        })
    }

    /// Mutable counterpart of [`get_gene_as`](Self::get_gene_as).
    pub fn get_gene_as_mut<T: GeneVariant>(&mut self, name: &str) -> Result<&mut T> {
        let gene = self.get_gene_mut(name)?;
        let actual = gene.kind();
        T::from_gene_mut(gene).ok_or_else(|| GenotypeError::TypeMismatch {
            name: name.to_string(),
            expected: T::KIND,
            actual,
        })
    }

    /// Current value of a bounded gene.
    pub fn value_of<T: Allele>(&self, name: &str) -> Result<T> {
        self.get_gene_as::<BoundedGene<T>>(name).map(BoundedGene::value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Gene names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.genes.iter().map(Gene::name)
    }

    /// Genes in insertion order.
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// Externally assigned fitness.
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn set_score(&mut self, score: f64) {
        self.score = score;
    }

    /// Mutates each gene with probability `strength`.
    ///
    /// For every gene in insertion order, draws one `f32` uniformly from
    /// `[0, 1)` and, if it is below `strength`, calls that gene's
    /// [`mutate`](Gene::mutate) before moving on. `strength = 0` never
    /// mutates; `strength = 1` mutates every gene. Values outside `[0, 1]`
    /// are clamped and NaN mutates nothing.
    ///
    /// Returns the number of genes whose mutation fired.
    pub fn mutate<R: Rng + ?Sized>(&mut self, strength: f32, rng: &mut R) -> usize {
        let strength = if (0.0..=1.0).contains(&strength) {
            strength
        } else {
            warn!("mutation strength {strength} outside [0, 1], clamping");
            strength.clamp(0.0, 1.0)
        };

        let mut fired = 0;
        for gene in &mut self.genes {
            if rng.random::<f32>() < strength {
                gene.mutate(rng);
                trace!("mutated gene '{}' -> {}", gene.name(), gene);
                fired += 1;
            }
        }
        debug!(
            "mutation pass: {fired}/{} genes at strength {strength}",
            self.genes.len()
        );
        fired
    }

    /// Crosses every gene with the like-named gene of `other`.
    ///
    /// The operation is all-or-nothing. Every gene is first matched against
    /// `other`; if any name is missing ([`GenotypeError::MissingPeerGene`]),
    /// any kind differs ([`GenotypeError::TypeMismatch`]) or any bounds or
    /// option list differ ([`GenotypeError::IncompatiblePeer`]), the error is
    /// returned with `self` untouched and no randomness drawn. Otherwise each
    /// gene crosses in insertion order. `other` is never modified, and genes
    /// only present in `other` are ignored.
    pub fn cross<R: Rng + ?Sized>(&mut self, other: &Genotype, rng: &mut R) -> Result<()> {
        let peers = self
            .genes
            .iter()
            .map(|gene| {
                let &j = other
                    .index
                    .get(gene.name())
                    .ok_or_else(|| GenotypeError::MissingPeerGene(gene.name().to_string()))?;
                gene.check_peer(&other.genes[j])?;
                Ok(j)
            })
            .collect::<Result<Vec<usize>>>()?;

        // Every pair passed check_peer above, so no gene cross can fail
        // from here on and self is never left half-crossed.
        for (gene, j) in self.genes.iter_mut().zip(peers) {
            let crossed = gene.cross(&other.genes[j], rng);
            debug_assert!(crossed.is_ok(), "cross failed after peer check: {crossed:?}");
        }
        debug!("crossed {} genes", self.genes.len());
        Ok(())
    }

    /// Deep copy with the same genes, order and score. Equivalent to
    /// [`Clone::clone`].
    pub fn copy(&self) -> Genotype {
        self.clone()
    }
}

impl fmt::Display for Genotype {
    /// Renders `name:value,` for every gene in insertion order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for gene in &self.genes {
            write!(f, "{}:{},", gene.name(), gene)?;
        }
        Ok(())
    }
}

/// Serialized form: the ordered genes and the score. Genes check their own
/// bounds as they load; the name index is rebuilt here.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct GenotypeRecord {
    genes: Vec<Gene>,
    #[serde(default)]
    score: f64,
}

#[cfg(feature = "serde")]
impl From<Genotype> for GenotypeRecord {
    fn from(genotype: Genotype) -> Self {
        GenotypeRecord {
            genes: genotype.genes,
            score: genotype.score,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GenotypeRecord> for Genotype {
    type Error = GenotypeError;

    fn try_from(record: GenotypeRecord) -> Result<Self> {
        Genotype::with_score(record.genes, record.score)
    }
}

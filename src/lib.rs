//! Genotype substrate for evolutionary optimization.
//!
//! Provides the representation layer a genetic-algorithm driver builds on:
//!
//! - **Genes**: Typed, range-bounded values (real, integer, flag, enumerated
//!   choice) that mutate themselves and recombine with a like-named peer
//!   while never leaving their bounds.
//! - **Genotypes**: Ordered, name-keyed gene collections with an externally
//!   assigned fitness score, fanning mutation and crossover out to their
//!   genes.
//! - **Persistence** (feature `serde`): Versioned JSON save/load for
//!   genotypes, populations, or any aggregate embedding them.
//!
//! # Architecture
//!
//! Control flows one way: the driver calls `mutate`, `cross`, `copy` and
//! the score accessors; a genotype never calls back. Selection, fitness
//! evaluation and the generation loop are left to the consumer.
//!
//! Randomness is always injected as `&mut impl Rng`. Use
//! [`random::create_rng`] for reproducible runs.
//!
//! # Features
//!
//! - `serde`: Validated Serialize/Deserialize for genes and genotypes, plus
//!   the [`persist`] module
//! - `parallel`: Run [`genotype::mutate_population`] on rayon

pub mod error;
pub mod gene;
pub mod genotype;
#[cfg(feature = "serde")]
pub mod persist;
pub mod random;

pub use error::{GenotypeError, Result};

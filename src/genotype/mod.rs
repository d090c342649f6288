//! Genotypes: named gene collections with a fitness score.
//!
//! A [`Genotype`] fans mutation and crossover out to its genes while keeping
//! gene names aligned between crossover partners. It never decides *when*
//! those operators run or how the score is computed; that belongs to the
//! driver holding the population.
//!
//! # Key Types
//!
//! - [`Genotype`]: Ordered, name-keyed gene collection plus score
//!
//! # Helpers
//!
//! - [`mutate_population`]: Reproducible per-member mutation, parallel with
//!   the `parallel` feature
//! - [`copy_population`]: Deep copy of a whole population

mod population;
mod types;

pub use population::{copy_population, mutate_population};
pub use types::Genotype;

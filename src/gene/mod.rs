//! Typed, range-bounded genes.
//!
//! A gene is a named value that knows how to mutate itself and how to
//! recombine with the like-named gene of another genotype, while keeping its
//! value inside `[lower, upper]`.
//!
//! # Key Types
//!
//! - [`Gene`]: Closed variant over the supported kinds, with one uniform
//!   contract (mutate, cross, copy, name, display)
//! - [`BoundedGene`]: Generic bounded value holder, parameterized by an
//!   [`Allele`] value type (`f64`, `i64`, `bool`)
//! - [`ChoiceGene`]: Enumerated choice among labels
//! - [`GeneOperators`]: Per-gene mutation and crossover policy
//!
//! # References
//!
//! - Eshelman & Schaffer (1993), "Real-Coded Genetic Algorithms and
//!   Interval-Schemata" (BLX-α)
//! - Goncalves & Resende (2011), "Biased random-key genetic algorithms for
//!   combinatorial optimization" (parameterized uniform crossover)

mod allele;
mod bounded;
mod choice;
mod config;
mod types;

pub use allele::Allele;
pub use bounded::BoundedGene;
pub use choice::ChoiceGene;
pub use config::{Crossover, GeneOperators, Mutation};
pub use types::{Gene, GeneKind, GeneVariant};

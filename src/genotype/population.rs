//! Population-level helpers for an outer evolutionary driver.
//!
//! A genotype has no internal synchronization. These helpers partition the
//! work so that each member is touched by exactly one thread, and give every
//! member its own generator so the outcome does not depend on scheduling.

use super::types::Genotype;
use crate::random::create_rng;
use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Mutates every member of `population` at the given strength.
///
/// Member `i` uses a generator seeded with `seed + i` (wrapping), so the
/// result is the same whether the `parallel` feature is enabled or not.
///
/// Returns the total number of gene mutations fired.
pub fn mutate_population(population: &mut [Genotype], strength: f32, seed: u64) -> usize {
    let mutate_member = |(i, genotype): (usize, &mut Genotype)| {
        let mut rng = create_rng(seed.wrapping_add(i as u64));
        genotype.mutate(strength, &mut rng)
    };

    #[cfg(feature = "parallel")]
    let fired: usize = population
        .par_iter_mut()
        .enumerate()
        .map(mutate_member)
        .sum();

    #[cfg(not(feature = "parallel"))]
    let fired: usize = population.iter_mut().enumerate().map(mutate_member).sum();

    debug!(
        "population mutation: {fired} genes across {} genotypes",
        population.len()
    );
    fired
}

/// Deep-copies every member, e.g. to carry survivors into the next generation.
pub fn copy_population(population: &[Genotype]) -> Vec<Genotype> {
    population.iter().map(Genotype::copy).collect()
}

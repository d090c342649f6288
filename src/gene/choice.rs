//! Enumerated choice gene.

use super::config::{Crossover, GeneOperators, Mutation};
use crate::error::{GenotypeError, Result};
use rand::Rng;
use std::collections::HashSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A gene that selects one label out of a fixed, ordered option list.
///
/// The live value is an index in `[0, options.len() - 1]`. Labels are
/// unordered for crossover purposes, so arithmetic and blend crossover both
/// reduce to a fair coin between the parents. The option order does matter
/// for [`Mutation::Perturb`], which steps to a neighbouring index.
///
/// # Examples
///
/// ```
/// use u_genotype::gene::ChoiceGene;
///
/// let act = ChoiceGene::new("activation", ["relu", "tanh", "sigmoid"], "tanh").unwrap();
/// assert_eq!(act.value(), "tanh");
/// assert_eq!(act.index(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "ChoiceGeneRecord")
)]
pub struct ChoiceGene {
    name: String,
    options: Vec<String>,
    index: usize,
    operators: GeneOperators,
}

impl ChoiceGene {
    /// Creates a choice gene whose current value is the label `initial`.
    ///
    /// Fails with [`GenotypeError::InvalidGene`] if the option list is
    /// empty, holds duplicate labels, or does not contain `initial`.
    pub fn new<I, S>(name: impl Into<String>, options: I, initial: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        check_options(&name, &options)?;
        let index = options.iter().position(|o| o == initial).ok_or_else(|| {
            GenotypeError::invalid_gene(&name, format!("unknown option '{initial}'"))
        })?;
        Ok(Self {
            name,
            options,
            index,
            operators: GeneOperators::default(),
        })
    }

    /// Creates a choice gene positioned at `index`.
    pub fn from_index<I, S>(name: impl Into<String>, options: I, index: usize) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        check_options(&name, &options)?;
        check_index(&name, index, options.len())?;
        Ok(Self {
            name,
            options,
            index,
            operators: GeneOperators::default(),
        })
    }

    /// Replaces the operator settings.
    pub fn with_operators(mut self, operators: GeneOperators) -> Result<Self> {
        operators
            .validate()
            .map_err(|reason| GenotypeError::invalid_gene(&self.name, reason))?;
        self.operators = operators;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The currently selected label.
    pub fn value(&self) -> &str {
        &self.options[self.index]
    }

    /// Position of the selected label in [`options`](Self::options).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn operators(&self) -> &GeneOperators {
        &self.operators
    }

    /// Selects the option labelled `label`.
    pub fn set_value(&mut self, label: &str) -> Result<()> {
        self.index = self
            .options
            .iter()
            .position(|o| o == label)
            .ok_or_else(|| {
                GenotypeError::invalid_gene(&self.name, format!("unknown option '{label}'"))
            })?;
        Ok(())
    }

    /// Selects the option at `index`.
    pub fn set_index(&mut self, index: usize) -> Result<()> {
        check_index(&self.name, index, self.options.len())?;
        self.index = index;
        Ok(())
    }

    /// Moves to another option according to the mutation policy.
    ///
    /// A single-option gene never changes.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let n = self.options.len();
        if n < 2 {
            return;
        }
        self.index = match self.operators.mutation {
            Mutation::Resample => {
                // Draw among the other n - 1 options.
                let j = rng.random_range(0..n - 1);
                if j >= self.index {
                    j + 1
                } else {
                    j
                }
            }
            Mutation::Perturb { .. } => {
                if self.index == 0 {
                    1
                } else if self.index == n - 1 || rng.random_bool(0.5) {
                    self.index - 1
                } else {
                    self.index + 1
                }
            }
        };
    }

    /// Takes either its own or the peer's option.
    ///
    /// Fails with [`GenotypeError::IncompatiblePeer`] if the option lists differ.
    pub fn cross<R: Rng + ?Sized>(&mut self, other: &Self, rng: &mut R) -> Result<()> {
        self.check_peer(other)?;
        let keep_own = match self.operators.crossover {
            Crossover::Uniform { bias } => rng.random_bool(bias),
            Crossover::Arithmetic | Crossover::Blend { .. } => {
                self.index == other.index || rng.random_bool(0.5)
            }
        };
        if !keep_own {
            self.index = other.index;
        }
        Ok(())
    }

    pub(crate) fn check_peer(&self, other: &Self) -> Result<()> {
        if self.options != other.options {
            return Err(GenotypeError::incompatible(
                &self.name,
                "option lists differ from peer",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for ChoiceGene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct ChoiceGeneRecord {
    name: String,
    options: Vec<String>,
    index: usize,
    #[serde(default)]
    operators: GeneOperators,
}

#[cfg(feature = "serde")]
impl TryFrom<ChoiceGeneRecord> for ChoiceGene {
    type Error = GenotypeError;

    fn try_from(record: ChoiceGeneRecord) -> Result<Self> {
        ChoiceGene::from_index(record.name, record.options, record.index)?
            .with_operators(record.operators)
    }
}

fn check_options(name: &str, options: &[String]) -> Result<()> {
    if options.is_empty() {
        return Err(GenotypeError::invalid_gene(name, "option list is empty"));
    }
    let mut seen = HashSet::with_capacity(options.len());
    for option in options {
        if !seen.insert(option.as_str()) {
            return Err(GenotypeError::invalid_gene(
                name,
                format!("duplicate option '{option}'"),
            ));
        }
    }
    Ok(())
}

fn check_index(name: &str, index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(GenotypeError::invalid_gene(
            name,
            format!("option index {index} out of range for {len} options"),
        ));
    }
    Ok(())
}

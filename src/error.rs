//! Error types shared by genes, genotypes and persistence.

use crate::gene::GeneKind;
use thiserror::Error;

/// Failure signals raised by gene and genotype operations.
///
/// All variants are reported at the point of the violating call. Nothing is
/// retried or swallowed internally; recovery is up to the caller.
#[derive(Error, Debug)]
pub enum GenotypeError {
    /// Two genes passed to a genotype constructor share a name.
    #[error("duplicate gene name: {0}")]
    DuplicateKey(String),

    /// A lookup named a gene that the genotype does not contain.
    #[error("gene not found: {0}")]
    NotFound(String),

    /// A gene exists under the name, but is of a different kind.
    #[error("gene '{name}' is {actual}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: GeneKind,
        actual: GeneKind,
    },

    /// Crossover peer has no gene with this name.
    #[error("crossover peer is missing gene: {0}")]
    MissingPeerGene(String),

    /// Crossover peer gene has the same kind but different bounds or options.
    #[error("gene '{name}' cannot cross with peer: {reason}")]
    IncompatiblePeer { name: String, reason: String },

    /// Gene construction or assignment violated its bounds or option list.
    #[error("invalid gene '{name}': {reason}")]
    InvalidGene { name: String, reason: String },

    #[cfg(feature = "serde")]
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Persisted document carries another format tag.
    #[cfg(feature = "serde")]
    #[error("unsupported format '{found}', expected '{expected}'")]
    UnsupportedFormat { found: String, expected: String },

    /// Persisted document was written by an unsupported format version.
    #[cfg(feature = "serde")]
    #[error("unsupported format version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

impl GenotypeError {
    pub(crate) fn invalid_gene(name: &str, reason: impl Into<String>) -> Self {
        GenotypeError::InvalidGene {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn incompatible(name: &str, reason: impl Into<String>) -> Self {
        GenotypeError::IncompatiblePeer {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenotypeError>;

//! Versioned JSON persistence.
//!
//! Any serializable value (a single [`Genotype`](crate::genotype::Genotype),
//! a population, or a driver's own aggregate that embeds genotypes) is
//! wrapped in an envelope carrying a format tag and version:
//!
//! ```json
//! { "format": "u-genotype", "version": 1, "payload": { ... } }
//! ```
//!
//! Loading rejects foreign tags and unknown versions instead of guessing.

use crate::error::{GenotypeError, Result};
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Tag written into every envelope.
pub const FORMAT: &str = "u-genotype";

/// Envelope version produced by this crate.
pub const VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    format: &'a str,
    version: u32,
    payload: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    format: String,
    version: u32,
    payload: T,
}

/// Header read before the payload, so version errors win over payload errors.
#[derive(Deserialize)]
struct Header {
    format: String,
    version: u32,
}

fn check_header(format: &str, version: u32) -> Result<()> {
    if format != FORMAT {
        return Err(GenotypeError::UnsupportedFormat {
            found: format.to_string(),
            expected: FORMAT.to_string(),
        });
    }
    if version != VERSION {
        return Err(GenotypeError::UnsupportedVersion {
            found: version,
            supported: VERSION,
        });
    }
    Ok(())
}

/// Serializes `value` into an enveloped JSON string.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let envelope = EnvelopeRef {
        format: FORMAT,
        version: VERSION,
        payload: value,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Parses an enveloped JSON string.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    let header: Header = serde_json::from_str(json)?;
    check_header(&header.format, header.version)?;
    let envelope: Envelope<T> = serde_json::from_str(json)?;
    Ok(envelope.payload)
}

/// Writes `value` to `path`, replacing any existing file.
pub fn save<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    let envelope = EnvelopeRef {
        format: FORMAT,
        version: VERSION,
        payload: value,
    };
    serde_json::to_writer_pretty(&mut writer, &envelope)?;
    writer.flush()?;
    debug!("saved {} v{} to {}", FORMAT, VERSION, path.display());
    Ok(())
}

/// Reads a value previously written by [`save`].
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    let header = Header::deserialize(&value)?;
    check_header(&header.format, header.version)?;
    let envelope = Envelope::<T>::deserialize(value)?;
    debug!("loaded {} v{} from {}", FORMAT, VERSION, path.display());
    Ok(envelope.payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene::{Crossover, Gene, GeneOperators, Mutation};
    use crate::genotype::Genotype;
    use crate::random::create_rng;
    use std::path::PathBuf;

    fn sample() -> Genotype {
        let ops = GeneOperators::default()
            .with_mutation(Mutation::Resample)
            .with_crossover(Crossover::Blend { alpha: 0.5 });
        Genotype::with_score(
            [
                Gene::real("weight", 0.5, -1.0, 1.0).unwrap(),
                Gene::integer("layers", 3, 1, 8)
                    .unwrap()
                    .with_operators(ops)
                    .unwrap(),
                Gene::flag("batch_norm", true).unwrap(),
                Gene::choice("activation", ["relu", "tanh"], "tanh").unwrap(),
            ],
            0.75,
        )
        .unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("u-genotype-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn test_string_round_trip_keeps_order_and_score() {
        let g = sample();
        let json = to_json(&g).unwrap();
        assert!(json.contains("\"format\": \"u-genotype\""));
        let back: Genotype = from_json(&json).unwrap();
        assert_eq!(back, g);
        assert_eq!(back.to_string(), g.to_string());
        assert_eq!(back.score(), 0.75);
    }

    #[test]
    fn test_file_round_trip_population() {
        let mut rng = create_rng(4);
        let mut pop = vec![sample(), sample()];
        pop[1].mutate(1.0, &mut rng);
        let path = temp_path("population");
        save(&path, &pop).unwrap();
        let back: Vec<Genotype> = load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(back, pop);
    }

    #[test]
    fn test_rejects_unknown_version() {
        let json = r#"{ "format": "u-genotype", "version": 99, "payload": null }"#;
        let err = from_json::<Genotype>(json).unwrap_err();
        assert!(matches!(
            err,
            GenotypeError::UnsupportedVersion { found: 99, supported: 1 }
        ));
    }

    #[test]
    fn test_rejects_foreign_format() {
        let json = r#"{ "format": "other", "version": 1, "payload": null }"#;
        let err = from_json::<Genotype>(json).unwrap_err();
        assert!(matches!(err, GenotypeError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_rejects_duplicate_names_on_load() {
        let json = r#"{
            "format": "u-genotype",
            "version": 1,
            "payload": {
                "genes": [
                    { "kind": "flag", "name": "x", "value": true, "lower": false, "upper": true },
                    { "kind": "flag", "name": "x", "value": false, "lower": false, "upper": true }
                ],
                "score": 0.0
            }
        }"#;
        let err = from_json::<Genotype>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate gene name: x"));
    }

    #[test]
    fn test_rejects_out_of_bounds_value_on_load() {
        let json = r#"{
            "format": "u-genotype",
            "version": 1,
            "payload": {
                "genes": [
                    { "kind": "real", "name": "w", "value": 3.0, "lower": -1.0, "upper": 1.0 }
                ]
            }
        }"#;
        assert!(from_json::<Genotype>(json).is_err());
    }

    #[test]
    fn test_rejects_standalone_gene_out_of_bounds() {
        let json = r#"{
            "format": "u-genotype",
            "version": 1,
            "payload": { "kind": "real", "name": "w", "value": 5.0, "lower": -1.0, "upper": 1.0 }
        }"#;
        let err = from_json::<Gene>(json).unwrap_err();
        assert!(matches!(err, GenotypeError::Serde(_)));
        assert!(err.to_string().contains("outside"), "{err}");
    }

    #[test]
    fn test_rejects_standalone_gene_with_invalid_bias() {
        let json = r#"{
            "format": "u-genotype",
            "version": 1,
            "payload": {
                "kind": "integer", "name": "n", "value": 2, "lower": 0, "upper": 4,
                "operators": {
                    "mutation": "Resample",
                    "crossover": { "Uniform": { "bias": 2.0 } }
                }
            }
        }"#;
        assert!(from_json::<Gene>(json).is_err());
    }

    #[test]
    fn test_rejects_choice_index_out_of_range_in_file() {
        let path = temp_path("bad-choice");
        std::fs::write(
            &path,
            r#"{
                "format": "u-genotype",
                "version": 1,
                "payload": [
                    { "kind": "choice", "name": "act", "options": ["relu", "tanh"], "index": 0 },
                    { "kind": "choice", "name": "act", "options": ["relu", "tanh"], "index": 2 }
                ]
            }"#,
        )
        .unwrap();
        let result = load::<Vec<Gene>>(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.unwrap_err().to_string().contains("out of range"));
    }

    #[test]
    fn test_standalone_gene_round_trip() {
        let gene = Gene::choice("act", ["relu", "tanh"], "tanh").unwrap();
        let back: Gene = from_json(&to_json(&gene).unwrap()).unwrap();
        assert_eq!(back, gene);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load::<Genotype>(temp_path("missing")).unwrap_err();
        assert!(matches!(err, GenotypeError::Io(_)));
    }
}

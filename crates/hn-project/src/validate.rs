//! Network file validation.

use std::collections::HashSet;

use hn_catalog::{FixtureKind, PipeMaterial};
use hn_graph::{ForestBuilder, GraphError};
use hn_solver::NetworkType;

use crate::schema::{LATEST_VERSION, NetworkDef, NetworkFile, SegmentDef};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Unknown key: {key} for {context}")]
    UnknownKey { key: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Parent cycle through segment {id}")]
    Cycle { id: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_network_file(file: &NetworkFile) -> Result<(), ValidationError> {
    if file.version == 0 || file.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: file.version,
        });
    }

    validate_network(&file.network)?;

    let mut segment_ids = HashSet::new();
    for segment in &file.segments {
        if !segment_ids.insert(segment.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: segment.id.clone(),
                context: "segments".to_string(),
            });
        }
    }

    for segment in &file.segments {
        validate_segment(segment)?;
        if !segment.parent.is_empty() && !segment_ids.contains(segment.parent.as_str()) {
            return Err(ValidationError::MissingReference {
                id: segment.parent.clone(),
                context: format!("segment '{}' parent", segment.id),
            });
        }
    }

    validate_topology(&file.segments)
}

fn validate_network(network: &NetworkDef) -> Result<(), ValidationError> {
    if NetworkType::from_key(&network.network_type).is_none() {
        return Err(ValidationError::UnknownKey {
            key: network.network_type.clone(),
            context: "network type".to_string(),
        });
    }
    if PipeMaterial::from_key(&network.material).is_none() {
        return Err(ValidationError::UnknownKey {
            key: network.material.clone(),
            context: "pipe material".to_string(),
        });
    }

    let finite = [
        ("network supply_pressure_bar", network.supply_pressure_bar),
        ("network required_pressure_bar", network.required_pressure_bar),
        ("network water_temperature_c", network.water_temperature_c),
        ("network ambient_temperature_c", network.ambient_temperature_c),
        (
            "network cold_water_temperature_c",
            network.cold_water_temperature_c,
        ),
    ];
    for (field, value) in finite {
        require_finite(field, value)?;
    }
    require_non_negative("network insulation_thickness_mm", network.insulation_thickness_mm)
}

fn validate_segment(segment: &SegmentDef) -> Result<(), ValidationError> {
    if segment.id.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "segment id".to_string(),
            value: format!("{:?}", segment.id),
            reason: "must not be empty".to_string(),
        });
    }
    require_non_negative(&format!("segment '{}' length_m", segment.id), segment.length_m)?;
    require_finite(
        &format!("segment '{}' elevation_m", segment.id),
        segment.elevation_m,
    )?;

    for fixture in &segment.fixtures {
        if FixtureKind::from_key(&fixture.kind).is_none() {
            return Err(ValidationError::UnknownKey {
                key: fixture.kind.clone(),
                context: format!("segment '{}' fixture", segment.id),
            });
        }
    }
    Ok(())
}

/// Parent links must form a forest.
fn validate_topology(segments: &[SegmentDef]) -> Result<(), ValidationError> {
    let mut builder = ForestBuilder::with_capacity(segments.len());
    for segment in segments {
        builder.add_segment(segment.id.as_str(), segment.parent.as_str());
    }
    match builder.build() {
        Ok(_) => Ok(()),
        Err(GraphError::Cycle { segment } | GraphError::SelfParent { segment }) => {
            Err(ValidationError::Cycle { id: segment })
        }
        Err(GraphError::DuplicateKey { key }) => Err(ValidationError::DuplicateId {
            id: key,
            context: "segments".to_string(),
        }),
        Err(GraphError::MissingParent { segment, parent }) => {
            Err(ValidationError::MissingReference {
                id: parent,
                context: format!("segment '{}' parent", segment),
            })
        }
        Err(other) => Err(ValidationError::InvalidValue {
            field: "segments".to_string(),
            value: segments.len().to_string(),
            reason: other.to_string(),
        }),
    }
}

fn require_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        })
    }
}

fn require_non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be non-negative and finite".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FixtureDef, SolverDef};

    fn file(segments: Vec<SegmentDef>) -> NetworkFile {
        NetworkFile {
            version: LATEST_VERSION,
            name: "test".to_string(),
            network: NetworkDef {
                network_type: "cold_water".to_string(),
                material: "copper".to_string(),
                supply_pressure_bar: 3.0,
                required_pressure_bar: 1.0,
                water_temperature_c: 60.0,
                ambient_temperature_c: 20.0,
                insulation_thickness_mm: 13.0,
                cold_water_temperature_c: 10.0,
            },
            solver: SolverDef::default(),
            segments,
        }
    }

    fn segment(id: &str, parent: &str) -> SegmentDef {
        SegmentDef {
            id: id.to_string(),
            parent: parent.to_string(),
            length_m: 5.0,
            elevation_m: 0.0,
            fixtures: vec![],
        }
    }

    #[test]
    fn valid_file_passes() {
        let f = file(vec![segment("a", ""), segment("b", "a")]);
        assert!(validate_network_file(&f).is_ok());
    }

    #[test]
    fn future_version_is_rejected() {
        let mut f = file(vec![]);
        f.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_network_file(&f),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn duplicate_segment_is_rejected() {
        let f = file(vec![segment("a", ""), segment("a", "")]);
        assert!(matches!(
            validate_network_file(&f),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn dangling_parent_is_rejected() {
        let f = file(vec![segment("a", "nowhere")]);
        assert!(matches!(
            validate_network_file(&f),
            Err(ValidationError::MissingReference { .. })
        ));
    }

    #[test]
    fn cycle_is_rejected() {
        let f = file(vec![segment("a", "b"), segment("b", "a")]);
        assert!(matches!(
            validate_network_file(&f),
            Err(ValidationError::Cycle { .. })
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut f = file(vec![]);
        f.network.material = "lead".to_string();
        assert!(matches!(
            validate_network_file(&f),
            Err(ValidationError::UnknownKey { .. })
        ));

        let mut seg = segment("a", "");
        seg.fixtures.push(FixtureDef {
            kind: "jacuzzi".to_string(),
            quantity: 1,
        });
        let f = file(vec![seg]);
        let err = validate_network_file(&f).unwrap_err();
        assert!(err.to_string().contains("jacuzzi"));
    }

    #[test]
    fn negative_length_is_rejected() {
        let mut seg = segment("a", "");
        seg.length_m = -1.0;
        assert!(matches!(
            validate_network_file(&file(vec![seg])),
            Err(ValidationError::InvalidValue { .. })
        ));
    }
}

//! hn-project: network file format, validation and result reports.

pub mod report;
pub mod schema;
pub mod validate;

use std::path::Path;

use hn_catalog::{CatalogError, Fixture, FixtureKind, PipeMaterial};
use hn_solver::{NetworkCalculationParameters, NetworkSegment, NetworkType, SolverConfig};

pub use report::{LoopSummary, NetworkReport, RepairSummary, SegmentReport};
pub use schema::*;
pub use validate::{ValidationError, validate_network_file};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &Path) -> ProjectResult<NetworkFile> {
    let content = std::fs::read_to_string(path)?;
    let file: NetworkFile = serde_yaml::from_str(&content)?;
    validate_network_file(&file)?;
    Ok(file)
}

pub fn save_yaml(path: &Path, file: &NetworkFile) -> ProjectResult<()> {
    validate_network_file(file)?;
    let content = serde_yaml::to_string(file)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<NetworkFile> {
    let content = std::fs::read_to_string(path)?;
    let file: NetworkFile = serde_json::from_str(&content)?;
    validate_network_file(&file)?;
    Ok(file)
}

pub fn save_json(path: &Path, file: &NetworkFile) -> ProjectResult<()> {
    validate_network_file(file)?;
    let content = serde_json::to_string_pretty(file)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a network file, choosing the format from the extension.
pub fn load(path: &Path) -> ProjectResult<NetworkFile> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}

impl NetworkFile {
    /// Solver input built from this file.
    pub fn to_parameters(&self) -> ProjectResult<NetworkCalculationParameters> {
        let network = &self.network;
        let network_type = NetworkType::from_key(&network.network_type).ok_or_else(|| {
            ValidationError::UnknownKey {
                key: network.network_type.clone(),
                context: "network type".to_string(),
            }
        })?;
        let material: PipeMaterial = network.material.parse()?;

        let segments = self
            .segments
            .iter()
            .map(|def| {
                let fixtures = def
                    .fixtures
                    .iter()
                    .map(|f| Ok(Fixture::new(f.kind.parse::<FixtureKind>()?, f.quantity)))
                    .collect::<ProjectResult<Vec<_>>>()?;
                Ok(NetworkSegment {
                    id: def.id.clone(),
                    parent_id: def.parent.clone(),
                    length_m: def.length_m,
                    elevation_m: def.elevation_m,
                    fixtures,
                    ..NetworkSegment::default()
                })
            })
            .collect::<ProjectResult<Vec<_>>>()?;

        Ok(NetworkCalculationParameters {
            network_type,
            material,
            supply_pressure_bar: network.supply_pressure_bar,
            required_pressure_bar: network.required_pressure_bar,
            water_temperature_c: network.water_temperature_c,
            ambient_temperature_c: network.ambient_temperature_c,
            insulation_thickness_mm: network.insulation_thickness_mm,
            cold_water_temperature_c: network.cold_water_temperature_c,
            segments,
        })
    }

    /// Default thresholds with this file's overrides applied.
    pub fn solver_config(&self) -> SolverConfig {
        self.solver.apply(SolverConfig::default())
    }
}

impl SolverDef {
    pub fn apply(&self, mut config: SolverConfig) -> SolverConfig {
        let set = |target: &mut f64, value: Option<f64>| {
            if let Some(v) = value {
                *target = v;
            }
        };
        set(&mut config.max_velocity_mps, self.max_velocity_mps);
        set(&mut config.max_velocity_loop_mps, self.max_velocity_loop_mps);
        set(&mut config.stagnation_velocity_mps, self.stagnation_velocity_mps);
        set(&mut config.singular_loss_ratio, self.singular_loss_ratio);
        set(&mut config.loop_temperature_drop_c, self.loop_temperature_drop_c);
        set(&mut config.return_velocity_band.min, self.return_velocity_min_mps);
        set(&mut config.return_velocity_band.max, self.return_velocity_max_mps);
        set(&mut config.min_return_diameter_mm, self.min_return_diameter_mm);
        set(&mut config.loop_tolerance, self.loop_tolerance);
        set(&mut config.repair_factor, self.repair_factor);
        set(&mut config.repair_tolerance_c, self.repair_tolerance_c);
        if let Some(n) = self.max_loop_iterations {
            config.max_loop_iterations = n;
        }
        if let Some(n) = self.max_repair_attempts {
            config.max_repair_attempts = n;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_fields() {
        let def = SolverDef {
            max_velocity_mps: Some(1.8),
            max_loop_iterations: Some(25),
            ..Default::default()
        };
        let config = def.apply(SolverConfig::default());
        assert_eq!(config.max_velocity_mps, 1.8);
        assert_eq!(config.max_loop_iterations, 25);
        assert_eq!(config.max_velocity_loop_mps, 1.5);
        assert_eq!(config.repair_factor, 1.2);
    }

    #[test]
    fn empty_overrides_keep_defaults() {
        assert!(SolverDef::default().is_empty());
        assert_eq!(
            SolverDef::default().apply(SolverConfig::default()),
            SolverConfig::default()
        );
    }
}

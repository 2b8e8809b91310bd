use std::path::PathBuf;

use hn_project::schema::*;
use hn_project::{
    NetworkReport, ProjectError, ValidationError, load, load_json, load_yaml, save_json,
    save_yaml, validate_network_file,
};
use hn_solver::{NetworkType, calculate_network_with_config};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

fn small_network() -> NetworkFile {
    NetworkFile {
        version: LATEST_VERSION,
        name: "Studio".to_string(),
        network: NetworkDef {
            network_type: "hot_water".to_string(),
            material: "multilayer".to_string(),
            supply_pressure_bar: 3.0,
            required_pressure_bar: 1.0,
            water_temperature_c: 55.0,
            ambient_temperature_c: 18.0,
            insulation_thickness_mm: 9.0,
            cold_water_temperature_c: 12.0,
        },
        solver: SolverDef {
            singular_loss_ratio: Some(0.3),
            ..Default::default()
        },
        segments: vec![
            SegmentDef {
                id: "main".to_string(),
                parent: String::new(),
                length_m: 7.5,
                elevation_m: 0.0,
                fixtures: vec![],
            },
            SegmentDef {
                id: "bath".to_string(),
                parent: "main".to_string(),
                length_m: 4.0,
                elevation_m: 1.2,
                fixtures: vec![
                    FixtureDef {
                        kind: "shower".to_string(),
                        quantity: 1,
                    },
                    FixtureDef {
                        kind: "bidet".to_string(),
                        quantity: 1,
                    },
                ],
            },
        ],
    }
}

#[test]
fn roundtrip_yaml() {
    let file = small_network();
    validate_network_file(&file).unwrap();

    let path = std::env::temp_dir().join("hn_project_roundtrip.yaml");
    save_yaml(&path, &file).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(file, loaded);
}

#[test]
fn roundtrip_json() {
    let file = small_network();
    let path = std::env::temp_dir().join("hn_project_roundtrip.json");
    save_json(&path, &file).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(file, loaded);
}

#[test]
fn invalid_file_is_not_saved() {
    let mut file = small_network();
    file.segments[1].parent = "attic".to_string();
    let path = std::env::temp_dir().join("hn_project_invalid.yaml");
    let err = save_yaml(&path, &file).unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Validation(ValidationError::MissingReference { .. })
    ));
}

#[test]
fn parameters_follow_the_file() {
    let file = small_network();
    let params = file.to_parameters().unwrap();
    assert_eq!(params.network_type, NetworkType::HotWater);
    assert_eq!(params.material.key(), "multilayer");
    assert_eq!(params.segments.len(), 2);
    assert_eq!(params.segments[1].parent_id, "main");
    assert_eq!(params.segments[1].fixtures.len(), 2);
    assert_eq!(params.water_temperature_c, 55.0);

    let config = file.solver_config();
    assert_eq!(config.singular_loss_ratio, 0.3);
    assert_eq!(config.max_velocity_mps, 2.0);
}

#[test]
fn demo_files_load_and_calculate() {
    for name in ["apartment_loop.yaml", "house_cold.json"] {
        let file = load(&demo(name)).unwrap();
        let mut params = file.to_parameters().unwrap();
        let outcome = calculate_network_with_config(&mut params, &file.solver_config()).unwrap();
        assert!(params.segments.iter().all(|s| s.result.is_calculated()), "{name}");

        let report = NetworkReport::new(&file.name, &params, &outcome);
        assert_eq!(report.segments.len(), params.segments.len());
        assert_eq!(report.loop_summary.is_some(), params.network_type.has_loop());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["segments"].as_array().map(Vec::len), Some(params.segments.len()));
        assert_eq!(json["network_type"], params.network_type.key());
    }
}

#[test]
fn omitted_fields_take_defaults() {
    let yaml = r#"
version: 1
name: minimal
network:
  type: cold_water
  material: steel
  supply_pressure_bar: 4.0
  required_pressure_bar: 1.5
segments:
  - id: only
    length_m: 3.0
    fixtures:
      - kind: utility sink
"#;
    let file: NetworkFile = serde_yaml::from_str(yaml).unwrap();
    validate_network_file(&file).unwrap();
    assert_eq!(file.network.ambient_temperature_c, 20.0);
    assert_eq!(file.network.cold_water_temperature_c, 10.0);
    assert!(file.solver.is_empty());
    assert_eq!(file.segments[0].parent, "");
    assert_eq!(file.segments[0].elevation_m, 0.0);
    assert_eq!(file.segments[0].fixtures[0].quantity, 1);
}

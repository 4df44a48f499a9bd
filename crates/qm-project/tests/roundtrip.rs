use qm_project::schema::*;
use qm_project::{ProjectError, ValidationError, load_json, load_yaml, save_json, save_yaml};

fn sample_race() -> RaceFile {
    RaceFile {
        version: 1,
        name: "Roundtrip".to_string(),
        settings: RaceSettings::default(),
        cars: vec![
            CarDef {
                id: "ev".to_string(),
                name: Some("Test EV".to_string()),
                vehicle: VehicleDef {
                    mass_kg: 2000.0,
                    cda_m2: 0.5,
                    wheel_radius_m: 0.34,
                    rolling_resistance: 0.012,
                    tire: TireDef {
                        width_mm: 255.0,
                        compound: CompoundDef::Track,
                        base_mu: 1.05,
                    },
                },
                powertrain: PowertrainDef::Bev {
                    driving_axles: AxlesDef::Awd,
                    motor: MotorDef {
                        torque_curve_rpm_nm: vec![[0.0, 600.0], [15000.0, 250.0]],
                        max_rpm: 15000.0,
                    },
                    reduction_ratio: 9.0,
                    efficiency: BevEfficiencyDef::default(),
                },
            },
            CarDef {
                id: "v8".to_string(),
                name: None,
                vehicle: VehicleDef {
                    mass_kg: 1700.0,
                    cda_m2: 0.7,
                    wheel_radius_m: 0.35,
                    rolling_resistance: 0.015,
                    tire: TireDef {
                        width_mm: 275.0,
                        compound: CompoundDef::DragRadial,
                        base_mu: 1.05,
                    },
                },
                powertrain: PowertrainDef::Ice {
                    driving_axles: AxlesDef::Rwd,
                    engine: EngineDef {
                        torque_curve_rpm_nm: vec![[1000.0, 420.0], [4500.0, 620.0], [7000.0, 520.0]],
                        min_rpm: 900.0,
                        max_rpm: 7000.0,
                    },
                    gearbox: GearboxDef {
                        kind: GearboxTypeDef::Manual,
                        launch_rpm: Some(3000.0),
                        ..GearboxDef::default()
                    },
                    efficiency: IceEfficiencyDef::default(),
                },
            },
        ],
    }
}

#[test]
fn roundtrip_yaml() {
    let race = sample_race();
    let path = std::env::temp_dir().join("qm_project_roundtrip.yaml");

    save_yaml(&path, &race).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(race, loaded);
}

#[test]
fn roundtrip_json() {
    let race = sample_race();
    let path = std::env::temp_dir().join("qm_project_roundtrip.json");

    save_json(&path, &race).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(race, loaded);
}

#[test]
fn save_refuses_invalid_race() {
    let mut race = sample_race();
    race.cars[1].id = "ev".to_string();
    let path = std::env::temp_dir().join("qm_project_invalid.yaml");

    let err = save_yaml(&path, &race).unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Validation(ValidationError::DuplicateId { .. })
    ));
}

#[test]
fn load_reports_missing_file() {
    let path = std::env::temp_dir().join("qm_project_does_not_exist.yaml");
    let _ = std::fs::remove_file(&path);
    assert!(matches!(load_yaml(&path), Err(ProjectError::Io(_))));
}

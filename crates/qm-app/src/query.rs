//! Query helpers for extracting data from finished runs and cars.

use qm_core::numeric::{Tolerances, nearly_equal};
use qm_core::units::constants::QUARTER_MILE_M;
use qm_drivetrain::Car;
use qm_sim::{Trace, TraceSample};

use crate::error::{AppError, AppResult};
use crate::race_service::RaceResponse;

/// Variable names accepted by [`extract_series`].
pub const SERIES_VARIABLES: &[&str] = &[
    "distance",
    "speed",
    "speed_kph",
    "accel",
    "drive_force",
    "wheel_torque",
    "rpm",
    "gear",
];

fn sample_value(variable: &str) -> Option<fn(&TraceSample) -> Option<f64>> {
    let f: fn(&TraceSample) -> Option<f64> = match variable {
        "distance" | "distance_m" => |s| Some(s.distance_m),
        "speed" | "speed_mps" => |s| Some(s.speed_mps),
        "speed_kph" => |s| Some(s.speed_mps * 3.6),
        "accel" | "accel_mps2" => |s| Some(s.accel_mps2),
        "drive_force" | "drive_force_n" => |s| Some(s.drive_force_n),
        "wheel_torque" | "wheel_torque_nm" => |s| Some(s.wheel_torque_nm),
        "rpm" | "source_rpm" => |s| Some(s.source_rpm),
        // 1-based like a gear lever; single-speed drives have no gear series
        "gear" => |s| s.gear.map(|g| (g + 1) as f64),
        _ => return None,
    };
    Some(f)
}

/// Extract `(time_s, value)` pairs for one trace variable.
pub fn extract_series(trace: &Trace, variable: &str) -> AppResult<Vec<(f64, f64)>> {
    let value = sample_value(variable).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "Unknown variable: {} (expected one of {})",
            variable,
            SERIES_VARIABLES.join(", ")
        ))
    })?;

    Ok(trace
        .iter()
        .filter_map(|s| value(s).map(|v| (s.time_s, v)))
        .collect())
}

/// Power in HP against source rpm, sampled evenly from 0 to the car's rpm ceiling.
pub fn power_curve(car: &Car, points: usize) -> AppResult<Vec<(f64, f64)>> {
    if points < 2 {
        return Err(AppError::InvalidInput(format!(
            "power curve needs at least 2 points, got {}",
            points
        )));
    }

    let curve = car.powertrain.torque_curve();
    let max_rpm = car.powertrain.max_rpm();
    let step = max_rpm / (points - 1) as f64;

    Ok((0..points)
        .map(|i| {
            let rpm = step * i as f64;
            (rpm, curve.power_hp_at(rpm))
        })
        .collect())
}

/// Human-readable race summary: two lines per car, then the winner.
pub fn race_summary_lines(response: &RaceResponse) -> Vec<String> {
    let mut lines = Vec::with_capacity(response.lanes.len() * 2 + 1);

    for lane in &response.lanes {
        let s = &lane.summary;
        let mut header = format!("{} | {} | {} | {}", s.name, s.powertrain, s.axles, s.tire);
        if let Some(gearbox) = &s.gearbox {
            let shifts = lane
                .outcome
                .as_ref()
                .map(|o| o.shift_count.to_string())
                .unwrap_or_else(|_| "-".to_string());
            header.push_str(&format!(" | {} | shifts={}", gearbox, shifts));
        }
        lines.push(header);

        match &lane.outcome {
            Ok(o) => lines.push(format!(
                "  mass={:.0} kg  →  ET={:.2} s, trap={:.1} km/h",
                s.mass_kg,
                o.elapsed_time_s,
                o.trap_speed_kph()
            )),
            Err(reason) => lines.push(format!("  mass={:.0} kg  →  DNF: {}", s.mass_kg, reason)),
        }
    }

    let distance = distance_label(response.options.distance_target);
    match response.winner_lane() {
        Some(lane) => lines.push(format!("Winner over {}: {}", distance, lane.summary.name)),
        None => lines.push(format!("No car finished the {}", distance)),
    }

    lines
}

fn distance_label(distance_m: f64) -> String {
    if nearly_equal(distance_m, QUARTER_MILE_M, Tolerances::default()) {
        "quarter mile".to_string()
    } else {
        format!("{:.0} m", distance_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace() -> Trace {
        let sample = |t: f64, v: f64, gear: Option<usize>| TraceSample {
            time_s: t,
            distance_m: v * t,
            speed_mps: v,
            accel_mps2: 1.0,
            drive_force_n: 100.0,
            wheel_torque_nm: 30.0,
            source_rpm: 2000.0,
            gear,
            in_shift: false,
            traction_limited: false,
        };
        Trace {
            samples: vec![sample(0.0, 0.0, Some(0)), sample(0.1, 10.0, Some(1))],
        }
    }

    #[test]
    fn speed_kph_series() {
        let series = extract_series(&trace(), "speed_kph").unwrap();
        assert_eq!(series, vec![(0.0, 0.0), (0.1, 36.0)]);
    }

    #[test]
    fn gear_series_is_one_based() {
        let series = extract_series(&trace(), "gear").unwrap();
        assert_eq!(series, vec![(0.0, 1.0), (0.1, 2.0)]);
    }

    #[test]
    fn every_listed_variable_is_known() {
        for var in SERIES_VARIABLES {
            assert!(extract_series(&trace(), var).is_ok(), "{var}");
        }
    }

    #[test]
    fn unknown_variable_rejected() {
        let err = extract_series(&trace(), "boost").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(err.to_string().contains("speed_kph"));
    }

    #[test]
    fn distance_labels() {
        assert_eq!(distance_label(402.336), "quarter mile");
        assert_eq!(distance_label(201.168), "201 m");
    }
}

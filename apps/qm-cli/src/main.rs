use clap::{Parser, Subcommand};
use qm_app::{
    AppError, AppResult, RaceRequest, RaceTiming, SettingsOverride, project_service, query,
    race_service,
};
use qm_project::{GripPolicy, resolve_car};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qm-cli")]
#[command(about = "Quarter-mile drag race simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate race file syntax and every car in it
    Validate {
        /// Path to the race YAML (or JSON) file
        race_path: PathBuf,
    },
    /// List cars in a race file
    Cars {
        /// Path to the race YAML (or JSON) file
        race_path: PathBuf,
    },
    /// Race the cars against each other
    Race {
        /// Path to the race YAML (or JSON) file
        race_path: PathBuf,
        /// Time step in seconds (overrides the file)
        #[arg(long)]
        dt: Option<f64>,
        /// Race distance in meters (overrides the file)
        #[arg(long)]
        distance: Option<f64>,
        /// Simulated-time ceiling in seconds (overrides the file)
        #[arg(long)]
        max_time: Option<f64>,
        /// Car ID to race; repeat for several, omit for the whole field
        #[arg(long = "car")]
        cars: Vec<String>,
        /// Print wall-clock timing
        #[arg(long)]
        timing: bool,
    },
    /// Export one trace variable of a car's run as CSV
    ExportSeries {
        /// Path to the race YAML (or JSON) file
        race_path: PathBuf,
        /// Car ID
        car_id: String,
        /// Variable name (distance, speed, speed_kph, accel, drive_force, wheel_torque, rpm, gear)
        variable: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export a car's power curve (HP vs rpm) as CSV
    PowerCurve {
        /// Path to the race YAML (or JSON) file
        race_path: PathBuf,
        /// Car ID
        car_id: String,
        /// Number of rpm samples
        #[arg(long, default_value_t = 150)]
        points: usize,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Logs go to stderr so CSV on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { race_path } => cmd_validate(&race_path),
        Commands::Cars { race_path } => cmd_cars(&race_path),
        Commands::Race {
            race_path,
            dt,
            distance,
            max_time,
            cars,
            timing,
        } => cmd_race(
            &race_path,
            cars,
            SettingsOverride {
                dt_s: dt,
                distance_m: distance,
                max_time_s: max_time,
            },
            timing,
        ),
        Commands::ExportSeries {
            race_path,
            car_id,
            variable,
            output,
        } => cmd_export_series(&race_path, &car_id, &variable, output.as_deref()),
        Commands::PowerCurve {
            race_path,
            car_id,
            points,
            output,
        } => cmd_power_curve(&race_path, &car_id, points, output.as_deref()),
    }
}

fn cmd_validate(race_path: &Path) -> AppResult<()> {
    println!("Validating race file: {}", race_path.display());
    let race = project_service::load_project(race_path)?;
    project_service::validate_project(&race)?;
    println!("✓ Race file is valid ({} cars)", race.cars.len());
    Ok(())
}

fn cmd_cars(race_path: &Path) -> AppResult<()> {
    let race = project_service::load_project(race_path)?;
    let cars = project_service::list_cars(&race);

    println!("Cars in '{}':", race.name);
    for car in cars {
        let gearbox = car.gearbox.as_deref().unwrap_or("single-speed");
        println!(
            "  {} - {} ({}, {}, {}, {}, {:.0} kg, {:.0} Nm peak)",
            car.id,
            car.name,
            car.powertrain,
            car.axles,
            car.tire,
            gearbox,
            car.mass_kg,
            car.peak_torque_nm
        );
    }
    Ok(())
}

fn cmd_race(
    race_path: &Path,
    car_ids: Vec<String>,
    overrides: SettingsOverride,
    show_timing: bool,
) -> AppResult<()> {
    let request = RaceRequest {
        project_path: race_path,
        car_ids,
        overrides,
    };
    let response = race_service::run_race(&request)?;

    println!(
        "{} (dt = {} s, distance = {} m)\n",
        response.race_name, response.options.dt, response.options.distance_target
    );
    for line in query::race_summary_lines(&response) {
        println!("{}", line);
    }

    if show_timing {
        print_timing_summary(&response.timing);
    }
    Ok(())
}

fn print_timing_summary(timing: &RaceTiming) {
    let total = timing.total_time_s.max(1.0e-12);
    let sim_pct = 100.0 * timing.simulate_time_s / total;

    println!("\nTiming summary:");
    println!("  Load:     {:.3}s", timing.load_time_s);
    println!("  Resolve:  {:.3}s", timing.resolve_time_s);
    println!(
        "  Simulate: {:.3}s ({:.1}%)",
        timing.simulate_time_s, sim_pct
    );
    println!("  Total:    {:.3}s", timing.total_time_s);
}

fn cmd_export_series(
    race_path: &Path,
    car_id: &str,
    variable: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let request = RaceRequest {
        project_path: race_path,
        car_ids: vec![car_id.to_string()],
        overrides: SettingsOverride::default(),
    };
    let response = race_service::run_race(&request)?;
    let lane = response
        .lanes
        .into_iter()
        .next()
        .ok_or_else(|| AppError::CarNotFound(car_id.to_string()))?;
    let outcome = lane.outcome.map_err(AppError::Simulation)?;

    let series = query::extract_series(&outcome.trace, variable)?;
    debug!(car = car_id, variable, points = series.len(), "series extracted");

    write_csv("time_s,value", &series, output)
}

fn cmd_power_curve(
    race_path: &Path,
    car_id: &str,
    points: usize,
    output: Option<&Path>,
) -> AppResult<()> {
    let race = project_service::load_project(race_path)?;
    let def = project_service::get_car(&race, car_id)?;
    let car = resolve_car(def, &GripPolicy::default())?;

    let curve = query::power_curve(&car, points)?;
    write_csv("rpm,hp", &curve, output)
}

fn write_csv(header: &str, rows: &[(f64, f64)], output: Option<&Path>) -> AppResult<()> {
    let mut csv = format!("{}\n", header);
    for (x, y) in rows {
        csv.push_str(&format!("{},{}\n", x, y));
    }

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} data points to {}", rows.len(), path.display());
    } else {
        print!("{}", csv);
    }

    Ok(())
}

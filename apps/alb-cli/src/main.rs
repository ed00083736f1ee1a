use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use alb_sim::{EngineOptions, albedo_column, run_and_save};
use alb_spectral::ClearSkySpectrum;
use alb_weather::{ReflectanceCurve, WeatherSeries, merge_albedo_column};

#[derive(Parser)]
#[command(name = "alb-cli")]
#[command(about = "albedoflow CLI - spectral ground-albedo estimation for bifacial PV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a simulation configuration file
    Validate {
        /// Path to the simulation YAML file
        config_path: PathBuf,
    },
    /// Run a simulation window and merge the albedo column back into the
    /// weather file
    Run {
        /// Path to the simulation YAML file
        config_path: PathBuf,
        /// Compute hours sequentially instead of on the rayon pool
        #[arg(long)]
        sequential: bool,
        /// Write results but leave the weather file untouched
        #[arg(long)]
        no_merge: bool,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] alb_project::ProjectError),

    #[error(transparent)]
    Weather(#[from] alb_weather::WeatherError),

    #[error(transparent)]
    Pipeline(#[from] alb_sim::PipelineError),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run {
            config_path,
            sequential,
            no_merge,
        } => cmd_run(&config_path, sequential, no_merge),
    }
}

fn cmd_validate(config_path: &Path) -> CliResult<()> {
    println!("Validating configuration: {}", config_path.display());
    let config = alb_project::load_config(config_path)?;
    alb_project::validate_config(&config).map_err(alb_project::ProjectError::from)?;
    println!("✓ Configuration is valid");
    println!(
        "  Array: {} rows, tilt {}°, azimuth {}°",
        config.array.row_count, config.array.tilt_deg, config.array.azimuth_deg
    );
    Ok(())
}

fn cmd_run(config_path: &Path, sequential: bool, no_merge: bool) -> CliResult<()> {
    let config = alb_project::load_config(config_path)?;
    alb_project::validate_config(&config).map_err(alb_project::ProjectError::from)?;

    println!("Running albedo estimation: {}", config.name);

    let reflectance = ReflectanceCurve::load(&config.files.reflectance)?;
    let weather = WeatherSeries::load(&config.files.weather)?;
    let model = ClearSkySpectrum::new();

    let options = EngineOptions {
        parallel: !sequential,
    };
    let (manifest, records) = run_and_save(&config, &model, &reflectance, &weather, options)?;

    println!("✓ Run completed: {}", manifest.run_id);
    println!("  Hours: {}", manifest.hours);
    println!(
        "  Results: {}",
        config.files.results_dir.join("spectral_albedo.csv").display()
    );

    if no_merge {
        println!("  Weather file left untouched (--no-merge)");
    } else {
        merge_albedo_column(&config.files.weather, &albedo_column(&records))?;
        println!("✓ Weather file updated: {}", config.files.weather.display());
    }

    Ok(())
}

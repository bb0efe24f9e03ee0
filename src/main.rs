//! Glucose Insights command line
//!
//! Runs the analytics pipeline over a JSON export of glucose readings.
//!
//! Usage:
//!   glucose-insights analyze <readings.json> [profile.json]  - Full analysis as JSON
//!   glucose-insights report <readings.json> [profile.json]   - Human-readable report
//!   glucose-insights path                                    - Show config location
//!   GLUCOSE_INSIGHTS_DBG=1 glucose-insights report ...       - Enable debug output

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{info, warn};

use glucose_insights::config::{config_file_path, get_config_dir, Config};
use glucose_insights::{analyze, GlucoseUnit, InsightsError, MetabolicAnalysis, RawGlucoseEntry, UserProfile};

fn main() -> Result<(), InsightsError> {
    let args: Vec<String> = env::args().collect();

    // Check for debug mode
    let debug_mode = env::var("GLUCOSE_INSIGHTS_DBG").is_ok();

    // Initialize logger
    if debug_mode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .format_timestamp(None)
            .init();
    }

    // Create default config if it doesn't exist
    let cfg_path = config_file_path();
    if !cfg_path.exists() {
        if let Err(e) = Config::create_default(&cfg_path) {
            warn!("Could not create default config: {}", e);
        }
    }

    let config = match Config::load_default() {
        Ok(config) => config,
        Err(e) if Config::is_missing(&e) => {
            warn!("No config file found: {}. Using defaults.", e);
            Config::default()
        }
        Err(e) => return Err(e),
    };

    match args.get(1).map(|s| s.as_str()) {
        Some("analyze") => {
            let analysis = run_analysis(&config, args.get(2), args.get(3))?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Some("report") => {
            let analysis = run_analysis(&config, args.get(2), args.get(3))?;
            print_report(&analysis, &config);
        }
        Some("path") | Some("paths") => {
            println!("Glucose Insights Paths:");
            println!("  Config directory: {}", get_config_dir().display());
            println!("  Config file:      {}", config_file_path().display());
        }
        Some("--version") | Some("-V") => {
            println!("glucose-insights {}", env!("CARGO_PKG_VERSION"));
        }
        Some("--help") | Some("-h") | Some("help") | None => {
            print_help();
        }
        Some(other) => {
            print_help();
            return Err(InsightsError::InvalidArgument(format!("unknown command '{}'", other)));
        }
    }

    Ok(())
}

fn run_analysis(
    config: &Config,
    readings_path: Option<&String>,
    profile_path: Option<&String>,
) -> Result<MetabolicAnalysis, InsightsError> {
    let readings_path = readings_path
        .ok_or_else(|| InsightsError::InvalidArgument("missing readings file".to_string()))?;

    let entries: Vec<RawGlucoseEntry> = read_json(readings_path)?;
    info!("Loaded {} entries from {}", entries.len(), readings_path);

    let profile = profile_path.map(read_json::<UserProfile, _>).transpose()?;

    Ok(analyze(&entries, &config.options, profile.as_ref()))
}

fn read_json<T: serde::de::DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, InsightsError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn print_report(analysis: &MetabolicAnalysis, config: &Config) {
    let unit: GlucoseUnit = config.unit;

    println!("Clinical Metabolic Report - {}", analysis.profile_label);
    println!("Readings analyzed: {}", analysis.readings_analyzed);
    println!("Target range:      {}", config.options.thresholds.format_range(unit));
    println!("Mean glucose:      {}", unit.format(analysis.variability.mean));
    println!();
    println!("{}", analysis.report.headline);
    println!("{}", analysis.report.details);
    println!();
    println!("{}", analysis.summary.summary);
    println!("TIR: {}", analysis.tir_assessment.message);
    println!("Variability: {}", analysis.variability_assessment.message);
    println!();
    println!("{}", analysis.recommendations.summary);
    for recommendation in &analysis.recommendations.recommendations {
        println!("  [{:?}] {}", recommendation.priority, recommendation.message);
    }

    if !analysis.circadian_profile.is_empty() {
        println!();
        println!("Hourly profile:");
        for hour in &analysis.circadian_profile {
            println!(
                "  {:02}:00  {:>12}  n={:<3} {:?}",
                hour.hour,
                unit.format(hour.average_glucose),
                hour.readings_count,
                hour.confidence
            );
        }
    }
}

fn print_help() {
    eprintln!("Glucose Insights v{}", env!("CARGO_PKG_VERSION"));
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  glucose-insights analyze <readings.json> [profile.json]   Print full analysis as JSON");
    eprintln!("  glucose-insights report <readings.json> [profile.json]    Print clinical report");
    eprintln!("  glucose-insights path                                     Show config file location");
    eprintln!("  glucose-insights help                                     Show this help");
    eprintln!();
    eprintln!("ENVIRONMENT:");
    eprintln!("  GLUCOSE_INSIGHTS_DBG=1      Enable debug output");
    eprintln!();
    eprintln!("CONFIG:");
    eprintln!("  {}", config_file_path().display());
}

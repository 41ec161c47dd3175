use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cardraw_core::eligibility::pocket_pick_options;
use cardraw_core::{draw_with_rng, Catalog, ConfigState, Drawing, DrawRng, XorShiftRng};
use clap::Parser;
use log::LevelFilter;

mod trials;
use trials::{run_trials, TrialReport};

/// Draw charts from a catalog the way a tournament table would
#[derive(Parser, Debug)]
#[command(name = "cardraw-sim", version)]
struct Cli {
    /// Catalog JSON file
    #[arg(long)]
    catalog: PathBuf,

    /// Config snapshot JSON; catalog defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of charts to draw
    #[arg(long)]
    count: Option<u32>,

    /// Seed for reproducible draws
    #[arg(long)]
    seed: Option<u64>,

    /// Run this many draws in parallel and report level frequencies
    #[arg(long)]
    trials: Option<u64>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// List pocket pick options instead of drawing
    #[arg(long)]
    pocket_picks: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    let bytes = fs::read(path).with_context(|| format!("Could not read catalog {}", path.display()))?;
    let catalog = Catalog::from_json_slice(&bytes)
        .with_context(|| format!("Could not parse catalog {}", path.display()))?;

    let problems = catalog.problems();
    for problem in &problems {
        log::warn!("{}", problem);
    }
    log::info!(
        "Loaded {} songs, {} charts from {} ({} problems)",
        catalog.songs.len(),
        catalog.chart_count(),
        path.display(),
        problems.len()
    );
    Ok(catalog)
}

fn load_config(cli: &Cli, catalog: &Catalog) -> Result<ConfigState> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Could not read config {}", path.display()))?;
            ConfigState::from_json_str(&json).with_context(|| format!("Could not parse config {}", path.display()))?
        }
        None => ConfigState::from_catalog_defaults(catalog),
    };
    if let Some(count) = cli.count {
        config.chart_count = count;
    }
    config.validate().context("Config rejected")?;
    Ok(config)
}

fn print_drawing(drawing: &Drawing) {
    println!("{}", drawing.id);
    for card in &drawing.charts {
        let chart = &card.chart;
        println!(
            "  {:<20} {:>3}  {:<4} {} / {}",
            card.id, chart.level, chart.diff_abbr, chart.name, chart.artist
        );
    }
}

fn print_report(report: &TrialReport) {
    println!(
        "{} trials, {} charts drawn, {} short draws",
        report.trials, report.charts_drawn, report.short_draws
    );
    println!("{:>5} {:>8} {:>8} {:>8} {:>8}", "level", "drawn", "share", "pool", "pool%");
    for row in &report.levels {
        println!(
            "{:>5} {:>8} {:>7.2}% {:>8} {:>7.2}%",
            row.level,
            row.drawn,
            row.drawn_share * 100.0,
            row.eligible,
            row.eligible_share * 100.0
        );
    }
}

fn run(cli: Cli) -> Result<()> {
    let catalog = load_catalog(&cli.catalog)?;
    let config = load_config(&cli, &catalog)?;
    let seed = match cli.seed {
        Some(seed) => seed,
        None => XorShiftRng::from_entropy().next_u32() as u64,
    };
    log::debug!("Using seed {}", seed);

    if cli.pocket_picks {
        let options: Vec<_> = pocket_pick_options(&config, &catalog).collect();
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&options)?);
        } else {
            for chart in &options {
                println!("{:>3}  {:<4} {} / {}", chart.level, chart.diff_abbr, chart.name, chart.artist);
            }
            println!("{} pocket pick options", options.len());
        }
        return Ok(());
    }

    if let Some(trials) = cli.trials {
        let report = run_trials(&catalog, &config, trials, seed);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }
        return Ok(());
    }

    let mut rng = XorShiftRng::seed_from_u64(seed);
    let drawing = draw_with_rng(&catalog, &config, &mut rng);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&drawing)?);
    } else {
        print_drawing(&drawing);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

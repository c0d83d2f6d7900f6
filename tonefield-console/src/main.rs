//! # Tonefield - Strike Planning Console
//!
//! Command-line front end for the tonefield strike planner. It takes a
//! tonic/octave/fifth reading, asks the core for a strike point and hammer
//! plan, and keeps the technician's confirmed hit points in a local history.
//!
//! ## Commands
//! - **predict**: analyse a reading and print the plan
//! - **save**: analyse a reading and append the confirmed hit point
//! - **recent**: list the newest stored hit points
//! - **delete**: remove a stored hit point by id

mod history;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueHint};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tonefield_core::note;
use tonefield_core::record::{HitPointEntry, HitPointRecord};
use tonefield_core::{
    StrikeAnalysis, StrikeLocation, Tonefield, TonefieldConfig, TuningError,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use history::HitHistory;

#[derive(Parser)]
#[command(
    name = "tonefield",
    author,
    version,
    about = "Strike point and hammer plan for tonefield tuning errors"
)]
struct Cli {
    /// JSON physics configuration; the built-in calibration is used when omitted
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Hit point history file
    #[arg(long, global = true, default_value = "hit_points.json", value_hint = ValueHint::FilePath)]
    history: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyse a reading and print the recommended strike
    Predict(ReadingArgs),

    /// Analyse a reading and store the confirmed hit point
    Save(SaveArgs),

    /// List the most recent hit points, newest first
    Recent {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Delete a stored hit point
    Delete { id: Uuid },
}

#[derive(Args)]
struct ReadingArgs {
    /// Tonic error in Hz (positive = sharp)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    tonic: f64,

    /// Octave error in Hz (positive = sharp)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    octave: f64,

    /// Fifth error in Hz (positive = sharp)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    fifth: f64,

    /// Note being tuned, e.g. A4 or Bb3; selects its tonefield geometry
    #[arg(long)]
    note: Option<String>,

    /// Seed for the strike side; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Print the analysis as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SaveArgs {
    #[command(flatten)]
    reading: ReadingArgs,

    /// Face that was struck; defaults to the side implied by the primary error
    #[arg(long)]
    location: Option<StrikeLocation>,

    /// What the strike was meant to achieve
    #[arg(long, default_value = "")]
    intent: String,

    /// Strikes actually made; defaults to the recommended count
    #[arg(long)]
    hit_count: Option<u32>,

    /// Force actually used; defaults to the recommended force
    #[arg(long)]
    strength: Option<f64>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    run(cli)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Predict(args) => {
            let config = load_config(cli.config.as_ref())?;
            match analyze(&config, &args)? {
                None => println!("In tune: no correction needed."),
                Some(analysis) if args.json => {
                    println!("{}", serde_json::to_string_pretty(&analysis)?)
                }
                Some(analysis) => {
                    print!("{}", report::render_analysis(&analysis, args.note.as_deref()))
                }
            }
        }
        Command::Save(args) => {
            let config = load_config(cli.config.as_ref())?;
            let Some(analysis) = analyze(&config, &args.reading)? else {
                bail!("reading is in tune; there is no hit point to save");
            };
            let entry = HitPointEntry {
                location: args.location,
                intent: args.intent,
                note: args.reading.note.clone(),
                hit_count: args.hit_count,
                strength: args.strength,
            };
            let record = HitPointRecord::new(&analysis, entry)?;

            let mut history = HitHistory::load(&cli.history)?;
            let id = record.id;
            if args.reading.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print!("{}", report::render_analysis(&analysis, args.reading.note.as_deref()));
            }
            history.insert(record);
            history.save(&cli.history)?;
            info!(target: "tonefield::console", %id, total = history.len(), "hit point saved");
            println!("Saved hit point {id}");
        }
        Command::Recent { limit } => {
            let history = HitHistory::load(&cli.history)?;
            if history.is_empty() {
                println!("No hit points recorded yet.");
            }
            for record in history.recent(limit) {
                println!("{}", report::render_record_line(record));
            }
        }
        Command::Delete { id } => {
            let mut history = HitHistory::load(&cli.history)?;
            match history.delete(id) {
                Some(_) => {
                    history.save(&cli.history)?;
                    info!(target: "tonefield::console", %id, "hit point deleted");
                    println!("Deleted hit point {id}");
                }
                None => println!("No hit point with id {id}"),
            }
        }
    }
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<TonefieldConfig> {
    match path {
        Some(path) => TonefieldConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display())),
        None => Ok(TonefieldConfig::default()),
    }
}

fn analyze(config: &TonefieldConfig, args: &ReadingArgs) -> Result<Option<StrikeAnalysis>> {
    let error = TuningError::try_new(args.tonic, args.octave, args.fifth)?;
    let note_name = args.note.as_deref().map(note::canonical_name).transpose()?;
    let tonefield = Tonefield::new(config.physics_for_note(note_name.as_deref()))?;

    let analysis = match args.seed {
        Some(seed) => tonefield.analyze(&error, &mut StdRng::seed_from_u64(seed)),
        None => tonefield.analyze(&error, &mut rand::thread_rng()),
    };
    Ok(analysis)
}

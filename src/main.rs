//! huebridge - smooth color transitions between carousel frames

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use huebridge::report::{changes_to_toml, format_harmony, format_inspection};
use huebridge::{Deck, SmoothingOverrides};
use huebridge_config::Config;
use huebridge_config::presets::ALL_PRESETS;
use huebridge_flow::{
    FlowDirection, LogTrace, Smoother, TraceEvent, TraceSink,
    analyze_color_harmony_with_threshold,
};

#[derive(Parser, Debug)]
#[command(name = "huebridge", version, about = "Color and gradient transition engine")]
struct Cli {
    /// Config file to use instead of ~/.huebridge/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bridge colors between adjacent frames of a deck
    Smooth {
        /// Deck file (TOML with [[frames]] tables)
        deck: PathBuf,

        /// Smoothing strength in [0, 1]
        #[arg(short, long)]
        intensity: Option<f64>,

        /// Overlay direction: diagonal or diagonal-mirror
        #[arg(short, long)]
        direction: Option<FlowDirection>,

        /// Bundled preset name
        #[arg(short, long)]
        preset: Option<String>,

        /// Also bridge the last frame back to the first
        #[arg(long)]
        wrap: bool,

        /// Write the smoothed backgrounds back into the deck
        #[arg(short, long)]
        write: bool,

        /// Print every engine step to stderr
        #[arg(long)]
        trace: bool,
    },

    /// Report color jumps between adjacent frames
    Analyze {
        deck: PathBuf,

        /// Average jump above which smoothing is recommended
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Show what the engine sees in one CSS background value
    Inspect { background: String },

    /// List bundled presets
    Presets,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            Config::load_from(path).with_context(|| format!("loading config {:?}", path))
        }
        None => Ok(Config::load_or_default()),
    }
}

fn smooth(
    config: &Config,
    deck_path: &Path,
    overrides: &SmoothingOverrides,
    write: bool,
    trace: bool,
) -> Result<()> {
    let mut deck = Deck::load(deck_path)?;

    let mut settings = config.smoothing.clone();
    overrides.apply(&mut settings);
    let options = settings.resolve();
    log::info!(
        "Smoothing {} frame(s): intensity {}, direction {}, wrap {}",
        deck.frames.len(),
        options.intensity,
        options.direction,
        options.wrap_around
    );

    let print_event = |event: &TraceEvent| eprintln!("{}", event);
    let sink: &dyn TraceSink = if trace { &print_event } else { &LogTrace };
    let changes = deck.smooth(&Smoother::new(options).with_trace(sink));

    if write {
        let applied = deck.apply(&changes);
        deck.save(deck_path)?;
        println!("Updated {} of {} frame(s)", applied, deck.frames.len());
    } else {
        print!("{}", changes_to_toml(&changes).context("serializing changes")?);
    }
    Ok(())
}

fn analyze(config: &Config, deck_path: &Path, threshold: Option<f64>) -> Result<()> {
    let deck = Deck::load(deck_path)?;
    let threshold = threshold.unwrap_or(config.analysis.jump_threshold);
    let report = analyze_color_harmony_with_threshold(&deck.backgrounds(), threshold);
    print!("{}", format_harmony(&report, &deck.ids(), threshold));
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,huebridge=info"),
    )
    .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Smooth {
            deck,
            intensity,
            direction,
            preset,
            wrap,
            write,
            trace,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let overrides = SmoothingOverrides {
                intensity,
                direction,
                preset,
                wrap_around: wrap,
            };
            smooth(&config, &deck, &overrides, write, trace)
        }
        Command::Analyze { deck, threshold } => {
            let config = load_config(cli.config.as_deref())?;
            analyze(&config, &deck, threshold)
        }
        Command::Inspect { background } => {
            print!("{}", format_inspection(&background));
            Ok(())
        }
        Command::Presets => {
            for preset in ALL_PRESETS {
                println!(
                    "{:<10} intensity {:.1}  {:<16} {}",
                    preset.name, preset.intensity, preset.direction, preset.description
                );
            }
            Ok(())
        }
    }
}

mod render;

use std::fs;
use std::path::PathBuf;
use std::thread;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use log::info;
use stepwise_core::algorithm::GraphInput;
use stepwise_core::{AlgorithmInput, AlgorithmKind, ClockScheduler, PlaybackConfig, PlaybackRate, Player, Scheduler, Trace};

#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "stepwise", about = "Record and replay step traces of textbook algorithms.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every traced algorithm.
    List,

    /// Run an algorithm and print its full trace.
    Trace {
        #[command(flatten)]
        input: InputArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Run an algorithm and replay its trace in real time.
    Play {
        #[command(flatten)]
        input: InputArgs,

        /// Playback speed multiplier (overrides the config file).
        #[arg(long)]
        rate: Option<f64>,

        /// Step up one configured speed preset per occurrence (`-ff` for two).
        #[arg(short, long, action = ArgAction::Count)]
        faster: u8,

        /// JSON playback config.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Algorithm id, e.g. `bubble-sort` (see `stepwise list`).
    algorithm: AlgorithmKind,

    /// Comma-separated input values.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    values: Vec<f64>,

    /// Search target.
    #[arg(long, allow_hyphen_values = true)]
    target: Option<f64>,

    /// JSON file with `{"nodes": [...], "edges": [...]}` for graph algorithms.
    #[arg(long)]
    graph: Option<PathBuf>,
}

impl InputArgs {
    fn run(&self) -> Result<Trace> {
        let input = match &self.graph {
            Some(path) => {
                let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
                let graph: GraphInput =
                    serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))?;
                AlgorithmInput::Graph(graph)
            }
            None => AlgorithmInput::Sequence {
                values: self.values.clone(),
                target: self.target,
            },
        };

        let trace = self.algorithm.run(&input)?;
        trace.validate()?;
        info!("{} produced {} steps", self.algorithm, trace.len());
        Ok(trace)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::List => print!("{}", render::render_catalogue()),
        Command::Trace { input, format } => {
            let trace = input.run()?;
            match format {
                OutputFormat::Text => {
                    for (index, step) in trace.iter().enumerate() {
                        println!("{}", render::render_step(index, trace.len(), step));
                    }
                }
                OutputFormat::Json => println!("{}", trace.to_json()?),
            }
        }
        Command::Play {
            input,
            rate,
            faster,
            config,
        } => {
            let mut config = match config {
                Some(path) => PlaybackConfig::from_path(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => PlaybackConfig::default(),
            };
            if let Some(rate) = rate {
                config.default_rate =
                    PlaybackRate::new(rate).ok_or_else(|| anyhow!("rate must be a positive number, got {rate}"))?;
            }
            config.default_rate = config.preset_rate(usize::from(faster));
            info!("playing at {}x", config.default_rate.get());
            play(input.run()?, &config);
        }
    }

    Ok(())
}

fn play(trace: Trace, config: &PlaybackConfig) {
    let mut player = Player::with_config(config, ClockScheduler::new());
    player.load(trace);
    let total = player.len();

    let mut shown = player.cursor();
    if let Some(step) = player.current_step() {
        println!("{}", render::render_step(shown, total, step));
    }

    player.play();
    while player.is_playing() {
        if let Some(wait) = player.scheduler().until_next() {
            thread::sleep(wait);
        }
        player.poll();
        for index in shown + 1..=player.cursor() {
            println!("{}", render::render_step(index, total, &player.trace()[index]));
        }
        shown = player.cursor();
    }
}

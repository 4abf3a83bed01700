use clap::Parser;
use log::{LevelFilter, error};
use seisview_messages::{Command, EventType, GeneratorConfig};
use seisview_signal::Engine;
use seisview_ui::TraceConfig;
use std::io::Write;

/// Synthetic seismic event dashboard
#[derive(Parser, Debug)]
#[command(name = "seisview", version)]
struct Cli {
    /// Event type shown at start-up: earthquake, explosion, tremor or noise
    #[arg(long, default_value = "earthquake")]
    event_type: EventType,

    /// Number of waveform samples
    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u32).range(1..))]
    samples: u32,

    /// Spectrogram frequency buckets
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u32).range(1..))]
    rows: u32,

    /// Spectrogram time buckets
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    cols: u32,

    /// Seed for reproducible series (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Start with the trace paused
    #[arg(long)]
    paused: bool,

    /// Trace scroll speed in pixels per second
    #[arg(long, default_value_t = 50.0)]
    speed: f32,

    /// Log everything at trace level
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            event_type: self.event_type,
            samples: self.samples as usize,
            spectrogram_rows: self.rows as usize,
            spectrogram_cols: self.cols as usize,
            seed: self.seed,
        }
    }

    fn trace_config(&self) -> TraceConfig {
        TraceConfig {
            speed: self.speed,
            start_playing: !self.paused,
            ..TraceConfig::default()
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::builder();
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{:<5} - mod path |{}| - target | {} | args: |{}|",
                record.level(),
                record.module_path().unwrap_or(""),
                record.target(),
                record.args()
            )
        })
        .filter_level(LevelFilter::Info)
        .filter_module("seisview_signal", LevelFilter::Info)
        .filter_module("seisview_ui", LevelFilter::Debug);
    if verbose {
        builder.filter_level(LevelFilter::Trace);
        builder.filter_module("seisview_signal", LevelFilter::Trace);
        builder.filter_module("seisview_ui", LevelFilter::Trace);
    }
    builder.init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Create flume channels for bidirectional communication
    let (cmd_tx, cmd_rx) = flume::unbounded();
    let (event_tx, event_rx) = flume::unbounded();

    let generator_config = cli.generator_config();

    // Spawn engine thread
    let engine_handle = std::thread::spawn(move || {
        let engine = Engine::new(cmd_rx, event_tx, generator_config);
        let result = engine.run();
        if let Err(e) = &result {
            error!("Engine failed: {:#}", e);
        }
        result
    });

    // Run UI on main thread (blocking)
    seisview_ui::run(event_rx, cmd_tx.clone(), cli.trace_config())?;

    // UI has exited - send stop command to engine
    let _ = cmd_tx.send(Command::Stop);

    // Wait for engine thread to finish
    engine_handle
        .join()
        .map_err(|_| anyhow::anyhow!("Engine thread panicked"))??;

    Ok(())
}

use clap::Parser;
use mid2mml::{ConvertOptions, Converter};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mid2mml")]
#[command(version = "0.1.0")]
#[command(about = "MIDI to MML converter", long_about = None)]
struct Args {
    /// Input MIDI file (.mid, optionally gzip-compressed)
    input: PathBuf,

    /// Output MML file (writes to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with conversion options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Volume written at the start of each channel
    #[arg(long)]
    volume: Option<u32>,

    /// Tempo written at the start of each channel
    #[arg(long)]
    tempo: Option<u32>,

    /// Maximum output length before conversion stops
    #[arg(long)]
    max_length: Option<usize>,

    /// Leave out the stereo spread command
    #[arg(long)]
    no_pan: bool,

    /// Write the conversion report as JSON instead of MML
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), mid2mml::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut options = match &args.config {
        Some(path) => ConvertOptions::load(path)?,
        None => ConvertOptions::default(),
    };
    if let Some(volume) = args.volume {
        options.volume = volume;
    }
    if let Some(tempo) = args.tempo {
        options.tempo = tempo;
    }
    if let Some(max_length) = args.max_length {
        options.max_length = max_length;
    }
    if args.no_pan {
        options.pan_out = false;
    }

    let converter = Converter::with_options(options)?;
    let tracks = mid2mml::midi::load_tracks(&args.input)?;
    let conversion = converter.convert(&tracks)?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    if args.json {
        serde_json::to_writer_pretty(&mut out, &conversion)?;
        writeln!(out)?;
    } else {
        conversion.write_mml(&mut out)?;
    }
    out.flush()?;

    Ok(())
}

//! MIDI to JSON note dump

use clap::Parser;
use mid2mml::converter::note::{materialize_track, Note};
use mid2mml::midi;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mid2json")]
#[command(version = "0.1.0")]
#[command(about = "Dump the notes of a MIDI file as JSON", long_about = None)]
struct Args {
    /// Input MIDI file (.mid, optionally gzip-compressed)
    input: PathBuf,

    /// Output JSON file (writes to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output compact JSON (default is pretty-printed)
    #[arg(short, long)]
    compact: bool,

    /// Include the raw track events
    #[arg(short, long)]
    events: bool,
}

#[derive(Serialize)]
struct TrackJson {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<midi::Track>,
    notes: Vec<Note>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let tracks = midi::load_tracks(&args.input)?;

    let dump: Vec<TrackJson> = tracks
        .into_iter()
        .enumerate()
        .map(|(index, events)| TrackJson {
            index,
            notes: materialize_track(&events),
            events: args.events.then_some(events),
        })
        .collect();

    let json_string = if args.compact {
        serde_json::to_string(&dump)?
    } else {
        serde_json::to_string_pretty(&dump)?
    };

    match args.output {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(json_string.as_bytes())?;
            file.write_all(b"\n")?;
        }
        None => {
            println!("{}", json_string);
        }
    }

    Ok(())
}

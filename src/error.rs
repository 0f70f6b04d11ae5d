use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("MIDI parse error: {0}")]
    Midi(String),

    #[error("Unsupported MIDI timing: {0}")]
    UnsupportedTiming(String),

    #[error("Invalid options: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<midly::Error> for Error {
    fn from(err: midly::Error) -> Self {
        Error::Midi(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

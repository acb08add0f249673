use std::path::PathBuf;

use hand_gesture::RecordingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("cannot open window: {0}")]
    Window(String),

    #[error("cannot read config {path}: {source}")]
    ConfigRead { path: PathBuf, source: std::io::Error },

    #[error("malformed config {path}: {source}")]
    ConfigParse { path: PathBuf, source: serde_json::Error },

    #[error("invalid config: {0}")]
    Config(String),

    #[error(transparent)]
    Recording(#[from] RecordingError),

    #[error("hand tracker: {0}")]
    Tracker(String),

    #[error("headless mode needs a recording to replay (--replay FILE)")]
    HeadlessWithoutReplay,
}

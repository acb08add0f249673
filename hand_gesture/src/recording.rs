//! Recorded landmark sequences (JSON).
//!
//! ```json
//! { "frames": [
//!     { "label": "rock", "hand": [[0.50, 0.85, 0.0], ... 21 points] },
//!     { "label": null,   "hand": null }
//! ] }
//! ```
//!
//! `label` is the expected classification and is optional; it is what makes
//! a recording usable as a labeled fixture set.

use std::fs;
use std::path::{Path, PathBuf};

use rps_rules::Move;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::landmark::{HandLandmarks, LandmarkFrame};

#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },

    #[error("malformed recording: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    #[serde(default)]
    pub label: Option<Move>,
    pub hand:  LandmarkFrame,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub frames: Vec<RecordedFrame>,
}

impl Recording {
    pub fn from_json(text: &str) -> Result<Self, RecordingError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, RecordingError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RecordingError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| RecordingError::Read { path: path.to_path_buf(), source })?;
        let rec = Self::from_json(&text)?;
        log::info!("loaded {} frames from {}", rec.frames.len(), path.display());
        Ok(rec)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RecordingError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)
            .map_err(|source| RecordingError::Write { path: path.to_path_buf(), source })
    }

    /// Append unlabeled frames.
    pub fn extend_frames(&mut self, frames: impl IntoIterator<Item = LandmarkFrame>) {
        self.frames.extend(frames.into_iter().map(|hand| RecordedFrame { label: None, hand }));
    }

    pub fn hands(&self) -> impl Iterator<Item = Option<&HandLandmarks>> {
        self.frames.iter().map(|f| f.hand.as_ref())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::{hand_for, hold};

    #[test]
    fn parses_labels_and_absent_hands() {
        let rec = Recording::from_json(r#"{ "frames": [ { "hand": null }, { "label": "pencil", "hand": null } ] }"#)
            .unwrap();
        assert_eq!(rec.len(), 2);
        assert_eq!(rec.frames[0].label, None);
        assert_eq!(rec.frames[1].label, Some(Move::Pencil));
        assert!(rec.hands().all(|h| h.is_none()));
    }

    #[test]
    fn rejects_short_hand() {
        let err = Recording::from_json(r#"{ "frames": [ { "hand": [[0.0, 0.0, 0.0]] } ] }"#).unwrap_err();
        assert!(err.to_string().contains("expected 21 landmarks"), "{}", err);
    }

    #[test]
    fn hand_survives_json() {
        let mut rec = Recording::default();
        rec.extend_frames(hold(Some(Move::Scissors), 2));
        let back = Recording::from_json(&rec.to_json().unwrap()).unwrap();
        assert_eq!(back.frames[1].hand.as_ref(), Some(&hand_for(Move::Scissors)));
    }

    #[test]
    fn save_then_load() {
        let mut rec = Recording::default();
        rec.extend_frames(hold(Some(Move::Pencil), 2));
        rec.extend_frames(hold(None, 1));
        let path = std::env::temp_dir().join(format!("hand_gesture_rec_{}.json", std::process::id()));
        rec.save(&path).unwrap();
        let back = Recording::load(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(back.unwrap(), rec);
    }

    #[test]
    fn missing_file_names_path() {
        let err = Recording::load("/nonexistent/hands.json").unwrap_err();
        assert!(matches!(err, RecordingError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/hands.json"));
    }
}

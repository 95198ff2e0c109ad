use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::detection::domain::detected_face::DetectedFace;
use crate::detection::domain::face_detector::{DetectError, FaceDetector};
use crate::shared::frame::{Frame, LensFacing, PixelFormat, Rotation};

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("failed to read trace {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed trace: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Camera description shared by every frame of a recorded trace.
#[derive(Clone, Debug, Deserialize)]
pub struct TraceFrame {
    pub width: u32,
    pub height: u32,
    pub rotation: Rotation,
    pub lens_facing: LensFacing,
    #[serde(default = "default_format")]
    pub format: PixelFormat,
}

fn default_format() -> PixelFormat {
    PixelFormat::Nv21
}

impl TraceFrame {
    /// Builds an empty-payload frame; the scripted detector never reads pixels.
    pub fn to_frame(&self) -> Frame {
        Frame::new(
            Vec::new(),
            self.width,
            self.height,
            self.rotation,
            self.format,
            self.lens_facing,
        )
    }
}

/// One recorded detector answer: either the faces it found or the error it
/// raised.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum TraceBatch {
    Faces { faces: Vec<DetectedFace> },
    Failure { error: String },
}

/// A recorded session of detector output, replayed frame by frame.
#[derive(Clone, Debug, Deserialize)]
pub struct DetectionTrace {
    pub frame: TraceFrame,
    pub batches: Vec<TraceBatch>,
}

impl DetectionTrace {
    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, TraceError> {
        let json = fs::read_to_string(path).map_err(|source| TraceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// Detector that answers from a prerecorded script instead of running a
/// model. Once the script is exhausted every frame yields no faces.
pub struct ScriptedFaceDetector {
    batches: VecDeque<TraceBatch>,
    calls: usize,
}

impl ScriptedFaceDetector {
    pub fn new(batches: Vec<TraceBatch>) -> Self {
        Self {
            batches: batches.into(),
            calls: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.batches.len()
    }
}

impl FaceDetector for ScriptedFaceDetector {
    fn detect(&mut self, _frame: &Frame) -> Result<Vec<DetectedFace>, DetectError> {
        self.calls += 1;
        match self.batches.pop_front() {
            Some(TraceBatch::Faces { faces }) => Ok(faces),
            Some(TraceBatch::Failure { error }) => Err(error.into()),
            None => {
                log::debug!("Trace exhausted at call {}", self.calls);
                Ok(Vec::new())
            }
        }
    }
}

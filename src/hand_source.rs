// src/hand_source.rs
//
// Frame-by-frame hand input. The detection model itself is external; this
// module only defines the contract the pipeline consumes and a replay
// source that reads recorded landmark frames from a JSONL file, one record
// per line:
//
//   {"width":960,"height":720,"timestamp_ms":33.3,"hands":[[[x,y], ...21]]}
//
// A record may carry zero hands (nothing detected that frame). When it
// carries more than one, only the first is used: the pipeline tracks
// exactly one hand.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use tracing::{debug, info};

use crate::landmarks::Landmark;
use crate::types::HandFrame;

pub trait HandSource {
    /// Next frame of input, or None when the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<HandFrame>>;
}

#[derive(Debug, Deserialize)]
struct HandRecord {
    width: u32,
    height: u32,
    #[serde(default)]
    timestamp_ms: f64,
    #[serde(default)]
    hands: Vec<Vec<[f32; 2]>>,
}

pub struct ReplayHandSource {
    lines: Lines<BufReader<File>>,
    path: String,
    line_no: u64,
}

impl ReplayHandSource {
    pub fn open(path: &str) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("opening landmark replay file {path}"))?;
        info!("📂 Replaying hand landmarks from {}", path);
        Ok(Self {
            lines: BufReader::new(file).lines(),
            path: path.to_string(),
            line_no: 0,
        })
    }

    pub fn path(&self) -> &Path {
        Path::new(&self.path)
    }

    fn parse_hand(&self, points: &[[f32; 2]]) -> Result<[Landmark; 21]> {
        if points.len() != 21 {
            bail!(
                "{}:{}: hand has {} landmarks, expected 21",
                self.path,
                self.line_no,
                points.len()
            );
        }
        let mut landmarks = [Landmark::default(); 21];
        for (slot, p) in landmarks.iter_mut().zip(points) {
            *slot = Landmark { x: p[0], y: p[1] };
        }
        Ok(landmarks)
    }
}

impl HandSource for ReplayHandSource {
    fn next_frame(&mut self) -> Result<Option<HandFrame>> {
        loop {
            let Some(line) = self.lines.next() else {
                return Ok(None);
            };
            self.line_no += 1;
            let line = line.with_context(|| format!("reading {}:{}", self.path, self.line_no))?;
            if line.trim().is_empty() {
                continue;
            }

            let record: HandRecord = serde_json::from_str(&line)
                .with_context(|| format!("parsing {}:{}", self.path, self.line_no))?;

            if record.hands.len() > 1 {
                debug!(
                    "{}:{}: ignoring {} extra hand(s)",
                    self.path,
                    self.line_no,
                    record.hands.len() - 1
                );
            }
            let landmarks = match record.hands.first() {
                Some(points) => Some(self.parse_hand(points)?),
                None => None,
            };

            return Ok(Some(HandFrame {
                landmarks,
                width: record.width,
                height: record.height,
                timestamp_ms: record.timestamp_ms,
            }));
        }
    }
}

// src/types.rs

use serde::{Deserialize, Serialize};

use crate::landmarks::Landmark;

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub detection: DetectionConfig,
    pub motion: MotionConfig,
    pub link: LinkConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// A finger counts as raised when its root-to-tip distance, divided by
    /// the wrist-to-index-root scale reference, is strictly above this.
    pub thumb_raise_ratio: f32,
    pub finger_raise_ratio: f32,
    /// Pointing-up threshold as a fraction of image height. The default
    /// reproduces the 80 px the 960x720 camera stream was tuned with.
    pub vertical_point_ratio: f32,
    /// Left/right threshold as a fraction of image width (80 px at 960 wide).
    pub horizontal_point_ratio: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            thumb_raise_ratio: 0.9,
            finger_raise_ratio: 0.5,
            vertical_point_ratio: 80.0 / 720.0,
            horizontal_point_ratio: 80.0 / 960.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Sideways travel for the strafe gestures (cm).
    pub lateral_cm: u32,
    /// Climb/descend step for the index-finger gestures (cm).
    pub vertical_cm: u32,
    /// Yaw step for the rotate gestures (degrees).
    pub rotation_deg: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            lateral_cm: 70,
            vertical_cm: 20,
            rotation_deg: 90,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkMode {
    /// Log every command instead of sending it. Rehearsal mode.
    DryRun,
    /// Text protocol over UDP to a real vehicle.
    Udp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub mode: LinkMode,
    pub drone_addr: String,
    pub bind_addr: String,
    pub response_timeout_secs: f64,
    /// Takeoff is acknowledged only once the vehicle is airborne, so it
    /// gets a longer wait than other commands.
    pub takeoff_timeout_secs: f64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            mode: LinkMode::DryRun,
            drone_addr: "192.168.10.1:8889".to_string(),
            bind_addr: "0.0.0.0:8889".to_string(),
            response_timeout_secs: 7.0,
            takeoff_timeout_secs: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// JSONL hand-landmark records, one frame per line.
    pub landmarks_path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            landmarks_path: "data/session.jsonl".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
    pub save_commands: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "output".to_string(),
            save_commands: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "gesture_pilot=info".to_string(),
        }
    }
}

// ============================================================================
// FRAME INPUT
// ============================================================================

/// One frame's worth of detector output. At most one hand: when the
/// underlying model reports several, only the first is kept.
#[derive(Debug, Clone)]
pub struct HandFrame {
    pub landmarks: Option<[Landmark; 21]>,
    pub width: u32,
    pub height: u32,
    pub timestamp_ms: f64,
}

// ============================================================================
// CLASSIFIED POSE
// ============================================================================

/// Raised/not for [thumb, index, middle, ring, pinky], derived fresh every
/// frame. Never persisted across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerVector(pub [bool; 5]);

impl FingerVector {
    pub fn raised_count(&self) -> usize {
        self.0.iter().filter(|f| **f).count()
    }
}

impl std::fmt::Display for FingerVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let d = |b: bool| if b { '1' } else { '0' };
        write!(
            f,
            "[{},{},{},{},{}]",
            d(self.0[0]),
            d(self.0[1]),
            d(self.0[2]),
            d(self.0[3]),
            d(self.0[4])
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    None,
    Left,
    Right,
}

/// Which way a finger points, taken from its tip-vs-root offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionSample {
    pub pointing_up: bool,
    pub horizontal: Horizontal,
}

impl DirectionSample {
    pub fn neutral() -> Self {
        Self {
            pointing_up: false,
            horizontal: Horizontal::None,
        }
    }
}

/// Full per-frame classification result.
#[derive(Debug, Clone, Copy)]
pub struct HandPose {
    pub fingers: FingerVector,
    pub thumb: DirectionSample,
    pub index: DirectionSample,
    /// Wrist-to-index-root distance in pixels, kept for diagnostics.
    pub scale_px: f32,
}

// ============================================================================
// SESSION STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlightState {
    Grounded,
    Airborne,
}

impl FlightState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grounded => "GROUNDED",
            Self::Airborne => "AIRBORNE",
        }
    }
}

// ============================================================================
// COMMAND RECORDS
// ============================================================================

/// One dispatched command, as written to the session JSONL log.
#[derive(Debug, Clone, Serialize)]
pub struct CommandRecord {
    pub frame_id: u64,
    pub timestamp_ms: f64,
    pub action: &'static str,
    pub fingers: String,
    pub state: &'static str,
}

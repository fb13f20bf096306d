// src/classifier.rs
//
// Turns one frame of hand landmarks into a raised/not vector for the five
// fingers plus pointing directions for the thumb and index finger.
//
// Every distance is divided by the wrist-to-index-root span of the same
// frame, so the classification holds for big and small hands at any
// distance from the camera. A frame where that span collapses to zero has
// no usable geometry and is reported as degenerate instead of classified.

use thiserror::Error;

use crate::landmarks::{
    pixel_distance, Landmark, FINGER_SEGMENTS, INDEX_ROOT, INDEX_TIP, THUMB_ROOT, THUMB_TIP, WRIST,
};
use crate::types::{DetectionConfig, DirectionSample, FingerVector, HandPose, Horizontal};

/// Scale references below this many pixels are treated as degenerate.
const MIN_SCALE_PX: f32 = 1e-3;

#[derive(Debug, Error)]
pub enum PoseError {
    #[error("degenerate scale reference: wrist-to-index-root span is {scale_px:.4} px")]
    DegenerateScale { scale_px: f32 },

    #[error("image has zero area ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

pub struct FingerClassifier {
    config: DetectionConfig,
}

impl FingerClassifier {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Classify one hand. Pure function of the current frame: no state is
    /// read or written, and identical input always yields identical output.
    pub fn classify(
        &self,
        landmarks: &[Landmark; 21],
        width: u32,
        height: u32,
    ) -> Result<HandPose, PoseError> {
        if width == 0 || height == 0 {
            return Err(PoseError::EmptyImage { width, height });
        }

        let scale_px = pixel_distance(landmarks[WRIST], landmarks[INDEX_ROOT], width, height);
        if scale_px < MIN_SCALE_PX {
            return Err(PoseError::DegenerateScale { scale_px });
        }

        let mut raised = [false; 5];
        for (finger, (root, tip)) in FINGER_SEGMENTS.iter().enumerate() {
            let ratio = pixel_distance(landmarks[*root], landmarks[*tip], width, height) / scale_px;
            let limit = if finger == 0 {
                self.config.thumb_raise_ratio
            } else {
                self.config.finger_raise_ratio
            };
            // Strictly above: a ratio exactly at the limit is not raised.
            raised[finger] = ratio > limit;
        }

        Ok(HandPose {
            fingers: FingerVector(raised),
            thumb: self.direction(landmarks[THUMB_ROOT], landmarks[THUMB_TIP], width, height),
            index: self.direction(landmarks[INDEX_ROOT], landmarks[INDEX_TIP], width, height),
            scale_px,
        })
    }

    /// Tip-vs-root offsets against thresholds that scale with the image,
    /// so pointing detection behaves the same at 960x720 and 1920x1080.
    /// Screen y grows downward: a negative vertical offset points up.
    fn direction(&self, root: Landmark, tip: Landmark, width: u32, height: u32) -> DirectionSample {
        let dy_px = (tip.y - root.y) * height as f32;
        let dx_px = (tip.x - root.x) * width as f32;
        let up_limit_px = self.config.vertical_point_ratio * height as f32;
        let side_limit_px = self.config.horizontal_point_ratio * width as f32;

        let horizontal = if dx_px <= -side_limit_px {
            Horizontal::Left
        } else if dx_px >= side_limit_px {
            Horizontal::Right
        } else {
            Horizontal::None
        };

        DirectionSample {
            pointing_up: dy_px <= -up_limit_px,
            horizontal,
        }
    }
}

// src/dispatcher.rs
//
// Maps a classified hand pose onto at most one vehicle action per frame.
//
// The mapping is an ordered rule table: the first row whose finger pattern,
// direction qualifier, and flight-state precondition all hold fires, and
// evaluation stops. Priority and mutual exclusivity are therefore visible
// in the table itself rather than buried in control flow, and the table can
// be tested without a vehicle.
//
// The only state carried across frames is whether the vehicle is airborne.
// It advances ONLY after the vehicle accepts the takeoff/land command, so a
// failed takeoff leaves the session grounded and re-triggerable.

use tracing::{debug, info};

use crate::link::{LinkError, VehicleLink};
use crate::types::{FlightState, HandPose, Horizontal, MotionConfig};

// ============================================================================
// QUALIFIERS AND ACTIONS
// ============================================================================

/// Direction condition attached to a rule, on top of its finger pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseQualifier {
    /// No extra condition.
    Any,
    ThumbUp,
    IndexRight,
    IndexLeft,
    IndexUp,
    /// Index finger anywhere but up. The rules above this one in the table
    /// have already consumed the left/right/up poses.
    IndexLowered,
}

impl PoseQualifier {
    fn matches(&self, pose: &HandPose) -> bool {
        match self {
            Self::Any => true,
            Self::ThumbUp => pose.thumb.pointing_up,
            Self::IndexRight => pose.index.horizontal == Horizontal::Right,
            Self::IndexLeft => pose.index.horizontal == Horizontal::Left,
            Self::IndexUp => pose.index.pointing_up,
            Self::IndexLowered => !pose.index.pointing_up,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightAction {
    TakeOff,
    Land,
    StrafeRightFlipLeft,
    StrafeLeftFlipRight,
    RotateClockwise,
    RotateCounterClockwise,
    Ascend,
    Descend,
    FlipBack,
    FlipForwardThenBack,
}

impl FlightAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TakeOff => "TAKEOFF",
            Self::Land => "LAND",
            Self::StrafeRightFlipLeft => "STRAFE_RIGHT_FLIP_LEFT",
            Self::StrafeLeftFlipRight => "STRAFE_LEFT_FLIP_RIGHT",
            Self::RotateClockwise => "ROTATE_CW",
            Self::RotateCounterClockwise => "ROTATE_CCW",
            Self::Ascend => "ASCEND",
            Self::Descend => "DESCEND",
            Self::FlipBack => "FLIP_BACK",
            Self::FlipForwardThenBack => "FLIP_FORWARD_BACK",
        }
    }

    /// Issue the vehicle command(s) for this action. Compound actions send
    /// their second command only after the first was accepted, and errors
    /// propagate to the caller untouched: no retries here.
    fn perform(&self, link: &mut dyn VehicleLink, motion: &MotionConfig) -> Result<(), LinkError> {
        match self {
            Self::TakeOff => link.take_off(),
            Self::Land => link.land(),
            Self::StrafeRightFlipLeft => {
                link.move_right(motion.lateral_cm)?;
                link.flip_left()
            }
            Self::StrafeLeftFlipRight => {
                link.move_left(motion.lateral_cm)?;
                link.flip_right()
            }
            Self::RotateClockwise => link.rotate_cw(motion.rotation_deg),
            Self::RotateCounterClockwise => link.rotate_ccw(motion.rotation_deg),
            Self::Ascend => link.move_up(motion.vertical_cm),
            Self::Descend => link.move_down(motion.vertical_cm),
            Self::FlipBack => link.flip_back(),
            Self::FlipForwardThenBack => {
                link.flip_forward()?;
                link.flip_back()
            }
        }
    }

    fn next_state(&self, current: FlightState) -> FlightState {
        match self {
            Self::TakeOff => FlightState::Airborne,
            Self::Land => FlightState::Grounded,
            _ => current,
        }
    }
}

// ============================================================================
// RULE TABLE
// ============================================================================

#[derive(Debug)]
pub struct GestureRule {
    /// Required [thumb, index, middle, ring, pinky] pattern.
    pub pattern: [bool; 5],
    pub qualifier: PoseQualifier,
    pub requires: FlightState,
    pub action: FlightAction,
}

impl GestureRule {
    fn matches(&self, pose: &HandPose, state: FlightState) -> bool {
        self.pattern == pose.fingers.0 && state == self.requires && self.qualifier.matches(pose)
    }
}

/// Evaluated top to bottom; the first match wins the frame.
pub static RULE_TABLE: [GestureRule; 10] = [
    GestureRule {
        pattern: [true, false, false, false, false],
        qualifier: PoseQualifier::ThumbUp,
        requires: FlightState::Grounded,
        action: FlightAction::TakeOff,
    },
    GestureRule {
        pattern: [true, true, true, true, true],
        qualifier: PoseQualifier::Any,
        requires: FlightState::Airborne,
        action: FlightAction::Land,
    },
    GestureRule {
        pattern: [true, true, false, false, false],
        qualifier: PoseQualifier::IndexRight,
        requires: FlightState::Airborne,
        action: FlightAction::StrafeRightFlipLeft,
    },
    GestureRule {
        pattern: [true, true, false, false, false],
        qualifier: PoseQualifier::IndexLeft,
        requires: FlightState::Airborne,
        action: FlightAction::StrafeLeftFlipRight,
    },
    GestureRule {
        pattern: [false, true, false, false, false],
        qualifier: PoseQualifier::IndexRight,
        requires: FlightState::Airborne,
        action: FlightAction::RotateClockwise,
    },
    GestureRule {
        pattern: [false, true, false, false, false],
        qualifier: PoseQualifier::IndexLeft,
        requires: FlightState::Airborne,
        action: FlightAction::RotateCounterClockwise,
    },
    GestureRule {
        pattern: [false, true, false, false, false],
        qualifier: PoseQualifier::IndexUp,
        requires: FlightState::Airborne,
        action: FlightAction::Ascend,
    },
    GestureRule {
        pattern: [false, true, false, false, false],
        qualifier: PoseQualifier::IndexLowered,
        requires: FlightState::Airborne,
        action: FlightAction::Descend,
    },
    GestureRule {
        pattern: [false, true, true, false, false],
        qualifier: PoseQualifier::IndexUp,
        requires: FlightState::Airborne,
        action: FlightAction::FlipBack,
    },
    GestureRule {
        pattern: [false, true, true, true, false],
        qualifier: PoseQualifier::IndexUp,
        requires: FlightState::Airborne,
        action: FlightAction::FlipForwardThenBack,
    },
];

// ============================================================================
// DISPATCHER
// ============================================================================

pub struct GestureDispatcher {
    state: FlightState,
    motion: MotionConfig,
}

impl GestureDispatcher {
    pub fn new(motion: MotionConfig) -> Self {
        Self {
            state: FlightState::Grounded,
            motion,
        }
    }

    pub fn state(&self) -> FlightState {
        self.state
    }

    /// Run the rule table against one frame's pose. Returns the rule that
    /// fired, or None when nothing matched (no-op frame). A link failure is
    /// returned to the caller with the flight state untouched, so a failed
    /// takeoff never records the session as airborne.
    ///
    /// Rules re-fire every frame their pose holds. There is no cooldown:
    /// takeoff/land are guarded by the state precondition, and directional
    /// commands are meant to repeat while the pose is held.
    pub fn dispatch(
        &mut self,
        pose: &HandPose,
        link: &mut dyn VehicleLink,
    ) -> Result<Option<&'static GestureRule>, LinkError> {
        let Some(rule) = RULE_TABLE.iter().find(|r| r.matches(pose, self.state)) else {
            debug!("no rule for {} in state {}", pose.fingers, self.state.as_str());
            return Ok(None);
        };

        rule.action.perform(link, &self.motion)?;

        let next = rule.action.next_state(self.state);
        if next != self.state {
            info!(
                "{} {} -> {}",
                if next == FlightState::Airborne { "🛫" } else { "🛬" },
                self.state.as_str(),
                next.as_str()
            );
            self.state = next;
        }
        Ok(Some(rule))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::FingerClassifier;
    use crate::landmarks::{Landmark, INDEX_ROOT, INDEX_TIP, THUMB_ROOT, THUMB_TIP, WRIST};
    use crate::types::{DetectionConfig, DirectionSample, FingerVector};

    // ────────────────────────────────────────────────────────────
    // Scripted link: records every command, optionally fails one
    // ────────────────────────────────────────────────────────────

    struct ScriptedLink {
        sent: Vec<String>,
        fail_on: Option<&'static str>,
    }

    impl ScriptedLink {
        fn new() -> Self {
            Self {
                sent: Vec::new(),
                fail_on: None,
            }
        }

        fn failing_on(command: &'static str) -> Self {
            Self {
                sent: Vec::new(),
                fail_on: Some(command),
            }
        }

        fn send(&mut self, command: &str) -> Result<(), LinkError> {
            if self.fail_on == Some(command) {
                return Err(LinkError::CommandRejected {
                    command: command.to_string(),
                    reply: "error".to_string(),
                });
            }
            self.sent.push(command.to_string());
            Ok(())
        }
    }

    impl VehicleLink for ScriptedLink {
        fn connect(&mut self) -> Result<(), LinkError> {
            self.send("command")
        }
        fn battery(&mut self) -> Result<i32, LinkError> {
            Ok(87)
        }
        fn stream_on(&mut self) -> Result<(), LinkError> {
            self.send("streamon")
        }
        fn take_off(&mut self) -> Result<(), LinkError> {
            self.send("takeoff")
        }
        fn land(&mut self) -> Result<(), LinkError> {
            self.send("land")
        }
        fn move_left(&mut self, cm: u32) -> Result<(), LinkError> {
            self.send(&format!("left {cm}"))
        }
        fn move_right(&mut self, cm: u32) -> Result<(), LinkError> {
            self.send(&format!("right {cm}"))
        }
        fn move_up(&mut self, cm: u32) -> Result<(), LinkError> {
            self.send(&format!("up {cm}"))
        }
        fn move_down(&mut self, cm: u32) -> Result<(), LinkError> {
            self.send(&format!("down {cm}"))
        }
        fn rotate_cw(&mut self, deg: u32) -> Result<(), LinkError> {
            self.send(&format!("cw {deg}"))
        }
        fn rotate_ccw(&mut self, deg: u32) -> Result<(), LinkError> {
            self.send(&format!("ccw {deg}"))
        }
        fn flip_left(&mut self) -> Result<(), LinkError> {
            self.send("flip l")
        }
        fn flip_right(&mut self) -> Result<(), LinkError> {
            self.send("flip r")
        }
        fn flip_forward(&mut self) -> Result<(), LinkError> {
            self.send("flip f")
        }
        fn flip_back(&mut self) -> Result<(), LinkError> {
            self.send("flip b")
        }
    }

    // ────────────────────────────────────────────────────────────
    // Pose helpers
    // ────────────────────────────────────────────────────────────

    fn pose(fingers: [u8; 5]) -> HandPose {
        HandPose {
            fingers: FingerVector(fingers.map(|f| f != 0)),
            thumb: DirectionSample::neutral(),
            index: DirectionSample::neutral(),
            scale_px: 100.0,
        }
    }

    fn with_thumb_up(mut p: HandPose) -> HandPose {
        p.thumb.pointing_up = true;
        p
    }

    fn with_index_up(mut p: HandPose) -> HandPose {
        p.index.pointing_up = true;
        p
    }

    fn with_index(mut p: HandPose, h: Horizontal) -> HandPose {
        p.index.horizontal = h;
        p
    }

    fn dispatcher() -> GestureDispatcher {
        GestureDispatcher::new(MotionConfig::default())
    }

    fn airborne_dispatcher(link: &mut ScriptedLink) -> GestureDispatcher {
        let mut d = dispatcher();
        d.dispatch(&with_thumb_up(pose([1, 0, 0, 0, 0])), link)
            .unwrap();
        assert_eq!(d.state(), FlightState::Airborne);
        link.sent.clear();
        d
    }

    // ────────────────────────────────────────────────────────────
    // Takeoff / land
    // ────────────────────────────────────────────────────────────

    #[test]
    fn test_thumb_up_takes_off_when_grounded() {
        let mut link = ScriptedLink::new();
        let mut d = dispatcher();

        let fired = d
            .dispatch(&with_thumb_up(pose([1, 0, 0, 0, 0])), &mut link)
            .unwrap();

        assert_eq!(fired.unwrap().action, FlightAction::TakeOff);
        assert_eq!(d.state(), FlightState::Airborne);
        assert_eq!(link.sent, vec!["takeoff"]);
    }

    #[test]
    fn test_thumb_up_is_noop_when_already_airborne() {
        let mut link = ScriptedLink::new();
        let mut d = airborne_dispatcher(&mut link);

        let fired = d
            .dispatch(&with_thumb_up(pose([1, 0, 0, 0, 0])), &mut link)
            .unwrap();
        assert!(fired.is_none());
        assert!(link.sent.is_empty());
    }

    #[test]
    fn test_thumb_without_up_direction_does_not_take_off() {
        let mut link = ScriptedLink::new();
        let mut d = dispatcher();

        let fired = d.dispatch(&pose([1, 0, 0, 0, 0]), &mut link).unwrap();
        assert!(fired.is_none());
        assert_eq!(d.state(), FlightState::Grounded);
    }

    #[test]
    fn test_open_palm_lands_when_airborne() {
        let mut link = ScriptedLink::new();
        let mut d = airborne_dispatcher(&mut link);

        let fired = d.dispatch(&pose([1, 1, 1, 1, 1]), &mut link).unwrap();
        assert_eq!(fired.unwrap().action, FlightAction::Land);
        assert_eq!(d.state(), FlightState::Grounded);
        assert_eq!(link.sent, vec!["land"]);
    }

    #[test]
    fn test_open_palm_is_noop_when_grounded() {
        let mut link = ScriptedLink::new();
        let mut d = dispatcher();

        let fired = d.dispatch(&pose([1, 1, 1, 1, 1]), &mut link).unwrap();
        assert!(fired.is_none(), "land requires the airborne precondition");
        assert_eq!(d.state(), FlightState::Grounded);
        assert!(link.sent.is_empty());
    }

    #[test]
    fn test_failed_takeoff_stays_grounded_and_retriggerable() {
        let mut link = ScriptedLink::failing_on("takeoff");
        let mut d = dispatcher();

        let err = d
            .dispatch(&with_thumb_up(pose([1, 0, 0, 0, 0])), &mut link)
            .unwrap_err();
        assert!(matches!(err, LinkError::CommandRejected { .. }));
        assert_eq!(
            d.state(),
            FlightState::Grounded,
            "state must not advance on a rejected takeoff"
        );

        // Same pose on the next frame fires takeoff again once the link works
        link.fail_on = None;
        let fired = d
            .dispatch(&with_thumb_up(pose([1, 0, 0, 0, 0])), &mut link)
            .unwrap();
        assert_eq!(fired.unwrap().action, FlightAction::TakeOff);
        assert_eq!(d.state(), FlightState::Airborne);
    }

    #[test]
    fn test_failed_land_stays_airborne() {
        let mut link = ScriptedLink::new();
        let mut d = airborne_dispatcher(&mut link);

        link.fail_on = Some("land");
        assert!(d.dispatch(&pose([1, 1, 1, 1, 1]), &mut link).is_err());
        assert_eq!(d.state(), FlightState::Airborne);
    }

    // ────────────────────────────────────────────────────────────
    // Directional rules
    // ────────────────────────────────────────────────────────────

    #[test]
    fn test_index_right_rotates_clockwise() {
        let mut link = ScriptedLink::new();
        let mut d = airborne_dispatcher(&mut link);

        let fired = d
            .dispatch(
                &with_index(pose([0, 1, 0, 0, 0]), Horizontal::Right),
                &mut link,
            )
            .unwrap();
        assert_eq!(fired.unwrap().action, FlightAction::RotateClockwise);
        assert_eq!(link.sent, vec!["cw 90"]);
        assert_eq!(d.state(), FlightState::Airborne);
    }

    #[test]
    fn test_index_left_rotates_counter_clockwise() {
        let mut link = ScriptedLink::new();
        let mut d = airborne_dispatcher(&mut link);

        d.dispatch(
            &with_index(pose([0, 1, 0, 0, 0]), Horizontal::Left),
            &mut link,
        )
        .unwrap();
        assert_eq!(link.sent, vec!["ccw 90"]);
    }

    #[test]
    fn test_index_up_ascends_index_lowered_descends() {
        let mut link = ScriptedLink::new();
        let mut d = airborne_dispatcher(&mut link);

        d.dispatch(&with_index_up(pose([0, 1, 0, 0, 0])), &mut link)
            .unwrap();
        d.dispatch(&pose([0, 1, 0, 0, 0]), &mut link).unwrap();
        assert_eq!(link.sent, vec!["up 20", "down 20"]);
    }

    #[test]
    fn test_strafe_beats_rotate_for_thumb_and_index() {
        // [1,1,0,0,0] + right must hit the strafe row, not the rotate row
        let mut link = ScriptedLink::new();
        let mut d = airborne_dispatcher(&mut link);

        let fired = d
            .dispatch(
                &with_index(pose([1, 1, 0, 0, 0]), Horizontal::Right),
                &mut link,
            )
            .unwrap();
        assert_eq!(fired.unwrap().action, FlightAction::StrafeRightFlipLeft);
        assert_eq!(link.sent, vec!["right 70", "flip l"]);
    }

    #[test]
    fn test_strafe_left_then_flip_right_order() {
        let mut link = ScriptedLink::new();
        let mut d = airborne_dispatcher(&mut link);

        d.dispatch(
            &with_index(pose([1, 1, 0, 0, 0]), Horizontal::Left),
            &mut link,
        )
        .unwrap();
        assert_eq!(link.sent, vec!["left 70", "flip r"]);
    }

    #[test]
    fn test_three_fingers_flip_forward_then_back_in_order() {
        let mut link = ScriptedLink::new();
        let mut d = airborne_dispatcher(&mut link);

        let fired = d
            .dispatch(&with_index_up(pose([0, 1, 1, 1, 0])), &mut link)
            .unwrap();
        assert_eq!(fired.unwrap().action, FlightAction::FlipForwardThenBack);
        assert_eq!(link.sent, vec!["flip f", "flip b"]);
    }

    #[test]
    fn test_two_fingers_up_flips_back() {
        let mut link = ScriptedLink::new();
        let mut d = airborne_dispatcher(&mut link);

        d.dispatch(&with_index_up(pose([0, 1, 1, 0, 0])), &mut link)
            .unwrap();
        assert_eq!(link.sent, vec!["flip b"]);
    }

    #[test]
    fn test_compound_failure_skips_second_command() {
        let mut link = ScriptedLink::new();
        let mut d = airborne_dispatcher(&mut link);

        link.fail_on = Some("right 70");
        assert!(d
            .dispatch(
                &with_index(pose([1, 1, 0, 0, 0]), Horizontal::Right),
                &mut link,
            )
            .is_err());
        assert!(
            link.sent.is_empty(),
            "flip must not be issued after the move was rejected"
        );
    }

    // ────────────────────────────────────────────────────────────
    // No-op and re-issue behavior
    // ────────────────────────────────────────────────────────────

    #[test]
    fn test_unmapped_vector_is_noop() {
        let mut link = ScriptedLink::new();
        let mut d = airborne_dispatcher(&mut link);

        for fingers in [[0, 0, 0, 0, 0], [0, 0, 1, 1, 1], [1, 0, 1, 0, 1]] {
            let fired = d.dispatch(&pose(fingers), &mut link).unwrap();
            assert!(fired.is_none());
        }
        assert!(link.sent.is_empty());
        assert_eq!(d.state(), FlightState::Airborne);
    }

    #[test]
    fn test_directional_rules_never_fire_grounded() {
        let mut link = ScriptedLink::new();
        let mut d = dispatcher();

        let poses = [
            with_index(pose([0, 1, 0, 0, 0]), Horizontal::Right),
            with_index(pose([1, 1, 0, 0, 0]), Horizontal::Left),
            with_index_up(pose([0, 1, 1, 1, 0])),
            pose([0, 1, 0, 0, 0]),
        ];
        for p in poses {
            assert!(d.dispatch(&p, &mut link).unwrap().is_none());
        }
        assert!(
            link.sent.is_empty(),
            "only takeoff may act while grounded, got {:?}",
            link.sent
        );
    }

    #[test]
    fn test_held_pose_reissues_every_frame() {
        let mut link = ScriptedLink::new();
        let mut d = airborne_dispatcher(&mut link);

        let held = with_index_up(pose([0, 1, 0, 0, 0]));
        for _ in 0..3 {
            d.dispatch(&held, &mut link).unwrap();
        }
        assert_eq!(link.sent, vec!["up 20", "up 20", "up 20"]);
    }

    // ────────────────────────────────────────────────────────────
    // End to end through the classifier, 960x720 pixel geometry
    // ────────────────────────────────────────────────────────────

    fn frame_landmarks(
        thumb_tip_offset_px: (f32, f32),
        index_tip_offset_px: (f32, f32),
        raised: [bool; 5],
    ) -> [Landmark; 21] {
        const W: f32 = 960.0;
        const H: f32 = 720.0;
        let mut lms = [Landmark::default(); 21];
        lms[WRIST] = Landmark { x: 0.3, y: 0.6 };
        // 100 px scale reference
        lms[INDEX_ROOT] = Landmark {
            x: 0.3 + 100.0 / W,
            y: 0.6,
        };
        lms[THUMB_ROOT] = Landmark { x: 0.25, y: 0.7 };
        lms[9] = Landmark { x: 0.45, y: 0.6 };
        lms[13] = Landmark { x: 0.48, y: 0.6 };
        lms[17] = Landmark { x: 0.51, y: 0.6 };

        lms[THUMB_TIP] = Landmark {
            x: lms[THUMB_ROOT].x + thumb_tip_offset_px.0 / W,
            y: lms[THUMB_ROOT].y + thumb_tip_offset_px.1 / H,
        };
        lms[INDEX_TIP] = Landmark {
            x: lms[INDEX_ROOT].x + index_tip_offset_px.0 / W,
            y: lms[INDEX_ROOT].y + index_tip_offset_px.1 / H,
        };
        // Middle/ring/pinky tips: 60 px span when raised, 10 px otherwise
        for (finger, (root, tip)) in [(2usize, (9usize, 12usize)), (3, (13, 16)), (4, (17, 20))] {
            let span = if raised[finger] { 60.0 } else { 10.0 };
            lms[tip] = Landmark {
                x: lms[root].x,
                y: lms[root].y + span / H,
            };
        }
        lms
    }

    #[test]
    fn test_classified_thumb_up_pose_takes_off() {
        // Thumb 95 px straight up on a 100 px scale: ratio 0.95, well past
        // the 80 px up threshold. Everything else folded.
        let lms = frame_landmarks((0.0, -95.0), (10.0, 0.0), [true, false, false, false, false]);
        let classifier = FingerClassifier::new(DetectionConfig::default());
        let hand_pose = classifier.classify(&lms, 960, 720).unwrap();
        assert_eq!(
            hand_pose.fingers,
            FingerVector([true, false, false, false, false])
        );

        let mut link = ScriptedLink::new();
        let mut d = dispatcher();
        let fired = d.dispatch(&hand_pose, &mut link).unwrap();
        assert_eq!(fired.unwrap().action, FlightAction::TakeOff);
        assert_eq!(d.state(), FlightState::Airborne);
    }

    #[test]
    fn test_classified_index_right_pose_rotates() {
        // Index tip 95 px to the right: raised (0.95) and Horizontal::Right.
        let lms = frame_landmarks((10.0, 0.0), (95.0, 0.0), [false, true, false, false, false]);
        let classifier = FingerClassifier::new(DetectionConfig::default());
        let hand_pose = classifier.classify(&lms, 960, 720).unwrap();
        assert_eq!(hand_pose.index.horizontal, Horizontal::Right);

        let mut link = ScriptedLink::new();
        let mut d = airborne_dispatcher(&mut link);
        d.dispatch(&hand_pose, &mut link).unwrap();
        assert_eq!(link.sent, vec!["cw 90"]);
    }

    #[test]
    fn test_classified_three_finger_pose_double_flips() {
        // Index tip 85 px up; middle and ring raised.
        let lms = frame_landmarks((10.0, 0.0), (0.0, -85.0), [false, true, true, true, false]);
        let classifier = FingerClassifier::new(DetectionConfig::default());
        let hand_pose = classifier.classify(&lms, 960, 720).unwrap();
        assert_eq!(
            hand_pose.fingers,
            FingerVector([false, true, true, true, false])
        );
        assert!(hand_pose.index.pointing_up);

        let mut link = ScriptedLink::new();
        let mut d = airborne_dispatcher(&mut link);
        d.dispatch(&hand_pose, &mut link).unwrap();
        assert_eq!(link.sent, vec!["flip f", "flip b"]);
    }
}

use crate::detection::domain::detected_face::DetectedFace;

use super::facing::{classify, FacingDirection};

pub const LOOK_AT_CAMERA: &str = "Look at the camera";
pub const FOCUS_ON_FACE: &str = "Focus on your face";
pub const MOVE_CLOSER: &str = "Move the camera closer";
pub const FACE_THE_CAMERA: &str = "Face the camera";
pub const TURN_RIGHT: &str = "Turn to the right";
pub const THANK_YOU: &str = "Thank you";

/// Minimum face width/height as a fraction of the frame. Smaller faces
/// give unreliable pose angles, so guidance pauses instead of advancing.
const MIN_FACE_FRACTION: f64 = 0.25;

/// Pitch window (degrees, exclusive) accepted for the frontal capture.
const PITCH_FLOOR: f64 = -20.0;
const PITCH_CEILING: f64 = 10.0;

/// Stage of the two-pose capture ritual.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureStep {
    /// Waiting for the user to face the camera squarely.
    AwaitingFrontal,
    /// Frontal pose confirmed; waiting for a full right turn.
    AwaitingRightTurn,
    /// Both poses captured.
    Complete,
}

/// Per-connection guidance state machine.
///
/// One instance is owned by exactly one connection and fed the face list
/// of every frame in order; `analyze` returns the instruction to show the
/// user and advances (or resets) the capture step as a side effect. The
/// engine is total: any well-formed face list yields an instruction.
pub struct GuidanceSession {
    step: CaptureStep,
}

impl GuidanceSession {
    pub fn new() -> Self {
        Self {
            step: CaptureStep::AwaitingFrontal,
        }
    }

    pub fn step(&self) -> CaptureStep {
        self.step
    }

    /// Consumes one frame's detection result and returns the instruction
    /// for the user.
    ///
    /// Losing the face, seeing more than one, or receiving a face without
    /// usable geometry resets the ritual to the start. A face that is
    /// merely too small does *not* reset: moving slightly away from the
    /// camera should not discard a confirmed frontal pose.
    pub fn analyze(&mut self, faces: &[DetectedFace]) -> &'static str {
        if faces.is_empty() {
            self.step = CaptureStep::AwaitingFrontal;
            return LOOK_AT_CAMERA;
        }
        if faces.len() > 1 {
            self.step = CaptureStep::AwaitingFrontal;
            return FOCUS_ON_FACE;
        }

        let face = &faces[0];
        let (bb, pose) = match (&face.bounding_box, &face.pose) {
            // A NaN yaw falls through every classifier range, so it is
            // treated the same as a missing pose.
            (Some(bb), Some(pose)) if !pose.yaw.is_nan() => (bb, pose),
            _ => {
                self.step = CaptureStep::AwaitingFrontal;
                return FOCUS_ON_FACE;
            }
        };

        if bb.width < MIN_FACE_FRACTION || bb.height < MIN_FACE_FRACTION {
            return MOVE_CLOSER;
        }

        let direction = classify(pose.yaw);
        match self.step {
            CaptureStep::AwaitingFrontal => {
                if direction == FacingDirection::Frontal
                    && pose.pitch > PITCH_FLOOR
                    && pose.pitch < PITCH_CEILING
                {
                    self.step = CaptureStep::AwaitingRightTurn;
                    TURN_RIGHT
                } else {
                    FACE_THE_CAMERA
                }
            }
            CaptureStep::AwaitingRightTurn => {
                if direction == FacingDirection::FarRight {
                    self.step = CaptureStep::Complete;
                    THANK_YOU
                } else {
                    TURN_RIGHT
                }
            }
            CaptureStep::Complete => THANK_YOU,
        }
    }
}

impl Default for GuidanceSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn face(width: f64, height: f64, yaw: f64, pitch: f64) -> DetectedFace {
        DetectedFace::with_geometry(width, height, yaw, pitch)
    }

    fn frontal() -> DetectedFace {
        face(0.3, 0.3, 0.0, 0.0)
    }

    fn far_right() -> DetectedFace {
        face(0.3, 0.3, -50.0, 0.0)
    }

    /// Drives a fresh session to the requested step with valid frames.
    fn session_at(step: CaptureStep) -> GuidanceSession {
        let mut session = GuidanceSession::new();
        if step == CaptureStep::AwaitingFrontal {
            return session;
        }
        assert_eq!(session.analyze(&[frontal()]), TURN_RIGHT);
        if step == CaptureStep::AwaitingRightTurn {
            return session;
        }
        assert_eq!(session.analyze(&[far_right()]), THANK_YOU);
        session
    }

    // ── Reset branches ───────────────────────────────────────────────

    #[rstest]
    #[case::from_start(CaptureStep::AwaitingFrontal)]
    #[case::from_right_turn(CaptureStep::AwaitingRightTurn)]
    #[case::from_complete(CaptureStep::Complete)]
    fn test_no_faces_resets(#[case] step: CaptureStep) {
        let mut session = session_at(step);
        assert_eq!(session.analyze(&[]), LOOK_AT_CAMERA);
        assert_eq!(session.step(), CaptureStep::AwaitingFrontal);
    }

    #[rstest]
    #[case::from_start(CaptureStep::AwaitingFrontal)]
    #[case::from_right_turn(CaptureStep::AwaitingRightTurn)]
    #[case::from_complete(CaptureStep::Complete)]
    fn test_multiple_faces_resets(#[case] step: CaptureStep) {
        let mut session = session_at(step);
        assert_eq!(session.analyze(&[frontal(), frontal()]), FOCUS_ON_FACE);
        assert_eq!(session.step(), CaptureStep::AwaitingFrontal);
    }

    #[test]
    fn test_face_without_geometry_resets() {
        let mut session = session_at(CaptureStep::AwaitingRightTurn);
        assert_eq!(session.analyze(&[DetectedFace::default()]), FOCUS_ON_FACE);
        assert_eq!(session.step(), CaptureStep::AwaitingFrontal);
    }

    #[test]
    fn test_face_missing_only_pose_resets() {
        let mut no_pose = frontal();
        no_pose.pose = None;
        let mut session = session_at(CaptureStep::AwaitingRightTurn);
        assert_eq!(session.analyze(&[no_pose]), FOCUS_ON_FACE);
        assert_eq!(session.step(), CaptureStep::AwaitingFrontal);
    }

    #[test]
    fn test_face_missing_only_bounding_box_resets() {
        let mut no_box = frontal();
        no_box.bounding_box = None;
        let mut session = session_at(CaptureStep::AwaitingRightTurn);
        assert_eq!(session.analyze(&[no_box]), FOCUS_ON_FACE);
        assert_eq!(session.step(), CaptureStep::AwaitingFrontal);
    }

    #[test]
    fn test_nan_yaw_treated_as_missing_pose() {
        let mut session = session_at(CaptureStep::AwaitingRightTurn);
        assert_eq!(
            session.analyze(&[face(0.3, 0.3, f64::NAN, 0.0)]),
            FOCUS_ON_FACE
        );
        assert_eq!(session.step(), CaptureStep::AwaitingFrontal);
    }

    // ── Too-small face keeps progress ────────────────────────────────

    #[rstest]
    #[case::narrow(0.1, 0.3)]
    #[case::short(0.3, 0.1)]
    fn test_small_face_does_not_reset(#[case] width: f64, #[case] height: f64) {
        let mut session = session_at(CaptureStep::AwaitingRightTurn);
        assert_eq!(
            session.analyze(&[face(width, height, 0.0, 0.0)]),
            MOVE_CLOSER
        );
        assert_eq!(session.step(), CaptureStep::AwaitingRightTurn);
    }

    #[test]
    fn test_small_face_after_completion_keeps_terminal_step() {
        let mut session = session_at(CaptureStep::Complete);
        assert_eq!(session.analyze(&[face(0.1, 0.1, 0.0, 0.0)]), MOVE_CLOSER);
        assert_eq!(session.step(), CaptureStep::Complete);
    }

    #[test]
    fn test_small_face_at_start() {
        let mut session = GuidanceSession::new();
        assert_eq!(session.analyze(&[face(0.1, 0.1, 0.0, 0.0)]), MOVE_CLOSER);
        assert_eq!(session.step(), CaptureStep::AwaitingFrontal);
    }

    // ── Frontal confirmation ─────────────────────────────────────────

    #[test]
    fn test_frontal_pose_advances() {
        let mut session = GuidanceSession::new();
        assert_eq!(session.analyze(&[frontal()]), TURN_RIGHT);
        assert_eq!(session.step(), CaptureStep::AwaitingRightTurn);
    }

    #[rstest]
    #[case::turned_right(-30.0, 0.0)]
    #[case::turned_left(30.0, 0.0)]
    #[case::yaw_at_boundary(20.0, 0.0)]
    #[case::pitch_too_low(0.0, -20.0)]
    #[case::pitch_too_high(0.0, 10.0)]
    #[case::pitch_nan(0.0, f64::NAN)]
    fn test_not_frontal_keeps_waiting(#[case] yaw: f64, #[case] pitch: f64) {
        let mut session = GuidanceSession::new();
        assert_eq!(session.analyze(&[face(0.3, 0.3, yaw, pitch)]), FACE_THE_CAMERA);
        assert_eq!(session.step(), CaptureStep::AwaitingFrontal);
    }

    #[test]
    fn test_pitch_just_inside_window_advances() {
        let mut session = GuidanceSession::new();
        assert_eq!(session.analyze(&[face(0.3, 0.3, 0.0, -19.9)]), TURN_RIGHT);
        assert_eq!(session.step(), CaptureStep::AwaitingRightTurn);
    }

    // ── Right turn confirmation ──────────────────────────────────────

    #[test]
    fn test_far_right_completes() {
        let mut session = session_at(CaptureStep::AwaitingRightTurn);
        assert_eq!(session.analyze(&[far_right()]), THANK_YOU);
        assert_eq!(session.step(), CaptureStep::Complete);
    }

    #[rstest]
    #[case::still_frontal(0.0)]
    #[case::partial_turn(-30.0)]
    #[case::wrong_direction(50.0)]
    fn test_incomplete_turn_keeps_prompting(#[case] yaw: f64) {
        let mut session = session_at(CaptureStep::AwaitingRightTurn);
        assert_eq!(session.analyze(&[face(0.3, 0.3, yaw, 0.0)]), TURN_RIGHT);
        assert_eq!(session.step(), CaptureStep::AwaitingRightTurn);
    }

    // ── Terminal state ───────────────────────────────────────────────

    #[test]
    fn test_complete_is_terminal_for_valid_faces() {
        let mut session = session_at(CaptureStep::Complete);
        assert_eq!(session.analyze(&[frontal()]), THANK_YOU);
        assert_eq!(session.analyze(&[far_right()]), THANK_YOU);
        assert_eq!(session.step(), CaptureStep::Complete);
    }

    // ── Full ritual ──────────────────────────────────────────────────

    #[test]
    fn test_capture_ritual_sequence() {
        let mut session = GuidanceSession::new();
        let instructions = [
            session.analyze(&[]),
            session.analyze(&[frontal()]),
            session.analyze(&[far_right()]),
            session.analyze(&[far_right()]),
        ];
        assert_eq!(
            instructions,
            [LOOK_AT_CAMERA, TURN_RIGHT, THANK_YOU, THANK_YOU]
        );
    }
}

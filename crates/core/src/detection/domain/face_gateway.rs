use crate::detection::domain::detected_face::DetectedFace;

/// Domain interface for the face detection capability.
///
/// Given the raw bytes of one video frame, returns every face the
/// detection backend found, with whatever geometry it reported. A frame
/// with no faces yields an empty list, not an error.
///
/// Implementations may be stateful (e.g., a fixture source cycling
/// through canned responses), hence `&mut self`.
pub trait FaceGateway: Send {
    fn detect(&mut self, frame: &[u8]) -> Result<Vec<DetectedFace>, Box<dyn std::error::Error>>;
}

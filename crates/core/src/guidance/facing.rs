/// Yaw magnitude below which a face counts as frontal.
pub const FRONTAL_HALF_ANGLE: f64 = 20.0;

/// Yaw magnitude at which a turn becomes a full profile.
pub const PROFILE_ANGLE: f64 = 45.0;

/// Coarse five-way classification of head yaw.
///
/// Yaw is camera-relative and mirrored: negative yaw means the user is
/// turning toward the camera's right, so it maps to the `Right` labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FacingDirection {
    FarLeft,
    LeftTransition,
    Frontal,
    RightTransition,
    FarRight,
}

/// Classifies a yaw angle (degrees) into a facing direction.
///
/// The five ranges partition the real line. Boundary closures are
/// deliberate: ±20 falls outside `Frontal` into the transition buckets,
/// and ±45 falls into the far buckets:
///
/// - (-20, 20)   → `Frontal`
/// - (-45, -20]  → `RightTransition`
/// - (-∞, -45]   → `FarRight`
/// - [20, 45)    → `LeftTransition`
/// - [45, ∞)     → `FarLeft`
///
/// NaN is a contract violation; callers must treat a NaN yaw as missing
/// pose data and never pass it here.
pub fn classify(yaw: f64) -> FacingDirection {
    if yaw > -FRONTAL_HALF_ANGLE && yaw < FRONTAL_HALF_ANGLE {
        FacingDirection::Frontal
    } else if yaw > -PROFILE_ANGLE && yaw <= -FRONTAL_HALF_ANGLE {
        FacingDirection::RightTransition
    } else if yaw <= -PROFILE_ANGLE {
        FacingDirection::FarRight
    } else if yaw < PROFILE_ANGLE {
        FacingDirection::LeftTransition
    } else {
        FacingDirection::FarLeft
    }
}

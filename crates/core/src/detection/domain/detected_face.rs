use serde::{Deserialize, Serialize};

/// One face reported by the detection service for a single frame.
///
/// Field names serialize in `PascalCase` to match the upstream service's
/// wire schema, so payloads pass through to clients unmodified. Every
/// field is optional: the service omits attributes it was not asked for,
/// and off-frame faces can carry partial geometry. The guidance engine
/// consults only `bounding_box` and `pose`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DetectedFace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pose: Option<Pose>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<Landmark>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
}

/// Face rectangle as fractions of the frame size.
///
/// Values are not clamped: a face extending past the frame edge yields
/// coordinates outside [0, 1], including negative `left`/`top`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

/// Head rotation in degrees, camera-relative.
///
/// Negative yaw means the head is turned toward the camera's right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Pose {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

/// Named facial landmark in frame-fraction coordinates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Landmark {
    #[serde(rename = "Type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
}

/// Image quality metrics reported alongside a detection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Quality {
    pub brightness: f64,
    pub sharpness: f64,
}

impl DetectedFace {
    /// Convenience constructor for a face with full geometry.
    pub fn with_geometry(width: f64, height: f64, yaw: f64, pitch: f64) -> Self {
        Self {
            bounding_box: Some(BoundingBox {
                width,
                height,
                left: 0.0,
                top: 0.0,
            }),
            pose: Some(Pose {
                yaw,
                pitch,
                roll: 0.0,
            }),
            ..Self::default()
        }
    }
}

use thiserror::Error;

use crate::detection::domain::detected_face::DetectedFace;
use crate::detection::domain::face_gateway::FaceGateway;

use super::http_gateway::DetectFacesResponse;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("fixture frame {index} is not valid detection JSON: {source}")]
    Parse {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("fixture script is empty")]
    EmptyScript,
}

/// Responses recorded from a live detection session, replayed in order:
/// an empty frame, a face too far from the camera, a well-framed frontal
/// face, and a far-right profile. Cycling through them walks a client
/// through the whole capture ritual without a detection backend.
const RECORDED_SCRIPT: &[&str] = &[
    r#"{"FaceDetails":[]}"#,
    r#"{"FaceDetails":[{"BoundingBox":{"Height":0.5120102763175964,"Left":0.0444658026099205,"Top":-0.2300969511270523,"Width":0.22225633263587952},"Confidence":99.99996185302734,"Landmarks":[{"Type":"eyeLeft","X":0.13331173360347748,"Y":-0.06670842319726944},{"Type":"eyeRight","X":0.2305816411972046,"Y":-0.02748301438987255},{"Type":"mouthLeft","X":0.11967450380325317,"Y":0.10469245165586472},{"Type":"mouthRight","X":0.2008291780948639,"Y":0.13726593554019928},{"Type":"nose","X":0.1809072047472,"Y":0.038752343505620956}],"Pose":{"Pitch":6.568717956542969,"Roll":14.095389366149902,"Yaw":6.412472724914551},"Quality":{"Brightness":50.58533477783203,"Sharpness":60.49041748046875}}]}"#,
    r#"{"FaceDetails":[{"BoundingBox":{"Height":0.836955726146698,"Left":0.41928306221961975,"Top":-0.04353904351592064,"Width":0.3449418544769287},"Confidence":99.99998474121094,"Landmarks":[{"Type":"eyeLeft","X":0.5351470112800598,"Y":0.2619765102863312},{"Type":"eyeRight","X":0.6973856687545776,"Y":0.2662754952907562},{"Type":"mouthLeft","X":0.5362831950187683,"Y":0.5976361036300659},{"Type":"mouthRight","X":0.6706182956695557,"Y":0.5999993085861206},{"Type":"nose","X":0.6247119903564453,"Y":0.48171505331993103}],"Pose":{"Pitch":-17.631322860717773,"Roll":1.0789055824279785,"Yaw":8.349883079528809},"Quality":{"Brightness":76.4839859008789,"Sharpness":86.86019134521484}}]}"#,
    r#"{"FaceDetails":[{"BoundingBox":{"Height":0.6982589960098267,"Left":0.2486524134874344,"Top":-0.022139623761177063,"Width":0.28551608324050903},"Confidence":100,"Landmarks":[{"Type":"eyeLeft","X":0.29664716124534607,"Y":0.2613499164581299},{"Type":"eyeRight","X":0.3432553708553314,"Y":0.24820420145988464},{"Type":"mouthLeft","X":0.3270845413208008,"Y":0.5215925574302673},{"Type":"mouthRight","X":0.36074304580688477,"Y":0.5160477161407471},{"Type":"nose","X":0.2614690065383911,"Y":0.39391008019447327}],"Pose":{"Pitch":9.773420333862305,"Roll":-21.155019760131836,"Yaw":-65.08802032470703},"Quality":{"Brightness":79.98331451416016,"Sharpness":89.85481262207031}}]}"#,
];

/// Deterministic detection source for offline use.
///
/// Ignores the frame bytes entirely and replays a fixed script of face
/// lists, wrapping around at the end. Selected via configuration so the
/// transport layer can be exercised without detection credentials.
pub struct FixtureGateway {
    script: Vec<Vec<DetectedFace>>,
    index: usize,
}

impl FixtureGateway {
    /// Gateway replaying the built-in recorded script.
    pub fn new() -> Result<Self, FixtureError> {
        let script = RECORDED_SCRIPT
            .iter()
            .enumerate()
            .map(|(index, json)| {
                serde_json::from_str::<DetectFacesResponse>(json)
                    .map(|r| r.face_details)
                    .map_err(|source| FixtureError::Parse { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::with_script(script)
    }

    /// Gateway replaying a caller-supplied script of face lists.
    pub fn with_script(script: Vec<Vec<DetectedFace>>) -> Result<Self, FixtureError> {
        if script.is_empty() {
            return Err(FixtureError::EmptyScript);
        }
        Ok(Self { script, index: 0 })
    }
}

impl FaceGateway for FixtureGateway {
    fn detect(&mut self, _frame: &[u8]) -> Result<Vec<DetectedFace>, Box<dyn std::error::Error>> {
        let faces = self.script[self.index].clone();
        self.index = (self.index + 1) % self.script.len();
        Ok(faces)
    }
}

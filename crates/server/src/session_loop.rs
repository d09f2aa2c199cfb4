use std::net::TcpStream;

use serde::Serialize;
use tungstenite::{accept, Message};

use posecoach_core::detection::domain::detected_face::DetectedFace;
use posecoach_core::detection::domain::face_gateway::FaceGateway;
use posecoach_core::guidance::session::GuidanceSession;

/// One frame's reply to the client: the face list exactly as the
/// detection service reported it, plus the guidance instruction.
#[derive(Serialize)]
struct FrameResponse<'a> {
    #[serde(rename = "FaceDetails")]
    face_details: &'a [DetectedFace],
    #[serde(rename = "Command")]
    command: &'a str,
}

/// Runs the detect → analyze → serialize step for a single frame.
///
/// Factored out of the socket loop so the per-frame behavior and wire
/// format are testable without a network connection.
pub fn process_frame(
    gateway: &mut dyn FaceGateway,
    session: &mut GuidanceSession,
    frame: &[u8],
) -> Result<String, Box<dyn std::error::Error>> {
    let faces = gateway.detect(frame)?;
    let command = session.analyze(&faces);
    let response = FrameResponse {
        face_details: &faces,
        command,
    };
    Ok(serde_json::to_string(&response)?)
}

/// Serves one websocket connection until the client disconnects or a
/// frame fails to process.
///
/// The session and gateway are owned by this thread for the connection's
/// whole lifetime; frames are handled strictly one at a time, so the
/// session's step can never be mutated concurrently. Any error tears
/// down this connection only.
pub fn run_session(
    stream: TcpStream,
    mut gateway: Box<dyn FaceGateway>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut socket = accept(stream)?;
    let mut session = GuidanceSession::new();

    loop {
        let message = match socket.read() {
            Ok(message) => message,
            Err(tungstenite::Error::ConnectionClosed) => break,
            Err(e) => return Err(e.into()),
        };

        match message {
            Message::Binary(frame) => {
                let reply = process_frame(gateway.as_mut(), &mut session, &frame)?;
                socket.send(Message::Text(reply.into()))?;
            }
            Message::Close(_) => {
                log::debug!("client closed connection");
                break;
            }
            // tungstenite answers pings itself on the next read/write.
            Message::Ping(_) | Message::Pong(_) => {}
            other => {
                log::warn!("expected a binary frame, got {other:?}");
                break;
            }
        }
    }

    Ok(())
}

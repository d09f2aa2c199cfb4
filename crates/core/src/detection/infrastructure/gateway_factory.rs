use crate::detection::domain::face_gateway::FaceGateway;

use super::fixture_gateway::FixtureGateway;
use super::http_gateway::HttpFaceGateway;

/// Which detection backend a session should talk to.
///
/// Chosen once at startup; every connection builds its own gateway
/// instance from the same config, so sessions never share mutable state.
#[derive(Clone, Debug)]
pub enum GatewayConfig {
    /// Replay recorded responses instead of calling a detection service.
    Fixtures,
    /// POST frames to a live detection service.
    Http {
        endpoint: String,
        api_key: Option<String>,
    },
}

/// Creates the detection gateway selected by the config.
pub fn create_gateway(
    config: &GatewayConfig,
) -> Result<Box<dyn FaceGateway>, Box<dyn std::error::Error>> {
    match config {
        GatewayConfig::Fixtures => {
            log::debug!("using fixture detection gateway");
            Ok(Box::new(FixtureGateway::new()?))
        }
        GatewayConfig::Http { endpoint, api_key } => {
            log::debug!("using HTTP detection gateway at {endpoint}");
            Ok(Box::new(HttpFaceGateway::new(
                endpoint.clone(),
                api_key.clone(),
            )))
        }
    }
}

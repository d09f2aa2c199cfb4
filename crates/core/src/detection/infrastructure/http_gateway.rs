use serde::Deserialize;
use thiserror::Error;

use crate::detection::domain::detected_face::DetectedFace;
use crate::detection::domain::face_gateway::FaceGateway;

#[derive(Error, Debug)]
pub enum HttpGatewayError {
    #[error("detection request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("detection service returned HTTP {status}")]
    Status { status: reqwest::StatusCode },
    #[error("failed to read detection response body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("failed to decode detection response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Envelope returned by the detection service for one frame.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DetectFacesResponse {
    pub face_details: Vec<DetectedFace>,
}

/// Live face detection client.
///
/// POSTs the raw frame bytes to a detection service endpoint and decodes
/// the JSON face list. The client is blocking; each connection thread
/// owns its own instance, so no request ever blocks another session.
pub struct HttpFaceGateway {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
}

impl HttpFaceGateway {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            endpoint,
            api_key,
            client: reqwest::blocking::Client::new(),
        }
    }

    fn request(&self, frame: &[u8]) -> Result<Vec<DetectedFace>, HttpGatewayError> {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/octet-stream")
            .body(frame.to_vec());
        if let Some(key) = &self.api_key {
            builder = builder.header("x-api-key", key);
        }

        let response = builder.send().map_err(|e| HttpGatewayError::Request {
            url: self.endpoint.clone(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpGatewayError::Status { status });
        }

        let body = response.text().map_err(HttpGatewayError::Body)?;
        let decoded: DetectFacesResponse =
            serde_json::from_str(&body).map_err(HttpGatewayError::Decode)?;
        Ok(decoded.face_details)
    }
}

impl FaceGateway for HttpFaceGateway {
    fn detect(&mut self, frame: &[u8]) -> Result<Vec<DetectedFace>, Box<dyn std::error::Error>> {
        log::debug!("detecting faces in {} byte frame", frame.len());
        Ok(self.request(frame)?)
    }
}

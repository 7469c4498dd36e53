//! Private SOAP client for UPnP device communication
//!
//! This crate provides a minimal blocking SOAP client for talking to the
//! control endpoints of a single UPnP media player. It builds envelopes,
//! performs the HTTP exchange and classifies what comes back.

mod config;
mod error;
pub mod envelope;
pub mod response;

pub use config::{SoapConfig, DEFAULT_PORT};
pub use envelope::SoapRequest;
pub use error::SoapError;
pub use response::SoapResponse;

use std::io::Read;

use tracing::debug;

/// Upper bound on a response body; speaker answers are a few kilobytes
const MAX_BODY_BYTES: u64 = 10 * 1024 * 1024;

/// A minimal SOAP client for UPnP device communication
#[derive(Debug, Clone)]
pub struct SoapClient {
    agent: ureq::Agent,
    config: SoapConfig,
}

impl SoapClient {
    /// Create a new SOAP client with default configuration
    pub fn new() -> Self {
        Self::with_config(SoapConfig::default())
    }

    /// Create a SOAP client with custom port and timeouts
    pub fn with_config(config: SoapConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout)
            .timeout_read(config.read_timeout)
            .build();

        Self { agent, config }
    }

    pub fn config(&self) -> &SoapConfig {
        &self.config
    }

    /// `http://<host>:<port>` for the given device
    pub fn base_url(&self, host: &str) -> String {
        format!("http://{}:{}", host, self.config.port)
    }

    /// Send a SOAP request and interpret the response
    ///
    /// # Returns
    /// The matching `<Action>Response` element, or:
    /// * `SoapError::Network` if no response was received
    /// * `SoapError::Fault` if the device answered with a UPnP fault
    /// * `SoapError::UnrecognizedResponse` with the raw body otherwise
    pub fn call(&self, host: &str, request: &SoapRequest) -> Result<SoapResponse, SoapError> {
        let url = format!("{}{}", self.base_url(host), request.endpoint);
        let body = request.envelope();

        debug!(action = request.action, url = %url, "sending SOAP request");

        let result = self
            .agent
            .post(&url)
            .set("Content-Type", "text/xml")
            .set("SOAPACTION", &request.soap_action())
            .send_string(&body);

        // UPnP devices report faults with HTTP 500, so error statuses still
        // carry a body worth interpreting.
        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                debug!(action = request.action, status, "device returned error status");
                response
            }
            Err(ureq::Error::Transport(e)) => return Err(SoapError::Network(e.to_string())),
        };

        let xml_text = read_body(response)?;

        debug!(action = request.action, bytes = xml_text.len(), "received SOAP response");

        response::interpret(xml_text, request.service_uri, request.action)
    }

    /// Fetch a plain (non-SOAP) document from the device
    ///
    /// Any non-success status is reported as `SoapError::Network`.
    pub fn get(&self, host: &str, path: &str) -> Result<String, SoapError> {
        let url = format!("{}{}", self.base_url(host), path);

        debug!(url = %url, "fetching document");

        let response = self.agent.get(&url).call().map_err(|e| match e {
            ureq::Error::Status(status, _) => {
                SoapError::Network(format!("GET {} failed: HTTP {}", url, status))
            }
            ureq::Error::Transport(e) => SoapError::Network(e.to_string()),
        })?;

        read_body(response)
    }
}

/// Read a whole response body as text
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD; everything else
/// is kept exactly as sent.
fn read_body(response: ureq::Response) -> Result<String, SoapError> {
    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_BODY_BYTES)
        .read_to_end(&mut bytes)
        .map_err(|e| SoapError::Network(e.to_string()))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

impl Default for SoapClient {
    fn default() -> Self {
        Self::new()
    }
}

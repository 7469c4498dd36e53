use soap_client::{SoapClient, SoapConfig};
use tracing::debug;

use crate::{Result, SonosOperation};

/// A client for executing Sonos operations against actual devices
///
/// This client bridges the stateless operation definitions and the network
/// exchange with a speaker. It holds no per-device state and can be shared
/// freely between threads.
#[derive(Debug, Clone, Default)]
pub struct SonosClient {
    soap_client: SoapClient,
}

impl SonosClient {
    /// Create a client with the default port and timeouts
    pub fn new() -> Self {
        Self {
            soap_client: SoapClient::new(),
        }
    }

    /// Create a client with custom port and timeouts
    pub fn with_config(config: SoapConfig) -> Self {
        Self {
            soap_client: SoapClient::with_config(config),
        }
    }

    /// Create a Sonos client around an existing SOAP client
    pub fn with_soap_client(soap_client: SoapClient) -> Self {
        Self { soap_client }
    }

    pub fn config(&self) -> &SoapConfig {
        self.soap_client.config()
    }

    /// `http://<host>:<port>` for the given speaker
    pub fn base_url(&self, host: &str) -> String {
        self.soap_client.base_url(host)
    }

    /// Execute a Sonos operation against a device
    ///
    /// The request is validated before anything is sent; an invalid request
    /// never reaches the network.
    ///
    /// # Arguments
    /// * `host` - The IP address or host name of the Sonos device
    /// * `request` - The operation request data
    ///
    /// # Example
    /// ```rust,no_run
    /// use soco::SonosClient;
    /// use soco::operations::rendering_control::{GetVolumeOperation, GetVolumeOperationRequest};
    ///
    /// let client = SonosClient::new();
    /// let request = GetVolumeOperationRequest { instance_id: 0, channel: "Master".to_string() };
    /// let volume = client.execute::<GetVolumeOperation>("192.168.1.100", &request)?;
    /// # Ok::<(), soco::ApiError>(())
    /// ```
    pub fn execute<Op: SonosOperation>(&self, host: &str, request: &Op::Request) -> Result<Op::Response> {
        let soap_request = Op::request(request)?;

        debug!(host, service = Op::SERVICE.name(), action = Op::ACTION, "executing operation");

        let response = self.soap_client.call(host, &soap_request)?;
        Op::parse_response(&response)
    }

    /// Fetch a plain document such as `/status/zp` from the speaker
    pub fn get_document(&self, host: &str, path: &str) -> Result<String> {
        Ok(self.soap_client.get(host, path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::rendering_control::{SetVolumeOperation, SetVolumeOperationRequest};
    use crate::ApiError;

    #[test]
    fn test_client_creation() {
        let client = SonosClient::new();
        assert_eq!(client.config().port, 1400);
        assert_eq!(client.base_url("10.0.0.2"), "http://10.0.0.2:1400");
    }

    #[test]
    fn test_invalid_request_is_rejected_before_sending() {
        // Nothing listens on this host; a network attempt would fail differently.
        let client = SonosClient::with_config(SoapConfig::new().with_port(9));
        let request = SetVolumeOperationRequest {
            instance_id: 0,
            channel: "Master".to_string(),
            desired_volume: 150,
        };

        match client.execute::<SetVolumeOperation>("192.0.2.1", &request) {
            Err(ApiError::InvalidParameter(msg)) => assert!(msg.contains("desired_volume")),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }
}

//! Operation framework
//!
//! Every supported UPnP action is a type implementing [`SonosOperation`]. The
//! type knows its service, its action name, how to turn a typed request into
//! argument XML, and how to read its typed response back out.

pub mod macros;

use std::str::FromStr;

use soap_client::{SoapRequest, SoapResponse};

use crate::error::ApiError;
use crate::service::Service;

/// Base trait for all Sonos API operations
///
/// This trait defines the common interface that all Sonos UPnP operations must implement.
/// It provides type safety through associated types and ensures consistent patterns
/// for request/response handling across all operations.
pub trait SonosOperation {
    /// The request type for this operation
    type Request: Validate;

    /// The response type for this operation
    type Response;

    /// The UPnP service this operation belongs to
    const SERVICE: Service;

    /// The SOAP action name for this operation
    const ACTION: &'static str;

    /// Build the SOAP payload from the request data
    ///
    /// The request is validated first; the payload is the argument XML that
    /// goes inside the action element, with every value escaped.
    fn build_payload(request: &Self::Request) -> Result<String, ValidationError>;

    /// Parse the matched `<Action>Response` into the typed response
    fn parse_response(response: &SoapResponse) -> Result<Self::Response, ApiError>;

    /// Build the complete request: endpoint, action header and payload
    fn request(request: &Self::Request) -> Result<SoapRequest, ValidationError> {
        let info = Self::SERVICE.info();
        let payload = Self::build_payload(request)?;
        Ok(SoapRequest::new(info.endpoint, info.service_uri, Self::ACTION, payload))
    }
}

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Parameter '{parameter}' value '{value}' is out of range ({min}..={max})")]
    RangeError {
        parameter: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Parameter '{parameter}' value '{value}' is invalid: {reason}")]
    InvalidValue {
        parameter: String,
        value: String,
        reason: String,
    },
}

impl ValidationError {
    pub fn range_error(
        parameter: &str,
        min: impl std::fmt::Display,
        max: impl std::fmt::Display,
        value: impl std::fmt::Display,
    ) -> Self {
        Self::RangeError {
            parameter: parameter.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub fn invalid_value(parameter: &str, value: impl std::fmt::Display, reason: &str) -> Self {
        Self::InvalidValue {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Trait for request types that can be validated before transmission
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Reject `value` unless it lies within `min..=max`
pub fn check_range<T>(parameter: &str, value: T, min: T, max: T) -> Result<(), ValidationError>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        Err(ValidationError::range_error(parameter, min, max, value))
    } else {
        Ok(())
    }
}

/// Read and parse a required field of the response element
///
/// A missing or unparseable field means the device did not answer the way
/// this action is specified; the raw body is handed back for diagnostics.
pub fn parse_field<T: FromStr>(response: &SoapResponse, name: &str) -> Result<T, ApiError> {
    response
        .field(name)
        .and_then(|text| text.trim().parse().ok())
        .ok_or_else(|| ApiError::UnrecognizedResponse(response.raw.clone()))
}

/// Read a text field of the response element, empty when absent
pub fn text_field(response: &SoapResponse, name: &str) -> String {
    response.field(name).unwrap_or_default()
}

use soap_client::SoapError;
use thiserror::Error;

use crate::operation::ValidationError;

/// High-level API errors for speaker operations
///
/// Every failed call ends in exactly one of these. Nothing is retried and no
/// error invalidates the client that produced it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network communication error
    ///
    /// The HTTP exchange itself failed: the device was unreachable, refused
    /// the connection, or did not answer within the configured timeout.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// UPnP fault returned by the device
    ///
    /// Callers commonly branch on the code, for example 701 when the active
    /// source does not allow skipping tracks.
    #[error("UPnP fault: error code {0}")]
    UpnpFault(u16),

    /// The response was neither the expected one nor a parseable fault.
    /// Holds the raw body exactly as received.
    #[error("Unrecognized response: {0}")]
    UnrecognizedResponse(String),

    /// Invalid parameter value, rejected before anything was sent
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ApiError {
    /// The UPnP error code, if this is a fault
    pub fn upnp_code(&self) -> Option<u16> {
        match self {
            ApiError::UpnpFault(code) => Some(*code),
            _ => None,
        }
    }

    /// Human-readable meaning of a well-known UPnP fault code
    pub fn fault_description(&self) -> Option<&'static str> {
        self.upnp_code().and_then(describe_upnp_code)
    }
}

/// Meaning of the standard UPnP control and AVTransport error codes
pub fn describe_upnp_code(code: u16) -> Option<&'static str> {
    let description = match code {
        401 => "Invalid action",
        402 => "Invalid arguments",
        501 => "Action failed",
        600 => "Argument value invalid",
        601 => "Argument value out of range",
        602 => "Optional action not implemented",
        603 => "Out of memory",
        604 => "Human intervention required",
        605 => "String argument too long",
        701 => "Transition not available",
        702 => "No contents",
        703 => "Read error",
        704 => "Format not supported for playback",
        705 => "Transport is locked",
        706 => "Write error",
        707 => "Media is protected or not writeable",
        708 => "Format not supported for recording",
        709 => "Media is full",
        710 => "Seek mode not supported",
        711 => "Illegal seek target",
        712 => "Play mode not supported",
        713 => "Record quality not supported",
        714 => "Illegal MIME-type",
        715 => "Content busy",
        716 => "Resource not found",
        717 => "Play speed not supported",
        718 => "Invalid InstanceID",
        _ => return None,
    };
    Some(description)
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

/// Convert from SoapError to ApiError
impl From<SoapError> for ApiError {
    fn from(error: SoapError) -> Self {
        match error {
            SoapError::Network(msg) => ApiError::NetworkError(msg),
            SoapError::Fault(code) => ApiError::UpnpFault(code),
            SoapError::UnrecognizedResponse(raw) => ApiError::UnrecognizedResponse(raw),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::InvalidParameter(error.to_string())
    }
}

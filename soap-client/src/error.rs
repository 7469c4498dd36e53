//! Error types for the SOAP client

use thiserror::Error;

/// Errors that can occur during SOAP communication
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SoapError {
    /// The HTTP exchange itself failed: refused connection, timeout, DNS
    /// failure, or a non-success status on a plain GET.
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The device answered with a UPnP fault carrying this error code
    #[error("UPnP fault: error code {0}")]
    Fault(u16),

    /// The body was neither the expected action response nor a parseable
    /// fault. The raw body is kept verbatim, except that byte sequences
    /// which are not valid UTF-8 are replaced with U+FFFD.
    #[error("Unrecognized response: {0}")]
    UnrecognizedResponse(String),
}

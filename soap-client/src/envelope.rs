//! SOAP envelope construction
//!
//! Everything in here is pure string building; nothing depends on the
//! transport or on how responses are interpreted.

use std::borrow::Cow;
use std::fmt::Display;

/// Namespace of the SOAP 1.1 envelope
pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Encoding style advertised on every envelope
pub const SOAP_ENCODING_STYLE: &str = "http://schemas.xmlsoap.org/soap/encoding/";

/// Namespace of the `UPnPError` detail inside a fault
pub const UPNP_CONTROL_NS: &str = "urn:schemas-upnp-org:control-1-0";

/// A single SOAP action ready to be sent to a control endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapRequest {
    /// Control path on the device, e.g. `/MediaRenderer/AVTransport/Control`
    pub endpoint: &'static str,
    /// Service URN the action element lives in
    pub service_uri: &'static str,
    /// Bare action name, e.g. `Play`
    pub action: &'static str,
    /// Argument elements that go inside the action element
    pub payload: String,
}

impl SoapRequest {
    pub fn new(
        endpoint: &'static str,
        service_uri: &'static str,
        action: &'static str,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            endpoint,
            service_uri,
            action,
            payload: payload.into(),
        }
    }

    /// Value of the `SOAPACTION` header, quotes included
    pub fn soap_action(&self) -> String {
        format!("\"{}#{}\"", self.service_uri, self.action)
    }

    /// Full envelope document for this request
    pub fn envelope(&self) -> String {
        build_envelope(self.service_uri, self.action, &self.payload)
    }
}

/// Wrap an action payload in the SOAP envelope and body.
///
/// The document is emitted on a single line without an XML declaration;
/// some players reject leading whitespace before the root element.
pub fn build_envelope(service_uri: &str, action: &str, payload: &str) -> String {
    format!(
        r#"<s:Envelope xmlns:s="{env}" s:encodingStyle="{enc}"><s:Body><u:{action} xmlns:u="{service_uri}">{payload}</u:{action}></s:Body></s:Envelope>"#,
        env = SOAP_ENVELOPE_NS,
        enc = SOAP_ENCODING_STYLE,
        action = action,
        service_uri = service_uri,
        payload = payload,
    )
}

/// Escape text for use as element content
pub fn escape(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

/// Render one argument element with its value escaped
pub fn arg(name: &str, value: impl Display) -> String {
    let value = value.to_string();
    format!("<{name}>{}</{name}>", escape(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_soap_action_header_is_quoted() {
        let request = SoapRequest::new(
            "/MediaRenderer/AVTransport/Control",
            "urn:schemas-upnp-org:service:AVTransport:1",
            "Play",
            "",
        );

        assert_eq!(
            request.soap_action(),
            "\"urn:schemas-upnp-org:service:AVTransport:1#Play\""
        );
    }

    #[test]
    fn test_build_envelope() {
        let envelope = build_envelope(
            "urn:schemas-upnp-org:service:RenderingControl:1",
            "SetVolume",
            "<InstanceID>0</InstanceID><Channel>Master</Channel><DesiredVolume>50</DesiredVolume>",
        );

        assert_eq!(
            envelope,
            "<s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\" \
             s:encodingStyle=\"http://schemas.xmlsoap.org/soap/encoding/\"><s:Body>\
             <u:SetVolume xmlns:u=\"urn:schemas-upnp-org:service:RenderingControl:1\">\
             <InstanceID>0</InstanceID><Channel>Master</Channel><DesiredVolume>50</DesiredVolume>\
             </u:SetVolume></s:Body></s:Envelope>"
        );
    }

    #[test]
    fn test_envelope_is_well_formed() {
        let request = SoapRequest::new(
            "/DeviceProperties/Control",
            "urn:schemas-upnp-org:service:DeviceProperties:1",
            "SetLEDState",
            arg("DesiredLEDState", "On"),
        );

        let root = xmltree::Element::parse(request.envelope().as_bytes()).unwrap();
        let body = root.get_child("Body").unwrap();
        let action = body.get_child("SetLEDState").unwrap();
        assert_eq!(
            action.namespace.as_deref(),
            Some("urn:schemas-upnp-org:service:DeviceProperties:1")
        );
        assert_eq!(
            action.get_child("DesiredLEDState").and_then(|e| e.get_text()).as_deref(),
            Some("On")
        );
    }

    #[test]
    fn test_arg_escapes_reserved_characters() {
        assert_eq!(
            arg("CurrentURI", "http://host/a?b=1&c=<2>"),
            "<CurrentURI>http://host/a?b=1&amp;c=&lt;2&gt;</CurrentURI>"
        );
    }

    #[test]
    fn test_arg_formats_numbers() {
        assert_eq!(arg("DesiredBass", -4), "<DesiredBass>-4</DesiredBass>");
        assert_eq!(arg("InstanceID", 0u32), "<InstanceID>0</InstanceID>");
    }

    proptest! {
        #[test]
        fn prop_escaped_argument_survives_parsing(value in "[a-zA-Z0-9&<>\"'?=/:;#._%-]{0,64}") {
            let request = SoapRequest::new(
                "/MediaRenderer/AVTransport/Control",
                "urn:schemas-upnp-org:service:AVTransport:1",
                "SetAVTransportURI",
                arg("CurrentURI", &value),
            );

            let root = xmltree::Element::parse(request.envelope().as_bytes()).unwrap();
            let text = root
                .get_child("Body")
                .and_then(|body| body.get_child("SetAVTransportURI"))
                .and_then(|action| action.get_child("CurrentURI"))
                .and_then(|uri| uri.get_text())
                .map(|text| text.into_owned())
                .unwrap_or_default();
            prop_assert_eq!(text, value);
        }
    }
}

//! Classification of raw device responses
//!
//! A response body is one of three things: the envelope carrying the
//! expected `<Action>Response` element, a UPnP fault with a numeric
//! `errorCode`, or anything else. Matching is structural so whitespace,
//! attribute order and namespace prefixes do not change the outcome.

use tracing::warn;
use xmltree::{Element, XMLNode};

use crate::envelope::{SOAP_ENVELOPE_NS, UPNP_CONTROL_NS};
use crate::SoapError;

/// A successful action response
#[derive(Debug, Clone)]
pub struct SoapResponse {
    /// Body exactly as received
    pub raw: String,
    /// The `<Action>Response` element
    pub element: Element,
}

impl SoapResponse {
    /// Text of a direct child of the response element
    ///
    /// Empty elements yield `Some("")` so callers can tell them apart from
    /// missing ones.
    pub fn field(&self, name: &str) -> Option<String> {
        child(&self.element, name, None).map(text_of)
    }
}

/// Interpret a response body for `action` on the service `service_uri`.
pub fn interpret(raw: String, service_uri: &str, action: &str) -> Result<SoapResponse, SoapError> {
    let root = match Element::parse(raw.as_bytes()) {
        Ok(root) => root,
        Err(e) => {
            warn!(action, error = %e, "response body is not XML");
            return Err(SoapError::UnrecognizedResponse(raw));
        }
    };

    let expected = format!("{}Response", action);
    let matched = if is_element(&root, "Envelope", Some(SOAP_ENVELOPE_NS)) {
        child(&root, "Body", Some(SOAP_ENVELOPE_NS))
            .and_then(|body| child(body, &expected, Some(service_uri)))
            .cloned()
    } else {
        None
    };

    if let Some(element) = matched {
        return Ok(SoapResponse { raw, element });
    }

    match fault_code(&root) {
        Some(code) => {
            warn!(action, code, "device returned UPnP fault");
            Err(SoapError::Fault(code))
        }
        None => {
            warn!(action, "response matched neither {} nor a UPnP fault", expected);
            Err(SoapError::UnrecognizedResponse(raw))
        }
    }
}

/// Extract the numeric UPnP error code from a fault document
pub fn fault_code(root: &Element) -> Option<u16> {
    descendant(root, "errorCode", Some(UPNP_CONTROL_NS))
        .map(text_of)
        .and_then(|code| code.trim().parse().ok())
}

/// First direct child element matching `name` and, if given, `namespace`
pub fn child<'a>(element: &'a Element, name: &str, namespace: Option<&str>) -> Option<&'a Element> {
    element.children.iter().find_map(|node| match node {
        XMLNode::Element(e) if is_element(e, name, namespace) => Some(e),
        _ => None,
    })
}

/// Depth-first search for the first element matching `name` and, if given,
/// `namespace`. The starting element itself is included.
pub fn descendant<'a>(element: &'a Element, name: &str, namespace: Option<&str>) -> Option<&'a Element> {
    if is_element(element, name, namespace) {
        return Some(element);
    }
    element.children.iter().find_map(|node| match node {
        XMLNode::Element(e) => descendant(e, name, namespace),
        _ => None,
    })
}

/// Text content of an element, empty when it has none
pub fn text_of(element: &Element) -> String {
    element.get_text().map(|t| t.into_owned()).unwrap_or_default()
}

fn is_element(element: &Element, name: &str, namespace: Option<&str>) -> bool {
    element.name == name
        && namespace.map_or(true, |ns| element.namespace.as_deref() == Some(ns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const AV_TRANSPORT: &str = "urn:schemas-upnp-org:service:AVTransport:1";
    const RENDERING: &str = "urn:schemas-upnp-org:service:RenderingControl:1";

    fn success(action: &str, service: &str) -> String {
        format!(
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/"><s:Body><u:{action}Response xmlns:u="{service}"></u:{action}Response></s:Body></s:Envelope>"#
        )
    }

    fn fault(code: &str) -> String {
        format!(
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/"><s:Body><s:Fault><faultcode>s:Client</faultcode><faultstring>UPnPError</faultstring><detail><UPnPError xmlns="urn:schemas-upnp-org:control-1-0"><errorCode>{code}</errorCode></UPnPError></detail></s:Fault></s:Body></s:Envelope>"#
        )
    }

    #[rstest]
    #[case("Play")]
    #[case("Pause")]
    #[case("Stop")]
    #[case("Next")]
    #[case("Previous")]
    fn test_canonical_success_envelope(#[case] action: &str) {
        let response = interpret(success(action, AV_TRANSPORT), AV_TRANSPORT, action).unwrap();
        assert_eq!(response.element.name, format!("{}Response", action));
        assert_eq!(response.raw, success(action, AV_TRANSPORT));
    }

    #[test]
    fn test_success_tolerates_whitespace_and_prefixes() {
        let raw = r#"<?xml version="1.0"?>
            <soap:Envelope soap:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/"
                           xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
              <soap:Body>
                <m:PlayResponse xmlns:m="urn:schemas-upnp-org:service:AVTransport:1"/>
              </soap:Body>
            </soap:Envelope>"#;

        assert!(interpret(raw.to_string(), AV_TRANSPORT, "Play").is_ok());
    }

    #[test]
    fn test_response_for_other_action_is_not_success() {
        let raw = success("Pause", AV_TRANSPORT);
        let result = interpret(raw.clone(), AV_TRANSPORT, "Play");
        assert_eq!(result.unwrap_err(), SoapError::UnrecognizedResponse(raw));
    }

    #[test]
    fn test_response_in_wrong_namespace_is_not_success() {
        let raw = success("Play", RENDERING);
        let result = interpret(raw.clone(), AV_TRANSPORT, "Play");
        assert_eq!(result.unwrap_err(), SoapError::UnrecognizedResponse(raw));
    }

    #[rstest]
    #[case("701", 701)]
    #[case("402", 402)]
    #[case(" 714 ", 714)]
    fn test_fault_code_extracted(#[case] text: &str, #[case] expected: u16) {
        let result = interpret(fault(text), AV_TRANSPORT, "Next");
        assert_eq!(result.unwrap_err(), SoapError::Fault(expected));
    }

    #[test]
    fn test_fault_with_non_numeric_code_keeps_raw_body() {
        let raw = fault("oops");
        let result = interpret(raw.clone(), AV_TRANSPORT, "Next");
        assert_eq!(result.unwrap_err(), SoapError::UnrecognizedResponse(raw));
    }

    #[test]
    fn test_error_code_outside_control_namespace_is_ignored() {
        let raw = "<Envelope><errorCode>701</errorCode></Envelope>".to_string();
        let result = interpret(raw.clone(), AV_TRANSPORT, "Play");
        assert_eq!(result.unwrap_err(), SoapError::UnrecognizedResponse(raw));
    }

    #[rstest]
    #[case("")]
    #[case("Internal Server Error")]
    #[case("<html><body>busy</body></html>")]
    #[case("<s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\"><s:Body>")]
    fn test_unrecognized_body_preserved_exactly(#[case] raw: &str) {
        let result = interpret(raw.to_string(), AV_TRANSPORT, "Play");
        assert_eq!(
            result.unwrap_err(),
            SoapError::UnrecognizedResponse(raw.to_string())
        );
    }

    #[test]
    fn test_field_lookup() {
        let raw = format!(
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Body><u:GetVolumeResponse xmlns:u="{RENDERING}"><CurrentVolume>37</CurrentVolume><Empty></Empty></u:GetVolumeResponse></s:Body></s:Envelope>"#
        );
        let response = interpret(raw, RENDERING, "GetVolume").unwrap();

        assert_eq!(response.field("CurrentVolume").as_deref(), Some("37"));
        assert_eq!(response.field("Empty").as_deref(), Some(""));
        assert_eq!(response.field("Missing"), None);
    }

    #[test]
    fn test_descendant_search() {
        let root = Element::parse(fault("701").as_bytes()).unwrap();
        let code = descendant(&root, "errorCode", Some(UPNP_CONTROL_NS)).unwrap();
        assert_eq!(text_of(code), "701");
        assert!(descendant(&root, "errorCode", Some("urn:other")).is_none());
        assert!(descendant(&root, "faultstring", None).is_some());
    }
}

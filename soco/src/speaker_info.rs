use serde::Serialize;
use soap_client::response::{descendant, text_of};
use tracing::warn;
use xmltree::Element;

use crate::{ApiError, Result};

/// Path of the device status document
pub const STATUS_PATH: &str = "/status/zp";

/// Identity and firmware details of a speaker, read from `/status/zp`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpeakerInfo {
    pub zone_name: String,
    pub zone_icon: String,
    /// `RINCON_...` identifier, also used to address the speaker's line-in
    pub uid: String,
    pub serial_number: String,
    pub software_version: String,
    pub hardware_version: String,
    pub mac_address: String,
}

impl SpeakerInfo {
    /// Parse the status document; fields may appear at any depth
    pub fn from_xml(raw: &str) -> Result<Self> {
        let root = Element::parse(raw.as_bytes()).map_err(|e| {
            warn!(error = %e, "status document is not XML");
            ApiError::UnrecognizedResponse(raw.to_string())
        })?;

        let field = |name: &str| descendant(&root, name, None).map(text_of).unwrap_or_default();

        Ok(SpeakerInfo {
            zone_name: field("ZoneName"),
            zone_icon: field("ZoneIcon"),
            uid: field("LocalUID"),
            serial_number: field("SerialNumber"),
            software_version: field("SoftwareVersion"),
            hardware_version: field("HardwareVersion"),
            mac_address: field("MACAddress"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: &str = r#"<?xml version="1.0" ?>
<?xml-stylesheet type="text/xsl" href="/xml/review.xsl"?>
<ZPSupportInfo>
  <ZPInfo>
    <ZoneName>Living Room</ZoneName>
    <ZoneIcon>x-rincon-roomicon:living</ZoneIcon>
    <Configuration>1</Configuration>
    <LocalUID>RINCON_000E58A0B1C201400</LocalUID>
    <SerialNumber>00-0E-58-A0-B1-C2:8</SerialNumber>
    <SoftwareVersion>57.3-77280</SoftwareVersion>
    <HardwareVersion>1.20.1.6-2</HardwareVersion>
    <MACAddress>00:0E:58:A0:B1:C2</MACAddress>
  </ZPInfo>
</ZPSupportInfo>"#;

    #[test]
    fn test_parse_status_document() {
        let info = SpeakerInfo::from_xml(STATUS).unwrap();

        assert_eq!(info.zone_name, "Living Room");
        assert_eq!(info.zone_icon, "x-rincon-roomicon:living");
        assert_eq!(info.uid, "RINCON_000E58A0B1C201400");
        assert_eq!(info.serial_number, "00-0E-58-A0-B1-C2:8");
        assert_eq!(info.software_version, "57.3-77280");
        assert_eq!(info.hardware_version, "1.20.1.6-2");
        assert_eq!(info.mac_address, "00:0E:58:A0:B1:C2");
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let info = SpeakerInfo::from_xml("<ZPSupportInfo><ZoneName>Den</ZoneName></ZPSupportInfo>").unwrap();

        assert_eq!(info.zone_name, "Den");
        assert_eq!(info.uid, "");
        assert_eq!(info.mac_address, "");
    }

    #[test]
    fn test_non_xml_body() {
        let raw = "<html><body>Forbidden";
        assert_eq!(
            SpeakerInfo::from_xml(raw),
            Err(ApiError::UnrecognizedResponse(raw.to_string()))
        );
    }
}

//! RenderingControl service operations
//!
//! Volume, mute, loudness and the bass/treble equalizer of the `Master`
//! channel.

use soap_client::envelope::arg;

use crate::define_upnp_operation;
use crate::operation::{check_range, parse_field, ValidationError, Validate};

/// Volume bounds accepted by the player
pub const MIN_VOLUME: u8 = 0;
pub const MAX_VOLUME: u8 = 100;

/// Equalizer bounds for bass and treble
pub const MIN_EQ: i8 = -10;
pub const MAX_EQ: i8 = 10;

/// The only channel the speaker API addresses
pub const MASTER_CHANNEL: &str = "Master";

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

// =============================================================================
// MUTE AND LOUDNESS
// =============================================================================

define_upnp_operation! {
    operation: SetMuteOperation,
    action: "SetMute",
    service: RenderingControl,
    request: {
        instance_id: u32,
        channel: String,
        desired_mute: bool,
    },
    response: (),
    payload: |req| {
        [
            arg("InstanceID", req.instance_id),
            arg("Channel", &req.channel),
            arg("DesiredMute", flag(req.desired_mute)),
        ]
        .concat()
    },
    parse: |_response| Ok(()),
}

impl Validate for SetMuteOperationRequest {}

define_upnp_operation! {
    operation: SetLoudnessOperation,
    action: "SetLoudness",
    service: RenderingControl,
    request: {
        instance_id: u32,
        channel: String,
        desired_loudness: bool,
    },
    response: (),
    payload: |req| {
        [
            arg("InstanceID", req.instance_id),
            arg("Channel", &req.channel),
            arg("DesiredLoudness", flag(req.desired_loudness)),
        ]
        .concat()
    },
    parse: |_response| Ok(()),
}

impl Validate for SetLoudnessOperationRequest {}

// =============================================================================
// VOLUME
// =============================================================================

define_upnp_operation! {
    operation: GetVolumeOperation,
    action: "GetVolume",
    service: RenderingControl,
    request: {
        instance_id: u32,
        channel: String,
    },
    response: u8,
    payload: |req| [arg("InstanceID", req.instance_id), arg("Channel", &req.channel)].concat(),
    parse: |response| parse_field(response, "CurrentVolume"),
}

impl Validate for GetVolumeOperationRequest {}

define_upnp_operation! {
    operation: SetVolumeOperation,
    action: "SetVolume",
    service: RenderingControl,
    request: {
        instance_id: u32,
        channel: String,
        desired_volume: u8,
    },
    response: (),
    payload: |req| {
        [
            arg("InstanceID", req.instance_id),
            arg("Channel", &req.channel),
            arg("DesiredVolume", req.desired_volume),
        ]
        .concat()
    },
    parse: |_response| Ok(()),
}

impl Validate for SetVolumeOperationRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_range("desired_volume", self.desired_volume, MIN_VOLUME, MAX_VOLUME)
    }
}

// =============================================================================
// EQUALIZER
// =============================================================================

define_upnp_operation! {
    operation: GetBassOperation,
    action: "GetBass",
    service: RenderingControl,
    request: {
        instance_id: u32,
        channel: String,
    },
    response: i8,
    payload: |req| [arg("InstanceID", req.instance_id), arg("Channel", &req.channel)].concat(),
    parse: |response| parse_field(response, "CurrentBass"),
}

impl Validate for GetBassOperationRequest {}

define_upnp_operation! {
    operation: SetBassOperation,
    action: "SetBass",
    service: RenderingControl,
    request: {
        instance_id: u32,
        desired_bass: i8,
    },
    response: (),
    payload: |req| [arg("InstanceID", req.instance_id), arg("DesiredBass", req.desired_bass)].concat(),
    parse: |_response| Ok(()),
}

impl Validate for SetBassOperationRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_range("desired_bass", self.desired_bass, MIN_EQ, MAX_EQ)
    }
}

define_upnp_operation! {
    operation: GetTrebleOperation,
    action: "GetTreble",
    service: RenderingControl,
    request: {
        instance_id: u32,
        channel: String,
    },
    response: i8,
    payload: |req| [arg("InstanceID", req.instance_id), arg("Channel", &req.channel)].concat(),
    parse: |response| parse_field(response, "CurrentTreble"),
}

impl Validate for GetTrebleOperationRequest {}

define_upnp_operation! {
    operation: SetTrebleOperation,
    action: "SetTreble",
    service: RenderingControl,
    request: {
        instance_id: u32,
        desired_treble: i8,
    },
    response: (),
    payload: |req| [arg("InstanceID", req.instance_id), arg("DesiredTreble", req.desired_treble)].concat(),
    parse: |_response| Ok(()),
}

impl Validate for SetTrebleOperationRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_range("desired_treble", self.desired_treble, MIN_EQ, MAX_EQ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::operation::SonosOperation;
    use rstest::rstest;
    use soap_client::response::interpret;

    const RENDERING: &str = "urn:schemas-upnp-org:service:RenderingControl:1";

    fn response(action: &str, body: &str) -> soap_client::SoapResponse {
        let raw = format!(
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Body><u:{action}Response xmlns:u="{RENDERING}">{body}</u:{action}Response></s:Body></s:Envelope>"#
        );
        interpret(raw, RENDERING, action).unwrap()
    }

    #[test]
    fn test_set_mute_payload() {
        let request = SetMuteOperationRequest {
            instance_id: 0,
            channel: MASTER_CHANNEL.to_string(),
            desired_mute: true,
        };
        assert_eq!(
            SetMuteOperation::build_payload(&request).unwrap(),
            "<InstanceID>0</InstanceID><Channel>Master</Channel><DesiredMute>1</DesiredMute>"
        );
    }

    #[test]
    fn test_set_loudness_off_payload() {
        let request = SetLoudnessOperationRequest {
            instance_id: 0,
            channel: MASTER_CHANNEL.to_string(),
            desired_loudness: false,
        };
        assert!(SetLoudnessOperation::build_payload(&request)
            .unwrap()
            .ends_with("<DesiredLoudness>0</DesiredLoudness>"));
    }

    #[rstest]
    #[case(0)]
    #[case(50)]
    #[case(100)]
    fn test_set_volume_accepts_bounds(#[case] volume: u8) {
        let request = SetVolumeOperationRequest {
            instance_id: 0,
            channel: MASTER_CHANNEL.to_string(),
            desired_volume: volume,
        };
        let payload = SetVolumeOperation::build_payload(&request).unwrap();
        assert!(payload.contains(&format!("<DesiredVolume>{}</DesiredVolume>", volume)));
    }

    #[test]
    fn test_set_volume_rejects_out_of_range() {
        let request = SetVolumeOperationRequest {
            instance_id: 0,
            channel: MASTER_CHANNEL.to_string(),
            desired_volume: 101,
        };
        assert!(matches!(
            SetVolumeOperation::request(&request),
            Err(ValidationError::RangeError { .. })
        ));
    }

    #[rstest]
    #[case(-10, true)]
    #[case(0, true)]
    #[case(10, true)]
    #[case(-11, false)]
    #[case(11, false)]
    fn test_bass_and_treble_range(#[case] value: i8, #[case] accepted: bool) {
        let bass = SetBassOperationRequest { instance_id: 0, desired_bass: value };
        let treble = SetTrebleOperationRequest { instance_id: 0, desired_treble: value };

        assert_eq!(SetBassOperation::build_payload(&bass).is_ok(), accepted);
        assert_eq!(SetTrebleOperation::build_payload(&treble).is_ok(), accepted);
    }

    #[test]
    fn test_set_bass_payload_has_no_channel() {
        let request = SetBassOperationRequest { instance_id: 0, desired_bass: -4 };
        assert_eq!(
            SetBassOperation::build_payload(&request).unwrap(),
            "<InstanceID>0</InstanceID><DesiredBass>-4</DesiredBass>"
        );
    }

    #[test]
    fn test_parse_volume() {
        let volume = GetVolumeOperation::parse_response(&response(
            "GetVolume",
            "<CurrentVolume>37</CurrentVolume>",
        ))
        .unwrap();
        assert_eq!(volume, 37);
    }

    #[test]
    fn test_parse_negative_treble() {
        let treble = GetTrebleOperation::parse_response(&response(
            "GetTreble",
            "<CurrentTreble>-3</CurrentTreble>",
        ))
        .unwrap();
        assert_eq!(treble, -3);
    }

    #[test]
    fn test_parse_bass_missing_field() {
        let result = GetBassOperation::parse_response(&response("GetBass", ""));
        assert!(matches!(result, Err(ApiError::UnrecognizedResponse(_))));
    }
}

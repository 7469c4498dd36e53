//! AVTransport service operations
//!
//! Playback control, transport source selection and position queries.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use soap_client::envelope::arg;

use crate::define_upnp_operation;
use crate::operation::{check_range, text_field, ValidationError, Validate};

// =============================================================================
// BASIC PLAYBACK CONTROL
// =============================================================================

define_upnp_operation! {
    /// Start or resume playback of the current source
    operation: PlayOperation,
    action: "Play",
    service: AVTransport,
    request: {
        instance_id: u32,
        speed: String,
    },
    response: (),
    payload: |req| [arg("InstanceID", req.instance_id), arg("Speed", &req.speed)].concat(),
    parse: |_response| Ok(()),
}

/// Transport requests all carry a play speed; the player expects `1`
fn validate_speed(speed: &str) -> Result<(), ValidationError> {
    if speed.trim().is_empty() {
        return Err(ValidationError::invalid_value("speed", speed, "speed must not be empty"));
    }
    Ok(())
}

impl Validate for PlayOperationRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_speed(&self.speed)
    }
}

define_upnp_operation! {
    operation: PauseOperation,
    action: "Pause",
    service: AVTransport,
    request: {
        instance_id: u32,
        speed: String,
    },
    response: (),
    payload: |req| [arg("InstanceID", req.instance_id), arg("Speed", &req.speed)].concat(),
    parse: |_response| Ok(()),
}

impl Validate for PauseOperationRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_speed(&self.speed)
    }
}

define_upnp_operation! {
    operation: StopOperation,
    action: "Stop",
    service: AVTransport,
    request: {
        instance_id: u32,
        speed: String,
    },
    response: (),
    payload: |req| [arg("InstanceID", req.instance_id), arg("Speed", &req.speed)].concat(),
    parse: |_response| Ok(()),
}

impl Validate for StopOperationRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_speed(&self.speed)
    }
}

define_upnp_operation! {
    /// Skip to the next track; sources with skip limits answer with a fault
    operation: NextOperation,
    action: "Next",
    service: AVTransport,
    request: {
        instance_id: u32,
        speed: String,
    },
    response: (),
    payload: |req| [arg("InstanceID", req.instance_id), arg("Speed", &req.speed)].concat(),
    parse: |_response| Ok(()),
}

impl Validate for NextOperationRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_speed(&self.speed)
    }
}

define_upnp_operation! {
    /// Go back one track; radio-style sources answer with fault 701
    operation: PreviousOperation,
    action: "Previous",
    service: AVTransport,
    request: {
        instance_id: u32,
        speed: String,
    },
    response: (),
    payload: |req| [arg("InstanceID", req.instance_id), arg("Speed", &req.speed)].concat(),
    parse: |_response| Ok(()),
}

impl Validate for PreviousOperationRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_speed(&self.speed)
    }
}

// =============================================================================
// TRANSPORT SOURCE
// =============================================================================

define_upnp_operation! {
    /// Replace the transport source with a single URI
    operation: SetAVTransportURIOperation,
    action: "SetAVTransportURI",
    service: AVTransport,
    request: {
        instance_id: u32,
        current_uri: String,
        current_uri_meta_data: String,
    },
    response: (),
    payload: |req| {
        [
            arg("InstanceID", req.instance_id),
            arg("CurrentURI", &req.current_uri),
            arg("CurrentURIMetaData", &req.current_uri_meta_data),
        ]
        .concat()
    },
    parse: |_response| Ok(()),
}

impl Validate for SetAVTransportURIOperationRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.current_uri.is_empty() {
            return Err(ValidationError::invalid_value("current_uri", "", "URI must not be empty"));
        }
        Ok(())
    }
}

/// URI that selects a player's own line-in as transport source
pub fn line_in_uri(uid: &str) -> String {
    format!("x-rincon-stream:{}", uid)
}

define_upnp_operation! {
    /// Start playing a saved queue, optionally at a given volume
    operation: StartAutoplayOperation,
    action: "StartAutoplay",
    service: AVTransport,
    request: {
        instance_id: u32,
        program_uri: String,
        program_meta_data: String,
        volume: u8,
        include_linked_zones: bool,
        reset_volume_after: bool,
    },
    response: (),
    payload: |req| {
        [
            arg("InstanceID", req.instance_id),
            arg("ProgramURI", &req.program_uri),
            arg("ProgramMetaData", &req.program_meta_data),
            arg("Volume", req.volume),
            arg("IncludeLinkedZones", flag(req.include_linked_zones)),
            arg("ResetVolumeAfter", flag(req.reset_volume_after)),
        ]
        .concat()
    },
    parse: |_response| Ok(()),
}

impl Validate for StartAutoplayOperationRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_range("volume", self.volume, 0, 100)
    }
}

impl StartAutoplayOperationRequest {
    /// Request that starts the saved queue at `index`
    pub fn saved_queue(index: u32, volume: u8) -> Self {
        Self {
            instance_id: 0,
            program_uri: format!("file:///jffs/settings/savedqueues.rsq#{}", index),
            program_meta_data: format!(
                concat!(
                    r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/" "#,
                    r#"xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/" "#,
                    r#"xmlns:r="urn:schemas-rinconnetworks-com:metadata-1-0/" "#,
                    r#"xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/">"#,
                    r#"<item id="SQ:{}" parentID="SQ:" restricted="true">"#,
                    r#"<upnp:class>object.container.playlistContainer</upnp:class>"#,
                    r#"</item></DIDL-Lite>"#
                ),
                index
            ),
            volume,
            include_linked_zones: false,
            reset_volume_after: true,
        }
    }
}

// =============================================================================
// PLAY MODE
// =============================================================================

/// Repeat/shuffle setting of the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayMode {
    Normal,
    RepeatAll,
    RepeatOne,
    #[serde(rename = "SHUFFLE_NOREPEAT")]
    ShuffleNoRepeat,
    Shuffle,
    ShuffleRepeatOne,
}

impl PlayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayMode::Normal => "NORMAL",
            PlayMode::RepeatAll => "REPEAT_ALL",
            PlayMode::RepeatOne => "REPEAT_ONE",
            PlayMode::ShuffleNoRepeat => "SHUFFLE_NOREPEAT",
            PlayMode::Shuffle => "SHUFFLE",
            PlayMode::ShuffleRepeatOne => "SHUFFLE_REPEAT_ONE",
        }
    }
}

impl fmt::Display for PlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NORMAL" => Ok(PlayMode::Normal),
            "REPEAT_ALL" => Ok(PlayMode::RepeatAll),
            "REPEAT_ONE" => Ok(PlayMode::RepeatOne),
            "SHUFFLE_NOREPEAT" => Ok(PlayMode::ShuffleNoRepeat),
            "SHUFFLE" => Ok(PlayMode::Shuffle),
            "SHUFFLE_REPEAT_ONE" => Ok(PlayMode::ShuffleRepeatOne),
            _ => Err(ValidationError::invalid_value(
                "play_mode",
                s,
                "expected NORMAL, REPEAT_ALL, REPEAT_ONE, SHUFFLE_NOREPEAT, SHUFFLE or SHUFFLE_REPEAT_ONE",
            )),
        }
    }
}

define_upnp_operation! {
    operation: SetPlayModeOperation,
    action: "SetPlayMode",
    service: AVTransport,
    request: {
        instance_id: u32,
        new_play_mode: PlayMode,
    },
    response: (),
    payload: |req| [arg("InstanceID", req.instance_id), arg("NewPlayMode", req.new_play_mode)].concat(),
    parse: |_response| Ok(()),
}

impl Validate for SetPlayModeOperationRequest {}

// =============================================================================
// POSITION INFO
// =============================================================================

/// Raw fields of a `GetPositionInfo` answer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPositionInfoResponse {
    /// Position in the queue, as reported
    pub track: String,
    pub track_duration: String,
    /// DIDL-Lite document, already unescaped once
    pub track_meta_data: String,
    pub track_uri: String,
    pub rel_time: String,
}

define_upnp_operation! {
    operation: GetPositionInfoOperation,
    action: "GetPositionInfo",
    service: AVTransport,
    request: {
        instance_id: u32,
        channel: String,
    },
    response: GetPositionInfoResponse,
    payload: |req| [arg("InstanceID", req.instance_id), arg("Channel", &req.channel)].concat(),
    parse: |response| {
        Ok(GetPositionInfoResponse {
            track: text_field(response, "Track"),
            track_duration: text_field(response, "TrackDuration"),
            track_meta_data: text_field(response, "TrackMetaData"),
            track_uri: text_field(response, "TrackURI"),
            rel_time: text_field(response, "RelTime"),
        })
    },
}

impl Validate for GetPositionInfoOperationRequest {}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

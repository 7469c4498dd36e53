//! High-level control of a single speaker
//!
//! [`SonosSpeaker`] binds a [`SonosClient`] to one host and exposes each
//! supported action as a method. The only state it keeps is the cached
//! [`SpeakerInfo`].

use parking_lot::Mutex;
use soap_client::SoapConfig;
use tracing::debug;

use crate::operations::av_transport::{
    line_in_uri, GetPositionInfoOperationRequest, NextOperationRequest, PauseOperationRequest,
    PlayOperationRequest, PreviousOperationRequest, SetAVTransportURIOperationRequest,
    SetPlayModeOperationRequest, StartAutoplayOperationRequest, StopOperationRequest,
};
use crate::operations::device_properties::SetLEDStateOperationRequest;
use crate::operations::rendering_control::{
    GetBassOperationRequest, GetTrebleOperationRequest, GetVolumeOperationRequest,
    SetBassOperationRequest, SetLoudnessOperationRequest, SetMuteOperationRequest,
    SetTrebleOperationRequest, SetVolumeOperationRequest, MASTER_CHANNEL,
};
use crate::operations::*;
use crate::speaker_info::{SpeakerInfo, STATUS_PATH};
use crate::track_info::TrackInfo;
use crate::{ApiError, Result, SonosClient, SonosOperation};

const INSTANCE_ID: u32 = 0;
const NORMAL_SPEED: &str = "1";

/// A Sonos speaker reachable at a fixed host
///
/// All methods block for one HTTP round trip (two for [`play_uri`]).
/// The type is `Send + Sync`; share it behind an `Arc` to use it from
/// several threads.
///
/// [`play_uri`]: SonosSpeaker::play_uri
#[derive(Debug)]
pub struct SonosSpeaker {
    host: String,
    client: SonosClient,
    speaker_info: Mutex<Option<SpeakerInfo>>,
}

impl SonosSpeaker {
    /// Speaker at `host` on the default port and timeouts
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_client(host, SonosClient::new())
    }

    pub fn with_config(host: impl Into<String>, config: SoapConfig) -> Self {
        Self::with_client(host, SonosClient::with_config(config))
    }

    pub fn with_client(host: impl Into<String>, client: SonosClient) -> Self {
        Self {
            host: host.into(),
            client,
            speaker_info: Mutex::new(None),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// `http://<host>:<port>` of this speaker
    pub fn base_url(&self) -> String {
        self.client.base_url(&self.host)
    }

    fn execute<Op: SonosOperation>(&self, request: &Op::Request) -> Result<Op::Response> {
        self.client.execute::<Op>(&self.host, request)
    }

    // =========================================================================
    // TRANSPORT
    // =========================================================================

    /// Start or resume playback of the current source
    pub fn play(&self) -> Result<()> {
        self.execute::<PlayOperation>(&PlayOperationRequest {
            instance_id: INSTANCE_ID,
            speed: NORMAL_SPEED.to_string(),
        })
    }

    /// Play `uri`, replacing the current source
    ///
    /// An empty `uri` just resumes playback. Otherwise the transport URI is
    /// set first and `Play` is only sent if that succeeded.
    pub fn play_uri(&self, uri: &str) -> Result<()> {
        if !uri.is_empty() {
            self.set_av_transport_uri(uri)?;
        }
        self.play()
    }

    pub fn pause(&self) -> Result<()> {
        self.execute::<PauseOperation>(&PauseOperationRequest {
            instance_id: INSTANCE_ID,
            speed: NORMAL_SPEED.to_string(),
        })
    }

    pub fn stop(&self) -> Result<()> {
        self.execute::<StopOperation>(&StopOperationRequest {
            instance_id: INSTANCE_ID,
            speed: NORMAL_SPEED.to_string(),
        })
    }

    /// Skip to the next track
    ///
    /// Sources that do not allow skipping answer with fault 701.
    pub fn next(&self) -> Result<()> {
        self.execute::<NextOperation>(&NextOperationRequest {
            instance_id: INSTANCE_ID,
            speed: NORMAL_SPEED.to_string(),
        })
    }

    pub fn previous(&self) -> Result<()> {
        self.execute::<PreviousOperation>(&PreviousOperationRequest {
            instance_id: INSTANCE_ID,
            speed: NORMAL_SPEED.to_string(),
        })
    }

    fn set_av_transport_uri(&self, uri: &str) -> Result<()> {
        self.execute::<SetAVTransportURIOperation>(&SetAVTransportURIOperationRequest {
            instance_id: INSTANCE_ID,
            current_uri: uri.to_string(),
            current_uri_meta_data: String::new(),
        })
    }

    /// Switch the speaker to its own analog line-in
    pub fn switch_to_line_in(&self) -> Result<()> {
        let info = self.get_speaker_info(false)?;
        if info.uid.is_empty() {
            return Err(ApiError::InvalidParameter(
                "speaker did not report a LocalUID; cannot address its line-in".to_string(),
            ));
        }
        self.set_av_transport_uri(&line_in_uri(&info.uid))
    }

    /// Start the saved queue at `index`, setting the volume to `volume`
    pub fn start_saved_queue(&self, index: u32, volume: u8) -> Result<()> {
        self.execute::<StartAutoplayOperation>(&StartAutoplayOperationRequest::saved_queue(index, volume))
    }

    pub fn set_play_mode(&self, mode: PlayMode) -> Result<()> {
        self.execute::<SetPlayModeOperation>(&SetPlayModeOperationRequest {
            instance_id: INSTANCE_ID,
            new_play_mode: mode,
        })
    }

    /// The track currently loaded, with its DIDL-Lite metadata decoded
    pub fn get_current_track_info(&self) -> Result<TrackInfo> {
        let position = self.execute::<GetPositionInfoOperation>(&GetPositionInfoOperationRequest {
            instance_id: INSTANCE_ID,
            channel: MASTER_CHANNEL.to_string(),
        })?;
        Ok(TrackInfo::from_position_info(&position, &self.base_url()))
    }

    // =========================================================================
    // RENDERING
    // =========================================================================

    pub fn mute(&self, mute: bool) -> Result<()> {
        self.execute::<SetMuteOperation>(&SetMuteOperationRequest {
            instance_id: INSTANCE_ID,
            channel: MASTER_CHANNEL.to_string(),
            desired_mute: mute,
        })
    }

    /// Get the volume with `None`, set it with `Some(0..=100)`
    ///
    /// Returns the current volume when reading and `None` after a write.
    pub fn volume(&self, volume: Option<u8>) -> Result<Option<u8>> {
        match volume {
            Some(volume) => self.set_volume(volume).map(|_| None),
            None => self.get_volume().map(Some),
        }
    }

    pub fn get_volume(&self) -> Result<u8> {
        self.execute::<GetVolumeOperation>(&GetVolumeOperationRequest {
            instance_id: INSTANCE_ID,
            channel: MASTER_CHANNEL.to_string(),
        })
    }

    pub fn set_volume(&self, volume: u8) -> Result<()> {
        self.execute::<SetVolumeOperation>(&SetVolumeOperationRequest {
            instance_id: INSTANCE_ID,
            channel: MASTER_CHANNEL.to_string(),
            desired_volume: volume,
        })
    }

    /// Get the bass level with `None`, set it with `Some(-10..=10)`
    pub fn bass(&self, bass: Option<i8>) -> Result<Option<i8>> {
        match bass {
            Some(bass) => self.set_bass(bass).map(|_| None),
            None => self.get_bass().map(Some),
        }
    }

    pub fn get_bass(&self) -> Result<i8> {
        self.execute::<GetBassOperation>(&GetBassOperationRequest {
            instance_id: INSTANCE_ID,
            channel: MASTER_CHANNEL.to_string(),
        })
    }

    pub fn set_bass(&self, bass: i8) -> Result<()> {
        self.execute::<SetBassOperation>(&SetBassOperationRequest {
            instance_id: INSTANCE_ID,
            desired_bass: bass,
        })
    }

    /// Get the treble level with `None`, set it with `Some(-10..=10)`
    pub fn treble(&self, treble: Option<i8>) -> Result<Option<i8>> {
        match treble {
            Some(treble) => self.set_treble(treble).map(|_| None),
            None => self.get_treble().map(Some),
        }
    }

    pub fn get_treble(&self) -> Result<i8> {
        self.execute::<GetTrebleOperation>(&GetTrebleOperationRequest {
            instance_id: INSTANCE_ID,
            channel: MASTER_CHANNEL.to_string(),
        })
    }

    pub fn set_treble(&self, treble: i8) -> Result<()> {
        self.execute::<SetTrebleOperation>(&SetTrebleOperationRequest {
            instance_id: INSTANCE_ID,
            desired_treble: treble,
        })
    }

    pub fn set_loudness(&self, loudness: bool) -> Result<()> {
        self.execute::<SetLoudnessOperation>(&SetLoudnessOperationRequest {
            instance_id: INSTANCE_ID,
            channel: MASTER_CHANNEL.to_string(),
            desired_loudness: loudness,
        })
    }

    /// Switch the white status light on or off
    pub fn status_light(&self, on: bool) -> Result<()> {
        self.execute::<SetLEDStateOperation>(&SetLEDStateOperationRequest {
            desired_led_state: on,
        })
    }

    // =========================================================================
    // SPEAKER INFO
    // =========================================================================

    /// Identity of the speaker, fetched once and cached
    ///
    /// With `refresh` the status document is fetched again. A failed fetch
    /// returns the error and leaves any cached value untouched.
    pub fn get_speaker_info(&self, refresh: bool) -> Result<SpeakerInfo> {
        let mut cached = self.speaker_info.lock();

        if let Some(info) = cached.as_ref().filter(|_| !refresh) {
            return Ok(info.clone());
        }

        debug!(host = %self.host, refresh, "fetching speaker info");
        let raw = self.client.get_document(&self.host, STATUS_PATH)?;
        let info = SpeakerInfo::from_xml(&raw)?;

        *cached = Some(info.clone());
        Ok(info)
    }

    /// Cached speaker info without touching the network
    pub fn cached_speaker_info(&self) -> Option<SpeakerInfo> {
        self.speaker_info.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_speaker_is_send_and_sync() {
        assert_send_sync::<SonosSpeaker>();
    }

    #[test]
    fn test_new_speaker_has_empty_cache() {
        let speaker = SonosSpeaker::new("192.168.1.20");
        assert_eq!(speaker.host(), "192.168.1.20");
        assert_eq!(speaker.base_url(), "http://192.168.1.20:1400");
        assert!(speaker.cached_speaker_info().is_none());
    }

    #[test]
    fn test_out_of_range_values_are_rejected_locally() {
        // Port 9 (discard) on a TEST-NET address; validation fails first.
        let speaker = SonosSpeaker::with_config("192.0.2.1", SoapConfig::new().with_port(9));

        assert!(matches!(speaker.set_volume(101), Err(ApiError::InvalidParameter(_))));
        assert!(matches!(speaker.bass(Some(11)), Err(ApiError::InvalidParameter(_))));
        assert!(matches!(speaker.treble(Some(-11)), Err(ApiError::InvalidParameter(_))));
        assert!(matches!(speaker.start_saved_queue(0, 200), Err(ApiError::InvalidParameter(_))));
    }
}

//! Decoding of the currently playing track
//!
//! `GetPositionInfo` returns the track's DIDL-Lite metadata as an escaped
//! string inside the SOAP response. The SOAP parser unescapes it once; the
//! result is then parsed a second time as its own XML document.

use serde::Serialize;
use soap_client::response::{descendant, text_of};
use tracing::warn;
use xmltree::Element;

use crate::operations::GetPositionInfoResponse;

/// Dublin Core namespace used for title and creator
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

/// UPnP metadata namespace used for album and album art
pub const UPNP_NS: &str = "urn:schemas-upnp-org:metadata-1-0/upnp/";

/// Value the player reports for sources that carry no metadata (line-in, TV)
const NOT_IMPLEMENTED: &str = "NOT_IMPLEMENTED";

/// The track currently loaded on a speaker
///
/// Every field is a plain string; anything the speaker did not report is
/// empty rather than absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackInfo {
    pub playlist_position: String,
    pub duration: String,
    pub uri: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_art: String,
}

impl TrackInfo {
    /// Build track info from a position-info answer
    ///
    /// `base_url` is `http://<host>:<port>` of the speaker and is used to
    /// make relative album art URIs absolute.
    pub fn from_position_info(position: &GetPositionInfoResponse, base_url: &str) -> Self {
        let mut info = TrackInfo {
            playlist_position: position.track.clone(),
            duration: position.track_duration.clone(),
            uri: position.track_uri.clone(),
            ..Default::default()
        };

        let metadata = position.track_meta_data.trim();
        if metadata.is_empty() || metadata == NOT_IMPLEMENTED {
            return info;
        }

        match Element::parse(metadata.as_bytes()) {
            Ok(didl) => {
                info.title = didl_field(&didl, "title", DC_NS);
                info.artist = didl_field(&didl, "creator", DC_NS);
                info.album = didl_field(&didl, "album", UPNP_NS);

                let art = didl_field(&didl, "albumArtURI", UPNP_NS);
                info.album_art = absolute_album_art(&art, base_url);
            }
            Err(e) => {
                warn!(error = %e, uri = %info.uri, "track metadata is not valid DIDL-Lite");
            }
        }

        info
    }
}

fn didl_field(didl: &Element, name: &str, namespace: &str) -> String {
    descendant(didl, name, Some(namespace))
        .map(text_of)
        .unwrap_or_default()
}

/// Album art is usually a path on the speaker; absolute URLs pass through
fn absolute_album_art(art: &str, base_url: &str) -> String {
    let art = art.trim();
    if art.is_empty() || art.starts_with("http://") || art.starts_with("https://") {
        return art.to_string();
    }
    if art.starts_with('/') {
        format!("{}{}", base_url, art)
    } else {
        format!("{}/{}", base_url, art)
    }
}

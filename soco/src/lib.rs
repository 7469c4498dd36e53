//! Control a single Sonos speaker over UPnP/SOAP
//!
//! This crate provides a typed, blocking API for the control endpoints a
//! Sonos player exposes on port 1400. It uses the private `soap-client`
//! crate for envelope construction and the HTTP exchange.
//!
//! ```rust,no_run
//! use soco::SonosSpeaker;
//!
//! let speaker = SonosSpeaker::new("192.168.1.100");
//! speaker.play_uri("x-rincon-mp3radio://streams.example.com/jazz")?;
//! speaker.volume(Some(25))?;
//!
//! let track = speaker.get_current_track_info()?;
//! println!("{} - {}", track.artist, track.title);
//! # Ok::<(), soco::ApiError>(())
//! ```
//!
//! Lower-level access is available through [`SonosClient::execute`] and the
//! operation types in [`operations`].

pub mod client;
pub mod error;
pub mod operation;
pub mod operations;
pub mod service;
pub mod speaker;
pub mod speaker_info;
pub mod track_info;

pub use client::SonosClient;
pub use error::{ApiError, Result};
pub use operation::{SonosOperation, Validate, ValidationError};
pub use operations::PlayMode;
pub use service::{Service, ServiceInfo};
pub use soap_client::SoapConfig;
pub use speaker::SonosSpeaker;
pub use speaker_info::SpeakerInfo;
pub use track_info::TrackInfo;

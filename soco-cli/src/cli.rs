//! Argument parsing and command dispatch

use std::fmt;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use soco::{PlayMode, SonosSpeaker, SpeakerInfo, TrackInfo};

/// Control a Sonos speaker from the command line
#[derive(Parser, Debug)]
#[command(name = "soco")]
#[command(about = "Control a single Sonos speaker over its local UPnP interface")]
#[command(version)]
pub struct Args {
    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Control port of the speaker (defaults to SOCO_PORT or 1400)
    #[arg(long)]
    pub port: Option<u16>,

    /// Log level (error, warn, info, debug, trace); SOCO_LOG_LEVEL takes precedence
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// IP address or host name of the speaker
    pub host: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Validate command line arguments
    pub fn validate(&self) -> Result<()> {
        if self.port == Some(0) {
            return Err(anyhow!("Port must not be 0"));
        }

        match self.log_level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            _ => Err(anyhow!(
                "Invalid log level '{}'. Valid levels: error, warn, info, debug, trace",
                self.log_level
            )),
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Resume playback, or play URI if given
    Play { uri: Option<String> },
    Pause,
    Stop,
    Next,
    Previous,
    /// Show the volume, or set it (0-100)
    Volume { level: Option<u8> },
    /// Show the bass level, or set it (-10..10)
    Bass {
        #[arg(allow_negative_numbers = true)]
        level: Option<i8>,
    },
    /// Show the treble level, or set it (-10..10)
    Treble {
        #[arg(allow_negative_numbers = true)]
        level: Option<i8>,
    },
    Mute { state: Switch },
    Loudness { state: Switch },
    /// Switch the white status light
    StatusLight { state: Switch },
    /// Play the speaker's own line-in
    LineIn,
    /// Show the current track
    Info,
    /// Show the speaker's identity and firmware
    ///
    /// A single invocation always fetches, since the cache starts empty in a
    /// new process. `--refresh` only changes anything when `run` is called
    /// repeatedly on the same speaker.
    SpeakerInfo {
        /// Bypass the speaker-info cache
        #[arg(long)]
        refresh: bool,
    },
    /// Start a saved queue
    StartPlaylist {
        #[arg(default_value_t = 0)]
        index: u32,
        #[arg(default_value_t = 8)]
        volume: u8,
    },
    SetPlaymode {
        #[arg(default_value = "REPEAT_ALL")]
        mode: PlayMode,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Play { .. } => "play",
            Command::Pause => "pause",
            Command::Stop => "stop",
            Command::Next => "next",
            Command::Previous => "previous",
            Command::Volume { .. } => "volume",
            Command::Bass { .. } => "bass",
            Command::Treble { .. } => "treble",
            Command::Mute { .. } => "mute",
            Command::Loudness { .. } => "loudness",
            Command::StatusLight { .. } => "status-light",
            Command::LineIn => "line-in",
            Command::Info => "info",
            Command::SpeakerInfo { .. } => "speaker-info",
            Command::StartPlaylist { .. } => "start-playlist",
            Command::SetPlaymode { .. } => "set-playmode",
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    fn is_on(self) -> bool {
        self == Switch::On
    }
}

/// Result of a command, printable as text or JSON
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Done,
    Level { name: &'static str, value: i16 },
    Track(TrackInfo),
    Speaker(SpeakerInfo),
}

impl Output {
    pub fn to_json(&self) -> Value {
        match self {
            Output::Done => json!({ "status": "ok" }),
            Output::Level { name, value } => {
                let mut map = serde_json::Map::new();
                map.insert(name.to_string(), json!(value));
                Value::Object(map)
            }
            Output::Track(track) => json!(track),
            Output::Speaker(info) => json!(info),
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Done => write!(f, "OK"),
            Output::Level { value, .. } => write!(f, "{}", value),
            Output::Track(track) => {
                writeln!(f, "Title:    {}", track.title)?;
                writeln!(f, "Artist:   {}", track.artist)?;
                writeln!(f, "Album:    {}", track.album)?;
                writeln!(f, "Position: {}", track.playlist_position)?;
                writeln!(f, "Duration: {}", track.duration)?;
                writeln!(f, "URI:      {}", track.uri)?;
                write!(f, "Art:      {}", track.album_art)
            }
            Output::Speaker(info) => {
                writeln!(f, "Zone:     {}", info.zone_name)?;
                writeln!(f, "Icon:     {}", info.zone_icon)?;
                writeln!(f, "UID:      {}", info.uid)?;
                writeln!(f, "Serial:   {}", info.serial_number)?;
                writeln!(f, "Software: {}", info.software_version)?;
                writeln!(f, "Hardware: {}", info.hardware_version)?;
                write!(f, "MAC:      {}", info.mac_address)
            }
        }
    }
}

fn level(name: &'static str, value: Option<impl Into<i16>>) -> Output {
    match value {
        Some(value) => Output::Level { name, value: value.into() },
        None => Output::Done,
    }
}

/// Run one command against the speaker
pub fn run(speaker: &SonosSpeaker, command: &Command) -> soco::Result<Output> {
    let output = match command {
        Command::Play { uri } => {
            speaker.play_uri(uri.as_deref().unwrap_or_default())?;
            Output::Done
        }
        Command::Pause => speaker.pause().map(|_| Output::Done)?,
        Command::Stop => speaker.stop().map(|_| Output::Done)?,
        Command::Next => speaker.next().map(|_| Output::Done)?,
        Command::Previous => speaker.previous().map(|_| Output::Done)?,
        Command::Volume { level: value } => level("volume", speaker.volume(*value)?),
        Command::Bass { level: value } => level("bass", speaker.bass(*value)?),
        Command::Treble { level: value } => level("treble", speaker.treble(*value)?),
        Command::Mute { state } => speaker.mute(state.is_on()).map(|_| Output::Done)?,
        Command::Loudness { state } => speaker.set_loudness(state.is_on()).map(|_| Output::Done)?,
        Command::StatusLight { state } => speaker.status_light(state.is_on()).map(|_| Output::Done)?,
        Command::LineIn => speaker.switch_to_line_in().map(|_| Output::Done)?,
        Command::Info => Output::Track(speaker.get_current_track_info()?),
        Command::SpeakerInfo { refresh } => Output::Speaker(speaker.get_speaker_info(*refresh)?),
        Command::StartPlaylist { index, volume } => {
            speaker.start_saved_queue(*index, *volume).map(|_| Output::Done)?
        }
        Command::SetPlaymode { mode } => speaker.set_play_mode(*mode).map(|_| Output::Done)?,
    };
    Ok(output)
}

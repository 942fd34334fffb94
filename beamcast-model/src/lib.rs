//! Shared data models for the Beamcast playback controller.
//!
//! Everything in this crate is plain data: playback and cast session
//! states, the command vocabulary the router emits, normalized player
//! events, ad marker bookkeeping and the numeric helpers the timeline
//! math is built on. No I/O happens here.

pub mod command;
pub mod config;
pub mod events;
pub mod markers;
pub mod media;
pub mod metrics;
pub mod numbers;
pub mod session;
pub mod state;
pub mod tracks;

pub use command::{InitParams, PlaybackCommand};
pub use config::{BeaconFailover, BufferHints, ExternalSource, PlaybackMode, PlayerConfig};
pub use events::{PlayerEvent, StateCode};
pub use markers::{AdBreak, AdMarkerSet};
pub use media::{BufferLengths, ProgramInfo, SeekableRange};
pub use metrics::{LogLevel, MetricsUpdate, PlayerControl};
pub use numbers::{fixed_to, InvalidNumber};
pub use session::CastSessionState;
pub use state::PlaybackState;
pub use tracks::{AudioTrack, SubtitleTrack, VideoQuality};

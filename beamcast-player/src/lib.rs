//! Dual-target playback routing.
//!
//! This crate is the controller behind a streaming player UI that can
//! render either locally through the media SDK or remotely on a cast
//! receiver. One router accepts every UI intent, decides per intent
//! which target is authoritative, converts seekbar positions through
//! the ad-aware timeline math, and keeps a small playback state
//! machine in sync with events coming back from whichever target is
//! playing.
//!
//! The UI layer, the media SDK and the cast transport are all injected
//! behind traits; nothing in here touches a screen or a network
//! socket directly.

pub mod cast;
pub mod constants;
pub mod error;
pub mod intent;
pub mod router;
pub mod session;
pub mod state_machine;
pub mod timeline;
pub mod traits;

pub use cast::CastSessionBridge;
pub use error::PlayerError;
pub use intent::UiIntent;
pub use router::PlaybackRouter;
pub use session::SessionContext;
pub use state_machine::{PlaybackStateMachine, TransitionError};
pub use traits::{CastTransport, LocalPlayer, LocalPlayerFactory, UiAdapter};

//! Lantern Stage - composition layer for one browsing session
//!
//! Mounts every motion component over a shared scheduler, feeds inbound
//! pointer/scroll/resize events through the event bus in arrival order,
//! drives the frame loop and tears everything down synchronously.

mod snapshot;
mod stage;

pub use snapshot::{CardTilt, FrameSnapshot, RevealSnapshot, Resources};
pub use stage::{RevealCandidate, Stage};

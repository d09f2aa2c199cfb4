//! Face capture guidance library.
//!
//! Consumes detection-service output for one video frame at a time and
//! drives a per-session state machine through a two-pose capture ritual
//! (frontal photo, then right-turn profile), producing short textual
//! instructions for the user.

pub mod detection;
pub mod guidance;

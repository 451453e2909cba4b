//! Typed messages exchanged between systems.
//!
//! - `audio` – commands for the audio thread
//! - `input` – decoded window input
//! - `timer` – gremlin timer fires
pub mod audio;
pub mod input;
pub mod timer;

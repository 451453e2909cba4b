//! Gremlin systems and input adapters.
//!
//! Submodules overview
//! - [`animation`] – master tick: advance the frame, complete states, walk
//! - [`audio`] – sound requests and the audio thread
//! - [`gremlin`] – borrowed view of the gremlin shared by handlers
//! - [`hotspot`], [`hover`], [`keyboard`], [`mouse`] – input adapters
//! - [`input`] – poll raylib input and dispatch it to the adapters
//! - [`render`] – draw the current frame
//! - [`time`] – update simulation time and delta
//! - [`timers`] – advance the gremlin timers and handle their fires
//! - [`window`] – apply window placement to raylib

pub mod animation;
pub mod audio;
pub mod gremlin;
pub mod hotspot;
pub mod hover;
pub mod input;
pub mod keyboard;
pub mod mouse;
pub mod render;
pub mod time;
pub mod timers;
pub mod window;

//! Desktop gremlin library.
//!
//! Exposes the gremlin's ECS resources, systems and messages for the binary
//! and for integration tests.

pub mod events;
pub mod game;
pub mod resources;
pub mod systems;

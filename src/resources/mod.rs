//! ECS resources made available to systems.
//!
//! Overview
//! - `audio` – bridge to the background audio thread
//! - `charconfig` – character bundle loader (JSON)
//! - `frameengine` – frame advancement and sheet cell selection
//! - `gremlinstate` – gremlin states and walk directions
//! - `hotspots` – clickable regions of the frame
//! - `inputsettings` – emote key and hotspot layout
//! - `preferences` – application preferences (INI)
//! - `registry` – animations and sounds per state
//! - `soundengine` – sound requests with cooldown
//! - `statemanager` – the gremlin state machine
//! - `texturestore` – loaded sprite sheets
//! - `timers` – the six gremlin timers
//! - `walkresolver` – walk keys to velocity and direction
//! - `windowstatus` – window placement and focus
//! - `worldtime` – simulation time and delta
pub mod audio;
pub mod charconfig;
pub mod frameengine;
pub mod gremlinstate;
pub mod hotspots;
pub mod inputsettings;
pub mod preferences;
pub mod registry;
pub mod soundengine;
pub mod statemanager;
pub mod texturestore;
pub mod timers;
pub mod walkresolver;
pub mod windowstatus;
pub mod worldtime;
